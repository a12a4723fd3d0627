//! Path chooser backed by command-line arguments, with native dialogs as a
//! fallback when built with the `native-dialogs` feature.

use crate::config::absolutize;
use std::path::PathBuf;
use yarnboard_core::{FileFilter, PathChooser};

#[derive(Debug, Clone, Default)]
pub struct CliChooser {
    path: Option<PathBuf>,
}

impl CliChooser {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    fn given(&self) -> Option<PathBuf> {
        let path = self.path.as_deref()?;
        absolutize(path).ok()
    }
}

impl PathChooser for CliChooser {
    fn choose_save_destination(
        &self,
        default_file_name: &str,
        filter: &FileFilter,
    ) -> Option<PathBuf> {
        self.given()
            .or_else(|| dialog::save_file(default_file_name, filter))
    }

    fn choose_open_source(&self, filters: &[FileFilter]) -> Option<PathBuf> {
        self.given().or_else(|| dialog::pick_file(filters))
    }
}

#[cfg(feature = "native-dialogs")]
mod dialog {
    use std::path::PathBuf;
    use yarnboard_core::FileFilter;

    fn with_filter(dialog: rfd::FileDialog, filter: &FileFilter) -> rfd::FileDialog {
        dialog.add_filter(filter.name.as_str(), filter.extensions.as_slice())
    }

    pub fn save_file(default_file_name: &str, filter: &FileFilter) -> Option<PathBuf> {
        with_filter(rfd::FileDialog::new(), filter)
            .set_file_name(default_file_name)
            .save_file()
    }

    pub fn pick_file(filters: &[FileFilter]) -> Option<PathBuf> {
        filters
            .iter()
            .fold(rfd::FileDialog::new(), with_filter)
            .pick_file()
    }
}

#[cfg(not(feature = "native-dialogs"))]
mod dialog {
    use log::warn;
    use std::path::PathBuf;
    use yarnboard_core::FileFilter;

    pub fn save_file(_default_file_name: &str, _filter: &FileFilter) -> Option<PathBuf> {
        warn!("event=choose_path module=cli status=cancelled reason=no_dialog_support");
        None
    }

    pub fn pick_file(_filters: &[FileFilter]) -> Option<PathBuf> {
        warn!("event=choose_path module=cli status=cancelled reason=no_dialog_support");
        None
    }
}
