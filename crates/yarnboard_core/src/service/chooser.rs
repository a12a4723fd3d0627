//! Interactive path selection seam.
//!
//! # Responsibility
//! - Model the host's native save/open dialogs as a synchronous trait.
//! - Provide a fixed-path implementation for scripted callers and tests.
//!
//! # Invariants
//! - Choosers return `None` on cancellation and never fail.

use crate::model::board::FileFilter;
use std::path::PathBuf;

/// Host collaborator that asks a human for a board location.
pub trait PathChooser {
    /// Asks for a save destination. `None` means the user cancelled.
    fn choose_save_destination(
        &self,
        default_file_name: &str,
        filter: &FileFilter,
    ) -> Option<PathBuf>;

    /// Asks for an existing board to open. `None` means the user cancelled.
    fn choose_open_source(&self, filters: &[FileFilter]) -> Option<PathBuf>;
}

impl<T: PathChooser + ?Sized> PathChooser for &T {
    fn choose_save_destination(
        &self,
        default_file_name: &str,
        filter: &FileFilter,
    ) -> Option<PathBuf> {
        (**self).choose_save_destination(default_file_name, filter)
    }

    fn choose_open_source(&self, filters: &[FileFilter]) -> Option<PathBuf> {
        (**self).choose_open_source(filters)
    }
}

/// Chooser answering with preconfigured paths instead of a dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedPathChooser {
    save_destination: Option<PathBuf>,
    open_source: Option<PathBuf>,
}

impl FixedPathChooser {
    /// Answers both prompts with `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            save_destination: Some(path.clone()),
            open_source: Some(path),
        }
    }

    /// Answers the save prompt with `path` and cancels the open prompt.
    pub fn saving_to(path: impl Into<PathBuf>) -> Self {
        Self {
            save_destination: Some(path.into()),
            open_source: None,
        }
    }

    /// Answers the open prompt with `path` and cancels the save prompt.
    pub fn opening(path: impl Into<PathBuf>) -> Self {
        Self {
            save_destination: None,
            open_source: Some(path.into()),
        }
    }

    /// Cancels every prompt.
    pub fn cancelling() -> Self {
        Self::default()
    }
}

impl PathChooser for FixedPathChooser {
    fn choose_save_destination(
        &self,
        _default_file_name: &str,
        _filter: &FileFilter,
    ) -> Option<PathBuf> {
        self.save_destination.clone()
    }

    fn choose_open_source(&self, _filters: &[FileFilter]) -> Option<PathBuf> {
        self.open_source.clone()
    }
}
