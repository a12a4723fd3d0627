//! Best-effort rewriting of `photos[].path` against a save directory.
//!
//! # Responsibility
//! - Store absolute photo paths that live under the save directory as
//!   relative paths.
//! - Recover stale relative paths when the image sits next to the board.
//!
//! # Invariants
//! - Never fails and never aborts early; one bad photo does not affect others.
//! - Only string `path` values of object entries in a `photos` array change.
//! - The absolute rule is checked before the basename rule.
//! - Photo paths are never logged, only the photo index and a reason.

use log::{debug, info};
use serde_json::Value;
use std::path::Path;

const PHOTOS_KEY: &str = "photos";
const PATH_KEY: &str = "path";

/// Counts of what normalization did to one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Photos whose `path` was rewritten.
    pub rewritten: usize,
    /// Photos with a usable `path` left untouched because resolution failed.
    pub skipped: usize,
}

/// Why a single photo path could not be rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    Unresolvable,
    OutsideBase,
    NotUtf8,
}

impl SkipReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::Unresolvable => "unresolvable",
            Self::OutsideBase => "outside_base",
            Self::NotUtf8 => "not_utf8",
        }
    }
}

enum PathDecision {
    Keep,
    Rewrite(String),
    Skip(SkipReason),
}

/// Rewrites photo paths in `document` relative to `base_dir`.
///
/// `base_dir` is the directory that will contain the saved board.
///
/// # Side effects
/// - Filesystem existence checks and canonicalization only.
pub fn normalize_photo_paths(document: &mut Value, base_dir: &Path) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    let Some(photos) = document
        .as_object_mut()
        .and_then(|object| object.get_mut(PHOTOS_KEY))
        .and_then(Value::as_array_mut)
    else {
        return report;
    };

    for (index, photo) in photos.iter_mut().enumerate() {
        let Some(slot) = photo
            .as_object_mut()
            .and_then(|object| object.get_mut(PATH_KEY))
        else {
            continue;
        };
        let Some(raw) = slot.as_str().filter(|raw| !raw.is_empty()) else {
            continue;
        };

        match decide(raw, base_dir) {
            PathDecision::Keep => {}
            PathDecision::Rewrite(rewritten) => {
                *slot = Value::String(rewritten);
                report.rewritten += 1;
            }
            PathDecision::Skip(reason) => {
                debug!(
                    "event=path_normalize module=normalize status=skipped photo_index={} reason={}",
                    index,
                    reason.as_str()
                );
                report.skipped += 1;
            }
        }
    }

    if report.rewritten > 0 || report.skipped > 0 {
        info!(
            "event=path_normalize module=normalize status=ok rewritten={} skipped={}",
            report.rewritten, report.skipped
        );
    }

    report
}

fn decide(raw: &str, base_dir: &Path) -> PathDecision {
    let path = Path::new(raw);
    if path.is_absolute() {
        relative_inside_base(path, base_dir)
    } else {
        recover_basename(path, base_dir)
    }
}

fn relative_inside_base(path: &Path, base_dir: &Path) -> PathDecision {
    let (Ok(resolved), Ok(resolved_base)) = (path.canonicalize(), base_dir.canonicalize()) else {
        return PathDecision::Skip(SkipReason::Unresolvable);
    };

    let Ok(relative) = resolved.strip_prefix(&resolved_base) else {
        return PathDecision::Skip(SkipReason::OutsideBase);
    };
    // The base directory itself is not "inside" the base.
    if relative.as_os_str().is_empty() {
        return PathDecision::Skip(SkipReason::OutsideBase);
    }

    match relative.to_str() {
        Some(relative) => PathDecision::Rewrite(relative.to_string()),
        None => PathDecision::Skip(SkipReason::NotUtf8),
    }
}

fn recover_basename(path: &Path, base_dir: &Path) -> PathDecision {
    if base_dir.join(path).exists() {
        return PathDecision::Keep;
    }

    let Some(file_name) = path.file_name() else {
        return PathDecision::Skip(SkipReason::Unresolvable);
    };
    if !base_dir.join(file_name).exists() {
        return PathDecision::Skip(SkipReason::Unresolvable);
    }

    match file_name.to_str() {
        Some(name) => PathDecision::Rewrite(name.to_string()),
        None => PathDecision::Skip(SkipReason::NotUtf8),
    }
}
