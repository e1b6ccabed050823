// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local fallback store — composites written under one output directory, plus
// the cleanup operation that deletes them again.

use std::path::{Component, Path, PathBuf};

use logoplace_core::error::{LogoplaceError, Result};
use serde::Serialize;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Writes composites as `output_<8 hex>.png` inside `output_dir`.
#[derive(Debug, Clone)]
pub struct LocalStore {
    output_dir: PathBuf,
}

/// Outcome of a cleanup request; one entry per requested file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub deleted: Vec<String>,
    pub errors: Vec<String>,
}

impl LocalStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `png` to a fresh file and return its path as the locator.
    #[instrument(skip(self, png), fields(dir = %self.output_dir.display(), len = png.len()))]
    pub fn save_png(&self, png: &[u8]) -> Result<String> {
        std::fs::create_dir_all(&self.output_dir)?;
        let id = Uuid::new_v4().simple().to_string();
        let path = self.output_dir.join(format!("output_{}.png", &id[..8]));
        std::fs::write(&path, png)
            .map_err(|e| LogoplaceError::Persistence(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "Composite written locally");
        Ok(path.to_string_lossy().into_owned())
    }

    /// Whether `path` names something inside the output directory.
    ///
    /// Purely lexical; parent-directory components are rejected outright.
    pub fn owns(&self, path: &Path) -> bool {
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return false;
        }
        path.starts_with(&self.output_dir) && path != self.output_dir.as_path()
    }

    /// Delete each of `files` that exists and lives under the output directory.
    pub fn cleanup<S: AsRef<str>>(&self, files: &[S]) -> CleanupReport {
        let mut report = CleanupReport::default();
        for file in files {
            let file = file.as_ref();
            let path = Path::new(file);
            if !self.owns(path) || !path.is_file() {
                report
                    .errors
                    .push(format!("File not found or invalid path: {file}"));
                continue;
            }
            match std::fs::remove_file(path) {
                Ok(()) => report.deleted.push(file.to_string()),
                Err(e) => {
                    warn!(file, error = %e, "Cleanup failed");
                    report.errors.push(format!("Error deleting {file}: {e}"));
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_names_file_in_output_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::new(dir.path().join("outputs"));
        let locator = store.save_png(b"\x89PNG").expect("save");

        let path = Path::new(&locator);
        assert!(path.is_file());
        assert!(store.owns(path));
        let name = path.file_name().and_then(|n| n.to_str()).expect("name");
        assert!(name.starts_with("output_") && name.ends_with(".png"));
        assert_eq!(name.len(), "output_".len() + 8 + ".png".len());
    }

    #[test]
    fn each_save_gets_its_own_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::new(dir.path());
        let a = store.save_png(b"a").expect("save");
        let b = store.save_png(b"b").expect("save");
        assert_ne!(a, b);
    }

    #[test]
    fn ownership_is_lexical_and_strict() {
        let store = LocalStore::new("outputs");
        assert!(store.owns(Path::new("outputs/output_1234abcd.png")));
        assert!(!store.owns(Path::new("outputs")));
        assert!(!store.owns(Path::new("outputs/../Cargo.toml")));
        assert!(!store.owns(Path::new("outputs-old/output.png")));
        assert!(!store.owns(Path::new("/etc/passwd")));
    }

    #[test]
    fn cleanup_deletes_only_owned_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::new(dir.path().join("outputs"));
        let kept = dir.path().join("keep.png");
        std::fs::write(&kept, b"x").expect("write");
        let written = store.save_png(b"x").expect("save");
        let missing = store.output_dir().join("output_00000000.png");

        let kept_str = kept.to_string_lossy().into_owned();
        let missing_str = missing.to_string_lossy().into_owned();
        let report = store.cleanup(&[written.clone(), kept_str.clone(), missing_str.clone()]);

        assert_eq!(report.deleted, [written.clone()]);
        assert_eq!(
            report.errors,
            [
                format!("File not found or invalid path: {kept_str}"),
                format!("File not found or invalid path: {missing_str}"),
            ]
        );
        assert!(!Path::new(&written).exists());
        assert!(kept.exists());
    }
}
