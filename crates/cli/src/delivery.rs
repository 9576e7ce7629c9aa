//! Filesystem delivery for exports.
//!
//! Content is staged to a hidden `.part` file next to its destination and
//! renamed into place on trigger. Releasing the handle removes whatever is
//! left of the staging file, so an interrupted export never leaves one
//! behind.

use std::path::{Path, PathBuf};

use docex_core::{DocexError, DownloadTarget, ExportFile, Result};
use tracing::{debug, warn};

pub struct DirectoryTarget {
    out_dir: PathBuf,
}

/// A staged export awaiting its rename.
#[derive(Debug)]
pub struct StagedFile {
    staging: PathBuf,
    destination: PathBuf,
}

impl DirectoryTarget {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn destination_for(&self, file: &ExportFile) -> PathBuf {
        self.out_dir.join(safe_file_name(&file.filename))
    }
}

/// Replace path separators so a document title cannot escape the export dir.
fn safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}

impl DownloadTarget for DirectoryTarget {
    type Handle = StagedFile;

    fn acquire(&mut self, file: &ExportFile) -> Result<StagedFile> {
        std::fs::create_dir_all(&self.out_dir)?;
        let destination = self.destination_for(file);
        let staging = self
            .out_dir
            .join(format!(".{}.part", safe_file_name(&file.filename)));
        if let Err(e) = std::fs::write(&staging, file.content.as_bytes()) {
            // No handle exists yet, so release will never see this file.
            remove_if_present(&staging);
            return Err(e.into());
        }
        debug!(staging = %staging.display(), mime_type = %file.mime_type, "Staged export");
        Ok(StagedFile {
            staging,
            destination,
        })
    }

    fn trigger(&mut self, handle: &StagedFile) -> Result<()> {
        std::fs::rename(&handle.staging, &handle.destination).map_err(|e| {
            DocexError::Download(format!(
                "could not move export to {}: {}",
                handle.destination.display(),
                e
            ))
        })
    }

    fn release(&mut self, handle: StagedFile) {
        remove_if_present(&handle.staging);
    }
}

fn remove_if_present(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "Removed staging file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove staging file"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docex_core::deliver;

    fn file(name: &str) -> ExportFile {
        ExportFile {
            filename: name.to_string(),
            mime_type: "text/csv".to_string(),
            content: "a.b\n\"x\"".to_string(),
        }
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn delivers_into_directory_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let mut target = DirectoryTarget::new(dir.path().join("exports"));

        let delivered = deliver(&mut target, Some(&file("inv.pdf_extracted.csv")))
            .unwrap()
            .unwrap();

        let out = dir.path().join("exports");
        assert_eq!(delivered.bytes, 7);
        assert_eq!(entries(&out), vec!["inv.pdf_extracted.csv"]);
        assert_eq!(
            std::fs::read_to_string(out.join("inv.pdf_extracted.csv")).unwrap(),
            "a.b\n\"x\""
        );
    }

    #[test]
    fn failed_rename_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory at the destination makes the rename fail.
        std::fs::create_dir(dir.path().join("blocked_extracted.json")).unwrap();
        std::fs::write(dir.path().join("blocked_extracted.json").join("keep"), "x").unwrap();

        let mut target = DirectoryTarget::new(dir.path());
        let result = deliver(&mut target, Some(&file("blocked_extracted.json")));

        assert!(result.is_err());
        assert_eq!(entries(dir.path()), vec!["blocked_extracted.json"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_staging_write_leaves_nothing_behind() {
        if !Path::new("/dev/full").exists() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        // Writes through this link fail with ENOSPC after the open succeeds.
        std::os::unix::fs::symlink("/dev/full", dir.path().join(".full_extracted.json.part"))
            .unwrap();

        let mut target = DirectoryTarget::new(dir.path());
        let result = deliver(&mut target, Some(&file("full_extracted.json")));

        assert!(result.is_err());
        assert!(entries(dir.path()).is_empty());
    }

    #[test]
    fn separators_in_titles_stay_inside_out_dir() {
        let target = DirectoryTarget::new("/exports");
        let dest = target.destination_for(&file("../etc/passwd_extracted.json"));
        assert_eq!(dest, PathBuf::from("/exports/.._etc_passwd_extracted.json"));
    }

    #[test]
    fn nothing_to_deliver_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("never");
        let mut target = DirectoryTarget::new(&out);
        assert!(deliver(&mut target, None).unwrap().is_none());
        assert!(!out.exists());
    }
}
