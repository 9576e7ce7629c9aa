//! Scoped delivery of exported files.
//!
//! Delivering an export means acquiring a transient handle from some
//! target (a staging file, an object URL, a clipboard slot), triggering
//! the download through it, and releasing it. [`ScopedDownload`] owns the
//! handle and releases it when dropped, so release happens on success, on
//! a failed trigger, and on every early return.

use tracing::{debug, info};

use crate::error::{DocexError, Result};
use crate::export::ExportFile;

/// Something an [`ExportFile`] can be delivered to.
pub trait DownloadTarget {
    type Handle;

    /// Stage `file` and hand back a handle to it.
    fn acquire(&mut self, file: &ExportFile) -> Result<Self::Handle>;

    /// Complete the download for a staged handle.
    fn trigger(&mut self, handle: &Self::Handle) -> Result<()>;

    /// Free the handle. Called exactly once per acquired handle.
    fn release(&mut self, handle: Self::Handle);
}

/// Guard around an acquired handle; releases it on drop.
pub struct ScopedDownload<'a, T: DownloadTarget> {
    target: &'a mut T,
    handle: Option<T::Handle>,
}

impl<'a, T: DownloadTarget> ScopedDownload<'a, T> {
    pub fn acquire(target: &'a mut T, file: &ExportFile) -> Result<Self> {
        let handle = target.acquire(file)?;
        Ok(Self {
            target,
            handle: Some(handle),
        })
    }

    pub fn trigger(&mut self) -> Result<()> {
        match self.handle.as_ref() {
            Some(handle) => self.target.trigger(handle),
            None => Err(DocexError::Download("handle already released".to_string())),
        }
    }
}

impl<T: DownloadTarget> Drop for ScopedDownload<'_, T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.target.release(handle);
        }
    }
}

/// What a successful delivery produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    pub filename: String,
    pub mime_type: String,
    pub bytes: usize,
}

/// Deliver `file` to `target`.
///
/// `None` (nothing to export) returns `Ok(None)` without touching the target.
pub fn deliver<T: DownloadTarget>(target: &mut T, file: Option<&ExportFile>) -> Result<Option<Delivered>> {
    let Some(file) = file else {
        debug!("Nothing to export; skipping delivery");
        return Ok(None);
    };

    let mut download = ScopedDownload::acquire(target, file)?;
    download.trigger()?;

    info!(filename = %file.filename, bytes = file.content.len(), "Export delivered");
    Ok(Some(Delivered {
        filename: file.filename.clone(),
        mime_type: file.mime_type.clone(),
        bytes: file.content.len(),
    }))
}
