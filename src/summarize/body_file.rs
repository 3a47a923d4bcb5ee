//! Transient body-text storage for one summarization call.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::error::Result;

static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// A transient file holding one request's body text.
///
/// The name derives from a millisecond timestamp, the process id, and a
/// process-wide counter, so concurrent requests never collide and no
/// locking is needed. The file is removed when the guard drops — on every
/// exit path, success or failure. A failed removal is logged and never
/// propagated; it does not invalidate an otherwise-successful call.
#[derive(Debug)]
pub struct BodyFile {
    path: PathBuf,
}

impl BodyFile {
    /// Write `body_text` to a fresh uniquely-named file under `dir`.
    pub fn create(dir: &Path, body_text: &str) -> Result<Self> {
        let name = format!(
            "body_text_{}_{}_{}.txt",
            Utc::now().timestamp_millis(),
            std::process::id(),
            NEXT_SEQ.fetch_add(1, Ordering::Relaxed),
        );
        let path = dir.join(name);
        fs::write(&path, body_text)?;
        Ok(Self { path })
    }

    /// Location handed to the collaborator.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BodyFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            log::warn!(
                "failed to remove transient body file {}: {}",
                self.path.display(),
                e
            );
        }
    }
}
