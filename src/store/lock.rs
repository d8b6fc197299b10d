use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;

use crate::error::{Result, TaskError};

pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(2);

const RETRY_INTERVAL: Duration = Duration::from_millis(25);

/// Exclusive lock on a sidecar file. Released when dropped.
#[derive(Debug)]
pub struct LockGuard {
    file: File,
    path: PathBuf,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        tracing::trace!(path = %self.path.display(), "lock released");
    }
}

/// Acquire an exclusive lock on `path`, retrying until `timeout` elapses.
/// The lock file (and its directory) is created if missing and left in place afterwards.
pub fn acquire_lock(path: &Path, timeout: Duration) -> Result<LockGuard> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;

    let start = Instant::now();
    loop {
        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::trace!(path = %path.display(), "lock acquired");
                return Ok(LockGuard {
                    file,
                    path: path.to_path_buf(),
                });
            }
            Err(e) if is_contended(&e) => {
                if start.elapsed() >= timeout {
                    return Err(TaskError::Locked(path.display().to_string()));
                }
                thread::sleep(RETRY_INTERVAL);
            }
            Err(e) => return Err(TaskError::Io(e)),
        }
    }
}

fn is_contended(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::WouldBlock {
        return true;
    }
    // Sharing and lock violations
    #[cfg(windows)]
    {
        matches!(err.raw_os_error(), Some(32) | Some(33))
    }
    #[cfg(not(windows))]
    {
        false
    }
}
