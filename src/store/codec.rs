use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;

use crate::error::{Result, TaskError};
use crate::model::Task;

const INDENT: &[u8] = b" ";

/// Whole-collection persistence used by the repository.
pub trait Storage {
    fn load(&self) -> Result<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
}

/// JSON codec for the whole task collection, bound to one file.
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection in file order. A missing or blank file is an empty collection.
    pub fn load(&self) -> Result<Vec<Task>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "task file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let tasks: Vec<Task> = serde_json::from_slice(&data).map_err(|source| TaskError::Parse {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Rewrite the whole file: serialize to a sibling temp file, then rename over the target.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let bytes = encode(tasks)?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        // Keep the target's mode; the temp file starts out 0600.
        let perms = match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => new_file_permissions(),
            Err(e) => return Err(e.into()),
        };

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&bytes)?;
        if let Some(perms) = perms {
            tmp.as_file().set_permissions(perms)?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| TaskError::Io(e.error))?;

        tracing::debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

impl Storage for TaskFile {
    fn load(&self) -> Result<Vec<Task>> {
        TaskFile::load(self)
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        TaskFile::save(self, tasks)
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

/// Pretty JSON array with a one-space indent.
pub fn encode(tasks: &[Task]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    tasks.serialize(&mut ser)?;
    Ok(buf)
}
