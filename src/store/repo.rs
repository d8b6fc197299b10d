use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, TaskError};
use crate::model::{Filter, Task};
use crate::store::codec::{Storage, TaskFile};
use crate::store::lock::{self, DEFAULT_LOCK_TIMEOUT, LockGuard};

/// Outcome of [`TaskRepo::reassign_id`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reassigned {
    Changed(Task),
    /// The new id equals the old one; nothing was written.
    Unchanged(Task),
    /// No task carries the old id; nothing was written.
    NotFound,
}

/// Task repository over one backing store.
///
/// Mutations run a full cycle under the sidecar lock: load the whole
/// collection, apply the change in memory, rewrite the whole file. Reads take
/// no lock and create nothing; saves replace the file by rename, so a reader
/// sees either the old or the new collection.
pub struct TaskRepo<S = TaskFile> {
    storage: S,
    lock_path: PathBuf,
    lock_timeout: Duration,
}

impl TaskRepo<TaskFile> {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lock_path = lock_path_for(&path);
        Self::with_storage(TaskFile::new(path), lock_path)
    }

    pub fn path(&self) -> &Path {
        self.storage.path()
    }
}

impl<S: Storage> TaskRepo<S> {
    pub fn with_storage(storage: S, lock_path: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            lock_path: lock_path.into(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    fn lock(&self) -> Result<LockGuard> {
        lock::acquire_lock(&self.lock_path, self.lock_timeout)
    }

    /// Run `f` over the loaded collection and save it afterwards.
    fn mutate<T>(&self, f: impl FnOnce(&mut Vec<Task>) -> Result<T>) -> Result<T> {
        let _guard = self.lock()?;
        let mut tasks = self.storage.load()?;
        let out = f(&mut tasks)?;
        self.storage.save(&tasks)?;
        Ok(out)
    }

    pub fn all(&self) -> Result<Vec<Task>> {
        self.storage.load()
    }

    /// Append a `todo` task. Its id is one past the highest id in the collection.
    pub fn add(&self, description: &str) -> Result<Task> {
        let description = non_empty_description(description)?;
        self.mutate(|tasks| {
            let id = next_id(tasks)?;
            let task = Task::new(id, description);
            tasks.push(task.clone());
            tracing::debug!(id, "added task");
            Ok(task)
        })
    }

    /// Tasks matching `filter`, in storage order.
    pub fn list(&self, filter: &Filter) -> Result<Vec<Task>> {
        let mut tasks = self.all()?;
        tasks.retain(|t| filter.matches(t));
        Ok(tasks)
    }

    pub fn get(&self, id: u64) -> Result<Task> {
        self.all()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(TaskError::TaskNotFound(id))
    }

    /// Replace description and status. The status is stored verbatim.
    pub fn update(&self, id: u64, description: &str, status: &str) -> Result<Task> {
        let description = non_empty_description(description)?;
        self.mutate(|tasks| {
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(TaskError::TaskNotFound(id))?;
            task.description = description;
            task.status = status.to_string();
            task.touch();
            tracing::debug!(id, status = %task.status, "updated task");
            Ok(task.clone())
        })
    }

    pub fn delete(&self, id: u64) -> Result<Task> {
        self.mutate(|tasks| {
            let pos = tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or(TaskError::TaskNotFound(id))?;
            let removed = tasks.remove(pos);
            tracing::debug!(id, remaining = tasks.len(), "deleted task");
            Ok(removed)
        })
    }

    /// Move the task at `old_id` to `new_id` and refresh its `updated_at`.
    ///
    /// A missing `old_id` is not an error: the collection is left untouched and
    /// [`Reassigned::NotFound`] is returned. A `new_id` already held by another
    /// task is rejected.
    pub fn reassign_id(&self, old_id: u64, new_id: u64) -> Result<Reassigned> {
        let _guard = self.lock()?;
        let mut tasks = self.storage.load()?;

        let Some(pos) = tasks.iter().position(|t| t.id == old_id) else {
            tracing::debug!(old_id, "no task to reassign");
            return Ok(Reassigned::NotFound);
        };
        if old_id == new_id {
            return Ok(Reassigned::Unchanged(tasks.swap_remove(pos)));
        }
        if tasks.iter().any(|t| t.id == new_id) {
            return Err(TaskError::TaskIdInUse(new_id));
        }

        let task = &mut tasks[pos];
        task.id = new_id;
        task.touch();
        let changed = task.clone();
        self.storage.save(&tasks)?;
        tracing::debug!(old_id, new_id, "reassigned task id");
        Ok(Reassigned::Changed(changed))
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("task.json"));
    name.push(".lock");
    path.with_file_name(name)
}

fn next_id(tasks: &[Task]) -> Result<u64> {
    let max = tasks.iter().map(|t| t.id).max().unwrap_or(0);
    max.checked_add(1).ok_or_else(|| {
        TaskError::InvalidArgument(format!("no task id left above {max}; reassign it lower first"))
    })
}

fn non_empty_description(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskError::InvalidArgument("description cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}
