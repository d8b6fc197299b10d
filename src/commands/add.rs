use std::path::Path;

use crate::error::Result;
use crate::output::{self, Format};
use crate::store::repo::TaskRepo;

/// Words are joined with single spaces to form the description.
pub fn run(task_file: &Path, words: &[String], format: Format) -> Result<()> {
    let repo = TaskRepo::open(task_file);
    let task = repo.add(&words.join(" "))?;
    output::print_confirmation(
        &format!("Task added successfully (ID: {})", task.id),
        &task,
        format,
    )
}
