use std::path::Path;

use crate::error::Result;
use crate::output::{self, Format};
use crate::store::repo::TaskRepo;

pub fn run(
    task_file: &Path,
    id: u64,
    description: &str,
    status: &str,
    format: Format,
) -> Result<()> {
    let repo = TaskRepo::open(task_file);
    let task = repo.update(id, description, status)?;
    output::print_confirmation(&format!("Task {id} updated successfully"), &task, format)
}
