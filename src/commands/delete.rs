use std::path::Path;

use crate::error::Result;
use crate::output::{self, Format};
use crate::store::repo::TaskRepo;

pub fn run(task_file: &Path, id: u64, format: Format) -> Result<()> {
    let repo = TaskRepo::open(task_file);
    let task = repo.delete(id)?;
    output::print_confirmation(&format!("Task {id} deleted successfully"), &task, format)
}
