use std::path::Path;

use crate::error::Result;
use crate::model::Filter;
use crate::output::{self, Format};
use crate::store::repo::TaskRepo;

pub fn run(task_file: &Path, filter: &Filter, format: Format) -> Result<()> {
    let repo = TaskRepo::open(task_file);
    let tasks = repo.list(filter)?;
    output::print_tasks(&tasks, format)
}
