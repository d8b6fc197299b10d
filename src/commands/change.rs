use std::path::Path;

use crate::error::Result;
use crate::output::Format;
use crate::store::repo::{Reassigned, TaskRepo};

pub fn run(task_file: &Path, old_id: u64, new_id: u64, format: Format) -> Result<()> {
    let repo = TaskRepo::open(task_file);
    let outcome = repo.reassign_id(old_id, new_id)?;

    if format == Format::Json {
        let (changed, task) = match &outcome {
            Reassigned::Changed(task) => (true, Some(task)),
            Reassigned::Unchanged(task) => (false, Some(task)),
            Reassigned::NotFound => (false, None),
        };
        println!(
            "{}",
            serde_json::json!({
                "changed": changed,
                "old_id": old_id,
                "new_id": new_id,
                "task": task,
            })
        );
        return Ok(());
    }

    match outcome {
        Reassigned::Changed(_) => println!("Task id changed: {old_id} -> {new_id}"),
        Reassigned::Unchanged(_) => println!("Task id {old_id} unchanged"),
        Reassigned::NotFound => println!("No task with id {old_id}; nothing changed"),
    }
    Ok(())
}
