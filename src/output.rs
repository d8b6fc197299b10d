use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use colored::{ColoredString, Colorize};

use crate::error::Result;
use crate::model::{STATUS_DONE, STATUS_IN_PROGRESS, STATUS_TODO, Task};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Pretty,
    Minimal,
    Json,
}

fn paint_status(status: &str) -> ColoredString {
    match status {
        STATUS_TODO => status.yellow(),
        STATUS_IN_PROGRESS => status.cyan(),
        STATUS_DONE => status.green(),
        other => other.normal(),
    }
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).to_rfc2822()
}

pub fn render_task(task: &Task) -> String {
    format!(
        "ID: {}\nDescription: {}\nStatus: {}\nCreated: {}\nUpdated: {}\n",
        task.id,
        task.description,
        paint_status(&task.status),
        timestamp(&task.created_at),
        timestamp(&task.updated_at),
    )
}

pub fn render_row(task: &Task) -> String {
    format!(
        "{:>4} {:30} {:12} {}",
        task.id,
        truncate_description(&task.description, 30),
        task.status,
        task.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
    )
}

pub fn truncate_description(description: &str, max_len: usize) -> String {
    if description.chars().count() > max_len {
        let truncated: String = description.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        description.to_string()
    }
}

pub fn print_task(task: &Task, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(task)?),
        Format::Pretty => print!("{}", render_task(task)),
        Format::Minimal => println!("{}", render_row(task)),
    }
    Ok(())
}

pub fn print_tasks(tasks: &[Task], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(tasks)?),
        Format::Pretty => {
            if tasks.is_empty() {
                println!("No tasks found");
            }
            for task in tasks {
                print_task(task, Format::Pretty)?;
                println!();
            }
        }
        Format::Minimal => {
            println!("{:>4} {:30} {:12} UPDATED", "ID", "DESCRIPTION", "STATUS");
            println!("{}", "-".repeat(64));
            for task in tasks {
                println!("{}", render_row(task));
            }
        }
    }
    Ok(())
}

/// Human formats print `message`; JSON prints the task itself.
pub fn print_confirmation(message: &str, task: &Task, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(task)?),
        Format::Pretty | Format::Minimal => println!("{message}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_block_lists_every_field() {
        let task = Task::new(4, "call plumber".into());
        let text = render_task(&task);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID: 4");
        assert_eq!(lines[1], "Description: call plumber");
        assert!(lines[2].starts_with("Status: "));
        assert!(lines[2].contains("todo"));
        assert!(lines[3].starts_with("Created: "));
        assert!(lines[4].starts_with("Updated: "));
    }

    #[test]
    fn row_truncates_long_descriptions() {
        let task = Task::new(12, "a".repeat(40));
        let row = render_row(&task);
        assert!(row.starts_with("  12 "));
        assert!(row.contains(&format!("{}...", "a".repeat(27))));
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_description("ééééé", 5), "ééééé");
        assert_eq!(truncate_description("éééééé", 5), "éé...");
    }
}
