use std::path::PathBuf;

use clap::{Parser, Subcommand};
use task_cli::model::Filter;
use task_cli::output::Format;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn parse_id(s: &str) -> Result<u64, String> {
    match s.parse::<u64>() {
        Ok(0) => Err("task ids start at 1".into()),
        Ok(id) => Ok(id),
        Err(_) => Err(format!("'{s}' is not a valid task id")),
    }
}

#[derive(Parser)]
#[command(
    name = "task-cli",
    version,
    about = "Track tasks in a local JSON file",
    arg_required_else_help = true
)]
struct Cli {
    /// Task file to read and rewrite
    #[arg(long, global = true, env = "TASK_FILE", default_value = "task.json")]
    file: PathBuf,
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task; all words form the description
    Add {
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        words: Vec<String>,
    },
    /// List tasks, optionally only those with a given status
    List {
        /// `all` or a status such as todo, in-progress, done
        #[arg(default_value = "all")]
        filter: Filter,
    },
    /// Display a single task
    Show {
        #[arg(value_parser = parse_id)]
        id: u64,
    },
    /// Replace a task's description and status
    Update {
        #[arg(value_parser = parse_id)]
        id: u64,
        description: String,
        status: String,
    },
    /// Delete a task by ID
    Delete {
        #[arg(value_parser = parse_id)]
        id: u64,
    },
    /// Give a task a new ID
    Change {
        #[arg(value_parser = parse_id)]
        old_id: u64,
        #[arg(value_parser = parse_id)]
        new_id: u64,
    },
}

fn run(cli: Cli) -> task_cli::error::Result<()> {
    let file = cli.file.as_path();
    let format = cli.format;
    tracing::debug!(file = %file.display(), ?format, "dispatching");

    match cli.command {
        Commands::Add { words } => task_cli::commands::add::run(file, &words, format),
        Commands::List { filter } => task_cli::commands::list::run(file, &filter, format),
        Commands::Show { id } => task_cli::commands::show::run(file, id, format),
        Commands::Update {
            id,
            description,
            status,
        } => task_cli::commands::update::run(file, id, &description, &status, format),
        Commands::Delete { id } => task_cli::commands::delete::run(file, id, format),
        Commands::Change { old_id, new_id } => {
            task_cli::commands::change::run(file, old_id, new_id, format)
        }
    }
}

fn init_tracing() {
    // Opt-in via RUST_LOG; stdout stays reserved for command output.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_collects_all_words() {
        let cli = Cli::try_parse_from(["task-cli", "add", "buy", "-2%", "milk"]).unwrap();
        match cli.command {
            Commands::Add { words } => assert_eq!(words, vec!["buy", "-2%", "milk"]),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn list_defaults_to_all() {
        let cli = Cli::try_parse_from(["task-cli", "list"]).unwrap();
        match cli.command {
            Commands::List { filter } => assert_eq!(filter, Filter::All),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn update_requires_all_operands() {
        assert!(Cli::try_parse_from(["task-cli", "update", "1", "desc"]).is_err());
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert!(Cli::try_parse_from(["task-cli", "delete", "abc"]).is_err());
        assert!(Cli::try_parse_from(["task-cli", "delete", "0"]).is_err());
        assert!(Cli::try_parse_from(["task-cli", "change", "1", "-3"]).is_err());
    }

    #[test]
    fn file_option_is_global() {
        let cli = Cli::try_parse_from(["task-cli", "list", "--file", "other.json"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("other.json"));
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let format = cli.format;
    if let Err(e) = run(cli) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
