use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task with id {0} not found")]
    TaskNotFound(u64),

    #[error("task id {0} is already used by another task")]
    TaskIdInUse(u64),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("locked by another process: {0}")]
    Locked(String),

    #[error("corrupt task file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TaskNotFound(_) => "task_not_found",
            Self::TaskIdInUse(_) => "task_id_in_use",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Locked(_) => "locked",
            Self::Parse { .. } => "parse_error",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
