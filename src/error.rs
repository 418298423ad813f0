// error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a run. The `Display` text is what lands in the log.
#[derive(Debug, Error)]
pub enum DumperError {
    #[error("Error: All fields must be filled!")]
    MissingFields,

    #[error("Error: Executable file not found at '{}'", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error("Error: Metadata file not found at '{}'", .0.display())]
    MetadataNotFound(PathBuf),

    #[error("Error: '{tool}' command not found. Please ensure it's installed and in your system's PATH.")]
    ToolNotFound { tool: String },

    #[error("{}", exit_status_message(.0))]
    ExitStatus(Option<i32>),

    #[error("Error: creating output directory '{}': {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("An unexpected error occurred: {0}")]
    Unexpected(#[source] io::Error),
}

fn exit_status_message(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("Command failed with exit code {}", code),
        None => "Command was terminated before reporting an exit code".to_string(),
    }
}

pub type DumperResult<T> = Result<T, DumperError>;
