//! Error types shared by the loader, workflow and writer.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while scanning or rewriting a source tree
#[derive(Error, Debug)]
pub enum DocdrError {
    #[error("{}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("No editor configured: set $EDITOR or [editor] command in docdr.toml")]
    EditorNotConfigured,

    #[error("Failed to launch editor `{program}`: {source}")]
    EditorLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor `{program}` exited with {status}")]
    EditorExit { program: String, status: ExitStatus },

    #[error("Failed to stage editor buffer: {0}")]
    Stage(#[source] std::io::Error),

    #[error("Terminal I/O failed: {0}")]
    Prompt(#[source] std::io::Error),
}

pub type DocResult<T> = Result<T, DocdrError>;
