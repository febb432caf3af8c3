//! External editor integration
//!
//! The editor is an interactive program that takes over the terminal until
//! the operator closes it. Buffers are staged in temp files that are removed
//! as soon as the edited text has been read back, whatever the outcome.

use crate::error::{DocResult, DocdrError};
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Capability to hand text or files to an operator for editing
pub trait Editor {
    /// Open `contents` in the editor and return the text as saved
    fn edit_buffer(&mut self, contents: &str) -> DocResult<String>;

    /// Open `path` positioned at `line` (1-based; 0 means no position)
    fn open_at(&mut self, path: &Path, line: usize) -> DocResult<()>;
}

/// Editor launched as a child process, e.g. from `$EDITOR`
#[derive(Debug, Clone, Default)]
pub struct ExternalEditor {
    command: Option<String>,
}

impl ExternalEditor {
    /// `command` is split on whitespace: program first, then fixed arguments
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    fn resolve(&self) -> DocResult<(String, Vec<String>)> {
        let mut parts = self
            .command
            .as_deref()
            .unwrap_or("")
            .split_whitespace()
            .map(str::to_string);
        let program = parts.next().ok_or(DocdrError::EditorNotConfigured)?;
        Ok((program, parts.collect()))
    }

    /// Run the editor on `path` and wait for it to exit
    fn run(&self, path: &Path, line: usize) -> DocResult<()> {
        let (program, fixed) = self.resolve()?;
        let args = editor_args(&program, path, line);

        debug!("Launching {} {:?} {:?}", program, fixed, args);

        let status = Command::new(&program)
            .args(&fixed)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| DocdrError::EditorLaunch {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(DocdrError::EditorExit { program, status });
        }
        Ok(())
    }
}

impl Editor for ExternalEditor {
    fn edit_buffer(&mut self, contents: &str) -> DocResult<String> {
        let mut staged = tempfile::Builder::new()
            .prefix("docdr-")
            .suffix(".go")
            .tempfile()
            .map_err(DocdrError::Stage)?;
        staged
            .write_all(contents.as_bytes())
            .and_then(|_| staged.flush())
            .map_err(DocdrError::Stage)?;

        self.run(staged.path(), 0)?;

        // Read by path: editors that save via rename replace the inode
        std::fs::read_to_string(staged.path()).map_err(DocdrError::Stage)
    }

    fn open_at(&mut self, path: &Path, line: usize) -> DocResult<()> {
        self.run(path, line)
    }
}

/// Arguments passed after the configured command
pub fn editor_args(program: &str, path: &Path, line: usize) -> Vec<OsString> {
    let mut args = Vec::new();

    if line > 0 {
        args.push(OsString::from(format!("+{}", line)));
    }

    let name = Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(program);
    if name == "gvim" {
        // stay in the foreground so we can wait for it
        args.push(OsString::from("-f"));
    }

    args.push(path.as_os_str().to_os_string());
    args
}
