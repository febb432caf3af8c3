//! Writing annotated files back out

use crate::error::{DocResult, DocdrError};
use crate::models::SourceFile;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Where rendered files go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Overwrite the file at its original path
    #[default]
    InPlace,
    /// Print the rendered file and leave the disk untouched
    Stdout,
}

/// Renders files and writes them according to a [`WriteMode`]
pub struct SourceWriter<W: Write> {
    mode: WriteMode,
    out: W,
}

impl SourceWriter<std::io::Stdout> {
    pub fn new(mode: WriteMode) -> Self {
        Self::with_output(mode, std::io::stdout())
    }
}

impl<W: Write> SourceWriter<W> {
    /// Writer whose `Stdout` mode prints to `out`
    pub fn with_output(mode: WriteMode, out: W) -> Self {
        Self { mode, out }
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Render `file` and write it out
    pub fn write(&mut self, file: &SourceFile) -> DocResult<()> {
        let rendered = file.render();

        match self.mode {
            WriteMode::InPlace => {
                std::fs::write(&file.path, rendered.as_bytes()).map_err(|source| {
                    DocdrError::Write {
                        path: file.path.clone(),
                        source,
                    }
                })?;
                info!("Wrote {}", file.path.display());
            }
            WriteMode::Stdout => {
                self.out
                    .write_all(rendered.as_bytes())
                    .and_then(|_| self.out.flush())
                    .map_err(|source| DocdrError::Write {
                        path: PathBuf::from("<stdout>"),
                        source,
                    })?;
            }
        }

        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
