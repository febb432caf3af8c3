//! Interactive annotation of undocumented exported functions
//!
//! Files of the selected package are visited in path order and candidates in
//! source order. For every candidate a [`DecisionSource`] picks what happens:
//!
//! ```text
//! Scanning -> AwaitingDecision -> Skipped ----------> AwaitingDecision (next) | Scanning
//!                              -> Editing ----------> AwaitingDecision (next) | Scanning
//!                              -> ViewingSource ----> AwaitingDecision (same candidate)
//!          -> Done
//! ```
//!
//! Files that received at least one comment are handed to the
//! [`SourceWriter`] once their last candidate has been visited.

pub mod prompt;
pub mod synth;

use crate::editor::Editor;
use crate::error::{DocResult, DocdrError};
use crate::models::{Candidate, Package, SourceFile};
use crate::parsers::go;
use crate::writer::{SourceWriter, WriteMode};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use prompt::TerminalPrompt;
pub use synth::synthesize;

/// Sentinel separating the comment from the function in the edit buffer
pub const EDIT_MARKER: &str = "^^^^ ADD COMMENT ABOVE ---- DO NOT EDIT BELOW THIS LINE ----";

/// What to do with a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Leave it undocumented
    Skip,
    /// Use this text as the comment
    Text(String),
    /// Write the comment in the external editor
    Edit,
    /// Look at the declaration in its file, then decide again
    OpenSource,
    /// Stop visiting candidates
    Quit,
}

/// Decision boundary between the traversal and the operator
pub trait DecisionSource {
    fn decide(&mut self, candidate: &Candidate) -> DocResult<Decision>;
}

/// Workflow states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Scanning,
    AwaitingDecision,
    Editing,
    ViewingSource,
    Skipped,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Annotated,
    Skipped,
    Viewed,
    Quit,
}

/// Result of an annotation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub annotated: usize,
    pub skipped: usize,
    /// Files written, in write order
    pub written: Vec<PathBuf>,
    /// The operator stopped before every candidate was visited
    pub quit: bool,
}

impl AnnotationSummary {
    /// Candidates that received a final decision
    pub fn visited(&self) -> usize {
        self.annotated + self.skipped
    }

    fn record_write(&mut self, path: &Path) {
        if !self.written.iter().any(|p| p == path) {
            self.written.push(path.to_path_buf());
        }
    }
}

/// Buffer handed to the editor for `candidate`
pub fn edit_buffer(candidate: &Candidate) -> String {
    format!("{}\n{}\n", EDIT_MARKER, candidate.source_text)
}

/// Text above the sentinel, or `None` if the operator removed it
pub fn extract_comment(edited: &str) -> Option<&str> {
    edited.find(EDIT_MARKER).map(|idx| &edited[..idx])
}

/// Drives the decision loop over one package
pub struct Annotator<D, E, W: Write> {
    decisions: D,
    editor: E,
    writer: SourceWriter<W>,
    state: State,
}

impl<D: DecisionSource, E: Editor, W: Write> Annotator<D, E, W> {
    pub fn new(decisions: D, editor: E, writer: SourceWriter<W>) -> Self {
        Self {
            decisions,
            editor,
            writer,
            state: State::Scanning,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn decisions(&self) -> &D {
        &self.decisions
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn into_writer(self) -> SourceWriter<W> {
        self.writer
    }

    fn transition(&mut self, next: State) {
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Visit every candidate of `package` and write the files that changed
    pub fn annotate_package(&mut self, package: &mut Package) -> DocResult<AnnotationSummary> {
        let mut summary = AnnotationSummary::default();
        let paths: Vec<PathBuf> = package.files.keys().cloned().collect();

        for path in paths {
            let Some(file) = package.files.get_mut(&path) else {
                continue;
            };

            self.transition(State::Scanning);
            let quit = self.annotate_file(file, &mut summary)?;

            if file.is_modified() {
                self.writer.write(file)?;
                summary.record_write(&path);
            }

            if quit {
                summary.quit = true;
                break;
            }
        }

        self.transition(State::Done);
        info!(
            "Package {}: {} annotated, {} skipped, {} files written",
            package.name,
            summary.annotated,
            summary.skipped,
            summary.written.len()
        );
        Ok(summary)
    }

    /// Returns true when the operator quit
    fn annotate_file(
        &mut self,
        file: &mut SourceFile,
        summary: &mut AnnotationSummary,
    ) -> DocResult<bool> {
        let mut visited = HashSet::new();

        loop {
            let Some(candidate) = file.candidates().find(|c| !visited.contains(&c.key())) else {
                return Ok(false);
            };

            match self.resolve(file, &candidate, summary)? {
                Outcome::Annotated => {
                    summary.annotated += 1;
                    visited.insert(candidate.key());
                }
                Outcome::Skipped => {
                    summary.skipped += 1;
                    visited.insert(candidate.key());
                }
                Outcome::Viewed => {}
                Outcome::Quit => return Ok(true),
            }
        }
    }

    fn resolve(
        &mut self,
        file: &mut SourceFile,
        candidate: &Candidate,
        summary: &mut AnnotationSummary,
    ) -> DocResult<Outcome> {
        self.transition(State::AwaitingDecision);

        match self.decisions.decide(candidate)? {
            Decision::Skip => {
                self.transition(State::Skipped);
                Ok(Outcome::Skipped)
            }
            Decision::Quit => Ok(Outcome::Quit),
            Decision::Text(text) => Ok(self.attach(file, candidate, &text)),
            Decision::Edit => {
                self.transition(State::Editing);
                let edited = match self.editor.edit_buffer(&edit_buffer(candidate)) {
                    Ok(edited) => edited,
                    Err(DocdrError::EditorExit { program, status }) => {
                        warn!("{} exited with {}; skipping {}", program, status, candidate.display_name());
                        self.transition(State::Skipped);
                        return Ok(Outcome::Skipped);
                    }
                    Err(e) => return Err(e),
                };

                match extract_comment(&edited) {
                    Some(text) => Ok(self.attach(file, candidate, text)),
                    None => {
                        warn!(
                            "Edit marker missing; skipping {}",
                            candidate.display_name()
                        );
                        self.transition(State::Skipped);
                        Ok(Outcome::Skipped)
                    }
                }
            }
            Decision::OpenSource => {
                self.transition(State::ViewingSource);
                self.view_source(file, candidate, summary)?;
                Ok(Outcome::Viewed)
            }
        }
    }

    fn attach(&mut self, file: &mut SourceFile, candidate: &Candidate, text: &str) -> Outcome {
        let attached = synthesize(text)
            .map(|lines| file.attach_doc(candidate.decl, lines))
            .unwrap_or(false);

        if attached {
            info!(
                "Documented {} at {}:{}",
                candidate.display_name(),
                candidate.path.display(),
                candidate.position
            );
            Outcome::Annotated
        } else {
            self.transition(State::Skipped);
            Outcome::Skipped
        }
    }

    /// Open the real file at the declaration.
    ///
    /// In place, pending comments are written first and the file is re-read
    /// afterwards so edits made in the viewer are kept.
    fn view_source(
        &mut self,
        file: &mut SourceFile,
        candidate: &Candidate,
        summary: &mut AnnotationSummary,
    ) -> DocResult<()> {
        let in_place = self.writer.mode() == WriteMode::InPlace;

        if in_place && file.is_modified() {
            self.writer.write(file)?;
            summary.record_write(&file.path);
            *file = go::parse_file(&file.path)?;
        }

        let line = file
            .candidates()
            .find(|c| c.key() == candidate.key())
            .map_or(candidate.position.line, |c| c.position.line);

        match self.editor.open_at(&file.path, line) {
            Ok(()) => {}
            Err(DocdrError::EditorExit { program, status }) => {
                warn!("{} exited with {}", program, status);
            }
            Err(e) => return Err(e),
        }

        if in_place {
            let on_disk = std::fs::read_to_string(&file.path).map_err(|source| DocdrError::Read {
                path: file.path.clone(),
                source,
            })?;
            if on_disk != file.source() {
                debug!("{} changed in the editor; reloading", file.path.display());
                *file = go::parse_source(on_disk, &file.path)?;
            }
        }

        Ok(())
    }
}
