//! Terminal decision prompt
//!
//! Shows each candidate on stderr and reads the operator's choice. On a real
//! terminal a single keypress selects the action; with redirected input one
//! line is read per choice, which keeps the prompt scriptable.

use super::{Decision, DecisionSource};
use crate::error::{DocResult, DocdrError};
use crate::models::Candidate;
use console::{style, Term};
use std::io::{BufRead, ErrorKind, IsTerminal, StdinLock};

const CHOICES: &str = "[e] edit, [t] type comment, [o] open original file, [s] skip, [q] quit: ";

/// Reads decisions from a terminal or any line-oriented input
pub struct TerminalPrompt<R: BufRead> {
    term: Term,
    input: R,
    interactive: bool,
}

impl TerminalPrompt<StdinLock<'static>> {
    /// Prompt on stderr, reading keys from stdin
    pub fn stdin() -> Self {
        let term = Term::stderr();
        let interactive = term.is_term() && std::io::stdin().is_terminal();
        Self {
            term,
            input: std::io::stdin().lock(),
            interactive,
        }
    }
}

impl<R: BufRead> TerminalPrompt<R> {
    /// Prompt on `term`, reading one line per answer from `input`
    pub fn with_input(term: Term, input: R) -> Self {
        Self {
            term,
            input,
            interactive: false,
        }
    }

    fn show(&self, candidate: &Candidate) -> DocResult<()> {
        let header = format!(
            "\n{}\n{}:{}  {}\n\n{}\n",
            style("─".repeat(60)).dim(),
            candidate.path.display(),
            candidate.position,
            style(candidate.display_name()).bold(),
            candidate.source_text
        );
        self.term.write_line(&header).map_err(DocdrError::Prompt)
    }

    /// Next answer, or `None` once input is exhausted
    fn read_choice(&mut self) -> DocResult<Option<String>> {
        self.term.write_str(CHOICES).map_err(DocdrError::Prompt)?;

        if self.interactive {
            return match self.term.read_char() {
                Ok(c) => {
                    self.term.write_line(&c.to_string()).map_err(DocdrError::Prompt)?;
                    Ok(Some(c.to_string()))
                }
                Err(e) if is_terminal_hangup(&e) => Ok(None),
                Err(e) => Err(DocdrError::Prompt(e)),
            };
        }

        self.read_line()
    }

    fn read_line(&mut self) -> DocResult<Option<String>> {
        if self.interactive {
            return match self.term.read_line() {
                Ok(line) => Ok(Some(line)),
                Err(e) if is_terminal_hangup(&e) => Ok(None),
                Err(e) => Err(DocdrError::Prompt(e)),
            };
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
            Err(e) if is_end_of_input(&e) => Ok(None),
            Err(e) => Err(DocdrError::Prompt(e)),
        }
    }

    /// Lines up to the first empty one (or end of input)
    fn read_comment(&mut self) -> DocResult<String> {
        self.term
            .write_line("Comment text, end with an empty line:")
            .map_err(DocdrError::Prompt)?;

        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}

/// `BufRead::read_line` retries `Interrupted` itself
fn is_end_of_input(e: &std::io::Error) -> bool {
    e.kind() == ErrorKind::UnexpectedEof
}

/// console's raw-mode reads report Ctrl-C as `Interrupted`
fn is_terminal_hangup(e: &std::io::Error) -> bool {
    e.kind() == ErrorKind::Interrupted || is_end_of_input(e)
}

impl<R: BufRead> DecisionSource for TerminalPrompt<R> {
    fn decide(&mut self, candidate: &Candidate) -> DocResult<Decision> {
        self.show(candidate)?;

        loop {
            let Some(choice) = self.read_choice()? else {
                return Ok(Decision::Quit);
            };

            match choice.trim().to_ascii_lowercase().as_str() {
                "e" => return Ok(Decision::Edit),
                "t" => return Ok(Decision::Text(self.read_comment()?)),
                "o" => return Ok(Decision::OpenSource),
                "s" => return Ok(Decision::Skip),
                "q" => return Ok(Decision::Quit),
                other => {
                    self.term
                        .write_line(&format!("{} unknown choice {:?}", style("?").yellow(), other))
                        .map_err(DocdrError::Prompt)?;
                }
            }
        }
    }
}
