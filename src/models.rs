//! Core data models for docdr
//!
//! A [`SourceFile`] owns the original bytes of one Go file together with the
//! function declarations and comment groups found in it. Comments attached
//! during annotation are kept as synthesized groups and spliced back into the
//! original bytes when the file is rendered, so untouched content is never
//! re-formatted.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// 1-based line and byte column of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Where a comment group came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOrigin {
    /// Present in the file's bytes when it was parsed
    Source,
    /// Attached during annotation; rendered at `span.start`
    Synthesized {
        /// Indentation repeated in front of every line
        indent: String,
        /// Emit a line break first (the declaration shares its line with other code)
        break_before: bool,
    },
}

/// A run of adjacent comments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    /// Raw comment tokens including their markers (`// ...` or `/* ... */`)
    pub comments: Vec<String>,
    /// Byte range in the original source. Empty for synthesized groups.
    pub span: Range<usize>,
    pub start_line: usize,
    pub end_line: usize,
    pub origin: CommentOrigin,
}

fn directive_pattern() -> &'static Regex {
    static DIRECTIVE: OnceLock<Regex> = OnceLock::new();
    DIRECTIVE.get_or_init(|| {
        Regex::new(r"^(line |extern |export |[a-z0-9]+:[a-z0-9])").expect("valid regex")
    })
}

/// Whether the body of a `//` comment is a toolchain directive such as `go:generate`
pub fn is_directive(body: &str) -> bool {
    directive_pattern().is_match(body)
}

impl CommentGroup {
    /// Documentation text with markers and directives removed.
    ///
    /// Trailing whitespace is stripped from every line, runs of blank lines
    /// collapse to one, and leading/trailing blank lines are dropped.
    pub fn text(&self) -> String {
        let mut raw: Vec<&str> = Vec::new();
        for comment in &self.comments {
            if let Some(body) = comment.strip_prefix("//") {
                if is_directive(body) {
                    continue;
                }
                raw.push(body.strip_prefix(' ').unwrap_or(body));
            } else if let Some(inner) = comment
                .strip_prefix("/*")
                .and_then(|c| c.strip_suffix("*/"))
            {
                raw.extend(inner.split('\n'));
            }
        }

        let mut lines: Vec<&str> = Vec::new();
        for line in raw.into_iter().map(str::trim_end) {
            if line.is_empty() && lines.last().is_none_or(|l| l.is_empty()) {
                continue;
            }
            lines.push(line);
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self.origin, CommentOrigin::Synthesized { .. })
    }
}

/// Index of a function declaration within its [`SourceFile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(pub usize);

/// A top-level `func` declaration, with or without a receiver
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    /// Receiver type text for methods, e.g. `*Server`
    pub receiver: Option<String>,
    pub position: Position,
    /// Byte range of the declaration (without its doc comment)
    pub span: Range<usize>,
    pub doc: Option<CommentGroup>,
}

impl FunctionDecl {
    /// Exported names start with an uppercase letter
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }

    pub fn is_documented(&self) -> bool {
        self.doc.as_ref().is_some_and(|doc| !doc.text().is_empty())
    }

    /// `Name` for functions, `(Recv).Name` for methods
    pub fn display_name(&self) -> String {
        match &self.receiver {
            Some(recv) => format!("({}).{}", recv, self.name),
            None => self.name.clone(),
        }
    }
}

/// An exported function lacking a doc comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub decl: DeclId,
    pub name: String,
    pub receiver: Option<String>,
    pub position: Position,
    /// Earlier declarations in the file with the same receiver and name
    pub occurrence: usize,
    /// Source text of the declaration as it appears in the file
    pub source_text: String,
}

/// Candidate identity: receiver, name, occurrence
pub type CandidateKey = (Option<String>, String, usize);

impl Candidate {
    /// Identity that survives re-parsing the file
    pub fn key(&self) -> CandidateKey {
        (self.receiver.clone(), self.name.clone(), self.occurrence)
    }

    pub fn display_name(&self) -> String {
        match &self.receiver {
            Some(recv) => format!("({}).{}", recv, self.name),
            None => self.name.clone(),
        }
    }
}

/// A parsed Go file
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub package_name: String,
    source: String,
    functions: Vec<FunctionDecl>,
    comments: Vec<CommentGroup>,
}

impl SourceFile {
    /// Assemble a file from parser output. `comments` must be in source order.
    pub fn new(
        path: PathBuf,
        package_name: String,
        source: String,
        functions: Vec<FunctionDecl>,
        comments: Vec<CommentGroup>,
    ) -> Self {
        Self {
            path,
            package_name,
            source,
            functions,
            comments,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn functions(&self) -> &[FunctionDecl] {
        &self.functions
    }

    /// Every comment group in the file, ordered by position
    pub fn comments(&self) -> &[CommentGroup] {
        &self.comments
    }

    pub fn function(&self, id: DeclId) -> Option<&FunctionDecl> {
        self.functions.get(id.0)
    }

    /// Whether any comment has been attached since parsing
    pub fn is_modified(&self) -> bool {
        self.comments.iter().any(CommentGroup::is_synthesized)
    }

    /// Undocumented exported functions in source order
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.functions
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_exported() && !f.is_documented())
            .map(|(idx, f)| Candidate {
                path: self.path.clone(),
                decl: DeclId(idx),
                name: f.name.clone(),
                receiver: f.receiver.clone(),
                position: f.position,
                occurrence: self.functions[..idx]
                    .iter()
                    .filter(|g| g.name == f.name && g.receiver == f.receiver)
                    .count(),
                source_text: self.source[f.span.clone()].to_string(),
            })
    }

    /// Attach `lines` as the doc comment of a declaration.
    ///
    /// Sets the declaration's doc and registers the group in the file's
    /// comment list at its position. The group is anchored at the start of
    /// the declaration's line, or above an existing doc group that carried no
    /// text (directives stay adjacent to `func`). Returns false for an
    /// unknown declaration or empty `lines`.
    pub fn attach_doc(&mut self, id: DeclId, lines: Vec<String>) -> bool {
        if lines.is_empty() {
            return false;
        }
        let Some(decl) = self.functions.get(id.0) else {
            return false;
        };

        let target = decl
            .doc
            .as_ref()
            .map_or(decl.span.start, |doc| doc.span.start);
        let line_start = self.source[..target].rfind('\n').map_or(0, |i| i + 1);
        let prefix = &self.source[line_start..target];

        let (anchor, indent, break_before) = if prefix.trim().is_empty() {
            (line_start, prefix.to_string(), false)
        } else {
            (target, String::new(), true)
        };

        let line = self.source[..anchor].matches('\n').count() + 1;
        let group = CommentGroup {
            comments: lines,
            span: anchor..anchor,
            start_line: line,
            end_line: line,
            origin: CommentOrigin::Synthesized {
                indent,
                break_before,
            },
        };

        let at = self
            .comments
            .partition_point(|c| c.span.start < anchor);
        self.comments.insert(at, group.clone());
        self.functions[id.0].doc = Some(group);
        true
    }

    fn line_ending(&self) -> &'static str {
        if self.source.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }

    /// Render the file: original bytes with synthesized comments spliced in
    pub fn render(&self) -> String {
        let eol = self.line_ending();
        let mut out = String::with_capacity(self.source.len() + 256);
        let mut cursor = 0;

        for group in &self.comments {
            let CommentOrigin::Synthesized {
                indent,
                break_before,
            } = &group.origin
            else {
                continue;
            };
            let at = group.span.start;
            out.push_str(&self.source[cursor..at]);
            if *break_before {
                out.push_str(eol);
            }
            for line in &group.comments {
                out.push_str(indent);
                out.push_str(line);
                out.push_str(eol);
            }
            cursor = at;
        }

        out.push_str(&self.source[cursor..]);
        out
    }
}

/// Files sharing one `package` clause
#[derive(Debug, Clone, Default)]
pub struct Package {
    pub name: String,
    /// Keyed by path, iterated in path order
    pub files: BTreeMap<PathBuf, SourceFile>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: BTreeMap::new(),
        }
    }

    /// Insert a file, replacing any earlier file with the same path
    pub fn insert(&mut self, file: SourceFile) {
        self.files.insert(file.path.clone(), file);
    }

    pub fn file(&self, path: &Path) -> Option<&SourceFile> {
        self.files.get(path)
    }

    /// All function declarations, files in path order
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> + '_ {
        self.files.values().flat_map(|f| f.functions().iter())
    }

    /// All candidates in workflow order
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.files.values().flat_map(SourceFile::candidates)
    }
}
