//! Go parser using tree-sitter
//!
//! Extracts the package name, top-level function and method declarations,
//! and every comment group from Go source code.

use crate::error::{DocResult, DocdrError};
use crate::models::{CommentGroup, CommentOrigin, FunctionDecl, Position, SourceFile};
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Parse a Go file from disk
pub fn parse_file(path: &Path) -> DocResult<SourceFile> {
    let source = std::fs::read_to_string(path).map_err(|source| DocdrError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_source(source, path)
}

/// Parse Go source code directly (useful for testing)
pub fn parse_source(source: String, path: &Path) -> DocResult<SourceFile> {
    let mut parser = Parser::new();
    let language = tree_sitter_go::LANGUAGE;
    parser
        .set_language(&language.into())
        .map_err(|e| parse_error(path, 1, 1, format!("failed to load Go grammar: {e}")))?;

    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| parse_error(path, 1, 1, "parser produced no syntax tree"))?;

    let root = tree.root_node();
    let bytes = source.as_bytes();

    if root.has_error() {
        return Err(syntax_error(&root, bytes, path));
    }

    let package_name = extract_package_name(&root, bytes)
        .ok_or_else(|| parse_error(path, 1, 1, "expected 'package' clause"))?;

    let (functions, comments) = collect_declarations(&root, bytes);

    Ok(SourceFile::new(
        path.to_path_buf(),
        package_name,
        source,
        functions,
        comments,
    ))
}

fn parse_error(path: &Path, line: usize, column: usize, message: impl Into<String>) -> DocdrError {
    DocdrError::Parse {
        path: path.to_path_buf(),
        line,
        column,
        message: message.into(),
    }
}

/// Build a parse error pointing at the first ERROR or MISSING node
fn syntax_error(root: &Node, source: &[u8], path: &Path) -> DocdrError {
    let Some(node) = first_error(*root) else {
        return parse_error(path, 1, 1, "syntax error");
    };

    let pos = node.start_position();
    let message = if node.is_missing() {
        format!("expected {}", node.kind())
    } else {
        let text = node.utf8_text(source).unwrap_or("");
        let snippet: String = text.lines().next().unwrap_or("").chars().take(20).collect();
        if snippet.is_empty() {
            "syntax error".to_string()
        } else {
            format!("syntax error near {:?}", snippet)
        }
    };

    parse_error(path, pos.row + 1, pos.column + 1, message)
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    for child in node.children(&mut node.walk()) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

/// Read the name from the `package` clause
fn extract_package_name(root: &Node, source: &[u8]) -> Option<String> {
    let clause = root
        .children(&mut root.walk())
        .find(|c| c.kind() == "package_clause")?;
    let ident = clause
        .children(&mut clause.walk())
        .find(|c| c.kind() == "package_identifier")?;
    ident.utf8_text(source).ok().map(|s| s.to_string())
}

/// Comment group being accumulated during the walk
struct OpenGroup {
    comments: Vec<String>,
    start_byte: usize,
    end_byte: usize,
    start_row: usize,
    end_row: usize,
    /// Started on the same line as preceding code; never a doc comment
    trailing: bool,
}

impl OpenGroup {
    fn accepts(&self, row: usize) -> bool {
        if self.trailing {
            row == self.end_row
        } else {
            row <= self.end_row + 1
        }
    }

    fn to_group(&self) -> CommentGroup {
        CommentGroup {
            comments: self.comments.clone(),
            span: self.start_byte..self.end_byte,
            start_line: self.start_row + 1,
            end_line: self.end_row + 1,
            origin: CommentOrigin::Source,
        }
    }
}

/// Statement terminators and zero-width tokens don't separate comments
fn is_code_token(node: &Node) -> bool {
    node.kind() != "\n" && node.start_byte() != node.end_byte()
}

/// Walk the tree in document order, grouping comments and recording
/// each function declaration together with the group directly above it.
fn collect_declarations(root: &Node, source: &[u8]) -> (Vec<FunctionDecl>, Vec<CommentGroup>) {
    let mut functions = Vec::new();
    let mut groups = Vec::new();
    let mut open: Option<OpenGroup> = None;
    let mut last_code_row: Option<usize> = None;

    let mut cursor = root.walk();
    'walk: loop {
        let node = cursor.node();

        match node.kind() {
            "comment" => {
                let row = node.start_position().row;
                let text = node
                    .utf8_text(source)
                    .unwrap_or("")
                    .trim_end_matches('\r')
                    .to_string();

                match open.as_mut() {
                    Some(group) if group.accepts(row) => {
                        group.comments.push(text);
                        group.end_byte = node.end_byte();
                        group.end_row = node.end_position().row;
                    }
                    _ => {
                        if let Some(group) = open.take() {
                            groups.push(group.to_group());
                        }
                        open = Some(OpenGroup {
                            comments: vec![text],
                            start_byte: node.start_byte(),
                            end_byte: node.end_byte(),
                            start_row: row,
                            end_row: node.end_position().row,
                            trailing: last_code_row == Some(row),
                        });
                    }
                }
            }
            "function_declaration" | "method_declaration" => {
                let start_row = node.start_position().row;
                let doc = open
                    .as_ref()
                    .filter(|g| !g.trailing && g.end_row + 1 == start_row)
                    .map(OpenGroup::to_group);
                if let Some(decl) = extract_function(&node, source, doc) {
                    functions.push(decl);
                }
            }
            _ if node.child_count() == 0 && is_code_token(&node) => {
                if let Some(group) = open.take() {
                    groups.push(group.to_group());
                }
                last_code_row = Some(node.end_position().row);
            }
            _ => {}
        }

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }

    if let Some(group) = open.take() {
        groups.push(group.to_group());
    }

    (functions, groups)
}

/// Build a declaration from a `function_declaration` or `method_declaration` node
fn extract_function(node: &Node, source: &[u8], doc: Option<CommentGroup>) -> Option<FunctionDecl> {
    let name = node
        .child_by_field_name("name")?
        .utf8_text(source)
        .ok()?
        .to_string();

    let receiver = if node.kind() == "method_declaration" {
        extract_receiver_type(node.child_by_field_name("receiver"), source)
    } else {
        None
    };

    let pos = node.start_position();

    Some(FunctionDecl {
        name,
        receiver,
        position: Position {
            line: pos.row + 1,
            column: pos.column + 1,
        },
        span: node.start_byte()..node.end_byte(),
        doc,
    })
}

/// Extract receiver type from a method
fn extract_receiver_type(receiver_node: Option<Node>, source: &[u8]) -> Option<String> {
    let node = receiver_node?;

    for child in node.children(&mut node.walk()) {
        if child.kind() == "parameter_declaration" {
            if let Some(type_node) = child.child_by_field_name("type") {
                return type_node.utf8_text(source).ok().map(|s| s.to_string());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(source: &str) -> SourceFile {
        parse_source(source.to_string(), &PathBuf::from("test.go")).expect("should parse Go source")
    }

    #[test]
    fn test_parse_package_and_functions() {
        let file = parse(
            r#"package foo

func Bar(x int) int {
	return x
}

func baz() {}
"#,
        );

        assert_eq!(file.package_name, "foo");
        assert_eq!(file.functions().len(), 2);
        let bar = &file.functions()[0];
        assert_eq!(bar.name, "Bar");
        assert_eq!(bar.position, Position { line: 3, column: 1 });
        assert!(bar.doc.is_none());
        assert!(bar.is_exported());
        assert!(!file.functions()[1].is_exported());
    }

    #[test]
    fn test_parse_method_receiver() {
        let file = parse(
            r#"package main

type Server struct{}

// Serve starts the server.
func (s *Server) Serve() error {
	return nil
}
"#,
        );

        let serve = &file.functions()[0];
        assert_eq!(serve.name, "Serve");
        assert_eq!(serve.receiver.as_deref(), Some("*Server"));
        assert!(serve.is_documented());
    }

    #[test]
    fn test_doc_requires_adjacent_comment() {
        let file = parse(
            r#"package foo

// Detached comment.

func Bar() {}

// Baz is documented.
// Over two lines.
func Baz() {}
"#,
        );

        let bar = &file.functions()[0];
        assert!(bar.doc.is_none());

        let baz = &file.functions()[1];
        let doc = baz.doc.as_ref().expect("Baz has a doc comment");
        assert_eq!(doc.text(), "Baz is documented.\nOver two lines.");
        assert_eq!(doc.start_line, 7);
        assert_eq!(doc.end_line, 8);
        assert_eq!(file.comments().len(), 2);
    }

    #[test]
    fn test_trailing_comment_is_not_doc() {
        let file = parse(
            r#"package foo

var x = 1 // x is one
func Bar() {}
"#,
        );

        assert!(file.functions()[0].doc.is_none());
        assert_eq!(file.comments().len(), 1);
    }

    #[test]
    fn test_block_comment_doc() {
        let file = parse(
            r#"package foo

/* Bar does X. */
func Bar() {}
"#,
        );

        assert!(file.functions()[0].is_documented());
    }

    #[test]
    fn test_directive_only_doc_is_undocumented() {
        let file = parse(
            r#"package foo

//go:noinline
func Bar() {}
"#,
        );

        let bar = &file.functions()[0];
        assert!(bar.doc.is_some());
        assert!(!bar.is_documented());
        assert_eq!(file.candidates().count(), 1);
    }

    #[test]
    fn test_comments_inside_bodies_are_collected() {
        let file = parse(
            r#"package foo

func Bar() {
	// inside
	_ = 1
}
"#,
        );

        assert_eq!(file.comments().len(), 1);
        assert_eq!(file.comments()[0].comments, vec!["// inside".to_string()]);
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let err = parse_source(
            "package foo\n\nfunc Bar( {\n".to_string(),
            &PathBuf::from("bad.go"),
        )
        .expect_err("should fail to parse");

        match err {
            DocdrError::Parse { path, message, .. } => {
                assert_eq!(path, PathBuf::from("bad.go"));
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_package_clause() {
        let err = parse_source("func Bar() {}\n".to_string(), &PathBuf::from("nopkg.go"))
            .expect_err("should fail without package clause");
        assert!(matches!(err, DocdrError::Parse { .. }));
    }

    #[test]
    fn test_crlf_comments() {
        let file = parse("package foo\r\n\r\n// Bar does X.\r\nfunc Bar() {}\r\n");
        let doc = file.functions()[0].doc.as_ref().expect("doc");
        assert_eq!(doc.comments, vec!["// Bar does X.".to_string()]);
    }
}
