//! End-to-end tests for the docdr binary
//!
//! Each test builds a small Go tree in a temp directory and drives the
//! binary with piped stdin, so the prompt reads one answer per line.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const FOO: &str = "package foo\n\nfunc Bar(x int) int {\n\treturn x\n}\n";

fn docdr_bin() -> &'static str {
    env!("CARGO_BIN_EXE_docdr")
}

fn setup(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (rel, content) in files {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
    dir
}

fn docdr(args: &[&str], stdin: &str, editor: Option<&str>) -> Output {
    let mut cmd = Command::new(docdr_bin());
    cmd.args(args)
        .env_remove("RUST_LOG")
        .env_remove("EDITOR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(editor) = editor {
        cmd.env("EDITOR", editor);
    }

    let mut child = cmd.spawn().unwrap();
    // The binary may exit without reading stdin; a closed pipe is not a test failure.
    if let Err(e) = child.stdin.take().unwrap().write_all(stdin.as_bytes()) {
        assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe, "{e}");
    }
    child.wait_with_output().unwrap()
}

fn path_arg(dir: &Path) -> &str {
    dir.to_str().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_coverage_report() {
    let dir = setup(&[("foo.go", FOO)]);
    let output = docdr(&["run", path_arg(dir.path())], "", None);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "\t1\t0.000000\tfoo\n");
}

#[test]
fn test_coverage_report_ranks_packages() {
    let dir = setup(&[
        ("a/a.go", "package alpha\n\n// A is documented.\nfunc A() {}\n\nfunc B() {}\n"),
        ("b/b.go", "package beta\n\n// C is documented.\nfunc C() {}\n"),
        ("c/c.go", "package gamma\n\nfunc helper() {}\n"),
    ]);
    let output = docdr(&["run", path_arg(dir.path())], "", None);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "\t1\t1.000000\tbeta\n\t2\t0.500000\talpha\n\t0\t-\tgamma\n"
    );
}

#[test]
fn test_coverage_report_json() {
    let dir = setup(&[("foo.go", FOO)]);
    let output = docdr(&["run", path_arg(dir.path()), "--format", "json"], "", None);

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows[0]["package"], "foo");
    assert_eq!(rows[0]["documented"], 0);
    assert_eq!(rows[0]["total"], 1);
    assert_eq!(rows[0]["coverage"], 0.0);
}

#[test]
fn test_empty_directory_prints_nothing() {
    let dir = setup(&[]);
    let output = docdr(&["run", path_arg(dir.path())], "", None);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_parse_error_fails() {
    let dir = setup(&[("bad.go", "package foo\n\nfunc Bar( {\n")]);
    let output = docdr(&["run", path_arg(dir.path())], "", None);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("bad.go"));
}

#[test]
fn test_skip_leaves_file_identical() {
    let dir = setup(&[("foo.go", FOO)]);
    let output = docdr(&["run", path_arg(dir.path()), "foo"], "s\n", None);

    assert!(output.status.success());
    assert_eq!(std::fs::read_to_string(dir.path().join("foo.go")).unwrap(), FOO);
}

#[test]
fn test_typed_comment_is_written() {
    let dir = setup(&[("foo.go", FOO)]);
    let output = docdr(
        &["run", path_arg(dir.path()), "foo"],
        "t\nBar does X.\n\n",
        None,
    );

    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("foo.go")).unwrap(),
        "package foo\n\n// Bar does X.\nfunc Bar(x int) int {\n\treturn x\n}\n"
    );
}

#[test]
fn test_stdout_mode_leaves_disk() {
    let dir = setup(&[("foo.go", FOO)]);
    let output = docdr(
        &["run", path_arg(dir.path()), "foo", "--stdout"],
        "t\nBar does X.\n\n",
        None,
    );

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "package foo\n\n// Bar does X.\nfunc Bar(x int) int {\n\treturn x\n}\n"
    );
    assert_eq!(std::fs::read_to_string(dir.path().join("foo.go")).unwrap(), FOO);
}

#[test]
fn test_unknown_package_is_a_no_op() {
    let dir = setup(&[("foo.go", FOO)]);
    let output = docdr(&["run", path_arg(dir.path()), "nosuch"], "t\nX.\n\n", None);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(std::fs::read_to_string(dir.path().join("foo.go")).unwrap(), FOO);
}

#[test]
fn test_end_of_input_stops_without_writing() {
    let dir = setup(&[("foo.go", FOO)]);
    let output = docdr(&["run", path_arg(dir.path()), "foo"], "", None);

    assert!(output.status.success());
    assert_eq!(std::fs::read_to_string(dir.path().join("foo.go")).unwrap(), FOO);
}

#[test]
fn test_missing_lists_candidates() {
    let dir = setup(&[
        ("foo.go", FOO),
        (
            "server.go",
            "package foo\n\ntype Server struct{}\n\n// Serve is documented.\nfunc (s *Server) Serve() {}\n\nfunc (s *Server) Close() {}\n",
        ),
        ("other/bar.go", "package bar\n\nfunc Baz() {}\n"),
    ]);
    let output = docdr(&["missing", path_arg(dir.path()), "foo"], "", None);

    assert!(output.status.success());
    let root = dir.path().display();
    assert_eq!(
        stdout(&output),
        format!("{root}/foo.go:3:1\tBar\n{root}/server.go:8:1\t(*Server).Close\n")
    );

    let output = docdr(&["missing", path_arg(dir.path())], "", None);
    assert_eq!(stdout(&output).lines().count(), 3);
    assert!(stdout(&output).starts_with(&format!("{root}/other/bar.go:3:1\tBaz\n")));
}

#[test]
fn test_init_writes_config() {
    let dir = setup(&[]);
    let output = docdr(&["init", path_arg(dir.path())], "", None);

    assert!(output.status.success());
    let config = std::fs::read_to_string(dir.path().join("docdr.toml")).unwrap();
    assert!(config.contains("[exclude]"));
    assert!(config.contains("[editor]"));
}

#[test]
fn test_config_excludes_paths() {
    let dir = setup(&[
        ("foo.go", FOO),
        ("testdata/broken.go", "not go at all\n"),
        ("docdr.toml", "[exclude]\npaths = [\"**/testdata/**\"]\n"),
    ]);
    let output = docdr(&["run", path_arg(dir.path())], "", None);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "\t1\t0.000000\tfoo\n");
}

#[cfg(unix)]
#[test]
fn test_edit_with_external_editor() {
    let dir = setup(&[("foo.go", FOO)]);
    let script = dir.path().join("editor.sh");
    std::fs::write(
        &script,
        "f=\"$1\"\nprintf 'Bar does X.\\n' > \"$f.new\"\ncat \"$f\" >> \"$f.new\"\nmv \"$f.new\" \"$f\"\n",
    )
    .unwrap();

    let editor = format!("sh {}", script.display());
    let output = docdr(&["run", path_arg(dir.path()), "foo"], "e\n", Some(&editor));

    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("foo.go")).unwrap(),
        "package foo\n\n// Bar does X.\nfunc Bar(x int) int {\n\treturn x\n}\n"
    );
}

#[test]
fn test_edit_without_editor_fails() {
    let dir = setup(&[("foo.go", FOO)]);
    let mut cmd = Command::new(docdr_bin());
    let home = tempfile::tempdir().unwrap();
    cmd.args(["run", path_arg(dir.path()), "foo"])
        .env_remove("EDITOR")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().unwrap();
    child.stdin.take().unwrap().write_all(b"e\n").unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No editor configured"));
    assert_eq!(std::fs::read_to_string(dir.path().join("foo.go")).unwrap(), FOO);
}
