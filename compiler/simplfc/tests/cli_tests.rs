//! End-to-end tests: write a program file, run the `simplfc` binary on it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use simplf_ir::build::{binary, call, expr_stmt, fun, if_stmt, num, print, ret, string, var};
use simplf_ir::{BinaryOp, Expr, Ident, Span, Stmt};
use simplfc::{Program, EXIT_LOAD_ERROR, EXIT_OK, EXIT_RUNTIME_ERROR};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        match tempfile::tempdir() {
            Ok(dir) => Workspace { dir },
            Err(err) => panic!("cannot create temp dir: {err}"),
        }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Err(err) = std::fs::write(&path, contents) {
            panic!("cannot write {}: {err}", path.display());
        }
        path
    }

    fn write_program(&self, name: &str, statements: Vec<Stmt>) -> PathBuf {
        match Program::new(statements).to_json() {
            Ok(text) => self.write(name, &text),
            Err(err) => panic!("cannot encode program: {err}"),
        }
    }
}

fn simplfc(args: &[&str], path: &Path) -> Output {
    let result = Command::new(env!("CARGO_BIN_EXE_simplfc"))
        .args(args)
        .arg(path)
        .env_remove("SIMPLF_LOG")
        .env_remove("RUST_LOG")
        .output();
    match result {
        Ok(output) => output,
        Err(err) => panic!("cannot run simplfc: {err}"),
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// fun fact(n) { if (n < 2) return 1; return n * fact(n - 1); }
fn fact_decl() -> Stmt {
    fun(
        "fact",
        &["n"],
        vec![
            if_stmt(
                binary(var("n"), BinaryOp::Less, num(2.0)),
                ret(Some(num(1.0))),
                None,
            ),
            ret(Some(binary(
                var("n"),
                BinaryOp::Mul,
                call(var("fact"), vec![binary(var("n"), BinaryOp::Sub, num(1.0))]),
            ))),
        ],
    )
}

#[test]
fn runs_program_and_prints() {
    let ws = Workspace::new();
    let path = ws.write_program(
        "fact.json",
        vec![
            fact_decl(),
            print(call(var("fact"), vec![num(5.0)])),
            print(binary(string("done: "), BinaryOp::Add, num(3.0))),
        ],
    );

    let output = simplfc(&["run"], &path);
    assert_eq!(stderr(&output), "");
    assert_eq!(stdout(&output), "120\ndone: 3\n");
    assert_eq!(output.status.code(), Some(EXIT_OK));
}

#[test]
fn runtime_error_is_reported_with_location() {
    let ws = Workspace::new();
    let div = Expr::Binary {
        left: Box::new(num(1.0)),
        op: BinaryOp::Div,
        span: Span::new(2, 9),
        right: Box::new(num(0.0)),
    };
    let path = ws.write_program(
        "div.json",
        vec![print(string("before")), print(div), print(string("after"))],
    );

    let output = simplfc(&["run"], &path);
    assert_eq!(stdout(&output), "before\n");
    assert_eq!(
        stderr(&output),
        "runtime error: [line 2, column 9] division by zero\n"
    );
    assert_eq!(output.status.code(), Some(EXIT_RUNTIME_ERROR));
}

#[test]
fn runtime_error_in_call_prints_backtrace() {
    let ws = Workspace::new();
    let missing = Expr::Variable(Ident::new("missing", Span::new(2, 11)));
    let call_broken = Expr::Call {
        callee: Box::new(var("broken")),
        paren: Span::new(4, 7),
        args: vec![],
    };
    let path = ws.write_program(
        "trace.json",
        vec![
            fun("broken", &[], vec![print(missing)]),
            expr_stmt(call_broken),
        ],
    );

    let output = simplfc(&["run"], &path);
    assert_eq!(
        stderr(&output),
        "runtime error: [line 2, column 11] undefined variable 'missing'\n\
         stack backtrace:\n\
         \x20 0: broken at line 4, column 7\n"
    );
    assert_eq!(output.status.code(), Some(EXIT_RUNTIME_ERROR));
}

#[test]
fn depth_limit_is_configurable() {
    let ws = Workspace::new();
    let path = ws.write_program(
        "deep.json",
        vec![fact_decl(), print(call(var("fact"), vec![num(20.0)]))],
    );

    let limited = simplfc(&["run", "--max-depth=5"], &path);
    assert_eq!(limited.status.code(), Some(EXIT_RUNTIME_ERROR));
    assert!(stderr(&limited).contains("maximum recursion depth exceeded (limit: 5)"));

    let unlimited = simplfc(&["run", "--no-depth-limit"], &path);
    assert_eq!(unlimited.status.code(), Some(EXIT_OK));
    assert_eq!(stdout(&unlimited), "2432902008176640000\n");
}

#[test]
fn malformed_program_is_a_load_error() {
    let ws = Workspace::new();
    let path = ws.write("broken.json", r#"{ "statements": [ { "Print": 5 } ] }"#);

    let output = simplfc(&["run"], &path);
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).starts_with("error: "));
    assert_eq!(output.status.code(), Some(EXIT_LOAD_ERROR));
}

#[test]
fn missing_file_is_a_load_error() {
    let ws = Workspace::new();
    let output = simplfc(&["run"], &ws.dir.path().join("nowhere.json"));
    assert!(stderr(&output).starts_with("error: cannot read"));
    assert_eq!(output.status.code(), Some(EXIT_LOAD_ERROR));
}

#[test]
fn dump_prints_tree() {
    let ws = Workspace::new();
    let path = ws.write_program("dump.json", vec![print(num(1.0))]);

    let output = simplfc(&["dump"], &path);
    assert_eq!(output.status.code(), Some(EXIT_OK));
    assert!(stdout(&output).contains("Print("));
    assert!(stdout(&output).contains("Number("));
}
