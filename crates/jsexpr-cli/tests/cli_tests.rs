//! Integration tests for the `jsexpr` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the literal,
//! resolve and check subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, and error exit codes.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn jsexpr() -> Command {
    Command::cargo_bin("jsexpr").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Literal subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn literal_stdin_to_json() {
    let output = jsexpr()
        .arg("literal")
        .write_stdin("{a: 1, a: 2, list: [true, undefined,], f: 2.50}")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "a": 2, "list": [true, null], "f": 2.5 })
    );
}

#[test]
fn literal_file_to_source() {
    jsexpr()
        .args(["literal", "--format", "source", "-i", &fixture("person.js")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "{firstName: \"John\", lastName: \"Doe\", age: 30, address: {",
        ));
}

#[test]
fn literal_pretty_source() {
    jsexpr()
        .args(["literal", "--format", "pretty"])
        .write_stdin("{name: 'x', tags: ['a', 'b'], hole: [1,,2]}")
        .assert()
        .success()
        .stdout("{\n  name: \"x\",\n  tags: [\"a\", \"b\"],\n  hole: [1, undefined, 2]\n}\n");
}

#[test]
fn literal_to_output_file() {
    let dir = std::env::temp_dir().join(format!("jsexpr-cli-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("person.json");

    jsexpr()
        .args(["literal", "-i", &fixture("person.js"), "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["job"]["location"]["city"], "Silicon Valley");
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn literal_syntax_error_fails() {
    jsexpr()
        .arg("literal")
        .write_stdin("{a: 1,")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse literal"))
        .stderr(predicate::str::contains("unbalanced delimiter at line 1 col 7"));
}

#[test]
fn literal_depth_flag() {
    jsexpr()
        .args(["--max-depth", "2", "literal"])
        .write_stdin("[[[]]]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nesting depth limit exceeded"));

    jsexpr()
        .args(["literal", "--max-depth", "3", "--format", "source"])
        .write_stdin("[[[]]]")
        .assert()
        .success()
        .stdout("[[[]]]\n");
}

#[test]
fn missing_input_file() {
    jsexpr()
        .args(["literal", "-i", "/nonexistent/input.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolve subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn resolve_canonical() {
    jsexpr()
        .arg("resolve")
        .write_stdin("new new Foo(x)(x)\n")
        .assert()
        .success()
        .stdout("NEW(NEW(Foo, x), x)\n");
}

#[test]
fn resolve_method_chain() {
    jsexpr()
        .arg("resolve")
        .write_stdin("new MyNS.Widget().init(x).render();")
        .assert()
        .success()
        .stdout("CALL(MEMBER(CALL(MEMBER(NEW(MyNS.Widget), init), x), render))\n");
}

#[test]
fn resolve_json() {
    let output = jsexpr()
        .args(["resolve", "--format", "json"])
        .write_stdin("new Foo")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["construction"]["kind"], "new");
    assert_eq!(json["construction"]["has_parens"], false);
    assert_eq!(json["construction"]["target"]["name"], "Foo");
}

#[test]
fn resolve_missing_target() {
    jsexpr()
        .arg("resolve")
        .write_stdin("new )")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to resolve expression"))
        .stderr(predicate::str::contains("missing constructor target"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    jsexpr()
        .args(["-v", "resolve"])
        .write_stdin("new Foo(1)")
        .assert()
        .success()
        .stdout("NEW(Foo, 1)\n")
        .stderr(predicate::str::contains("parsed expression"));
}

#[test]
fn quiet_by_default() {
    jsexpr()
        .arg("resolve")
        .env_remove("RUST_LOG")
        .write_stdin("new Foo(1)")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_passing_fixture() {
    jsexpr()
        .args(["check", "-i", &fixture("new_chains.txt")])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok    line 2: new new Foo()"))
        .stdout(predicate::str::contains("6 passed, 0 failed"));
}

#[test]
fn check_failing_fixture() {
    jsexpr()
        .args(["check", "-i", &fixture("failing.txt")])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL  line 3: new new Foo(a)(b)"))
        .stdout(predicate::str::contains("actual:   NEW(NEW(Foo, a), b)"))
        .stdout(predicate::str::contains("ERROR line 4: new Foo(a"))
        .stdout(predicate::str::contains("1 passed, 2 failed"))
        .stderr(predicate::str::contains("2 of 3 cases failed"));
}

#[test]
fn check_from_stdin() {
    jsexpr()
        .arg("check")
        .write_stdin("new (new Foo)(x) // NEW(NEW(Foo), x)\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 passed, 0 failed"));
}

#[test]
fn no_subcommand_shows_usage() {
    jsexpr()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
