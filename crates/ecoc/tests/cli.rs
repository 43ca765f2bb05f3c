//! End-to-end CLI tests exercising `run`, `check`, and `bundle` against
//! real temp-directory scripts.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ecoc() -> Command {
    Command::cargo_bin("ecoc").unwrap()
}

#[test]
fn cli_help_lists_subcommands() {
    ecoc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run").and(predicate::str::contains("bundle")));
}

#[test]
fn run_evaluates_a_script_and_prints_its_result() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("main.eco");
    std::fs::write(&file, "const x = 1 + 2; return x;").unwrap();

    ecoc().arg("run").arg(&file).assert().success().stdout(predicate::str::contains("3"));
}

#[test]
fn run_reports_uncaught_exceptions_and_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("main.eco");
    std::fs::write(&file, "throw 'boom';").unwrap();

    ecoc().arg("run").arg(&file).assert().failure().stderr(predicate::str::contains("boom"));
}

#[test]
fn check_reports_ok_for_a_valid_script() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("main.eco");
    std::fs::write(&file, "const x = 1;").unwrap();

    ecoc().arg("check").arg(&file).assert().success().stdout(predicate::str::contains("OK"));
}

#[test]
fn check_reports_a_diagnostic_for_a_syntax_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("main.eco");
    std::fs::write(&file, "const = ;").unwrap();

    ecoc().arg("check").arg(&file).assert().failure();
}

/// Mirrors the module-graph bundling scenario: an entry importing a
/// default export from a sibling module, re-exporting it incremented.
#[test]
fn bundle_emits_a_script_that_requires_the_entry_module() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.eco"), "import x from './b.eco'; export default x + 1;").unwrap();
    std::fs::write(dir.path().join("b.eco"), "export default 41;").unwrap();

    ecoc()
        .arg("bundle")
        .arg(dir.path().join("a.eco"))
        .assert()
        .success()
        .stdout(predicate::str::contains("__eco_require__").and(predicate::str::contains("modules")));
}

#[test]
fn bundle_writes_to_an_output_file_when_given_one() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.eco"), "export default 1;").unwrap();
    let out = dir.path().join("bundle.js");

    ecoc().arg("bundle").arg(dir.path().join("a.eco")).arg("--output").arg(&out).assert().success();

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("module.exports = 1;"));
}

#[test]
fn bundle_minify_collapses_whitespace() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.eco"), "export default 1;").unwrap();

    let output = ecoc().arg("bundle").arg(dir.path().join("a.eco")).arg("--minify").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("\n\n"));
}
