//! End-to-end tests driving the `nanobasic` binary as a subprocess,
//! exercising the scenarios from the program's testable properties:
//! program editing, RUN, SAVE/LOAD round-trips, and error reporting.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn bin() -> Command {
    Command::cargo_bin("nanobasic").unwrap()
}

#[test]
fn runs_a_program_from_file() {
    let dir = tempdir().unwrap();
    let prog = dir.path().join("hello.bas");
    std::fs::write(&prog, "10 print 1+2\n20 end\n").unwrap();

    bin()
        .arg("--run")
        .arg(&prog)
        .assert()
        .success()
        .stdout(predicate::str::contains("3"));
}

#[test]
fn interactive_session_defines_and_lists_a_program() {
    let dir = tempdir().unwrap();
    let save = dir.path().join("slot.prg");

    let mut cmd = bin();
    cmd.arg("--save-file").arg(&save);
    cmd.write_stdin("10 print 5\nlist\nquit\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("10 print 5"));
}

#[test]
fn run_command_executes_the_stored_program() {
    let dir = tempdir().unwrap();
    let save = dir.path().join("slot.prg");

    let mut cmd = bin();
    cmd.arg("--save-file").arg(&save);
    cmd.write_stdin("10 print 40+2\nrun\nquit\n");
    cmd.assert().success().stdout(predicate::str::contains("42"));
}

#[test]
fn save_then_load_round_trips_through_the_cli() {
    let dir = tempdir().unwrap();
    let save = dir.path().join("slot.prg");

    let mut first = bin();
    first.arg("--save-file").arg(&save);
    first.write_stdin("10 print 7\nsave\nquit\n");
    first.assert().success();

    let mut second = bin();
    second.arg("--save-file").arg(&save);
    second.write_stdin("load\nrun\nquit\n");
    second
        .assert()
        .success()
        .stdout(predicate::str::contains("7"));
}

#[test]
fn load_without_a_saved_program_reports_an_error() {
    let dir = tempdir().unwrap();
    let save = dir.path().join("missing.prg");

    let mut cmd = bin();
    cmd.arg("--save-file").arg(&save);
    cmd.write_stdin("load\nquit\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No stored program"));
}

#[test]
fn goto_is_rejected_in_immediate_mode() {
    let dir = tempdir().unwrap();
    let save = dir.path().join("slot.prg");

    let mut cmd = bin();
    cmd.arg("--save-file").arg(&save);
    cmd.write_stdin("goto 10\nquit\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Unsupported immediate statement"));
}

#[test]
fn division_by_zero_is_reported_with_the_line_number() {
    let dir = tempdir().unwrap();
    let prog = dir.path().join("boom.bas");
    std::fs::write(&prog, "10 print 1/0\n").unwrap();

    bin()
        .arg("--run")
        .arg(&prog)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Division by zero"));
}

#[test]
fn help_command_prints_the_usage_lines() {
    let dir = tempdir().unwrap();
    let save = dir.path().join("slot.prg");

    let mut cmd = bin();
    cmd.arg("--save-file").arg(&save);
    cmd.write_stdin("help\nquit\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn print_renders_a_hex_literal() {
    let dir = tempdir().unwrap();
    let prog = dir.path().join("hex.bas");
    std::fs::write(&prog, "10 print #FF\n").unwrap();

    bin()
        .arg("--run")
        .arg(&prog)
        .assert()
        .success()
        .stdout(predicate::str::contains("255"));
}

#[test]
fn print_unescapes_a_doubled_quote_in_a_string_literal() {
    let dir = tempdir().unwrap();
    let prog = dir.path().join("quote.bas");
    std::fs::write(&prog, "10 print \"he said \"\"hi\"\"\"\n").unwrap();

    bin()
        .arg("--run")
        .arg(&prog)
        .assert()
        .success()
        .stdout(predicate::str::contains("he said \"hi\""));
}

#[test]
fn trace_flag_writes_a_json_trace_file() {
    let dir = tempdir().unwrap();
    let prog = dir.path().join("trace_me.bas");
    let trace_out = dir.path().join("trace.json");
    std::fs::write(&prog, "10 print 1\n20 print 2\n").unwrap();

    bin()
        .arg("--run")
        .arg(&prog)
        .arg("--trace")
        .arg(&trace_out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Execution Trace Summary"));

    let json = std::fs::read_to_string(&trace_out).unwrap();
    assert!(json.contains("\"line_number\": 10"));
    assert!(json.contains("\"line_number\": 20"));
}

#[test]
fn new_command_clears_the_program() {
    let dir = tempdir().unwrap();
    let save = dir.path().join("slot.prg");

    let mut cmd = bin();
    cmd.arg("--save-file").arg(&save);
    cmd.write_stdin("10 print 1\nnew\nlist\nquit\n");
    let output = cmd.assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(!stdout.contains("10 print 1"));
}
