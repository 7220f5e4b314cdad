use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn script(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/scripts")
                                         .join(name)
}

fn demo(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn vesper() -> Command {
    Command::cargo_bin("vesper").expect("binary builds")
}

#[test]
fn precedence_gives_multiplication_priority() {
    vesper().arg(script("precedence.vsp"))
            .assert()
            .success()
            .stdout("11\n");
}

#[test]
fn integer_operands_widen_to_float() {
    vesper().arg(script("promotion.vsp"))
            .assert()
            .success()
            .stdout("0.25\n");
}

#[test]
fn for_loop_accumulates() {
    vesper().arg(script("for_sum.vsp"))
            .assert()
            .success()
            .stdout("10\n");
}

#[test]
fn recursive_factorial() {
    vesper().arg(script("factorial.vsp"))
            .assert()
            .success()
            .stdout("120\n");
}

#[test]
fn logical_operators_print_booleans() {
    vesper().arg(script("logical.vsp"))
            .assert()
            .success()
            .stdout("false\ntrue\n");
}

#[test]
fn declarations_default_to_zero() {
    vesper().arg(script("default_init.vsp"))
            .assert()
            .success()
            .stdout("0\n");
}

#[test]
fn initializers_truncate_toward_zero() {
    vesper().arg(script("truncation.vsp"))
            .assert()
            .success()
            .stdout("1\n");
}

#[test]
fn inner_scopes_shadow_without_clobbering() {
    vesper().arg(script("scopes.vsp"))
            .assert()
            .success()
            .stdout("2\n1\n");
}

#[test]
fn break_and_continue_steer_the_loop() {
    vesper().arg(script("while_break.vsp"))
            .assert()
            .success()
            .stdout("24\n");
}

#[test]
fn short_circuit_is_observable_through_println() {
    vesper().arg(script("short_circuit.vsp"))
            .assert()
            .success()
            .stdout("0\n1\n");
}

#[test]
fn input_reads_whitespace_delimited_tokens() {
    vesper().arg(demo("read_sum.vsp"))
            .write_stdin("3 4\n")
            .assert()
            .success()
            .stdout("7\n");

    vesper().arg(demo("read_sum.vsp"))
            .write_stdin("  3\n\t4\n")
            .assert()
            .success()
            .stdout("7\n");
}

#[test]
fn factorial_demo_reads_its_operand() {
    vesper().arg(demo("factorial.vsp"))
            .write_stdin("6\n")
            .assert()
            .success()
            .stdout("720\n");
}

#[test]
fn primes_demo_lists_primes_below_thirty() {
    vesper().arg(demo("primes.vsp"))
            .assert()
            .success()
            .stdout("2\n3\n5\n7\n11\n13\n17\n19\n23\n29\n");
}

#[test]
fn boolean_input_accepts_only_the_literals() {
    vesper().arg(demo("confirm.vsp"))
            .write_stdin("true\n")
            .assert()
            .success()
            .stdout("1\n");

    vesper().arg(demo("confirm.vsp"))
            .write_stdin("maybe\n")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("[runtime error]"));
}

#[test]
fn exhausted_input_is_a_runtime_error() {
    vesper().arg(demo("read_sum.vsp"))
            .write_stdin("3\n")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("end of input"));
}

#[test]
fn each_error_category_reaches_stderr() {
    vesper().arg(script("errors/syntax.vsp"))
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("[syntax error]"));

    vesper().arg(script("errors/bad_literal.vsp"))
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("[syntax error]"));

    vesper().arg(script("errors/undefined.vsp"))
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("[symbol error]"));

    vesper().arg(script("errors/type_mismatch.vsp"))
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("[type error]"));

    vesper().arg(script("errors/div_zero.vsp"))
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("[runtime error]"));

    vesper().arg(script("errors/break_outside.vsp"))
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("'break' outside of a loop"));
}

#[test]
fn errors_carry_their_source_position() {
    vesper().arg(script("errors/redeclaration.vsp"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("line 2"));
}

#[test]
fn missing_files_are_reported() {
    vesper().arg("definitely_not_here.vsp")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn successful_runs_exit_zero_and_keep_stderr_quiet() {
    vesper().arg(script("logical.vsp"))
            .assert()
            .success()
            .stderr("");
}
