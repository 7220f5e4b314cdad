use std::{fs, path::Path};

use vesper::{
    error::Error,
    interpreter::{evaluator::core::Interpreter, value::Value},
    parse_source, run_source,
};
use walkdir::WalkDir;

fn assert_success(src: &str) {
    if let Err(e) = run_source(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if run_source(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

/// Parses and runs a program, returning the interpreter so tests can
/// inspect the final global state.
fn run(src: &str) -> Interpreter {
    let program = parse_source(src).unwrap_or_else(|e| panic!("Parse failed: {e}"));
    let mut interpreter = Interpreter::new();
    interpreter.run(&program)
               .unwrap_or_else(|e| panic!("Execution failed: {e}"));
    interpreter
}

#[test]
fn script_corpus_runs_clean() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/scripts");
    let mut count = 0;

    for entry in WalkDir::new(&dir).min_depth(1)
                                   .max_depth(1)
                                   .into_iter()
                                   .filter_map(Result::ok)
                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "vsp"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        count += 1;
        if let Err(e) = run_source(&source) {
            panic!("Script {path:?} failed: {e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn error_corpus_fails_as_intended() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/scripts/errors");
    let mut count = 0;

    for entry in WalkDir::new(&dir).min_depth(1)
                                   .into_iter()
                                   .filter_map(Result::ok)
                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "vsp"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        count += 1;
        if run_source(&source).is_ok() {
            panic!("Script {path:?} succeeded but demonstrates an error");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts/errors");
}

#[test]
fn declarations_and_precedence() {
    let interpreter = run("int a = 3; int b = 4; int c = a + b * 2;");
    assert_eq!(interpreter.get_variable("c"), Some(Value::Int(11)));
}

#[test]
fn integer_arithmetic_wraps_at_32_bits() {
    let interpreter = run("int x = 2147483647 + 1;");
    assert_eq!(interpreter.get_variable("x"), Some(Value::Int(i32::MIN)));
}

#[test]
fn integer_division_truncates() {
    let interpreter = run("int q = 7 / 2; int r = -7 / 2;");
    assert_eq!(interpreter.get_variable("q"), Some(Value::Int(3)));
    assert_eq!(interpreter.get_variable("r"), Some(Value::Int(-3)));
}

#[test]
fn mixed_operands_promote_to_float() {
    let interpreter = run("float f = 1.0 / 4; float g = 3 * 0.5;");
    assert_eq!(interpreter.get_variable("f"), Some(Value::Float(0.25)));
    assert_eq!(interpreter.get_variable("g"), Some(Value::Float(1.5)));
}

#[test]
fn assignability_converts_on_store() {
    let interpreter = run("int x = 1.9; float y = 3; int z = -1.9;");
    assert_eq!(interpreter.get_variable("x"), Some(Value::Int(1)));
    assert_eq!(interpreter.get_variable("y"), Some(Value::Float(3.0)));
    assert_eq!(interpreter.get_variable("z"), Some(Value::Int(-1)));
}

#[test]
fn declarations_default_to_zero() {
    let interpreter = run("int x; float f; boolean b;");
    assert_eq!(interpreter.get_variable("x"), Some(Value::Int(0)));
    assert_eq!(interpreter.get_variable("f"), Some(Value::Float(0.0)));
    assert_eq!(interpreter.get_variable("b"), Some(Value::Bool(false)));
}

#[test]
fn modulo_and_zero_divisors() {
    let interpreter = run("int m = 7 % 3;");
    assert_eq!(interpreter.get_variable("m"), Some(Value::Int(1)));

    assert_failure("int x = 0 / 0;");
    assert_failure("int x = 5 % 0;");

    let interpreter = run("float f = 1.0 / 0.0;");
    assert_eq!(interpreter.get_variable("f"), Some(Value::Float(f64::INFINITY)));
}

#[test]
fn assignment_is_an_expression() {
    let interpreter = run("int a = 0; int b = a = 5;");
    assert_eq!(interpreter.get_variable("a"), Some(Value::Int(5)));
    assert_eq!(interpreter.get_variable("b"), Some(Value::Int(5)));
}

#[test]
fn comparisons_and_logic() {
    let interpreter = run("boolean a = 1 < 2; boolean b = 2.5 > 3; boolean c = 2 == 2.0; \
                           boolean d = true != false; boolean e = a && d; boolean f = b || a;");
    assert_eq!(interpreter.get_variable("a"), Some(Value::Bool(true)));
    assert_eq!(interpreter.get_variable("b"), Some(Value::Bool(false)));
    assert_eq!(interpreter.get_variable("c"), Some(Value::Bool(true)));
    assert_eq!(interpreter.get_variable("d"), Some(Value::Bool(true)));
    assert_eq!(interpreter.get_variable("e"), Some(Value::Bool(true)));
    assert_eq!(interpreter.get_variable("f"), Some(Value::Bool(true)));
}

#[test]
fn short_circuit_skips_side_effects() {
    let interpreter = run("int hits = 0;\n\
                           function touch(): boolean { hits = hits + 1; return true; }\n\
                           boolean a = false && touch();\n\
                           boolean b = true || touch();\n\
                           boolean c = true && touch();");
    assert_eq!(interpreter.get_variable("hits"), Some(Value::Int(1)));
    assert_eq!(interpreter.get_variable("a"), Some(Value::Bool(false)));
    assert_eq!(interpreter.get_variable("b"), Some(Value::Bool(true)));
    assert_eq!(interpreter.get_variable("c"), Some(Value::Bool(true)));
}

#[test]
fn blocks_scope_their_names() {
    let interpreter = run("int x = 1; { int x = 2; x = 3; } int y = x;");
    assert_eq!(interpreter.get_variable("x"), Some(Value::Int(1)));
    assert_eq!(interpreter.get_variable("y"), Some(Value::Int(1)));
}

#[test]
fn names_are_invisible_outside_their_block() {
    assert_failure("{ int inner = 1; } println(inner);");
}

#[test]
fn for_loop_sums_and_continue_runs_the_update() {
    let interpreter = run("int i = 0; int s = 0; for (i = 1; i < 5; i = i + 1) { s = s + i; }");
    assert_eq!(interpreter.get_variable("s"), Some(Value::Int(10)));

    // skipping even values must still advance i, or the loop never ends
    let interpreter = run("int i = 0; int s = 0;\n\
                           for (i = 1; i < 6; i = i + 1) {\n\
                               if (i % 2 == 0) { continue; }\n\
                               s = s + i;\n\
                           }");
    assert_eq!(interpreter.get_variable("s"), Some(Value::Int(9)));
}

#[test]
fn break_exits_only_the_innermost_loop() {
    let interpreter = run("int total = 0; int i = 0; int j = 0;\n\
                           for (i = 0; i < 3; i = i + 1) {\n\
                               for (j = 0; j < 10; j = j + 1) {\n\
                                   if (j == 2) { break; }\n\
                                   total = total + 1;\n\
                               }\n\
                           }");
    assert_eq!(interpreter.get_variable("total"), Some(Value::Int(6)));
}

#[test]
fn while_loop_conditions_and_break() {
    let interpreter = run("int i = 0; while (i < 10) { i = i + 1; if (i == 7) { break; } }");
    assert_eq!(interpreter.get_variable("i"), Some(Value::Int(7)));
}

#[test]
fn functions_recurse() {
    let interpreter = run("function fact(int n): int {\n\
                               if (n < 2) { return 1; }\n\
                               return n * fact(n - 1);\n\
                           }\n\
                           int r = fact(5);");
    assert_eq!(interpreter.get_variable("r"), Some(Value::Int(120)));
}

#[test]
fn function_results_convert_like_assignments() {
    let interpreter = run("function identity(int n): int { return n; }\n\
                           function late(): int { return 2.9; }\n\
                           int a = identity(2.9);\n\
                           int b = late();");
    assert_eq!(interpreter.get_variable("a"), Some(Value::Int(2)));
    assert_eq!(interpreter.get_variable("b"), Some(Value::Int(2)));
}

#[test]
fn bodies_without_a_return_yield_zero() {
    let interpreter = run("function silent(): int { int ignored = 1; }\n\
                           function bare(): float { return; }\n\
                           int a = silent();\n\
                           float b = bare();");
    assert_eq!(interpreter.get_variable("a"), Some(Value::Int(0)));
    assert_eq!(interpreter.get_variable("b"), Some(Value::Float(0.0)));
}

#[test]
fn parameters_vanish_after_the_call() {
    let interpreter = run("function inc(int n): int { return n + 1; }\n\
                           int r = inc(41);");
    assert_eq!(interpreter.get_variable("r"), Some(Value::Int(42)));
    assert_eq!(interpreter.get_variable("n"), None);
}

#[test]
fn return_unwinds_nested_blocks() {
    let interpreter = run("function find(): int {\n\
                               int i = 0;\n\
                               while (true) {\n\
                                   i = i + 1;\n\
                                   if (i > 3) {\n\
                                       { return i; }\n\
                                   }\n\
                               }\n\
                           }\n\
                           int r = find();");
    assert_eq!(interpreter.get_variable("r"), Some(Value::Int(4)));
}

#[test]
fn calls_must_follow_the_declaration_in_the_source() {
    assert!(matches!(parse_source("int r = f(); function f(): int { return 1; }"),
                     Err(Error::Symbol(_))));
}

#[test]
fn error_categories() {
    assert!(matches!(parse_source("int x = ;"), Err(Error::Parse(_))));
    assert!(matches!(parse_source("float f = 1.5a;"), Err(Error::Parse(_))));
    assert!(matches!(parse_source("println(foo);"), Err(Error::Symbol(_))));
    assert!(matches!(parse_source("int x = 1; int x = 2;"), Err(Error::Symbol(_))));
    assert!(matches!(parse_source("int x = true;"), Err(Error::Type(_))));
    assert!(matches!(parse_source("if (1) { ; }"), Err(Error::Type(_))));
    assert!(matches!(run_source("int x = 1 / 0;"), Err(Error::Runtime(_))));
}

#[test]
fn operator_type_rules_are_enforced() {
    assert_failure("int x = 1 + true;");
    assert_failure("boolean b = 1 && true;");
    assert_failure("boolean b = true < false;");
    assert_failure("boolean b = 1 == true;");
    assert_failure("float f = 1.5 % 2;");
    assert_failure("int x = -true;");
    assert_failure("boolean b = 1;");
}

#[test]
fn conditions_must_be_boolean() {
    assert_failure("while (1) { break; }");
    assert_failure("int i = 0; for (i = 0; ; i = i + 1) { break; }");
    assert_failure("int i = 0; for (i = 0; i; i = i + 1) { break; }");
}

#[test]
fn jumps_need_their_construct() {
    assert_failure("break;");
    assert_failure("continue;");
    assert_failure("return 1;");
    assert_failure("function f(): int { break; } int r = f();");
}

#[test]
fn builtins_cannot_be_redefined() {
    assert!(matches!(parse_source("function println(int x): int { return x; }"),
                     Err(Error::Symbol(_))));
    assert!(matches!(parse_source("function input(): int { return 1; }"),
                     Err(Error::Symbol(_))));
}

#[test]
fn println_is_checked_at_parse_time() {
    assert_failure("println();");
    assert_failure("println(1, 2);");
    assert_success("println(1.5); println(true); println(-3);");
}

#[test]
fn shadowing_is_allowed_but_redeclaration_is_not() {
    assert_success("int x = 1; { int x = 2; { int x = 3; } }");
    assert_failure("{ int x = 1; int x = 2; }");
}

#[test]
fn pretty_print_reaches_a_fixpoint() {
    let source = "int limit = 5;\n\
                  function fact(int n): int {\n\
                      if (n < 2) { return 1; }\n\
                      return n * fact(n - 1);\n\
                  }\n\
                  int i = 0;\n\
                  ;\n\
                  for (i = 1; i < limit; i = i + 1) {\n\
                      if (i % 2 == 0 && true) { println(-i); } else { println(i + 1); }\n\
                  }\n\
                  while (false) { break; continue; }\n\
                  boolean done = 1 < 2 || false;\n\
                  println(fact(limit));";

    let first = parse_source(source).expect("source parses").to_string();
    let second = parse_source(&first).unwrap_or_else(|e| panic!("printed form fails to parse: {e}\n{first}"))
                                     .to_string();
    assert_eq!(first, second);
}
