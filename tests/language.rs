use std::{
    fs,
    path::{Path, PathBuf},
};

use fir::{
    error::{RuntimeError, ScriptError},
    get_output,
    interpreter::{
        session::{Session, SessionOptions},
        value::Value,
    },
};
use tempfile::TempDir;
use walkdir::WalkDir;

#[test]
fn golden_scripts_match_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "fir"))
    {
        let path = entry.path();
        let expected_path = path.with_extension("out");
        if !expected_path.exists() {
            continue;
        }

        count += 1;
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Failed to read {expected_path:?}: {e}")
                                                         });
        let output = run_file(path).unwrap_or_else(|(e, out)| {
                                       panic!("Script {path:?} failed: {e}\nOutput so far:\n{out}")
                                   });

        assert_eq!(output, expected, "Output of {path:?} differs");
    }

    assert!(count > 0, "No golden scripts found in tests/scripts");
}

fn run_file(path: &Path) -> Result<String, (ScriptError, String)> {
    run_file_with(path, SessionOptions::default())
}

fn run_file_with(path: &Path, options: SessionOptions) -> Result<String, (ScriptError, String)> {
    let mut session = Session::with_output(options, Vec::new());
    let result = session.run_file(path);
    let output = String::from_utf8(session.into_output()).unwrap();

    match result {
        Ok(()) => Ok(output),
        Err(e) => Err((e, output)),
    }
}

fn write_script(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, source).unwrap();
    path
}

fn assert_success(src: &str) {
    if let Err(e) = get_output(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_output(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn assert_output(src: &str, expected: &str) {
    match get_output(src) {
        Ok(output) => assert_eq!(output, expected, "Unexpected output for:\n{src}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

#[test]
fn integer_addition_stays_integer() {
    assert_output("push(2)\npush(3)\nadd\ndump", "Stack contents:\n5\n");
    assert_output("push(1.5)\npush(1.5)\nadd\ndump", "Stack contents:\n3\n");
}

#[test]
fn fractional_sums_stay_float() {
    assert_output("push(0.25)\npush(1)\nadd\ndump", "Stack contents:\n1.25\n");
}

#[test]
fn subtraction_order() {
    assert_output("push(10)\npush(3)\nsub\ndump", "Stack contents:\n7\n");
    assert_output("push(3)\npush(10)\nsub\ndump", "Stack contents:\n-7\n");
}

#[test]
fn dump_leaves_stack_untouched() {
    assert_output("push(1)\npush(2)\ndump\nadd\ndump",
                  "Stack contents:\n1\n2\nStack contents:\n3\n");
    assert_output("dump", "Stack contents:\n");
}

#[test]
fn stack_errors_are_fatal() {
    assert_failure("add");
    assert_failure("push(1)\nadd");
    assert_failure("push(1)\nsub");
    assert_failure("push(abc)");
    assert_failure("push(1 + 1)");
}

#[test]
fn pop_on_empty_stack_is_fatal() {
    let mut session = Session::with_output(SessionOptions::default(), Vec::new());
    let error = session.pop().unwrap_err();

    assert!(matches!(error, RuntimeError::StackUnderflow));
    assert!(error.is_fatal());
}

#[test]
fn fatal_error_stops_execution() {
    let mut session = Session::with_output(SessionOptions::default(), Vec::new());
    let error = session.run_source("main.fir", "print(one)\nsub\nprint(two)")
                       .unwrap_err();

    assert_eq!(error.to_string(),
               "Error on line 2 of 'main.fir': Not enough operands for subtraction");
    assert_eq!(String::from_utf8(session.into_output()).unwrap(), "one\n");
}

#[test]
fn store_and_print() {
    assert_output("str(x, 2^3)\nprint($x)", "8\n");
    assert_output("str(x, 1/4)\nprint($x)", "0.25\n");
    assert_output("str(x, 0.1 + 0.2)\nprint($x)", "0.30000000000000004\n");
}

#[test]
fn store_results_are_canonical() {
    let mut session = Session::with_output(SessionOptions::default(), Vec::new());
    session.run_source("main.fir", "str(a, 6 / 3)\nstr(b, 2.5 * 2)\nstr(c, 10 / 4)")
           .unwrap();

    assert_eq!(session.memory().get("a"), Some(Value::Integer(2)));
    assert_eq!(session.memory().get("b"), Some(Value::Integer(5)));
    assert_eq!(session.memory().get("c"), Some(Value::Float(2.5)));
}

#[test]
fn invalid_expressions_are_reported() {
    assert_output("str(x, y + 1)\nprint(next)",
                  "Error on line 1 of '<input>': Error evaluating expression: Unknown symbol 'y' at column 1\nnext\n");
    assert_success("str(x, 1 / 0)");
    assert_success("str(x, 0 ^ -1)");
}

#[test]
fn second_parenthesis_group_is_malformed() {
    let mut session = Session::with_output(SessionOptions::default(), Vec::new());
    session.run_source("main.fir", "str(x, 1)\nstr(x, (1 + 2) * 3)\nprint($x)")
           .unwrap();

    assert_eq!(session.memory().get("x"), Some(Value::Integer(1)));
    assert_eq!(String::from_utf8(session.into_output()).unwrap(),
               "Error on line 2 of 'main.fir': Invalid str command format: str(x, (1 + 2) * 3)\n1\n");
}

#[test]
fn long_sign_chain_is_a_recoverable_error() {
    let source = format!("str(x, {}1)\nprint(after)", "-".repeat(200_000));
    assert_output(&source,
                  "Error on line 1 of '<input>': Error evaluating expression: \
                   Expression is nested more than 256 levels deep\nafter\n");
}

#[test]
fn oversized_integer_literals_become_floats() {
    assert_output("str(x, 100000000000000000000)\nprint($x)\nstr(y, 10^20)\nprint($y)",
                  "100000000000000000000\n100000000000000000000\n");

    let mut session = Session::with_output(SessionOptions::default(), Vec::new());
    session.run_source("main.fir", "push(9223372036854775808)\ndump").unwrap();
    assert_eq!(session.stack().peek(), Some(&Value::Float(9_223_372_036_854_775_808.0)));
}

#[test]
fn push_sign_must_touch_the_number() {
    assert_output("push(-7)\ndump", "Stack contents:\n-7\n");
    assert_failure("push(- 7)");
}

#[test]
fn small_floats_print_in_exponent_notation() {
    assert_output("str(x, 1 / 10000000)\nprint($x)", "1e-07\n");
}

#[test]
fn equ_copies_values() {
    assert_output("str(x, 42)\nequ(y, x)\nprint($y)", "42\n");
}

#[test]
fn equ_with_undefined_source() {
    let mut session = Session::with_output(SessionOptions::default(), Vec::new());
    session.run_source("main.fir", "equ(z, w)\nprint(after)").unwrap();

    assert_eq!(session.memory().get("z"), None);
    assert_eq!(String::from_utf8(session.into_output()).unwrap(),
               "Error on line 1 of 'main.fir': Memory address w does not contain a value!\nafter\n");
}

#[test]
fn print_is_literal() {
    assert_output("print(hello)", "hello\n");
    assert_output("print(hello, world)", "hello, world\n");
    assert_output("print()", "\n");
}

#[test]
fn print_format_errors() {
    assert_output("print",
                  "Error on line 1 of '<input>': Invalid print command format: print\n");
    assert_output("print(f(x))",
                  "Error on line 1 of '<input>': Invalid print command format: print(f(x))\n");
}

#[test]
fn printr_is_deprecated_but_works() {
    assert_output("str(x, 2 * 4.0)\nprintr(x)",
                  "Printr is deprecated and unsupported. Please use print($<mem_adress>) instead.\n8\n");
    assert_output("printr(nothing)",
                  "Printr is deprecated and unsupported. Please use print($<mem_adress>) instead.\n\
                   Error on line 1 of '<input>': Memory address nothing does not contain a value!\n");
}

#[test]
fn unknown_command_leaves_state_untouched() {
    let mut session = Session::with_output(SessionOptions::default(), Vec::new());
    session.run_source("main.fir", "push(1)\nstr(x, 1)\njump(3)").unwrap();

    assert_eq!(session.stack().len(), 1);
    assert_eq!(session.memory().len(), 1);
    assert_eq!(String::from_utf8(session.into_output()).unwrap(),
               "Error on line 3 of 'main.fir': Unknown command: jump(3)\n");
}

#[test]
fn blank_lines_count_towards_line_numbers() {
    assert_output("\n\n   \nbogus",
                  "Error on line 4 of '<input>': Unknown command: bogus\n");
}

#[test]
fn missing_script_is_an_error() {
    let dir = TempDir::new().unwrap();
    let (error, _) = run_file(&dir.path().join("missing.fir")).unwrap_err();

    assert!(matches!(error, ScriptError::ScriptNotFound { .. }));
}

#[test]
fn repeated_include_runs_once() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "lib.fir", "print(loaded)\npush(1)");
    let main = write_script(&dir, "main.fir", "using lib.fir\nusing lib.fir\ndump");

    let output = run_file(&main).unwrap();

    assert_eq!(output.matches("loaded").count(), 1);
    assert!(output.contains("has already been included. Skipping."));
    assert!(output.ends_with("Stack contents:\n1\n"));
}

#[test]
fn include_cycles_terminate() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "b.fir", "using a.fir\nprint(b done)");
    let a = write_script(&dir, "a.fir", "using b.fir\nprint(a done)");

    let output = run_file(&a).unwrap();
    let lines = output.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("a.fir' has already been included. Skipping."));
    assert_eq!(lines[1], "b done");
    assert_eq!(lines[2], "a done");
}

#[test]
fn includes_resolve_against_top_level_directory() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "lib/one.fir", "using lib/two.fir\nprint(one)");
    write_script(&dir, "lib/two.fir", "str(shared, 5)\nprint(two)");
    let main = write_script(&dir, "main.fir", "using lib/one.fir\nprint($shared)");

    assert_eq!(run_file(&main).unwrap(), "two\none\n5\n");
}

#[test]
fn missing_include_is_reported() {
    let dir = TempDir::new().unwrap();
    let main = write_script(&dir, "main.fir", "using nowhere.fir\nprint(still running)");

    let output = run_file(&main).unwrap();

    assert!(output.starts_with("Error on line 1 of 'main.fir': File '"));
    assert!(output.contains("nowhere.fir' not found."));
    assert!(output.ends_with("still running\n"));
}

#[test]
fn errors_in_includes_name_the_included_file() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "lib.fir", "\nbogus\nadd");
    let main = write_script(&dir, "main.fir", "using lib.fir\nprint(unreachable)");

    let (error, output) = run_file(&main).unwrap_err();

    assert_eq!(output, "Error on line 2 of 'lib.fir': Unknown command: bogus\n");
    assert_eq!(error.to_string(),
               "Error on line 3 of 'lib.fir': Not enough operands for addition");
}

#[test]
fn include_depth_is_limited() {
    let dir = TempDir::new().unwrap();
    write_script(&dir, "one.fir", "using two.fir");
    write_script(&dir, "two.fir", "print(too deep)");
    let main = write_script(&dir, "main.fir", "using one.fir\nprint(after)");

    let options = SessionOptions { max_include_depth: 1,
                                   ..SessionOptions::default() };
    let output = run_file_with(&main, options).unwrap();

    assert!(output.starts_with("Error on line 1 of 'one.fir': Include depth limit of 1 exceeded while including '"));
    assert!(output.ends_with("two.fir'\nafter\n"));
    assert!(!output.contains("too deep"));
}

#[cfg(unix)]
#[test]
fn exec_runs_shell_commands() {
    assert_output("exec(true)\nprint(ok)", "ok\n");
    assert_output("exec(exit 2)",
                  "Error on line 1 of '<input>': Error executing command: Command 'exit 2' returned non-zero exit status 2.\n");
}
