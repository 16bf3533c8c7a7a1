// Line by line session tests, driving the interpreter the way the REPL does.

use tforth::runtime::data_structures::dictionary::WordBehavior;
use tforth::runtime::error::ErrorKind;
use tforth::runtime::interpreter::threaded_interpreter::ThreadedInterpreter;
use tforth::runtime::interpreter::{
    CodeManagement, CompilerState, InterpreterStack, LineResult, Mode, WordManagement,
};

fn run(interp: &mut ThreadedInterpreter, line: &str) -> LineResult {
    interp.process_line(line)
}

fn run_ok(interp: &mut ThreadedInterpreter, line: &str) -> String {
    let result = interp.process_line(line);
    assert!(result.is_ok(), "{:?} failed: {}", line, result.error_text());
    result.output
}

fn error_kind(result: &LineResult) -> ErrorKind {
    result.error.as_ref().expect("the line should have failed").kind()
}

#[test]
fn add_then_show_stack() {
    let mut interp = ThreadedInterpreter::new();

    assert_eq!(run_ok(&mut interp, "1 2 +"), "");
    assert_eq!(run_ok(&mut interp, ".s"), "<1> 3");
}

#[test]
fn double_across_lines() {
    let mut interp = ThreadedInterpreter::new();

    run_ok(&mut interp, ": double dup + ;");
    run_ok(&mut interp, "3 double");
    assert_eq!(run_ok(&mut interp, ".s"), "<1> 6");
}

#[test]
fn definition_spread_over_lines() {
    let mut interp = ThreadedInterpreter::new();

    run_ok(&mut interp, ":");
    assert_eq!(interp.compiler_state(), CompilerState::AwaitingName);

    run_ok(&mut interp, "triple dup dup");
    assert_eq!(interp.compiler_state(), CompilerState::Compiling);
    assert!(interp.find_word("triple").is_none());

    run_ok(&mut interp, "+ + ;");
    assert_eq!(interp.compiler_state(), CompilerState::Idle);
    assert_eq!(interp.mode(), Mode::Immediate);

    run_ok(&mut interp, "2 triple");
    assert_eq!(run_ok(&mut interp, ".s"), "<1> 6");
}

#[test]
fn empty_stack_dump() {
    let mut interp = ThreadedInterpreter::new();

    assert_eq!(run_ok(&mut interp, ".s"), "<0>");
}

#[test]
fn redefinition_keeps_existing_callers_bound() {
    let mut interp = ThreadedInterpreter::new();

    run_ok(&mut interp, ": inc 1 + ;");
    let (first_inc, _) = interp.find_word("inc").unwrap();

    run_ok(&mut interp, ": add2 inc inc ;");
    run_ok(&mut interp, ": inc 2 + ;");
    let (second_inc, _) = interp.find_word("inc").unwrap();

    assert_ne!(first_inc, second_inc);

    // add2 still calls the first inc by index.
    let (_, add2) = interp.find_word("add2").unwrap();
    let WordBehavior::Compiled(entry) = add2.behavior else {
        panic!("add2 should be a compiled word");
    };
    assert_eq!(interp.code().peek(entry), Some(&(first_inc as i64)));
    assert_eq!(interp.code().peek(entry + 1), Some(&(first_inc as i64)));

    assert_eq!(run_ok(&mut interp, "0 add2 ."), "2");
    assert_eq!(run_ok(&mut interp, "0 inc ."), "2");
}

#[test]
fn redefinition_is_observable_through_new_lookups_only() {
    let mut interp = ThreadedInterpreter::new();

    run_ok(&mut interp, ": inc 1 + ;");
    run_ok(&mut interp, ": add2 inc inc ;");
    run_ok(&mut interp, ": inc 100 + ;");

    assert_eq!(run_ok(&mut interp, "0 add2 ."), "2");
    assert_eq!(run_ok(&mut interp, "0 inc ."), "100");
}

#[test]
fn nested_colon_is_rejected_and_outer_definition_continues() {
    let mut interp = ThreadedInterpreter::new();

    let result = run(&mut interp, ": a : b ;");

    assert_eq!(error_kind(&result), ErrorKind::NestedColon);
    assert_eq!(interp.mode(), Mode::Compile);
    assert_eq!(interp.compiler_state(), CompilerState::Compiling);
    assert!(interp.find_word("a").is_none());
    assert!(interp.find_word("b").is_none());

    run_ok(&mut interp, "1 ;");
    assert!(interp.find_word("b").is_none());

    run_ok(&mut interp, "a");
    assert_eq!(run_ok(&mut interp, ".s"), "<1> 1");
}

#[test]
fn undefined_word_changes_nothing() {
    let mut interp = ThreadedInterpreter::new();

    let result = run(&mut interp, "foo");

    assert_eq!(error_kind(&result), ErrorKind::UndefinedWord);
    assert!(result.error_text().contains("foo"));
    assert_eq!(result.output, "");
    assert!(interp.stack().is_empty());
}

#[test]
fn first_error_drops_the_rest_of_the_line() {
    let mut interp = ThreadedInterpreter::new();

    let result = run(&mut interp, "1 foo 2 .s");

    assert_eq!(error_kind(&result), ErrorKind::UndefinedWord);
    assert_eq!(result.output, "");
    assert_eq!(interp.stack().as_slice(), &[1]);
}

#[test]
fn errors_carry_the_token_location() {
    let mut interp = ThreadedInterpreter::new();

    let result = run(&mut interp, "1 foo");
    let location = result.error.unwrap().location().clone().unwrap();

    assert_eq!(location.path(), "<repl>");
    assert_eq!(location.line(), 1);
    assert_eq!(location.column(), 3);
}

#[test]
fn error_locations_count_session_lines() {
    let mut interp = ThreadedInterpreter::new();

    run_ok(&mut interp, "1 2");
    run_ok(&mut interp, ": double dup + ;");

    let result = run(&mut interp, "double bar");
    let location = result.error.as_ref().unwrap().location().clone().unwrap();

    assert_eq!(location.line(), 3);
    assert_eq!(location.column(), 8);
    assert!(result.error_text().starts_with("<repl> (3, 8): "), "{}", result.error_text());
}

#[test]
fn add_underflow_leaves_stack_unchanged() {
    let mut interp = ThreadedInterpreter::new();

    let result = run(&mut interp, "1 +");

    assert_eq!(error_kind(&result), ErrorKind::StackUnderflow);
    assert_eq!(interp.stack().as_slice(), &[1]);
}

#[test]
fn failing_call_chain_unwinds_the_return_stack() {
    let mut interp = ThreadedInterpreter::new();

    run_ok(&mut interp, ": boom + ; : outer boom ;");
    let wp = interp.wp();

    let result = run(&mut interp, "outer");

    assert_eq!(error_kind(&result), ErrorKind::StackUnderflow);
    assert!(interp.return_stack().is_empty());
    assert_eq!(interp.wp(), wp);

    run_ok(&mut interp, "1 2 outer");
    assert_eq!(run_ok(&mut interp, ".s"), "<1> 3");
}

#[test]
fn revealed_unterminated_word_faults_and_recovers() {
    let mut interp = ThreadedInterpreter::new();

    // Reveal the word before it has an exit cell, running it reads past the end of code memory.
    run_ok(&mut interp, ": half 1 [ reveal");

    let result = run(&mut interp, "half 2");

    assert_eq!(error_kind(&result), ErrorKind::MemoryFault);
    assert_eq!(interp.stack().as_slice(), &[1]);
    assert!(interp.return_stack().is_empty());

    run_ok(&mut interp, "3");
    assert_eq!(interp.stack().as_slice(), &[1, 3]);
}

#[test]
fn semicolon_while_immediate_still_writes_exit() {
    let mut interp = ThreadedInterpreter::new();

    let code_len = interp.code().len();
    let wp = interp.wp();

    let result = run(&mut interp, "; 5");

    assert_eq!(error_kind(&result), ErrorKind::UnexpectedSemicolon);
    assert_eq!(interp.code().len(), code_len + 1);
    assert_eq!(interp.wp(), wp + 1);
    assert_eq!(interp.mode(), Mode::Immediate);
    assert!(interp.stack().is_empty());
}

#[test]
fn return_stack_is_empty_after_every_line() {
    let mut interp = ThreadedInterpreter::new();

    for line in [
        ": a 1 ;",
        ": b a a + ;",
        ": c b b + ;",
        "c",
        "c c +",
        "foo",
        "+ + + +",
    ] {
        let _ = run(&mut interp, line);
        assert!(interp.return_stack().is_empty(), "after {:?}", line);
    }
}

#[test]
fn output_accumulates_with_spaces() {
    let mut interp = ThreadedInterpreter::new();

    assert_eq!(run_ok(&mut interp, "1 2 .s . ."), "<2> 1 2 2 1");
}

#[test]
fn history_line_rendering() {
    let mut interp = ThreadedInterpreter::new();

    assert_eq!(run(&mut interp, "1 2").to_string(), "ok");
    assert_eq!(run(&mut interp, ".").to_string(), "2 ok");

    let failed = run(&mut interp, ". foo");
    let rendered = failed.to_string();

    assert!(rendered.starts_with("1 ? "), "{}", rendered);
    assert!(rendered.contains("Word foo not found."), "{}", rendered);
}

#[test]
fn words_lists_newest_first_without_shadowed_names() {
    let mut interp = ThreadedInterpreter::new();

    assert_eq!(
        run_ok(&mut interp, "words"),
        "0branch branch bg words . dup + .s ; : reveal hide ] [ lit exit"
    );

    run_ok(&mut interp, ": dup dup ;");

    let listing = run_ok(&mut interp, "words");
    assert!(listing.starts_with("dup 0branch branch"), "{}", listing);
    assert_eq!(listing.matches("dup").count(), 1);
    assert!(!listing.contains("docol"));
}

#[test]
fn background_is_reported_per_line() {
    let mut interp = ThreadedInterpreter::new();

    let result = run(&mut interp, "0x123456 bg");
    assert_eq!(result.background, Some(0x123456));
    assert_eq!(result.background_hex().as_deref(), Some("#123456"));

    let result = run(&mut interp, "-1 bg");
    assert_eq!(result.background_hex().as_deref(), Some("#ffffff"));

    let result = run(&mut interp, "1");
    assert_eq!(result.background, None);
}

#[test]
fn pending_branch_does_not_cross_lines() {
    let mut interp = ThreadedInterpreter::new();

    run_ok(&mut interp, "branch");
    run_ok(&mut interp, "4");

    assert_eq!(interp.stack().as_slice(), &[4]);
}
