/// The inner interpreter's control primitives.
pub mod inner_words;

/// Words that create new words and switch the compiler's mode.
pub mod word_creation_words;

/// Words that work with the parameter stack.
pub mod stack_words;

/// Words that talk back to the REPL.
pub mod repl_words;

use crate::{
    lang::code::{Flow, Primitive},
    runtime::{
        built_ins::{inner_words::*, repl_words::*, stack_words::*, word_creation_words::*},
        data_structures::dictionary::{WordBehavior, WordInfo, WordRuntime, WordVisibility},
        error,
        interpreter::Interpreter,
    },
};
use lazy_static::lazy_static;

/// Dictionary index of `exit` in the initial dictionary.  The compiler terminates definitions
/// with this index.
pub const EXIT_INDEX: usize = 0;

/// Dictionary index of `lit` in the initial dictionary.  The compiler prefixes literals with this
/// index.
pub const LIT_INDEX: usize = 2;

/// Build the dictionary entry for a regular native word.
macro_rules! native_word {
    ($name:literal, $primitive:expr) => {
        WordInfo::new(
            $name.to_string(),
            WordRuntime::Normal,
            WordVisibility::Visible,
            WordBehavior::Primitive($primitive),
        )
    };
}

/// Build the dictionary entry for a native word that runs even while compiling.
macro_rules! native_immediate_word {
    ($name:literal, $primitive:expr) => {
        WordInfo::new(
            $name.to_string(),
            WordRuntime::Immediate,
            WordVisibility::Visible,
            WordBehavior::Primitive($primitive),
        )
    };
}

/// Build the dictionary entry for a native word that lookups can't see.
macro_rules! native_hidden_word {
    ($name:literal, $primitive:expr) => {
        WordInfo::new(
            $name.to_string(),
            WordRuntime::Normal,
            WordVisibility::Hidden,
            WordBehavior::Primitive($primitive),
        )
    };
}

lazy_static! {
    /// The words every session starts with, in dictionary index order.
    static ref INITIAL_DICTIONARY: Vec<WordInfo> = vec![
        native_word!("exit", Primitive::Exit),
        native_hidden_word!("docol", Primitive::Exit),
        native_word!("lit", Primitive::Lit),
        native_immediate_word!("[", Primitive::LeftBracket),
        native_word!("]", Primitive::RightBracket),
        native_immediate_word!("hide", Primitive::Hide),
        native_word!("reveal", Primitive::Reveal),
        native_immediate_word!(":", Primitive::Colon),
        native_immediate_word!(";", Primitive::Semicolon),
        native_word!(".s", Primitive::DotS),
        native_word!("+", Primitive::Add),
        native_word!("dup", Primitive::Dup),
        native_word!(".", Primitive::Dot),
        native_word!("words", Primitive::Words),
        native_word!("bg", Primitive::Background),
        // Not immediate, so a definition gets BRANCH and 0BRANCH cells compiled into it.  At the
        // top level they skip the next token of the line instead.
        native_word!("branch", Primitive::Branch),
        native_word!("0branch", Primitive::ZeroBranch),
    ];
}

/// Called to register the initial dictionary.  Must run on an empty dictionary so the words land
/// at their fixed indices.
pub fn register_built_in_words(interpreter: &mut dyn Interpreter) {
    for word in INITIAL_DICTIONARY.iter() {
        let _ = interpreter.add_word(word.clone());
    }
}

/// Run a primitive's effect and report how the dispatching interpreter should continue.
pub fn execute_primitive(
    interpreter: &mut dyn Interpreter,
    primitive: Primitive,
) -> error::Result<Flow> {
    match primitive {
        Primitive::Exit => word_exit(interpreter),
        Primitive::Lit => word_lit(interpreter),
        Primitive::Branch => word_branch(interpreter),
        Primitive::ZeroBranch => word_zero_branch(interpreter),

        Primitive::LeftBracket => word_left_bracket(interpreter),
        Primitive::RightBracket => word_right_bracket(interpreter),
        Primitive::Hide => word_hide(interpreter),
        Primitive::Reveal => word_reveal(interpreter),
        Primitive::Colon => word_start_word(interpreter),
        Primitive::Semicolon => word_end_word(interpreter),

        Primitive::DotS => word_print_stack(interpreter),
        Primitive::Dot => word_print_top(interpreter),
        Primitive::Add => word_add(interpreter),
        Primitive::Dup => word_dup(interpreter),

        Primitive::Words => word_words(interpreter),
        Primitive::Background => word_background(interpreter),
    }
}
