use crate::{
    lang::{code::Cell, source_buffer::SourceLocation, tokenizing::Token},
    runtime::{
        data_structures::{
            cell_stack::CellStack,
            dictionary::{Dictionary, WordInfo},
        },
        error::{self, ScriptError},
    },
};
use std::fmt::{self, Display, Formatter};

pub mod threaded_interpreter;

/// The runtime operand stack.
pub type ParameterStack = CellStack<Cell>;

/// Resume addresses into code memory, one per level of call nesting.
pub type ReturnStack = CellStack<usize>;

/// The single growable address space compiled definitions live in.
pub type CodeMemory = CellStack<Cell>;

/// Whether tokens are executed right away or appended to code memory.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Immediate,
    Compile,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Mode::Immediate => write!(f, "immediate"),
            Mode::Compile => write!(f, "compile"),
        }
    }
}

/// Where the colon definition protocol currently stands.  Checked by the outer interpreter before
/// any other handling of a token.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CompilerState {
    /// No definition is open.
    Idle,

    /// `:` has run, the next token is the name of the new word.
    AwaitingName,

    /// The new word has a name and its body is being compiled.
    Compiling,
}

impl Display for CompilerState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CompilerState::Idle => write!(f, "idle"),
            CompilerState::AwaitingName => write!(f, "awaiting name"),
            CompilerState::Compiling => write!(f, "compiling"),
        }
    }
}

/// What a line hands back to the collaborator that submitted it.
#[derive(Clone, Debug, Default)]
pub struct LineResult {
    /// The text emitted by the words executed on the line.
    pub output: String,

    /// The error that stopped the line, if any.
    pub error: Option<ScriptError>,

    /// The last value popped by `bg` on this line.
    pub background: Option<Cell>,
}

impl LineResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The error rendered as text, empty when the line succeeded.
    pub fn error_text(&self) -> String {
        match &self.error {
            Some(error) => error.to_string(),
            None => String::new(),
        }
    }

    /// The background colour as a `#rrggbb` string.
    pub fn background_hex(&self) -> Option<String> {
        self.background
            .map(|value| format!("#{:06x}", value & 0x00ff_ffff))
    }
}

/// Render the line the way the REPL history shows it.
impl Display for LineResult {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if !self.output.is_empty() {
            write!(f, "{} ", self.output)?;
        }

        match &self.error {
            Some(error) => write!(f, "? {}", error),
            None => write!(f, "ok"),
        }
    }
}

/// Trait for managing the interpreter's parameter stack.  Intended to be called by the native
/// words.
pub trait InterpreterStack {
    /// Use to examine the full parameter stack, for example for the stack dump word `.s`.
    fn stack(&self) -> &ParameterStack;

    /// Push a value onto the parameter stack.
    fn push(&mut self, value: Cell);

    /// Pop a value from the parameter stack.  If the stack is empty a stack underflow error is
    /// returned.
    fn pop(&mut self) -> error::Result<Cell>;

    /// Make sure at least `count` values are on the stack before a word starts popping, so that a
    /// failing word leaves the stack untouched.
    fn require_depth(&self, count: usize) -> error::Result<()>;
}

/// Trait for managing the dictionary and executing words from the top level.
pub trait WordManagement {
    /// The location of the token currently being processed, if any.
    fn current_location(&self) -> &Option<SourceLocation>;

    /// Append a word to the dictionary and return its index.
    fn add_word(&mut self, info: WordInfo) -> usize;

    /// Find the most recent visible word with the given name.
    fn find_word(&self, name: &str) -> Option<(usize, &WordInfo)>;

    fn dictionary(&self) -> &Dictionary;

    fn dictionary_mut(&mut self) -> &mut Dictionary;

    /// Execute a word by its dictionary index on behalf of the outer interpreter.
    fn execute_word_index(&mut self, index: usize) -> error::Result<()>;
}

/// Trait for the compiler state, code memory, and the two interpreters that work with them.
pub trait CodeManagement {
    fn mode(&self) -> Mode;

    fn set_mode(&mut self, mode: Mode);

    fn compiler_state(&self) -> CompilerState;

    fn set_compiler_state(&mut self, state: CompilerState);

    /// The code memory cursor.  The next cell to write while compiling, the next cell to execute
    /// while running compiled code.
    fn wp(&self) -> usize;

    fn code(&self) -> &CodeMemory;

    /// The return stack of the inner interpreter.
    fn return_stack(&self) -> &ReturnStack;

    /// Write a cell at the cursor and advance it.
    fn compile_cell(&mut self, cell: Cell);

    /// Run the compiled definition at the given address until it returns to the level it was
    /// called from.
    fn execute_code(&mut self, entry: usize) -> error::Result<()>;

    /// Resolve and execute or compile a single token.
    fn process_token(&mut self, token: &Token) -> error::Result<()>;

    /// Process a full input line.  Processing stops at the first error.  Nothing done before the
    /// error is rolled back.
    fn process_line(&mut self, line: &str) -> LineResult;
}

/// Core interpreter trait.
///
/// Brings together the parameter stack, the dictionary, and the compiler.  Adds the hooks words
/// use to talk back to the collaborator driving the session.
pub trait Interpreter: InterpreterStack + WordManagement + CodeManagement {
    /// Append text to the output of the current line.
    fn emit(&mut self, text: &str);

    /// Record a new background colour for the collaborator to pick up.
    fn set_background(&mut self, value: Cell);
}
