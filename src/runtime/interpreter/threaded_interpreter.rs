use std::{ fmt::{ self,
                  Display,
                  Formatter },
           mem::take };
use tracing::{ debug, trace, warn };
use crate::{ lang::{ code::{ pretty_print_code,
                             Cell,
                             Flow },
                     source_buffer::SourceLocation,
                     tokenizing::{ tokenize_line,
                                   Token } },
             runtime::{ built_ins::{ execute_primitive,
                                     register_built_in_words,
                                     LIT_INDEX },
                        data_structures::dictionary::{ Dictionary,
                                                       WordBehavior,
                                                       WordInfo },
                        error::{ self,
                                 script_error,
                                 ErrorKind,
                                 ScriptError },
                        interpreter::{ CodeManagement,
                                       CodeMemory,
                                       CompilerState,
                                       Interpreter,
                                       InterpreterStack,
                                       LineResult,
                                       Mode,
                                       ParameterStack,
                                       ReturnStack,
                                       WordManagement } } };



/// The path tag given to the tokens of every line handed to the interpreter.
const LINE_PATH: &str = "<repl>";



/// An action a top level `branch`, `0branch`, or `lit` leaves behind for the next token of the
/// line.  At the top level the token stream stands in for code memory.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
enum PendingToken
{
    #[default]
    None,
    Skip,
    Literal
}



/// The session object of the virtual machine.  Created once and mutated by every line processed.
pub struct ThreadedInterpreter
{
    /// The operand stack.
    stack: ParameterStack,

    /// Resume addresses of the compiled definitions currently being executed.
    return_stack: ReturnStack,

    /// Where compiled definitions live.
    code: CodeMemory,

    /// The cursor into code memory, the next cell to write or execute.
    wp: usize,

    dictionary: Dictionary,

    mode: Mode,
    compiler: CompilerState,

    /// The location of the token currently being processed.
    current_location: Option<SourceLocation>,

    /// How many lines the session has processed so far.
    line_number: usize,

    /// Output collected for the current line.
    output: String,

    /// The background colour set during the current line.
    background: Option<Cell>,

    pending: PendingToken
}


impl InterpreterStack for ThreadedInterpreter
{
    fn stack(&self) -> &ParameterStack
    {
        &self.stack
    }

    fn push(&mut self, value: Cell)
    {
        let _ = self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<Cell>
    {
        self.stack.pop().map_err(|error| error.with_location(self.current_location.clone()))
    }

    fn require_depth(&self, count: usize) -> error::Result<()>
    {
        if self.stack.len() < count
        {
            return script_error(self,
                                ErrorKind::StackUnderflow,
                                format!("Stack underflow, expected {} values but found {}.",
                                        count,
                                        self.stack.len()));
        }

        Ok(())
    }
}


impl WordManagement for ThreadedInterpreter
{
    fn current_location(&self) -> &Option<SourceLocation>
    {
        &self.current_location
    }

    fn add_word(&mut self, info: WordInfo) -> usize
    {
        self.dictionary.add(info)
    }

    fn find_word(&self, name: &str) -> Option<(usize, &WordInfo)>
    {
        self.dictionary.find(name)
    }

    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    fn dictionary_mut(&mut self) -> &mut Dictionary
    {
        &mut self.dictionary
    }

    fn execute_word_index(&mut self, index: usize) -> error::Result<()>
    {
        let behavior = match self.dictionary.get(index)
            {
                Some(word) => word.behavior,
                None => return script_error(self,
                                            ErrorKind::MemoryFault,
                                            format!("Word index {} not found.", index))
            };

        match behavior
        {
            WordBehavior::Primitive(primitive) =>
                {
                    let flow = execute_primitive(self, primitive)?;
                    self.apply_top_level_flow(flow)
                },

            WordBehavior::Compiled(entry) => self.execute_code(entry)
        }
    }
}


impl CodeManagement for ThreadedInterpreter
{
    fn mode(&self) -> Mode
    {
        self.mode
    }

    fn set_mode(&mut self, mode: Mode)
    {
        self.mode = mode;
    }

    fn compiler_state(&self) -> CompilerState
    {
        self.compiler
    }

    fn set_compiler_state(&mut self, state: CompilerState)
    {
        self.compiler = state;
    }

    fn wp(&self) -> usize
    {
        self.wp
    }

    fn code(&self) -> &CodeMemory
    {
        &self.code
    }

    fn return_stack(&self) -> &ReturnStack
    {
        &self.return_stack
    }

    fn compile_cell(&mut self, cell: Cell)
    {
        self.code.poke(self.wp, cell);
        self.wp += 1;
    }

    fn execute_code(&mut self, entry: usize) -> error::Result<()>
    {
        // The first memory fault is reported once the call returns, everything else stops the whole
        // call chain right away.
        let mut fault: Option<ScriptError> = None;

        self.docol(entry);

        while !self.return_stack.is_empty()
        {
            match self.next()
            {
                Ok(()) => (),

                Err(error) if error.kind() == ErrorKind::MemoryFault =>
                    {
                        warn!(wp = self.wp,
                              depth = self.return_stack.len(),
                              "recovering from memory fault: {}", error);

                        if fault.is_none()
                        {
                            fault = Some(error);
                        }

                        self.exit()?;
                    },

                Err(error) =>
                    {
                        self.unwind();

                        return match fault
                            {
                                Some(fault) => Err(fault),
                                None => Err(error)
                            };
                    }
            }
        }

        match fault
        {
            Some(error) => Err(error),
            None => Ok(())
        }
    }

    fn process_token(&mut self, token: &Token) -> error::Result<()>
    {
        // The name of a new word is taken as is, whatever the token looks like.
        if self.compiler == CompilerState::AwaitingName
        {
            let _ = self.dictionary.name_last(token.text());
            self.compiler = CompilerState::Compiling;

            debug!(name = token.text(), entry = self.wp, "named new word");
            return Ok(());
        }

        match take(&mut self.pending)
        {
            PendingToken::None => (),
            PendingToken::Skip =>
                {
                    trace!(token = token.text(), "skipped by branch");
                    return Ok(());
                },
            PendingToken::Literal =>
                {
                    return match token.number()
                        {
                            Some(value) =>
                                {
                                    self.push(value);
                                    Ok(())
                                },

                            None => script_error(self,
                                                 ErrorKind::UndefinedWord,
                                                 format!("Expected a literal value, found {}.",
                                                         token.text()))
                        };
                }
        }

        let found = self.find_word(token.text()).map(|( index, word )| ( index, word.is_immediate() ));

        match found
        {
            Some(( index, true )) => self.execute_word_index(index),

            Some(( index, false )) =>
                {
                    if self.mode == Mode::Compile
                    {
                        trace!(word = token.text(), index, wp = self.wp, "compiling call");
                        self.compile_cell(index as Cell);
                        Ok(())
                    }
                    else
                    {
                        self.execute_word_index(index)
                    }
                },

            None =>
                {
                    match token.number()
                    {
                        Some(value) if self.mode == Mode::Compile =>
                            {
                                trace!(value, wp = self.wp, "compiling literal");
                                self.compile_cell(LIT_INDEX as Cell);
                                self.compile_cell(value);
                                Ok(())
                            },

                        Some(value) =>
                            {
                                self.push(value);
                                Ok(())
                            },

                        None => script_error(self,
                                             ErrorKind::UndefinedWord,
                                             format!("Word {} not found.", token.text()))
                    }
                }
        }
    }

    fn process_line(&mut self, line: &str) -> LineResult
    {
        self.output.clear();
        self.background = None;
        self.pending = PendingToken::None;

        let mut result_error = None;

        self.line_number += 1;

        for token in tokenize_line(LINE_PATH, self.line_number, line)
        {
            self.current_location = Some(token.location().clone());

            if let Err(error) = self.process_token(&token)
            {
                let error = error.with_location(self.current_location.clone());

                warn!(token = token.text(), "line rejected: {}", error);
                result_error = Some(error);
                break;
            }
        }

        self.current_location = None;
        self.pending = PendingToken::None;

        LineResult
            {
                output: take(&mut self.output),
                error: result_error,
                background: self.background.take()
            }
    }
}


impl Interpreter for ThreadedInterpreter
{
    fn emit(&mut self, text: &str)
    {
        if !self.output.is_empty()
        {
            self.output.push(' ');
        }

        self.output.push_str(text);
    }

    fn set_background(&mut self, value: Cell)
    {
        self.background = Some(value);
    }
}


impl ThreadedInterpreter
{
    /// Create a new session with the initial dictionary in place.
    pub fn new() -> ThreadedInterpreter
    {
        let mut interpreter = ThreadedInterpreter
            {
                stack: ParameterStack::new(),
                return_stack: ReturnStack::new(),
                code: CodeMemory::new(),
                wp: 0,

                dictionary: Dictionary::new(),

                mode: Mode::Immediate,
                compiler: CompilerState::Idle,

                current_location: None,
                line_number: 0,

                output: String::new(),
                background: None,

                pending: PendingToken::None
            };

        register_built_in_words(&mut interpreter);
        interpreter
    }

    /// Enter the compiled definition at `entry`, remembering where to resume.
    fn docol(&mut self, entry: usize)
    {
        trace!(entry, resume = self.wp, "docol");

        let _ = self.return_stack.push(self.wp);
        self.wp = entry;
    }

    /// Return to the most recently saved address.
    fn exit(&mut self) -> error::Result<()>
    {
        self.wp = self.return_stack
                      .pop()
                      .map_err(|error| error.with_location(self.current_location.clone()))?;

        trace!(wp = self.wp, depth = self.return_stack.len(), "exit");
        Ok(())
    }

    /// Abandon the whole call chain, putting the cursor back where the outermost call found it.
    fn unwind(&mut self)
    {
        if let Some(&resume) = self.return_stack.peek(0)
        {
            self.wp = resume;
        }

        self.return_stack.clear();
    }

    /// Read the cell under the cursor and move past it.
    fn fetch(&mut self) -> error::Result<Cell>
    {
        match self.code.peek(self.wp)
        {
            Some(&cell) =>
                {
                    self.wp += 1;
                    Ok(cell)
                },

            None => script_error(self,
                                 ErrorKind::MemoryFault,
                                 format!("Read outside of code memory at address {}.", self.wp))
        }
    }

    /// Fetch, resolve, and dispatch a single cell of compiled code.
    fn next(&mut self) -> error::Result<()>
    {
        let address = self.wp;
        let cell = self.fetch()?;

        let behavior = match self.dictionary.resolve(cell)
            {
                Some(word) => word.behavior,
                None => return script_error(self,
                                            ErrorKind::MemoryFault,
                                            format!("Cell {} at address {} is not a word.",
                                                    cell,
                                                    address))
            };

        trace!(address, cell, %behavior, depth = self.return_stack.len(), "next");

        match behavior
        {
            WordBehavior::Compiled(entry) =>
                {
                    self.docol(entry);
                    Ok(())
                },

            WordBehavior::Primitive(primitive) =>
                {
                    let flow = execute_primitive(self, primitive)?;

                    match flow
                    {
                        Flow::Next => Ok(()),

                        Flow::Skip =>
                            {
                                self.wp += 1;
                                Ok(())
                            },

                        Flow::Literal =>
                            {
                                let value = self.fetch()?;

                                self.push(value);
                                Ok(())
                            },

                        Flow::Exit => self.exit()
                    }
                }
        }
    }

    /// Carry out what a primitive executed by the outer interpreter asked for.  There is no code
    /// memory under the cursor at the top level, so skips and literals act on the next token.
    fn apply_top_level_flow(&mut self, flow: Flow) -> error::Result<()>
    {
        match flow
        {
            Flow::Next => (),
            Flow::Skip => self.pending = PendingToken::Skip,
            Flow::Literal => self.pending = PendingToken::Literal,
            Flow::Exit => self.exit()?
        }

        Ok(())
    }
}


impl Default for ThreadedInterpreter
{
    fn default() -> Self
    {
        Self::new()
    }
}


/// The state panel of the virtual machine.
impl Display for ThreadedInterpreter
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        writeln!(f, "mode:     {}", self.mode)?;
        writeln!(f, "compiler: {}", self.compiler)?;
        writeln!(f, "wp:       {}", self.wp)?;

        if self.stack.is_empty()
        {
            writeln!(f, "stack:    <0>")?;
        }
        else
        {
            writeln!(f, "stack:    <{}> {}", self.stack.len(), self.stack)?;
        }

        writeln!(f, "return:   {}", self.return_stack.len())?;
        writeln!(f, "code:")?;
        write!(f, "{}", pretty_print_code(self.code.as_slice(), &self.dictionary))
    }
}
