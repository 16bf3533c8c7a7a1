/// Module for managing the input line, turning it into tokens, and the definitions of the cells
/// and primitive operations that make up compiled code.
pub mod lang;

/// Module for the runtime and the data structures used by the virtual machine.  As well as the
/// threaded interpreter itself.
pub mod runtime;
