/// The core data structures used by the virtual machine: the cell stacks and the dictionary.
pub mod data_structures;

/// Module for defining the built-in native words that make up the initial dictionary.
pub mod built_ins;

/// Module for defining the error reporting of the virtual machine.
pub mod error;

/// Module for defining the inner and outer interpreters, and the session state they share.
pub mod interpreter;
