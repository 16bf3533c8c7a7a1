use crate::runtime::error::{self, ErrorKind, ScriptError};
use std::{
    fmt::{self, Display, Formatter},
    slice::Iter,
};

/// A growable array of cells.  The top of the stack is the end of the array, addresses are
/// absolute indices from the bottom.
///
/// Besides the usual push and pop the stack can be written to at any address with `poke`, which
/// is how code memory gets filled in by the compiler.
#[derive(Clone, Debug)]
pub struct CellStack<T>
where
    T: Clone + Default,
{
    items: Vec<T>,
}

impl<T> Default for CellStack<T>
where
    T: Clone + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Print the items bottom to top separated by spaces.
impl<T> Display for CellStack<T>
where
    T: Clone + Default + Display,
{
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                write!(formatter, " ")?;
            }

            write!(formatter, "{}", item)?;
        }

        Ok(())
    }
}

impl<T> CellStack<T>
where
    T: Clone + Default,
{
    pub fn new() -> CellStack<T> {
        CellStack { items: Vec::new() }
    }

    /// Push a value and return the address it was stored at.
    pub fn push(&mut self, value: T) -> usize {
        self.items.push(value);
        self.items.len() - 1
    }

    /// Pop the top value.  Popping an empty stack is a stack underflow.
    pub fn pop(&mut self) -> error::Result<T> {
        match self.items.pop() {
            Some(value) => Ok(value),
            None => ScriptError::new_as_result(
                None,
                ErrorKind::StackUnderflow,
                "Stack underflow.".to_string(),
            ),
        }
    }

    /// Read the value at an absolute address, if it has been allocated.
    pub fn peek(&self, address: usize) -> Option<&T> {
        self.items.get(address)
    }

    /// Read the value on the top of the stack.
    pub fn top(&self) -> Option<&T> {
        self.items.last()
    }

    /// Overwrite the value at an absolute address.  Writing past the current top extends the
    /// stack, any gap is filled with default values.
    pub fn poke(&mut self, address: usize, value: T) {
        if address >= self.items.len() {
            self.items.resize(address + 1, T::default());
        }

        self.items[address] = value;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over the items from the bottom of the stack to the top.
    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    /// View the whole stack as a slice, bottom first.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
