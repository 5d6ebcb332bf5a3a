use std::collections::HashMap;

use crate::{error::RuntimeError, interpreter::value::Value};

/// The named memory store.
///
/// Maps case-sensitive addresses to values. Cells are created on first write
/// and live for the rest of the session.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Memory {
    cells: HashMap<String, Value>,
}

impl Memory {
    /// Creates an empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a value, creating the cell if needed.
    pub fn write(&mut self, address: &str, value: Value) {
        self.cells.insert(address.to_string(), value);
    }

    /// Reads the value at `address`.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UndefinedAddress`] if nothing was stored there.
    pub fn read(&self, address: &str) -> Result<Value, RuntimeError> {
        self.get(address)
            .ok_or_else(|| RuntimeError::UndefinedAddress { address: address.to_string() })
    }

    /// Copies the value at `src` into `dest`.
    ///
    /// `dest` is left untouched when `src` is undefined.
    ///
    /// # Example
    /// ```
    /// use fir::interpreter::{memory::Memory, value::Value};
    ///
    /// let mut memory = Memory::new();
    /// memory.write("x", Value::Integer(8));
    /// memory.assign("y", "x").unwrap();
    /// assert_eq!(memory.get("y"), Some(Value::Integer(8)));
    ///
    /// assert!(memory.assign("z", "w").is_err());
    /// assert_eq!(memory.get("z"), None);
    /// ```
    pub fn assign(&mut self, dest: &str, src: &str) -> Result<(), RuntimeError> {
        let value = self.read(src)?;
        self.write(dest, value);
        Ok(())
    }

    /// Returns the value at `address`, if any.
    #[must_use]
    pub fn get(&self, address: &str) -> Option<Value> {
        self.cells.get(address).copied()
    }

    /// Number of defined addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no address has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_case_sensitive() {
        let mut memory = Memory::new();
        memory.write("X", Value::Integer(1));
        assert!(matches!(memory.read("x"),
                         Err(RuntimeError::UndefinedAddress { address }) if address == "x"));
    }

    #[test]
    fn writes_overwrite() {
        let mut memory = Memory::new();
        memory.write("x", Value::Integer(1));
        memory.write("x", Value::Float(2.5));
        assert_eq!(memory.read("x").unwrap(), Value::Float(2.5));
        assert_eq!(memory.len(), 1);
    }
}
