use crate::{error::RuntimeError, interpreter::value::Value};

/// The evaluation stack.
///
/// Values are pushed and popped at the tail only. The stack is unbounded.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Stack {
    values: Vec<Value>,
}

impl Stack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Pushes a value onto the stack without changing its type.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Removes and returns the top value.
    ///
    /// # Errors
    /// Returns [`RuntimeError::StackUnderflow`] if the stack is empty.
    pub fn pop(&mut self) -> Result<Value, RuntimeError> {
        self.values.pop().ok_or(RuntimeError::StackUnderflow)
    }

    /// Replaces the two top values `a` (below) and `b` (top) with `a + b`.
    ///
    /// # Example
    /// ```
    /// use fir::interpreter::{stack::Stack, value::Value};
    ///
    /// let mut stack = Stack::new();
    /// stack.push(Value::Integer(2));
    /// stack.push(Value::Float(3.0));
    /// stack.add().unwrap();
    /// assert_eq!(stack.peek(), Some(&Value::Integer(5)));
    /// ```
    pub fn add(&mut self) -> Result<(), RuntimeError> {
        let (a, b) = self.pop_operands("addition")?;
        self.values.push(a + b);
        Ok(())
    }

    /// Replaces the two top values `a` (below) and `b` (top) with `a - b`.
    ///
    /// # Example
    /// ```
    /// use fir::interpreter::{stack::Stack, value::Value};
    ///
    /// let mut stack = Stack::new();
    /// stack.push(Value::Integer(10));
    /// stack.push(Value::Integer(3));
    /// stack.sub().unwrap();
    /// assert_eq!(stack.peek(), Some(&Value::Integer(7)));
    /// ```
    pub fn sub(&mut self) -> Result<(), RuntimeError> {
        let (a, b) = self.pop_operands("subtraction")?;
        self.values.push(a - b);
        Ok(())
    }

    /// Pops `b` then `a`, leaving the stack untouched when fewer than two
    /// values are present.
    fn pop_operands(&mut self, operation: &'static str) -> Result<(Value, Value), RuntimeError> {
        if self.values.len() < 2 {
            return Err(RuntimeError::InsufficientOperands { operation });
        }
        let b = self.pop()?;
        let a = self.pop()?;
        Ok((a, b))
    }

    /// Returns the top value without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Value> {
        self.values.last()
    }

    /// Number of values on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the stack holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the values from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_on_empty_stack_underflows() {
        let mut stack = Stack::new();
        assert!(matches!(stack.pop(), Err(RuntimeError::StackUnderflow)));
    }

    #[test]
    fn arithmetic_needs_two_operands() {
        let mut stack = Stack::new();
        stack.push(Value::Integer(1));

        assert!(matches!(stack.add(),
                         Err(RuntimeError::InsufficientOperands { operation: "addition" })));
        assert!(matches!(stack.sub(),
                         Err(RuntimeError::InsufficientOperands { operation: "subtraction" })));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn sub_takes_top_from_second() {
        let mut stack = Stack::new();
        stack.push(Value::Integer(3));
        stack.push(Value::Integer(10));
        stack.sub().unwrap();
        assert_eq!(stack.pop().unwrap(), Value::Integer(-7));
        assert!(stack.is_empty());
    }

    #[test]
    fn fractional_sums_stay_float() {
        let mut stack = Stack::new();
        stack.push(Value::Float(1.25));
        stack.push(Value::Integer(2));
        stack.add().unwrap();
        assert_eq!(stack.peek(), Some(&Value::Float(3.25)));
    }

    #[test]
    fn pushed_values_keep_their_type() {
        let mut stack = Stack::new();
        stack.push(Value::Float(3.0));
        stack.push(Value::Integer(3));
        let values = stack.iter().copied().collect::<Vec<_>>();
        assert_eq!(values, vec![Value::Float(3.0), Value::Integer(3)]);
    }
}
