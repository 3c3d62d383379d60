use crate::error::{BuildError, BuildResult};
use crate::value::Value;

/// Position in the argument list shared by block resolution and rendering.
///
/// Arguments are only ever read left to right; each one is handed out at most
/// once.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'v> {
    args: &'v [Value],
    pos: usize,
}

impl<'v> Cursor<'v> {
    pub fn new(args: &'v [Value]) -> Self {
        Self { args, pos: 0 }
    }

    /// The next unconsumed argument, without consuming it.
    pub fn peek(&self) -> Option<&'v Value> {
        self.args.get(self.pos)
    }

    /// Consume the next argument, failing if the list is exhausted.
    pub fn take_next(&mut self, offset: usize, marker: &str) -> BuildResult<&'v Value> {
        let value = self.peek().ok_or_else(|| {
            BuildError::argument(
                offset,
                format!(
                    "no argument left for '{marker}' ({} supplied)",
                    self.args.len()
                ),
            )
        })?;
        self.pos += 1;
        Ok(value)
    }

    /// Move past `n` arguments without reading them.
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Number of arguments consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos.min(self.args.len())
    }

    pub fn remaining(&self) -> usize {
        self.args.len().saturating_sub(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_next_consumes_in_order() {
        let args = [Value::Int(1), Value::Int(2)];
        let mut cursor = Cursor::new(&args);
        assert_eq!(cursor.take_next(0, "?d").unwrap(), &Value::Int(1));
        assert_eq!(cursor.peek(), Some(&Value::Int(2)));
        assert_eq!(cursor.take_next(0, "?d").unwrap(), &Value::Int(2));
        assert_eq!(cursor.remaining(), 0);
        let err = cursor.take_next(9, "?d").unwrap_err();
        assert!(err.is_argument());
        assert_eq!(err.offset(), 9);
    }

    #[test]
    fn advance_past_end_is_clamped() {
        let args = [Value::Null];
        let mut cursor = Cursor::new(&args);
        cursor.advance(3);
        assert_eq!(cursor.consumed(), 1);
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.take_next(0, "?").is_err());
    }
}
