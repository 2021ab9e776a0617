mod code;
mod position;
use once_cell::unsync::OnceCell;

/// The line and column information at a code point.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A wrapper for the input text being parsed, with lazily computed line-break offsets.
pub struct Code<'c> {
    pub value: &'c [u8],
    line_breaks: OnceCell<Vec<usize>>,
}
