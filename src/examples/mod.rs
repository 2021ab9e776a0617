//! Grammars used to exercise the crate end to end. Mirrors this corpus's own convention of
//! keeping runnable example grammars alongside the library rather than only in `tests/`, so
//! the grammar-construction API reads naturally from real usage.

pub mod inherited;
pub mod json;
pub mod parens;
pub mod repeat;

#[cfg(test)]
mod __tests__;
