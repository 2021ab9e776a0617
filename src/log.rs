use std::fmt::{Debug, Display, Formatter};

/// Debug trace verbosity, ported from this corpus's usual lexeme/production debug label
/// idiom. No external logging crate is pulled in; tracing is a `println!` gated behind
/// `#[cfg(debug_assertions)]`, exactly as the combinator engine this crate replaced did it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Result(T),
    Verbose(T),
}

impl<T> Log<T> {
    pub fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Result(_) => 3,
            Log::Verbose(_) => 4,
        }
    }
}

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Success(s) | Log::Result(s) | Log::Verbose(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

impl Log<&'static str> {
    /// Trace a closure gaining a new kernel item during LR(0) construction.
    pub fn closure_growth(&self, label: &str) {
        #[cfg(debug_assertions)]
        if self.order() >= Log::Default(()).order() {
            println!("[{}; closure]: added item while closing {}", self, label);
        }
    }

    /// Trace a lookahead set growing during LALR propagation.
    pub fn lookahead_growth<T: Debug>(&self, state: u32, rule: u32, dot: u32, added: &T) {
        #[cfg(debug_assertions)]
        if self.order() >= Log::Success(()).order() {
            println!(
                "[{}; lookahead]: state {} item ({}, {}) grew by {:?}",
                self, state, rule, dot, added
            );
        }
    }

    /// Trace a shift/reduce conflict resolved in favor of shift.
    pub fn shift_reduce_resolved(&self, state: u32, terminal: &str, rule: u32) {
        #[cfg(debug_assertions)]
        if self.order() >= Log::Result(()).order() {
            println!(
                "[{}; conflict]: state {} on {} resolved shift over reduce({})",
                self, state, terminal, rule
            );
        }
    }

    /// Trace a single driver step (shift or reduce) during parsing.
    pub fn driver_step(&self, message: &str) {
        #[cfg(debug_assertions)]
        if self.order() >= Log::Verbose(()).order() {
            println!("[{}; driver]: {}", self, message);
        }
    }
}
