use crate::ids::{NonterminalId, RuleId, StateId, TerminalId};
use crate::util::{Code, Position};
use std::fmt::{Display, Formatter, Write};

/// A build-time error: malformed rule, undefined symbol, uncompilable regex, or a
/// conflict escalated by [`ConflictPolicy::Strict`](crate::ConflictPolicy::Strict).
#[derive(Debug, Clone)]
pub enum GrammarError {
    UndefinedSymbol(String),
    UncompilableRegex { terminal: String, message: String },
    NullableRegex(String),
    EmptyRepeat,
    NoAcceptingState,
    Conflict(ConflictError),
}

/// Two reductions (or a shift and a reduction) tie on the same `(state, terminal)` cell.
#[derive(Debug, Clone)]
pub enum ConflictError {
    ReduceReduce {
        state: StateId,
        terminal: TerminalId,
        first: RuleId,
        second: RuleId,
    },
    ShiftReduce {
        state: StateId,
        terminal: TerminalId,
        rule: RuleId,
    },
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::UndefinedSymbol(name) => {
                write!(f, "GrammarError: undefined symbol '{}'", name)
            }
            GrammarError::UncompilableRegex { terminal, message } => write!(
                f,
                "GrammarError: pattern for terminal '{}' is not a valid regex: {}",
                terminal, message
            ),
            GrammarError::NullableRegex(name) => write!(
                f,
                "GrammarError: pattern for terminal '{}' matches the empty string",
                name
            ),
            GrammarError::EmptyRepeat => {
                write!(f, "GrammarError: repeat operator has no element")
            }
            GrammarError::NoAcceptingState => write!(
                f,
                "GrammarError: grammar has no accepting derivation from the start symbol"
            ),
            GrammarError::Conflict(c) => write!(f, "GrammarError: {}", c),
        }
    }
}

impl Display for ConflictError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictError::ReduceReduce {
                state,
                terminal,
                first,
                second,
            } => write!(
                f,
                "reduce/reduce conflict in state {} on terminal {}: rule {} vs rule {}",
                state, terminal, first, second
            ),
            ConflictError::ShiftReduce {
                state,
                terminal,
                rule,
            } => write!(
                f,
                "shift/reduce conflict in state {} on terminal {}: shift vs reduce({})",
                state, terminal, rule
            ),
        }
    }
}

/// A parse-time error: an unmatched byte range when the grammar disables
/// [skip_unmatched](crate::GrammarBuilder::skip_unmatched).
#[derive(Debug, Clone)]
pub struct TokenizeError {
    pub pointer: usize,
    pub message: String,
}

impl Display for TokenizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenizeError: {}", self.message)
    }
}

/// An unexpected token encountered by the shift/reduce driver.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub pointer: usize,
    pub token_text: String,
    pub token_type_name: String,
    pub expected: Vec<String>,
    pub position: Position,
}

impl ParseError {
    pub(crate) fn new(
        code: &Code,
        pointer: usize,
        token_text: String,
        token_type_name: String,
        mut expected: Vec<String>,
    ) -> Self {
        expected.sort();
        expected.dedup();
        Self {
            pointer,
            token_text,
            token_type_name,
            expected,
            position: code.obtain_position(pointer),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut expected = String::new();
        for (i, name) in self.expected.iter().enumerate() {
            if i > 0 {
                expected.write_str(", ").unwrap();
            }
            expected.write_str(name).unwrap();
        }
        write!(
            f,
            "Unexpected token: '{}' ({}), expected one of: {} (at {})",
            self.token_text, self.token_type_name, expected, self.position
        )
    }
}

impl std::error::Error for GrammarError {}
impl std::error::Error for TokenizeError {}
impl std::error::Error for ParseError {}

pub(crate) fn undefined_nonterminal(id: NonterminalId) -> GrammarError {
    GrammarError::UndefinedSymbol(format!("nonterminal#{}", id))
}
