//! A parser-generator-and-runtime library for context-free grammars.
//!
//! Given a declarative grammar - terminals with regular-expression patterns, nonterminals
//! with production rules, and semantic callbacks attached to rules - this crate builds a
//! deterministic LALR(1) shift/reduce automaton and, at parse time, drives that automaton
//! against an input string to produce a user-defined [AST](AstNode).
//!
//! # Design
//!
//! Three subsystems, in dependency order:
//! 1. **Normalization** (`normalize`) rewrites high-level lexical operators - chiefly a
//!    repetition operator with optional separator and optional empty acceptance - into pure
//!    BNF with fresh generated nonterminals and synthesized callbacks.
//! 2. **LALR(1) construction** (`analysis`, `lr0`, `lalr`, `table`) computes FIRST/nullable
//!    sets, builds the LR(0) kernel item graph, propagates lookaheads by a single fixed
//!    point, and emits a dense action/goto table.
//! 3. **The driver** (`driver`) executes that table against a tokenized input, maintaining a
//!    value stack and dispatching a callback per reduction.
//!
//! A grammar is assembled with [`GrammarBuilder`], compiled once via
//! [`GrammarBuilder::build`], and then reused across any number of [`Grammar::parse`] calls -
//! the table, compiled regex, and FIRST/nullable sets are immutable and thread-shareable;
//! only the caller-supplied builder and the parse stack are per-parse state.
//!
//! # Example
//!
//! A minimal grammar for balanced parentheses around a word (see
//! [`examples::parens`] for the full, tested version):
//!
//! ```ignore
//! use lalr_pt::{GrammarBuilder, LexicalElement, AstNode, NodeImpl};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Node { Word(String), Wrapped(Box<Node>), Null }
//! impl NodeImpl for Node { fn null() -> Self { Node::Null } }
//!
//! struct Builder;
//! let mut b = GrammarBuilder::<Builder, Node>::new();
//! let word = b.terminal("WORD", r"^\w+");
//! let open = b.terminal("OPEN", r"^\(");
//! let close = b.terminal("CLOSE", r"^\)");
//! let d = b.nonterminal("D");
//! b.start(d);
//! // D -> WORD
//! // D -> "(" D ")"
//! ```
//!
//! # License
//! Provided under the MIT OR Apache-2.0 license.

mod analysis;
mod ast;
mod builder;
mod driver;
mod element;
mod error;
pub mod examples;
mod grammar;
mod ids;
mod lalr;
mod log;
mod lr0;
mod normalize;
mod rule;
mod shape;
mod symbol;
mod table;
mod tokenizer;
mod util;

pub use ast::{AstNode, NodeImpl};
pub use builder::{identity, noop, Callback, ListBuilder, VecListBuilder};
pub use element::LexicalElement;
pub use error::{ConflictError, GrammarError, ParseError, TokenizeError};
pub use grammar::{Grammar, GrammarBuilder, LazyGrammar, ParseErrorKind};
pub use ids::{NonterminalId, RuleId, StateId, SymbolId, TerminalId};
pub use log::Log;
pub use symbol::{Nonterminal, Terminal};
pub use table::{Action, ConflictPolicy, Table};
pub use tokenizer::Token;
pub use util::{Code, Position};
