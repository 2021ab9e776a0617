use crate::ids::{NonterminalId, RuleId, TerminalId};

/// An atomic lexical symbol. The end-of-input terminal (`TerminalId::EOF`) has no pattern;
/// every other terminal's pattern is a non-nullable regex compiled once by the
/// [`Tokenizer`](crate::Tokenizer) at build time.
#[derive(Debug, Clone)]
pub struct Terminal {
    pub id: TerminalId,
    pub name: String,
    pub pattern: Option<String>,
}

impl Terminal {
    pub(crate) fn eof() -> Self {
        Self {
            id: TerminalId::EOF,
            name: "EOF".to_string(),
            pattern: None,
        }
    }
}

/// A syntactic category: an ordered set of alternative productions it owns.
#[derive(Debug, Clone)]
pub struct Nonterminal {
    pub id: NonterminalId,
    pub name: String,
    pub rules: Vec<RuleId>,
    pub nullable: bool,
    /// Set for nonterminals synthesized by the repeat-operator normalizer.
    pub generated: bool,
}

impl Nonterminal {
    pub(crate) fn start() -> Self {
        Self {
            id: NonterminalId::START,
            name: "_START".to_string(),
            rules: Vec::new(),
            nullable: false,
            generated: false,
        }
    }
}
