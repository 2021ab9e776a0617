use crate::ids::{NonterminalId, RuleId, SymbolId};

/// The lookahead- and callback-free skeleton of a normalized grammar: just enough to run
/// FIRST/nullable analysis and build the LALR(1) automaton. Keeping this separate from
/// [`Rule`](crate::rule::Rule) means the automaton-construction stages never need to be
/// generic over the grammar author's builder/node types.
pub struct RuleShape {
    pub lhs: NonterminalId,
    pub rhs: Vec<SymbolId>,
}

pub struct GrammarShape {
    pub num_terminals: usize,
    pub num_nonterminals: usize,
    pub rules: Vec<RuleShape>,
    /// Rule ids owned by each nonterminal, indexed by `NonterminalId`.
    pub nonterminal_rules: Vec<Vec<RuleId>>,
}

impl GrammarShape {
    pub fn num_symbols(&self) -> usize {
        self.num_terminals + self.num_nonterminals
    }

    pub fn is_terminal(&self, symbol: SymbolId) -> bool {
        symbol.index() < self.num_terminals
    }

    pub fn rule(&self, id: RuleId) -> &RuleShape {
        &self.rules[id.index()]
    }
}
