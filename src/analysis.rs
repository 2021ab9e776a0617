use crate::ids::{NonterminalId, TerminalId};
use crate::shape::GrammarShape;
use std::collections::HashSet;

/// Per-symbol FIRST sets and per-nonterminal nullability, computed once by a
/// worklist fixed point over the finite symbol universe.
pub struct Analysis {
    /// Indexed by `NonterminalId`.
    pub nullable: Vec<bool>,
    /// Indexed by `NonterminalId`; terminal FIRST sets are always the singleton `{t}` and
    /// are not materialized here.
    pub first: Vec<HashSet<TerminalId>>,
}

impl Analysis {
    pub fn compute(shape: &GrammarShape) -> Self {
        let nullable = compute_nullable(shape);
        let first = compute_first(shape, &nullable);
        Self { nullable, first }
    }

    pub fn is_nullable(&self, nt: NonterminalId) -> bool {
        self.nullable[nt.index()]
    }

    /// FIRST of a symbol sequence, following nullable prefixes.
    pub fn first_of_sequence(&self, shape: &GrammarShape, symbols: &[crate::ids::SymbolId]) -> HashSet<TerminalId> {
        let mut result = HashSet::new();
        for &sym in symbols {
            if shape.is_terminal(sym) {
                result.insert(TerminalId::from(sym.index()));
                return result;
            }
            let nt = NonterminalId::from(sym.index() - shape.num_terminals);
            result.extend(self.first[nt.index()].iter().copied());
            if !self.is_nullable(nt) {
                return result;
            }
        }
        result
    }
}

fn compute_nullable(shape: &GrammarShape) -> Vec<bool> {
    let mut nullable = vec![false; shape.num_nonterminals];
    loop {
        let mut changed = false;
        for rule in &shape.rules {
            let lhs_idx = rule.lhs.index();
            if nullable[lhs_idx] {
                continue;
            }
            let is_nullable_rule = rule.rhs.iter().all(|&sym| {
                !shape.is_terminal(sym) && nullable[sym.index() - shape.num_terminals]
            });
            if is_nullable_rule {
                nullable[lhs_idx] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    nullable
}

fn compute_first(shape: &GrammarShape, nullable: &[bool]) -> Vec<HashSet<TerminalId>> {
    let mut first: Vec<HashSet<TerminalId>> = vec![HashSet::new(); shape.num_nonterminals];
    loop {
        let mut changed = false;
        for rule in &shape.rules {
            let lhs_idx = rule.lhs.index();
            for &sym in &rule.rhs {
                if shape.is_terminal(sym) {
                    let t = TerminalId::from(sym.index());
                    changed |= first[lhs_idx].insert(t);
                    break;
                }
                let nt_idx = sym.index() - shape.num_terminals;
                let additions: Vec<TerminalId> = first[nt_idx].iter().copied().collect();
                for t in additions {
                    changed |= first[lhs_idx].insert(t);
                }
                if !nullable[nt_idx] {
                    break;
                }
            }
        }
        if !changed {
            break;
        }
    }
    first
}
