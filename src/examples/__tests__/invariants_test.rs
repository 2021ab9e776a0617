use crate::examples::{json, parens, repeat};
use crate::{SymbolId, StateId};
use std::collections::HashSet;

#[test]
fn parameter_indices_are_strictly_increasing_and_in_range() {
    let grammar = json::strict().unwrap();
    for rule in &grammar.rules {
        let mut prev: Option<u32> = None;
        for &idx in &rule.parameter_indices {
            if let Some(p) = prev {
                assert!(idx > p, "parameter_indices must be strictly increasing");
            }
            assert!((idx as usize) < rule.rhs.len(), "parameter index out of range");
            prev = Some(idx);
        }
    }
}

#[test]
fn table_codes_stay_within_their_documented_ranges() {
    let grammar = parens::grammar().unwrap();
    let num_states = grammar.table.num_states as i64;
    let num_rules = grammar.rules.len() as i64;

    for state in 0..grammar.table.num_states {
        for symbol in 0..grammar.table.num_symbols {
            let code = grammar.table.code(StateId::from(state), SymbolId::from(symbol));
            assert!(
                code >= -num_rules && code <= num_states,
                "code {} out of [-{}, {}]",
                code,
                num_rules,
                num_states
            );
        }
    }
}

#[test]
fn every_nonterminal_owns_a_distinct_flat_symbol_id() {
    let grammar = repeat::grammar().unwrap();
    let mut seen = HashSet::new();
    for nt in &grammar.nonterminals {
        let flat = grammar.shape.num_terminals + nt.id.index();
        assert!(seen.insert(flat), "duplicate flat symbol id {}", flat);
    }
}

#[test]
fn rebuilding_a_grammar_yields_the_same_rule_count() {
    let first = json::strict().unwrap();
    let second = json::strict().unwrap();
    assert_eq!(first.rules.len(), second.rules.len());
    assert_eq!(first.nonterminals.len(), second.nonterminals.len());
}

#[test]
fn exactly_one_cell_accepts() {
    let grammar = parens::grammar().unwrap();
    let mut accepting = 0;
    for state in 0..grammar.table.num_states {
        for symbol in 0..grammar.table.num_symbols {
            if matches!(
                grammar.table.action(StateId::from(state), SymbolId::from(symbol)),
                crate::Action::Accept
            ) {
                accepting += 1;
            }
        }
    }
    assert_eq!(accepting, 1);
}
