use crate::examples::inherited::{self, UnitBuilder, UnitNode};
use crate::{SymbolId, StateId};

#[test]
fn child_parses_with_the_parents_unchanged_rules() {
    let parent = inherited::parent().unwrap();
    let child = inherited::child().unwrap();

    let mut parent_builder = UnitBuilder;
    assert_eq!(parent.parse("a", &mut parent_builder).unwrap().value, UnitNode);

    let mut child_builder = UnitBuilder;
    assert_eq!(child.parse("a", &mut child_builder).unwrap().value, UnitNode);
}

#[test]
fn building_the_same_grammar_twice_is_deterministic() {
    let first = inherited::parent().unwrap();
    let second = inherited::parent().unwrap();

    assert_eq!(first.table.num_states, second.table.num_states);
    assert_eq!(first.table.num_symbols, second.table.num_symbols);

    for state in 0..first.table.num_states {
        for symbol in 0..first.table.num_symbols {
            let s = StateId::from(state);
            let sym = SymbolId::from(symbol);
            assert_eq!(
                first.table.code(s, sym),
                second.table.code(s, sym),
                "divergent cell at state {} symbol {}",
                state,
                symbol
            );
        }
    }
}
