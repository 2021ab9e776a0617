use crate::analysis::Analysis;
use crate::ids::{NonterminalId, RuleId, StateId, SymbolId, TerminalId};
use crate::log::Log;
use crate::lr0::{self, Item};
use crate::shape::GrammarShape;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// One state of the LALR(1) automaton: its kernel (the lookahead-insensitive identity used
/// to merge states), the full closure over that kernel, each closure item's current
/// lookahead set, and the transitions discovered so far.
pub struct State {
    pub kernel: Vec<Item>,
    pub closure: Vec<Item>,
    pub lookaheads: HashMap<Item, BTreeSet<TerminalId>>,
    pub transitions: BTreeMap<SymbolId, StateId>,
}

pub struct Automaton {
    pub states: Vec<State>,
}

/// Build the LALR(1) automaton: a single fixed point over a graph whose nodes are LALR
/// items. Closure identity is keyed by the `(rule, dot)` kernel, lookahead-insensitive -
/// merging states this way is what yields LALR(1) state counts rather than canonical
/// LR(1)'s.
pub fn build(shape: &GrammarShape, analysis: &Analysis, debug: &Log<&'static str>) -> Automaton {
    let mut lr0_memo: HashMap<Vec<Item>, Vec<Item>> = HashMap::new();
    let mut states: Vec<State> = Vec::new();
    let mut kernel_index: HashMap<Vec<Item>, StateId> = HashMap::new();
    let mut worklist: VecDeque<StateId> = VecDeque::new();

    let start_item = Item::new(RuleId::AUGMENTED_START, 0);
    let start_kernel = vec![start_item];
    let mut start_la: HashMap<Item, BTreeSet<TerminalId>> = HashMap::new();
    start_la.insert(start_item, BTreeSet::from([TerminalId::EOF]));
    states.push(State {
        kernel: start_kernel.clone(),
        closure: Vec::new(),
        lookaheads: start_la,
        transitions: BTreeMap::new(),
    });
    kernel_index.insert(start_kernel, StateId::from(0));
    worklist.push_back(StateId::from(0));

    while let Some(sid) = worklist.pop_front() {
        let kernel = states[sid.index()].kernel.clone();
        let kernel_la = states[sid.index()].lookaheads.clone();
        let closure_items = lr0::closure_of(&kernel, shape, &mut lr0_memo, debug);
        let closure_la = propagate_lookaheads(shape, analysis, &closure_items, &kernel_la);

        let mut by_symbol: HashMap<SymbolId, Vec<(Item, BTreeSet<TerminalId>)>> = HashMap::new();
        for item in &closure_items {
            if let Some(sym) = item.next_symbol(shape) {
                let la = closure_la.get(item).cloned().unwrap_or_default();
                by_symbol.entry(sym).or_default().push((item.advanced(), la));
            }
        }

        states[sid.index()].closure = closure_items;
        states[sid.index()].lookaheads = closure_la;

        let mut symbols: Vec<SymbolId> = by_symbol.keys().copied().collect();
        symbols.sort();

        for sym in symbols {
            let succ_list = by_symbol.remove(&sym).unwrap();
            let mut succ_kernel: Vec<Item> = Vec::new();
            let mut succ_la: HashMap<Item, BTreeSet<TerminalId>> = HashMap::new();
            for (item, la) in succ_list {
                succ_la.entry(item).or_insert_with(|| {
                    succ_kernel.push(item);
                    BTreeSet::new()
                });
                succ_la.get_mut(&item).unwrap().extend(la);
            }

            if let Some(&existing_sid) = kernel_index.get(&succ_kernel) {
                let mut grew = false;
                for (item, la) in &succ_la {
                    let entry = states[existing_sid.index()]
                        .lookaheads
                        .entry(*item)
                        .or_default();
                    let before = entry.len();
                    entry.extend(la.iter().copied());
                    if entry.len() != before {
                        grew = true;
                        debug.lookahead_growth(existing_sid.index() as u32, item.rule.index() as u32, item.dot, la);
                    }
                }
                states[sid.index()].transitions.insert(sym, existing_sid);
                if grew {
                    worklist.push_back(existing_sid);
                }
            } else {
                let new_sid = StateId::from(states.len());
                states.push(State {
                    kernel: succ_kernel.clone(),
                    closure: Vec::new(),
                    lookaheads: succ_la,
                    transitions: BTreeMap::new(),
                });
                kernel_index.insert(succ_kernel, new_sid);
                states[sid.index()].transitions.insert(sym, new_sid);
                worklist.push_back(new_sid);
            }
        }
    }

    Automaton { states }
}

/// Compute the lookahead of every item in an already-known closure, given the kernel's
/// current lookaheads. This is a local fixed point: for each item whose dot precedes a
/// nonterminal M, the "tail-first" of the item (FIRST of the symbols after the dot,
/// extended by the item's own lookahead when that tail is fully nullable) is unioned into
/// the lookahead of every item `(M -> ., 0)` already present in the closure.
fn propagate_lookaheads(
    shape: &GrammarShape,
    analysis: &Analysis,
    closure_items: &[Item],
    kernel_la: &HashMap<Item, BTreeSet<TerminalId>>,
) -> HashMap<Item, BTreeSet<TerminalId>> {
    let mut la: HashMap<Item, BTreeSet<TerminalId>> = HashMap::new();
    for item in closure_items {
        la.insert(*item, kernel_la.get(item).cloned().unwrap_or_default());
    }

    loop {
        let mut changed = false;
        for item in closure_items {
            let Some(sym) = item.next_symbol(shape) else {
                continue;
            };
            if shape.is_terminal(sym) {
                continue;
            }
            let nt = NonterminalId::from(sym.index() - shape.num_terminals);
            let tail = &shape.rule(item.rule).rhs[(item.dot as usize + 1)..];
            let item_la = la[item].clone();
            let tail_first = tail_first_set(shape, analysis, tail, &item_la);

            for &rule in &shape.nonterminal_rules[nt.index()] {
                let target = Item::new(rule, 0);
                let entry = la.entry(target).or_default();
                let before = entry.len();
                entry.extend(tail_first.iter().copied());
                if entry.len() != before {
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    la
}

fn tail_first_set(
    shape: &GrammarShape,
    analysis: &Analysis,
    tail: &[SymbolId],
    item_lookahead: &BTreeSet<TerminalId>,
) -> BTreeSet<TerminalId> {
    let mut result = BTreeSet::new();
    let mut tail_nullable = true;

    for &sym in tail {
        if shape.is_terminal(sym) {
            result.insert(TerminalId::from(sym.index()));
            tail_nullable = false;
            break;
        }
        let nt = NonterminalId::from(sym.index() - shape.num_terminals);
        result.extend(analysis.first[nt.index()].iter().copied());
        if !analysis.is_nullable(nt) {
            tail_nullable = false;
            break;
        }
    }

    if tail_nullable {
        result.extend(item_lookahead.iter().copied());
    }
    result
}
