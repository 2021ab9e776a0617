use crate::ids::{NonterminalId, RuleId};
use crate::log::Log;
use crate::shape::GrammarShape;
use std::collections::HashMap;

/// An LR(0) item: a rule paired with a dot position, `0 <= dot <= |rhs|`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Item {
    pub rule: RuleId,
    pub dot: u32,
}

impl Item {
    pub fn new(rule: RuleId, dot: u32) -> Self {
        Self { rule, dot }
    }

    pub fn at_end(&self, shape: &GrammarShape) -> bool {
        self.dot as usize == shape.rule(self.rule).rhs.len()
    }

    /// The symbol immediately after the dot, if any.
    pub fn next_symbol(&self, shape: &GrammarShape) -> Option<crate::ids::SymbolId> {
        shape.rule(self.rule).rhs.get(self.dot as usize).copied()
    }

    pub fn advanced(&self) -> Self {
        Self {
            rule: self.rule,
            dot: self.dot + 1,
        }
    }
}

/// `kernel_of(N)`: items `(r, 0)` for every rule owned by nonterminal `N`.
pub fn kernel_of(nt: NonterminalId, shape: &GrammarShape) -> Vec<Item> {
    shape.nonterminal_rules[nt.index()]
        .iter()
        .map(|&r| Item::new(r, 0))
        .collect()
}

/// Memoized epsilon-closure of an LR(0) item set: starting from `kernel`, repeatedly add the
/// kernel items of every nonterminal immediately after a dot, deduplicating by `(rule,
/// dot)` and preserving insertion order, until no new items appear. Memoized on the
/// hashed kernel: equal kernels are structurally equal `Vec<Item>`s built in the same
/// deterministic order, so they hash and compare equal across calls.
pub fn closure_of(
    kernel: &[Item],
    shape: &GrammarShape,
    memo: &mut HashMap<Vec<Item>, Vec<Item>>,
    debug: &Log<&'static str>,
) -> Vec<Item> {
    let key: Vec<Item> = kernel.to_vec();
    if let Some(cached) = memo.get(&key) {
        return cached.clone();
    }

    let mut items = key.clone();
    let mut seen: std::collections::HashSet<Item> = items.iter().copied().collect();
    let mut frontier = items.clone();

    loop {
        let mut next_frontier = Vec::new();
        for item in &frontier {
            if let Some(sym) = item.next_symbol(shape) {
                if !shape.is_terminal(sym) {
                    let nt = NonterminalId::from(sym.index() - shape.num_terminals);
                    for new_item in kernel_of(nt, shape) {
                        if seen.insert(new_item) {
                            debug.closure_growth(&format!(
                                "item (rule {}, dot {})",
                                new_item.rule.index(),
                                new_item.dot
                            ));
                            items.push(new_item);
                            next_frontier.push(new_item);
                        }
                    }
                }
            }
        }
        if next_frontier.is_empty() {
            break;
        }
        frontier = next_frontier;
    }

    memo.insert(key, items.clone());
    items
}
