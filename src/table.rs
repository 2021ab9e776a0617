use crate::error::{ConflictError, GrammarError};
use crate::ids::{RuleId, StateId, SymbolId, TerminalId};
use crate::lalr::Automaton;
use crate::log::Log;
use crate::shape::GrammarShape;

/// One cell of the action/goto table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(StateId),
    Reduce(RuleId),
    Accept,
    Error,
}

/// How a shift/reduce conflict is resolved at build time. Reduce/reduce conflicts are
/// always fatal regardless of policy; this only governs shift/reduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// The conventional, silent resolution: the existing shift is kept.
    ShiftWins,
    /// Escalate shift/reduce conflicts to a fatal `GrammarError` too.
    Strict,
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        ConflictPolicy::ShiftWins
    }
}

/// The dense action/goto matrix, shape `(num_states, num_symbols)`.
pub struct Table {
    pub num_states: usize,
    pub num_symbols: usize,
    actions: Vec<Action>,
}

impl Table {
    fn cell(&self, state: StateId, symbol: SymbolId) -> usize {
        state.index() * self.num_symbols + symbol.index()
    }

    pub fn action(&self, state: StateId, symbol: SymbolId) -> Action {
        self.actions[self.cell(state, symbol)]
    }

    /// A compact integer encoding: shift `k+1`, reduce `-(r+1)`, accept `-1`,
    /// error `0`. Exposed for range/accept-state assertions in tests; the typed
    /// [`Action`] is otherwise what the driver consults.
    pub fn code(&self, state: StateId, symbol: SymbolId) -> i64 {
        match self.action(state, symbol) {
            Action::Shift(s) => s.index() as i64 + 1,
            Action::Reduce(r) => -(r.index() as i64 + 1),
            Action::Accept => -1,
            Action::Error => 0,
        }
    }

    /// Terminals for which `table[state, t]` is not `Error` - used by the driver to build
    /// the expected-token list on a parse error.
    pub fn expected_terminals(&self, state: StateId, num_terminals: usize) -> Vec<TerminalId> {
        (0..num_terminals)
            .map(TerminalId::from)
            .filter(|&t| self.action(state, SymbolId::from(t.index())) != Action::Error)
            .collect()
    }
}

/// Enumerate closures in FIFO discovery order (already fixed by [`Automaton::build`]) and
/// emit shifts, gotos, reductions, and the accept action, resolving conflicts per `policy`.
pub fn build(shape: &GrammarShape, automaton: &Automaton, policy: ConflictPolicy, debug: &Log<&'static str>) -> Result<Table, GrammarError> {
    let num_states = automaton.states.len();
    let num_symbols = shape.num_symbols();
    let mut actions = vec![Action::Error; num_states * num_symbols];
    let cell = |state: StateId, symbol: SymbolId| state.index() * num_symbols + symbol.index();

    for (idx, state) in automaton.states.iter().enumerate() {
        let sid = StateId::from(idx);

        for (&sym, &dest) in &state.transitions {
            actions[cell(sid, sym)] = Action::Shift(dest);
        }

        for item in &state.closure {
            if !item.at_end(shape) {
                continue;
            }
            let rule = item.rule;
            let Some(lookahead) = state.lookaheads.get(item) else {
                continue;
            };
            for &terminal in lookahead {
                let sym = SymbolId::from(terminal.index());
                let is_accept = rule == RuleId::AUGMENTED_START && terminal == TerminalId::EOF;
                let new_action = if is_accept { Action::Accept } else { Action::Reduce(rule) };
                let c = cell(sid, sym);

                match actions[c] {
                    Action::Error => actions[c] = new_action,
                    Action::Shift(_) => match policy {
                        ConflictPolicy::ShiftWins => {
                            debug.shift_reduce_resolved(idx as u32, &format!("{}", terminal), rule.index() as u32);
                        }
                        ConflictPolicy::Strict => {
                            return Err(GrammarError::Conflict(ConflictError::ShiftReduce {
                                state: sid,
                                terminal,
                                rule,
                            }));
                        }
                    },
                    Action::Reduce(_) | Action::Accept => {
                        let existing_rule = reduce_rule(actions[c]).unwrap();
                        if existing_rule != rule {
                            return Err(GrammarError::Conflict(ConflictError::ReduceReduce {
                                state: sid,
                                terminal,
                                first: existing_rule,
                                second: rule,
                            }));
                        } else if is_accept {
                            actions[c] = Action::Accept;
                        }
                    }
                }
            }
        }
    }

    let table = Table {
        num_states,
        num_symbols,
        actions,
    };

    if !table.actions.iter().any(|a| matches!(a, Action::Accept)) {
        return Err(GrammarError::NoAcceptingState);
    }

    Ok(table)
}

fn reduce_rule(action: Action) -> Option<RuleId> {
    match action {
        Action::Reduce(r) => Some(r),
        Action::Accept => Some(RuleId::AUGMENTED_START),
        _ => None,
    }
}
