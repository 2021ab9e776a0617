use crate::ast::{AstNode, NodeImpl};
use crate::builder::{identity, Callback, ListBuilder};
use crate::element::LexicalElement;
use crate::error::GrammarError;
use crate::ids::{NonterminalId, RuleId, SymbolId};
use crate::rule::{RawRule, Rule};
use crate::symbol::Nonterminal;
use std::rc::Rc;

struct PendingRule<B, N> {
    lhs: NonterminalId,
    rhs: Vec<LexicalElement>,
    callback: Callback<B, N>,
}

pub struct NormalizedRules<B, N> {
    pub nonterminals: Vec<Nonterminal>,
    pub rules: Vec<Rule<B, N>>,
}

/// Desugar high-level lexical operators into pure BNF. Runs once, appending
/// generated rules and nonterminals to the same growing worklist so nested repeats
/// normalize fully in a single pass, then assigns contiguous rule indices in the order
/// rules were produced (rule 0 is always the augmented start rule).
pub fn normalize<B, N>(
    mut nonterminals: Vec<Nonterminal>,
    raw_rules: Vec<RawRule<B, N>>,
    start: NonterminalId,
    num_terminals: usize,
) -> Result<NormalizedRules<B, N>, GrammarError>
where
    B: ListBuilder<N> + 'static,
    N: NodeImpl + 'static,
{
    let mut pending: Vec<PendingRule<B, N>> = Vec::new();

    let start_symbol = SymbolId::from(num_terminals + start.index());
    pending.push(PendingRule {
        lhs: NonterminalId::START,
        rhs: vec![LexicalElement::Parameter(start_symbol)],
        callback: Rc::new(identity),
    });
    for raw in raw_rules {
        pending.push(PendingRule {
            lhs: raw.lhs,
            rhs: raw.rhs,
            callback: raw.callback,
        });
    }

    let mut rules: Vec<Rule<B, N>> = Vec::new();
    let mut i = 0;
    while i < pending.len() {
        let lhs = pending[i].lhs;
        let callback = pending[i].callback.clone();
        let rhs = pending[i].rhs.clone();

        let mut resolved_rhs: Vec<SymbolId> = Vec::new();
        let mut parameter_indices: Vec<u32> = Vec::new();

        for elem in rhs {
            match normalize_element(elem, &mut nonterminals, &mut pending, num_terminals)? {
                Resolved::Parameter(sym) => {
                    parameter_indices.push(resolved_rhs.len() as u32);
                    resolved_rhs.push(sym);
                }
                Resolved::Plain(sym) => resolved_rhs.push(sym),
            }
        }

        rules.push(Rule {
            id: RuleId::from(i),
            lhs,
            rhs: resolved_rhs,
            parameter_indices,
            callback,
        });
        i += 1;
    }

    for rule in &rules {
        nonterminals[rule.lhs.index()].rules.push(rule.id);
    }

    Ok(NormalizedRules { nonterminals, rules })
}

enum Resolved {
    Plain(SymbolId),
    Parameter(SymbolId),
}

fn normalize_element<B, N>(
    elem: LexicalElement,
    nonterminals: &mut Vec<Nonterminal>,
    pending: &mut Vec<PendingRule<B, N>>,
    num_terminals: usize,
) -> Result<Resolved, GrammarError>
where
    B: ListBuilder<N> + 'static,
    N: NodeImpl + 'static,
{
    match elem {
        LexicalElement::Symbol(s) => Ok(Resolved::Plain(s)),
        LexicalElement::Parameter(s) => Ok(Resolved::Parameter(s)),
        LexicalElement::Repeat(spec) => {
            let elem_sym = normalize_to_symbol(spec.element, nonterminals, pending, num_terminals)?;
            let sep_sym = match spec.separator {
                Some(e) => Some(normalize_to_symbol(e, nonterminals, pending, num_terminals)?),
                None => None,
            };
            let list_symbol = synthesize_repeat(
                elem_sym,
                sep_sym,
                spec.allow_empty,
                nonterminals,
                pending,
                num_terminals,
            );
            // A repeat is always a callback argument: there is no other way for the owning
            // rule to observe the list it builds.
            Ok(Resolved::Parameter(list_symbol))
        }
    }
}

fn normalize_to_symbol<B, N>(
    elem: LexicalElement,
    nonterminals: &mut Vec<Nonterminal>,
    pending: &mut Vec<PendingRule<B, N>>,
    num_terminals: usize,
) -> Result<SymbolId, GrammarError>
where
    B: ListBuilder<N> + 'static,
    N: NodeImpl + 'static,
{
    match normalize_element(elem, nonterminals, pending, num_terminals)? {
        Resolved::Plain(s) | Resolved::Parameter(s) => Ok(s),
    }
}

/// Expand one `Repeat{element, separator?, allow_empty}` into up to two fresh nonterminals:
/// `L_ne -> elem`, `L_ne -> L_ne [sep] elem`, and, when `allow_empty`, `L ->
/// L_ne | epsilon`. Returns the symbol that should replace the operator in the owning rule's RHS.
fn synthesize_repeat<B, N>(
    elem: SymbolId,
    sep: Option<SymbolId>,
    allow_empty: bool,
    nonterminals: &mut Vec<Nonterminal>,
    pending: &mut Vec<PendingRule<B, N>>,
    num_terminals: usize,
) -> SymbolId
where
    B: ListBuilder<N> + 'static,
    N: NodeImpl + 'static,
{
    let ne_id = push_generated_nonterminal(nonterminals, "list_ne");
    let ne_symbol = SymbolId::from(num_terminals + ne_id.index());

    pending.push(PendingRule {
        lhs: ne_id,
        rhs: vec![LexicalElement::Parameter(elem)],
        callback: Rc::new(|b: &mut B, start, stop, mut args: Vec<AstNode<N>>| {
            let first = args.pop();
            b.make_list(start, stop, first)
        }),
    });

    let mut expand_rhs = vec![LexicalElement::Parameter(ne_symbol)];
    if let Some(s) = sep {
        expand_rhs.push(LexicalElement::Symbol(s));
    }
    expand_rhs.push(LexicalElement::Parameter(elem));
    pending.push(PendingRule {
        lhs: ne_id,
        rhs: expand_rhs,
        callback: Rc::new(|b: &mut B, start, stop, mut args: Vec<AstNode<N>>| {
            let next = args.pop().expect("expand_list missing next element");
            let list = args.pop().expect("expand_list missing list argument");
            b.expand_list(start, stop, list, next)
        }),
    });

    if !allow_empty {
        return ne_symbol;
    }

    let l_id = push_generated_nonterminal(nonterminals, "list");
    let l_symbol = SymbolId::from(num_terminals + l_id.index());

    pending.push(PendingRule {
        lhs: l_id,
        rhs: vec![LexicalElement::Parameter(ne_symbol)],
        callback: Rc::new(identity),
    });
    pending.push(PendingRule {
        lhs: l_id,
        rhs: Vec::new(),
        callback: Rc::new(|b: &mut B, start, stop, _args: Vec<AstNode<N>>| b.make_list(start, stop, None)),
    });

    l_symbol
}

fn push_generated_nonterminal(nonterminals: &mut Vec<Nonterminal>, prefix: &str) -> NonterminalId {
    let id = NonterminalId::from(nonterminals.len());
    nonterminals.push(Nonterminal {
        id,
        name: format!("_{}_{}", prefix, id.index()),
        rules: Vec::new(),
        nullable: false,
        generated: true,
    });
    id
}
