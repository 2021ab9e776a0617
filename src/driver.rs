use crate::ast::{AstNode, NodeImpl};
use crate::error::ParseError;
use crate::grammar::Grammar;
use crate::ids::{SymbolId, TerminalId};
use crate::table::Action;
use crate::tokenizer::Token;
use crate::util::Code;

/// Drive the table against a token stream, dispatching callbacks on reduce. One
/// "outer" loop iteration performs either a single shift or any number of reductions,
/// maintaining a stack of `(state, value)` frames with an explicit `Vec` rather than
/// recursion, so arbitrarily deep derivations don't grow the native call stack.
pub fn parse<B, N>(
    grammar: &Grammar<B, N>,
    code: &Code,
    tokens: Vec<Token>,
    builder: &mut B,
) -> Result<AstNode<N>, ParseError>
where
    N: NodeImpl,
{
    let eof_offset = code.value.len();
    let mut stack: Vec<(crate::ids::StateId, AstNode<N>)> =
        vec![(crate::ids::StateId::from(0), AstNode::leaf(N::null(), 0, 0))];
    let mut cursor = 0usize;

    loop {
        let current_state = stack.last().unwrap().0;
        let (terminal, token_start, token_stop, token_text, token_type_name) = match tokens.get(cursor) {
            Some(token) => (
                token.terminal,
                token.start,
                token.stop,
                token.text.clone(),
                grammar.terminal_name(token.terminal).to_string(),
            ),
            None => (TerminalId::EOF, eof_offset, eof_offset, String::new(), "EOF".to_string()),
        };
        let symbol = SymbolId::from(terminal.index());

        grammar.debug.driver_step(&format!(
            "state {} lookahead {} ({})",
            current_state, token_type_name, token_text
        ));

        match grammar.table.action(current_state, symbol) {
            Action::Error => {
                let expected = grammar
                    .table
                    .expected_terminals(current_state, grammar.shape.num_terminals)
                    .into_iter()
                    .map(|t| grammar.terminal_name(t).to_string())
                    .collect();
                return Err(ParseError::new(code, token_start, token_text, token_type_name, expected));
            }
            Action::Shift(next) => {
                stack.push((next, AstNode::leaf(N::null(), token_start, token_stop)));
                cursor += 1;
            }
            Action::Accept => {
                debug_assert!(cursor >= tokens.len(), "accept reached before consuming EOF");
                return Ok(stack.pop().unwrap().1);
            }
            Action::Reduce(rule_id) => {
                let rule = &grammar.rules[rule_id.index()];
                let arity = rule.len();
                let popped = stack.split_off(stack.len() - arity);

                let (start, stop) = match (popped.first(), popped.last()) {
                    (Some(first), Some(last)) => (first.1.start, last.1.stop),
                    _ => (stack.last().unwrap().1.stop, token_start),
                };

                let mut param_positions = rule.parameter_indices.iter().copied().peekable();
                let mut args = Vec::with_capacity(rule.parameter_indices.len());
                for (idx, (_, node)) in popped.into_iter().enumerate() {
                    if param_positions.peek() == Some(&(idx as u32)) {
                        param_positions.next();
                        args.push(node);
                    }
                }

                let result = (rule.callback)(builder, start, stop, args);

                let goto_state = stack.last().unwrap().0;
                let goto_symbol = SymbolId::from(grammar.shape.num_terminals + rule.lhs.index());
                let next = match grammar.table.action(goto_state, goto_symbol) {
                    Action::Shift(s) => s,
                    _ => unreachable!("missing goto entry for reduced nonterminal"),
                };
                stack.push((next, result));
            }
        }
    }
}
