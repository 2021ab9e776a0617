use crate::error::{GrammarError, TokenizeError};
use crate::ids::TerminalId;
use crate::symbol::Terminal;
use crate::util::Code;
use regex::bytes::Regex;

/// `(start, stop, text, terminal_index)` produced by the tokenizer.
#[derive(Debug, Clone)]
pub struct Token {
    pub start: usize,
    pub stop: usize,
    pub text: String,
    pub terminal: TerminalId,
}

/// Scans an input with a single alternation regex built once from the grammar's non-EOF
/// terminal patterns, matching this corpus's `lexeme::Pattern` convention of compiling each
/// terminal's regex up front via `regex::bytes::Regex` and never re-compiling per parse.
pub struct Tokenizer {
    regex: Regex,
    group_names: Vec<String>,
    terminal_ids: Vec<TerminalId>,
}

impl Tokenizer {
    /// Build the alternation regex over every non-EOF terminal's pattern. Each branch is
    /// wrapped in a named group `_{idx}` so the matching terminal can be recovered in O(1)
    /// after a match.
    pub fn build(terminals: &[Terminal]) -> Result<Self, GrammarError> {
        let mut branches = Vec::new();
        let mut group_names = Vec::new();
        let mut terminal_ids = Vec::new();

        for terminal in terminals {
            let Some(pattern) = &terminal.pattern else {
                continue;
            };
            let group = format!("_{}", terminal_ids.len());
            branches.push(format!("(?P<{}>{})", group, strip_anchor(pattern)));
            group_names.push(group);
            terminal_ids.push(terminal.id);
        }

        let combined = format!("^(?:{})", branches.join("|"));
        let regex = Regex::new(&combined).map_err(|err| GrammarError::UncompilableRegex {
            terminal: "<alternation>".to_string(),
            message: err.to_string(),
        })?;

        Ok(Self {
            regex,
            group_names,
            terminal_ids,
        })
    }

    fn terminal_for(&self, caps: &regex::bytes::Captures) -> TerminalId {
        for (i, name) in self.group_names.iter().enumerate() {
            if caps.name(name).is_some() {
                return self.terminal_ids[i];
            }
        }
        unreachable!("alternation matched with no named group captured")
    }

    /// Scan `code` left to right, producing non-overlapping tokens. Each attempt re-anchors
    /// the alternation at `pointer` by matching against the remaining slice
    /// `code.value[pointer..]`, the same technique this corpus's `lexeme::Pattern::consume`
    /// uses for a single pattern (the `regex` crate's `^` only binds to the start of the
    /// haystack it is given, not to an arbitrary search offset). When `skip_unmatched` is
    /// `false` any byte the alternation cannot match at is reported as a [`TokenizeError`]
    /// instead of being silently skipped.
    pub fn tokenize(&self, code: &Code, skip_unmatched: bool) -> Result<Vec<Token>, TokenizeError> {
        let input = code.value;
        let mut tokens = Vec::new();
        let mut pointer = 0usize;

        while pointer < input.len() {
            match self.regex.captures(&input[pointer..]) {
                Some(caps) => {
                    let m = caps.get(0).unwrap();
                    debug_assert_eq!(m.start(), 0);
                    let stop = pointer + m.end();
                    let terminal = self.terminal_for(&caps);
                    let text = String::from_utf8_lossy(&input[pointer..stop]).into_owned();
                    tokens.push(Token {
                        start: pointer,
                        stop,
                        text,
                        terminal,
                    });
                    pointer = stop;
                }
                None => {
                    if !skip_unmatched {
                        return Err(TokenizeError {
                            pointer,
                            message: format!("no terminal pattern matches input at byte {}", pointer),
                        });
                    }
                    pointer += 1;
                }
            }
        }

        Ok(tokens)
    }
}

/// Every branch of the combined alternation is itself anchored by the outer `^(?:...)`; a
/// per-terminal leading `^` would only anchor that branch to position zero of the whole
/// alternation rather than to the match attempt, so it is stripped if present.
fn strip_anchor(pattern: &str) -> &str {
    pattern.strip_prefix('^').unwrap_or(pattern)
}
