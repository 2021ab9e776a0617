use crate::analysis::Analysis;
use crate::ast::{AstNode, NodeImpl};
use crate::builder::{Callback, ListBuilder};
use crate::driver;
use crate::element::LexicalElement;
use crate::error::{undefined_nonterminal, GrammarError, ParseError, TokenizeError};
use crate::ids::{NonterminalId, SymbolId, TerminalId};
use crate::lalr::{self, Automaton};
use crate::log::Log;
use crate::normalize;
use crate::rule::{RawRule, Rule};
use crate::shape::{GrammarShape, RuleShape};
use crate::symbol::{Nonterminal, Terminal};
use crate::table::{self, ConflictPolicy, Table};
use crate::tokenizer::Tokenizer;
use crate::util::Code;
use once_cell::unsync::OnceCell;

/// Accumulates terminals, nonterminals, and rules for one grammar, then compiles them into
/// an immutable [`Grammar`] on [`build`](GrammarBuilder::build). Modeled on this corpus's
/// `Concat`/`Union::init` + `set_symbols` two-phase construction, collapsed into a single
/// builder since there is no longer a production graph to wire up separately.
pub struct GrammarBuilder<B, N> {
    terminals: Vec<Terminal>,
    nonterminals: Vec<Nonterminal>,
    raw_rules: Vec<RawRule<B, N>>,
    start: Option<NonterminalId>,
    skip_unmatched: bool,
    conflict_policy: ConflictPolicy,
    debug: Log<&'static str>,
}

impl<B, N> Default for GrammarBuilder<B, N>
where
    N: NodeImpl,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<B, N> GrammarBuilder<B, N>
where
    N: NodeImpl,
{
    pub fn new() -> Self {
        Self {
            terminals: vec![Terminal::eof()],
            nonterminals: vec![Nonterminal::start()],
            raw_rules: Vec::new(),
            start: None,
            skip_unmatched: true,
            conflict_policy: ConflictPolicy::default(),
            debug: Log::None,
        }
    }

    /// Declare a terminal with a non-nullable regex pattern. The pattern must
    /// not match the empty string; this is validated at [`build`](Self::build) time since it
    /// requires compiling the pattern.
    pub fn terminal(&mut self, name: impl Into<String>, pattern: impl Into<String>) -> TerminalId {
        let id = TerminalId::from(self.terminals.len());
        self.terminals.push(Terminal {
            id,
            name: name.into(),
            pattern: Some(pattern.into()),
        });
        id
    }

    /// Declare a nonterminal. Its productions are added afterward via [`rule`](Self::rule).
    pub fn nonterminal(&mut self, name: impl Into<String>) -> NonterminalId {
        let id = NonterminalId::from(self.nonterminals.len());
        self.nonterminals.push(Nonterminal {
            id,
            name: name.into(),
            rules: Vec::new(),
            nullable: false,
            generated: false,
        });
        id
    }

    /// Add one production `lhs -> rhs` with its reduction callback.
    pub fn rule(
        &mut self,
        lhs: NonterminalId,
        rhs: Vec<LexicalElement>,
        callback: Callback<B, N>,
    ) -> &mut Self {
        self.raw_rules.push(RawRule { lhs, rhs, callback });
        self
    }

    /// The flat-symbol-space id of a declared terminal, for use in a rule's RHS.
    pub fn terminal_symbol(&self, id: TerminalId) -> SymbolId {
        SymbolId::from(id.index())
    }

    /// The flat-symbol-space id of a declared nonterminal, for use in a rule's RHS. Valid
    /// only once every terminal this grammar will ever declare has already been registered
    /// via [`terminal`](Self::terminal) - nonterminal symbol ids are offset by the terminal
    /// count, so declare all terminals before calling this.
    pub fn nonterminal_symbol(&self, id: NonterminalId) -> SymbolId {
        SymbolId::from(self.terminals.len() + id.index())
    }

    /// Set the grammar's start symbol. Required before [`build`](Self::build).
    pub fn start(&mut self, nonterminal: NonterminalId) -> &mut Self {
        self.start = Some(nonterminal);
        self
    }

    /// Whether an input byte the tokenizer cannot match to any terminal is silently skipped
    /// (`true`, the default) or reported as a [`TokenizeError`] (`false`).
    pub fn skip_unmatched(&mut self, skip: bool) -> &mut Self {
        self.skip_unmatched = skip;
        self
    }

    pub fn conflict_policy(&mut self, policy: ConflictPolicy) -> &mut Self {
        self.conflict_policy = policy;
        self
    }

    pub fn debug(&mut self, level: Log<&'static str>) -> &mut Self {
        self.debug = level;
        self
    }

    /// Run the full build pipeline: normalize, extract the callback-free shape, compute
    /// FIRST/nullable, build the LALR(1) automaton, then the action/goto table and the
    /// tokenizer. Every step here runs exactly once; the result is immutable.
    pub fn build(self) -> Result<Grammar<B, N>, GrammarError>
    where
        B: ListBuilder<N> + 'static,
        N: NodeImpl + 'static,
    {
        let start = self.start.ok_or_else(|| {
            GrammarError::UndefinedSymbol("no start symbol set via GrammarBuilder::start".to_string())
        })?;
        if start.index() >= self.nonterminals.len() {
            return Err(undefined_nonterminal(start));
        }
        for raw in &self.raw_rules {
            if raw.lhs.index() >= self.nonterminals.len() {
                return Err(undefined_nonterminal(raw.lhs));
            }
        }

        for terminal in self.terminals.iter().skip(1) {
            let pattern = terminal.pattern.as_ref().unwrap();
            let regex = regex::bytes::Regex::new(pattern).map_err(|err| GrammarError::UncompilableRegex {
                terminal: terminal.name.clone(),
                message: err.to_string(),
            })?;
            if regex.is_match(b"") {
                return Err(GrammarError::NullableRegex(terminal.name.clone()));
            }
        }

        let num_terminals = self.terminals.len();
        let normalized = normalize::normalize(self.nonterminals, self.raw_rules, start, num_terminals)?;
        let mut nonterminals = normalized.nonterminals;
        let rules = normalized.rules;

        let rule_shapes: Vec<RuleShape> = rules
            .iter()
            .map(|r| RuleShape {
                lhs: r.lhs,
                rhs: r.rhs.clone(),
            })
            .collect();
        let mut nonterminal_rules: Vec<Vec<crate::ids::RuleId>> = vec![Vec::new(); nonterminals.len()];
        for rule in &rules {
            nonterminal_rules[rule.lhs.index()].push(rule.id);
        }
        let shape = GrammarShape {
            num_terminals,
            num_nonterminals: nonterminals.len(),
            rules: rule_shapes,
            nonterminal_rules,
        };

        let analysis = Analysis::compute(&shape);
        for nt in &mut nonterminals {
            nt.nullable = analysis.is_nullable(nt.id);
        }

        let automaton = lalr::build(&shape, &analysis, &self.debug);
        let table = table::build(&shape, &automaton, self.conflict_policy, &self.debug)?;
        let tokenizer = Tokenizer::build(&self.terminals)?;

        Ok(Grammar {
            terminals: self.terminals,
            nonterminals,
            rules,
            shape,
            automaton,
            table,
            tokenizer,
            skip_unmatched: self.skip_unmatched,
            debug: self.debug,
        })
    }
}

/// A compiled grammar: a LALR(1) table plus everything the [driver](driver::parse) needs to
/// run it over raw input. Immutable once built; all pipeline state (FIRST sets,
/// automaton states, LR0 closures) is discarded after [`build`](GrammarBuilder::build)
/// returns, leaving only the table it produced.
pub struct Grammar<B, N> {
    pub(crate) terminals: Vec<Terminal>,
    pub(crate) nonterminals: Vec<Nonterminal>,
    pub(crate) rules: Vec<Rule<B, N>>,
    pub(crate) shape: GrammarShape,
    #[allow(dead_code)]
    pub(crate) automaton: Automaton,
    pub(crate) table: Table,
    pub(crate) tokenizer: Tokenizer,
    pub(crate) skip_unmatched: bool,
    pub(crate) debug: Log<&'static str>,
}

impl<B, N> Grammar<B, N>
where
    N: NodeImpl,
{
    pub fn terminal_name(&self, id: TerminalId) -> &str {
        &self.terminals[id.index()].name
    }

    pub fn nonterminal_name(&self, id: NonterminalId) -> &str {
        &self.nonterminals[id.index()].name
    }

    pub fn num_states(&self) -> usize {
        self.table.num_states
    }

    /// Tokenize, then run the shift/reduce driver to completion, dispatching each reduction
    /// through the grammar's callbacks against `builder`. Returns the [`AstNode`] the
    /// start rule's identity-pass-through callback produced.
    pub fn parse(&self, source: impl Into<Code<'_>>, builder: &mut B) -> Result<AstNode<N>, ParseErrorKind> {
        let code = source.into();
        let tokens = self
            .tokenizer
            .tokenize(&code, self.skip_unmatched)
            .map_err(ParseErrorKind::Tokenize)?;
        driver::parse(self, &code, tokens, builder).map_err(ParseErrorKind::Parse)
    }
}

/// Either phase of [`Grammar::parse`] can fail: tokenization (an unmatched byte, only
/// possible with `skip_unmatched(false)`) or the shift/reduce driver itself.
#[derive(Debug, Clone)]
pub enum ParseErrorKind {
    Tokenize(TokenizeError),
    Parse(ParseError),
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::Tokenize(e) => write!(f, "{}", e),
            ParseErrorKind::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseErrorKind {}

/// Lazily-built variant of [`Grammar`] for grammar authors who want to declare their grammar
/// once at static scope and build the table on first use, mirroring the teacher's
/// `OnceCell`-memoized `DefaultParser` construction idiom.
pub struct LazyGrammar<B, N> {
    build: Box<dyn Fn() -> Result<Grammar<B, N>, GrammarError>>,
    cell: OnceCell<Grammar<B, N>>,
}

impl<B, N> LazyGrammar<B, N> {
    pub fn new(build: impl Fn() -> Result<Grammar<B, N>, GrammarError> + 'static) -> Self {
        Self {
            build: Box::new(build),
            cell: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Result<&Grammar<B, N>, GrammarError> {
        if let Some(g) = self.cell.get() {
            return Ok(g);
        }
        let grammar = (self.build)()?;
        Ok(self.cell.get_or_init(|| grammar))
    }
}
