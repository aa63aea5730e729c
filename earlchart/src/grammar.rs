use crate::error::GrammarError;
use std::collections::HashMap;
use std::sync::Arc;
use std::{fmt, hash};

type Matcher = Box<dyn Fn(&str) -> bool + Send + Sync>;

pub enum Symbol {
    NonTerm(String),
    // A terminal has a predicate to validate that input is accepted
    Term(String, Matcher),
}

#[derive(PartialEq, Eq, Hash)]
pub struct Rule {
    pub head: String,
    pub spec: Vec<Arc<Symbol>>,
}

/// Immutable table of production rules plus the distinguished start symbol.
#[derive(Clone)]
pub struct Grammar {
    start: String,
    rules: Vec<Arc<Rule>>,
    by_head: HashMap<String, Vec<Arc<Rule>>>,
    symbols: HashMap<String, Arc<Symbol>>,
}

#[derive(Default)]
pub struct GrammarBuilder {
    symbols: HashMap<String, Arc<Symbol>>,
    rules: Vec<Arc<Rule>>,
    error: Option<GrammarError>,
}


impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::NonTerm(name) => name,
            Symbol::Term(name, _) => name,
        }
    }

    pub fn matches(&self, input: &str) -> bool {
        match self {
            Symbol::Term(_, matcher) => matcher(input),
            _ => false
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Term(_, _))
    }

    /// Name of the symbol if it's a NonTerm
    pub fn nonterm(&self) -> Option<&str> {
        match self {
            Symbol::NonTerm(name) => Some(name),
            _ => None
        }
    }
}

// Hashable Symbols allow storing them in containers (eg: HashMap)
// The name is the only way to dedup Terminals (ie: predicate is ignored)
impl hash::Hash for Symbol {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.is_terminal().hash(state);
        self.name().hash(state);
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Symbol) -> bool {
        match (self, other) {
            (Symbol::Term(s, _), Symbol::Term(o, _)) => s == o,
            (Symbol::NonTerm(s), Symbol::NonTerm(o)) => s == o,
            _ => false
        }
    }
}

impl Eq for Symbol {}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Term(name, _) => write!(f, "Term({})", name),
            Symbol::NonTerm(name) => write!(f, "NonTerm({})", name),
        }
    }
}

impl Rule {
    #[cfg(test)]
    pub fn new(head: &str, spec: &[Arc<Symbol>]) -> Self {
        Rule {
            head: head.to_string(),
            spec: spec.to_vec(),
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.spec.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.head, self.spec.iter().map(
                |s| s.name()).collect::<Vec<_>>().join(" "))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

///////////////////////////////////////////////////////////////////////////////

impl Grammar {
    pub fn start(&self) -> &str {
        &self.start
    }

    /// All rules in declaration order
    pub fn rules(&self) -> impl Iterator<Item=&Arc<Rule>> {
        self.rules.iter()
    }

    /// Rules whose head is `head`, in declaration order.
    pub fn rules_for(&self, head: &str) -> &[Arc<Rule>] {
        self.by_head.get(head).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_nonterm(&self, name: &str) -> bool {
        self.symbols.get(name).is_some_and(|s| !s.is_terminal())
    }

    /// Check that some terminal of the grammar accepts `lexeme`.
    /// Input outside of the terminal alphabet is rejected by sessions.
    pub fn accepts_lexeme(&self, lexeme: &str) -> bool {
        self.symbols.values().any(|s| s.matches(lexeme))
    }

    /// Same rule table with a different distinguished start symbol.
    pub fn with_start(&self, start: impl Into<String>) -> Result<Grammar, GrammarError> {
        let start = start.into();
        check_start(&self.symbols, &self.by_head, &start)?;
        Ok(Grammar { start, ..self.clone() })
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("start", &self.start)
            .field("rules", &self.rules)
            .finish()
    }
}

fn check_start(
    symbols: &HashMap<String, Arc<Symbol>>,
    by_head: &HashMap<String, Vec<Arc<Rule>>>,
    start: &str) -> Result<(), GrammarError>
{
    match symbols.get(start) {
        None => Err(GrammarError::MissingSymbol(start.to_string())),
        Some(s) if s.is_terminal() => Err(GrammarError::NotNonTerminal(start.to_string())),
        Some(_) if !by_head.contains_key(start) =>
            Err(GrammarError::NoProductions(start.to_string())),
        Some(_) => Ok(()),
    }
}

/// Builds a Gramar while validating existence of Symbols and checking rules.
/// Only the first problem found is reported by `into_grammar`.
impl GrammarBuilder {
    fn fail(&mut self, error: GrammarError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn add_symbol(&mut self, symbol: Symbol, quiet: bool) {
        // Check for duplicate symbols to avoid overwriting by mistake
        if !self.symbols.contains_key(symbol.name()) {
            self.symbols.insert(symbol.name().to_string(), Arc::new(symbol));
        } else if !quiet {
            // Convenience for adding symbols programatically
            self.fail(GrammarError::DuplicateSymbol(symbol.name().to_string()));
        }
    }

    pub fn nonterm(mut self, name: impl Into<String>) -> Self {
        self.add_symbol(Symbol::NonTerm(name.into()), false);
        self
    }

    pub fn terminal(
        mut self,
        name: impl Into<String>,
        pred: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self
    {
        self.add_symbol(Symbol::Term(name.into(), Box::new(pred)), false);
        self
    }

    /// A terminal that only matches its own name
    pub fn literal(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let lexeme = name.clone();
        self.add_symbol(Symbol::Term(name, Box::new(move |n: &str| n == lexeme)), false);
        self
    }

    // Quiet silently ignores adding pre-existent symbols to the grammar.
    // Also quiet versions don't use chaining to be invoked in loops.

    pub fn quiet_nonterm(&mut self, name: impl Into<String>) {
        self.add_symbol(Symbol::NonTerm(name.into()), true);
    }

    pub fn quiet_terminal(
        &mut self,
        name: impl Into<String>,
        pred: impl Fn(&str) -> bool + Send + Sync + 'static)
    {
        self.add_symbol(Symbol::Term(name.into(), Box::new(pred)), true);
    }

    pub fn quiet_literal(&mut self, name: impl Into<String>) {
        let name = name.into();
        let lexeme = name.clone();
        self.add_symbol(Symbol::Term(name, Box::new(move |n: &str| n == lexeme)), true);
    }

    /// Register new rules for the grammar
    fn add_rule<S, S2>(&mut self, head: S, spec: &[S2], quiet: bool)
        where S: AsRef<str>, S2: AsRef<str>
    {
        // First check that all symbols have been registered (need references)
        if let Some(s) = spec.iter().find(|n| !self.symbols.contains_key(n.as_ref())) {
            self.fail(GrammarError::MissingSymbol(s.as_ref().to_string()));
            return;
        }
        match self.symbols.get(head.as_ref()) {
            None => {
                self.fail(GrammarError::MissingSymbol(head.as_ref().to_string()));
                return;
            }
            Some(s) if s.is_terminal() => {
                self.fail(GrammarError::NotNonTerminal(head.as_ref().to_string()));
                return;
            }
            Some(_) => (),
        }
        let rule = Arc::new(Rule {
            head: head.as_ref().to_string(),
            spec: spec.iter().map(|s| self.symbols[s.as_ref()].clone()).collect()
        });
        // Check this rule is only added once. NOTE: `Arc`s equal on inner value
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        } else if !quiet {
            self.fail(GrammarError::DuplicateRule(rule.to_string()));
        }
    }

    pub fn rule<S, S2>(mut self, head: S, spec: &[S2]) -> Self
        where S: AsRef<str>, S2: AsRef<str>
    {
        self.add_rule(head, spec, false);
        self
    }

    pub fn quiet_rule<S, S2>(&mut self, head: S, spec: &[S2])
        where S: AsRef<str>, S2: AsRef<str>
    {
        self.add_rule(head, spec, true)
    }

    pub fn into_grammar(self, start: impl Into<String>) -> Result<Grammar, GrammarError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let mut by_head: HashMap<String, Vec<Arc<Rule>>> = HashMap::new();
        for rule in &self.rules {
            by_head.entry(rule.head.clone()).or_default().push(rule.clone());
        }
        let start = start.into();
        check_start(&self.symbols, &by_head, &start)?;
        Ok(Grammar { start, rules: self.rules, by_head, symbols: self.symbols })
    }
}


///////////////////////////////////////////////////////////////////////////////
