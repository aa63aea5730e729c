use crate::chart::Chart;
use crate::engine::Engine;
use crate::error::{GrammarError, SessionError};
use crate::grammar::Grammar;
use crate::snapshot::Snapshot;
use crate::stateset::StateSet;
use std::sync::Arc;
use tracing::debug;

/// A resumable recognition of one input stream.
///
/// Each `advance` appends exactly one closed position to the chart, earlier
/// positions are never revisited. There's no way back: to explore "what if
/// the next symbol were X" clone the session, closed sets are shared and the
/// clone can't disturb the original.
#[derive(Clone, Debug)]
pub struct Session {
    grammar: Arc<Grammar>,
    start: String,
    chart: Chart,
    input: Vec<String>,
}

impl Session {
    /// Start a session recognizing the grammar's own start symbol.
    pub fn new(grammar: impl Into<Arc<Grammar>>) -> Session {
        let grammar = grammar.into();
        let start = grammar.start().to_string();
        Session::seeded(grammar, start)
    }

    /// Start a session recognizing `start`, which must be a nonterm of the
    /// grammar with at least one rule.
    pub fn start(grammar: impl Into<Arc<Grammar>>, start: &str) -> Result<Session, GrammarError> {
        let grammar = grammar.into();
        // validates `start` the same way the builder does
        grammar.with_start(start)?;
        Ok(Session::seeded(grammar, start.to_string()))
    }

    fn seeded(grammar: Arc<Grammar>, start: String) -> Session {
        let mut chart = Chart::new();
        let s0 = {
            let engine = Engine::new(&grammar);
            engine.close(&chart, engine.seed(&start))
        };
        debug!(start = %start, items = s0.len(), "seeded position 0");
        chart.push(s0);
        Session { grammar, start, chart, input: Vec::new() }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The nonterm this session recognizes
    pub fn start_symbol(&self) -> &str {
        &self.start
    }

    /// Number of symbols consumed so far
    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Number of recorded positions, always `len() + 1`
    pub fn positions(&self) -> usize {
        self.chart.len()
    }

    pub fn consumed(&self) -> &[String] {
        &self.input
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    fn check_symbol(&self, symbol: &str, position: usize) -> Result<(), SessionError> {
        if self.grammar.accepts_lexeme(symbol) {
            Ok(())
        } else {
            Err(SessionError::InvalidSymbol { symbol: symbol.to_string(), position })
        }
    }

    fn last_set(&self) -> &StateSet {
        self.chart.last().map(|set| &**set).expect("BUG: session without position 0")
    }

    /// Consume the next input symbol and close a new position for it.
    /// Returns the index of the new position. A symbol outside the terminal
    /// alphabet fails and leaves the session untouched. A symbol that no
    /// item can scan still appends an (empty) position: the dead end is
    /// reported by queries, it isn't an error.
    pub fn advance(&mut self, symbol: &str) -> Result<usize, SessionError> {
        self.check_symbol(symbol, self.positions())?;
        let closed = {
            let engine = Engine::new(&self.grammar);
            let seed = engine.scan(self.last_set(), symbol);
            engine.close(&self.chart, seed)
        };
        let position = self.positions();
        debug!(position, symbol, items = closed.len(), "advanced chart");
        if cfg!(feature = "debug") {
            for item in closed.iter() {
                debug!(position, "{}", item);
            }
        }
        self.chart.push(closed);
        self.input.push(symbol.to_string());
        Ok(position)
    }

    /// Consume a chunk of symbols. All of them are checked against the
    /// terminal alphabet first, so a bad symbol anywhere leaves the session
    /// as it was. Returns the index of the last position.
    pub fn read<I>(&mut self, symbols: I) -> Result<usize, SessionError>
            where I: IntoIterator, I::Item: AsRef<str> {
        let symbols: Vec<I::Item> = symbols.into_iter().collect();
        for (offset, symbol) in symbols.iter().enumerate() {
            self.check_symbol(symbol.as_ref(), self.positions() + offset)?;
        }
        for symbol in &symbols {
            self.advance(symbol.as_ref())?;
        }
        Ok(self.positions() - 1)
    }

    fn closed_at(&self, position: usize) -> Result<&Arc<StateSet>, SessionError> {
        self.chart.get(position).ok_or(SessionError::OutOfRange {
            position,
            positions: self.chart.len(),
        })
    }

    fn accepting(&self, set: &StateSet) -> bool {
        set.completed(&self.start, 0).next().is_some()
    }

    /// Whether the first `position` symbols form a sentence of the language
    pub fn accepts_at(&self, position: usize) -> Result<bool, SessionError> {
        let set = self.closed_at(position)?;
        Ok(self.accepting(set))
    }

    /// Whether everything consumed so far forms a sentence
    pub fn accepts(&self) -> bool {
        self.accepting(self.last_set())
    }

    /// No derivation survives the input consumed so far. Once dead, every
    /// later position is dead too.
    pub fn is_dead(&self) -> bool {
        self.last_set().is_empty()
    }

    /// Read-only view of a closed position
    pub fn snapshot_at(&self, position: usize) -> Result<Snapshot<'_>, SessionError> {
        let set = self.closed_at(position)?;
        Ok(Snapshot::new(position, &self.input, self.accepting(set), set))
    }

    /// Snapshots from `position` up to the last one (empty if out of range)
    pub fn snapshots_since(&self, position: usize) -> impl Iterator<Item=Snapshot<'_>> + '_ {
        (position..self.positions()).filter_map(move |p| self.snapshot_at(p).ok())
    }
}
