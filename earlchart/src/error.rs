use thiserror::Error;

/// Problems found while assembling a `Grammar`. Fatal, a grammar that
/// failed to build can't be used to start a `Session`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Duplicate Symbol: {0}")]
    DuplicateSymbol(String),
    #[error("Duplicate Rule: {0}")]
    DuplicateRule(String),
    #[error("Missing Symbol: {0}")]
    MissingSymbol(String),
    /// A rule head or start symbol was registered as a terminal
    #[error("Not a NonTerminal: {0}")]
    NotNonTerminal(String),
    #[error("No Productions: {0}")]
    NoProductions(String),
}

/// Errors surfaced by a `Session`. They never leave partial effects behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Invalid Symbol: {symbol:?} at position {position} is not a terminal")]
    InvalidSymbol { symbol: String, position: usize },
    #[error("Out of Range: position {position} but the chart has {positions} positions")]
    OutOfRange { position: usize, positions: usize },
}
