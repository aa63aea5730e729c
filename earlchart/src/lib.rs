//! Incremental Earley recognition for arbitrary context-free grammars.
//!
//! Build a `Grammar` with `GrammarBuilder`, start a `Session` and feed it
//! input one symbol (or chunk) at a time. After every step the chart can be
//! queried for acceptance at any position already read.

mod error;
pub use crate::error::{GrammarError, SessionError};

mod grammar;
pub use crate::grammar::{Grammar, GrammarBuilder, Rule, Symbol};

mod items;
pub use crate::items::Item;

mod stateset;
pub use crate::stateset::StateSet;

mod chart;
pub use crate::chart::Chart;

mod engine;
pub use crate::engine::Engine;

mod session;
pub use crate::session::Session;

mod snapshot;
pub use crate::snapshot::Snapshot;

mod recognizer;
pub use crate::recognizer::EarleyRecognizer;

#[cfg(test)]
mod property_test;
