use crate::items::Item;
use crate::stateset::StateSet;
use std::fmt;
use std::sync::Arc;

/// Read-only view of one closed chart position, for presentation.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'s> {
    position: usize,
    input: &'s [String],
    accepted: bool,
    items: &'s Arc<StateSet>,
}

impl<'s> Snapshot<'s> {
    pub(crate) fn new(position: usize, input: &'s [String], accepted: bool,
                      items: &'s Arc<StateSet>) -> Self {
        Snapshot { position, input, accepted, items }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn items(&self) -> &'s StateSet {
        self.items
    }

    /// Symbols consumed up to this position
    pub fn prefix(&self) -> &'s [String] {
        let input: &'s [String] = self.input;
        &input[..self.position]
    }

    /// Symbols the session consumed after this position
    pub fn suffix(&self) -> &'s [String] {
        let input: &'s [String] = self.input;
        &input[self.position..]
    }

    /// Complete items at this position (any head, any origin)
    pub fn complete_items(&self) -> impl Iterator<Item=&'s Item> + 's {
        let items: &'s StateSet = self.items;
        items.iter().filter(|it| it.complete())
    }

    /// Owned handle on the closed set. Closed sets never change so the
    /// handle can travel to other threads while the session keeps going.
    pub fn share(&self) -> Arc<StateSet> {
        self.items.clone()
    }
}

// Single character symbols are glued together, longer ones are spaced out
fn join_symbols(symbols: &[String]) -> String {
    if symbols.iter().all(|s| s.chars().count() == 1) {
        symbols.concat()
    } else {
        symbols.join(" ")
    }
}

impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "State {}: {}\u{2022}{} accept={}",
               self.position,
               join_symbols(self.prefix()),
               join_symbols(self.suffix()),
               self.accepted)?;
        for item in self.items.iter() {
            write!(f, "\n  {}", item)?;
        }
        Ok(())
    }
}
