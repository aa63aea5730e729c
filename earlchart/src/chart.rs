use crate::stateset::StateSet;
use std::slice;
use std::sync::Arc;

/// Append-only sequence of closed `StateSet`s, one per input position.
///
/// Position 0 is the set before any input was read. Sets are shared by `Arc`
/// once closed: a cloned chart never observes changes to the original since
/// the only mutation is appending.
#[derive(Clone, Default, Debug)]
pub struct Chart {
    sets: Vec<Arc<StateSet>>,
}

impl Chart {
    pub fn new() -> Chart {
        Chart::default()
    }

    /// Number of positions recorded (symbols consumed + 1 once seeded)
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn push(&mut self, closed: StateSet) {
        self.sets.push(Arc::new(closed));
    }

    pub fn get(&self, position: usize) -> Option<&Arc<StateSet>> {
        self.sets.get(position)
    }

    pub fn last(&self) -> Option<&Arc<StateSet>> {
        self.sets.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, Arc<StateSet>> {
        self.sets.iter()
    }

    /// A chart sharing the first `positions` sets of this one
    pub fn prefix(&self, positions: usize) -> Chart {
        Chart { sets: self.sets[..positions.min(self.sets.len())].to_vec() }
    }
}
