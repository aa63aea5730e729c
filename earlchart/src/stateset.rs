use crate::items::Item;
use std::collections::HashSet;
use std::ops::Index;
use std::{fmt, slice};

/// Items known at one chart position, deduped by value and kept in the
/// order they were first inserted (that order only matters for display).
#[derive(Clone, Default)]
pub struct StateSet {
    order: Vec<Item>,
    dedup: HashSet<Item>,
}

impl StateSet {
    pub fn new() -> StateSet {
        StateSet::default()
    }

    /// Insert `item` unless it's already there. Returns whether it was new.
    pub fn push(&mut self, item: Item) -> bool {
        if self.dedup.contains(&item) {
            return false;
        }
        self.order.push(item.clone());
        self.dedup.insert(item);
        true
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.dedup.contains(item)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Item> {
        self.order.iter()
    }

    /// Complete items for rules named `head` that started at `origin`
    pub fn completed<'a>(&'a self, head: &'a str, origin: usize)
            -> impl Iterator<Item=&'a Item> + 'a {
        self.order.iter()
            .filter(move |it| it.complete() && it.origin == origin && it.head() == head)
    }

    /// Same items regardless of insertion order
    pub fn same_items(&self, other: &StateSet) -> bool {
        self.dedup == other.dedup
    }
}

impl Index<usize> for StateSet {
    type Output = Item;
    fn index(&self, idx: usize) -> &Item {
        self.order.index(idx)
    }
}

impl Extend<Item> for StateSet {
    fn extend<I: IntoIterator<Item=Item>>(&mut self, iterable: I) {
        for item in iterable { self.push(item); }
    }
}

impl FromIterator<Item> for StateSet {
    fn from_iter<I: IntoIterator<Item=Item>>(iterable: I) -> Self {
        let mut ss = StateSet::new();
        ss.extend(iterable);
        ss
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a Item;
    type IntoIter = slice::Iter<'a, Item>;
    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.order.fmt(f)
    }
}

///////////////////////////////////////////////////////////////////////////////
