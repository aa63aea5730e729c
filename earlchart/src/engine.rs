use crate::chart::Chart;
use crate::grammar::Grammar;
use crate::items::Item;
use crate::stateset::StateSet;
use std::collections::VecDeque;
use tracing::trace;

/// Predict / Complete / Scan over a growing `Chart`.
///
/// `close` saturates the state set of the position right after the chart's
/// last one, starting from the items scanned into it. `scan` stages the
/// seed of the following position from a closed set.
pub struct Engine<'g> {
    grammar: &'g Grammar,
}

impl<'g> Engine<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Engine { grammar }
    }

    /// Items that seed position 0: every rule of `start` with the dot at 0.
    pub fn seed(&self, start: &str) -> Vec<Item> {
        self.predictions(start, 0).collect()
    }

    /// Build new `Prediction` items for each rule named `name`
    fn predictions<'a>(&'a self, name: &'a str, position: usize)
            -> impl Iterator<Item=Item> + 'a {
        self.grammar.rules_for(name).iter()
            .map(move |rule| Item::predict_new(rule, position))
    }

    /// Build new `Completion` items based on `trigger` having completed.
    /// Every item in the trigger's origin set waiting on its head advances.
    /// The advanced items belong to the current position, not the origin.
    fn completions(chart: &Chart, current: &StateSet, position: usize, trigger: &Item)
            -> Vec<Item> {
        let origin_set = if trigger.origin == position {
            current
        } else {
            match chart.get(trigger.origin) {
                Some(set) => set.as_ref(),
                None => return Vec::new(),
            }
        };
        origin_set.iter()
            .filter(|source| source.awaits(trigger))
            .map(Item::advance)
            .collect()
    }

    /// Saturate the state set for position `chart.len()` starting from `seed`.
    /// Items waiting on a terminal are left for `scan`.
    pub fn close(&self, chart: &Chart, seed: impl IntoIterator<Item=Item>) -> StateSet {
        let position = chart.len();
        let mut current = StateSet::new();
        let mut worklist: VecDeque<Item> = seed.into_iter().collect();

        while let Some(item) = worklist.pop_front() {
            if current.contains(&item) {
                continue;
            }
            let derived: Vec<Item> = if let Some(name) = item.next_nonterm() {
                let mut derived: Vec<_> = self.predictions(name, position).collect();
                // A nonterm that already completed here without consuming
                // input (it's nullable) won't be completed again, so the
                // waiting item has to be advanced over it now.
                if current.completed(name, position).next().is_some() {
                    derived.push(item.advance());
                }
                derived
            } else if item.complete() {
                Engine::completions(chart, &current, position, &item)
            } else {
                Vec::new()
            };
            trace!(position, item = %item, derived = derived.len(), "closure insert");
            current.push(item);
            worklist.extend(derived.into_iter().filter(|it| !current.contains(it)));
        }
        current
    }

    /// Build `Scan` items for items in a closed set whose next symbol is a
    /// Terminal that matches the input lexeme. They seed the next position.
    pub fn scan(&self, closed: &StateSet, lexeme: &str) -> Vec<Item> {
        closed.iter()
            .filter(|item| item.can_scan(lexeme))
            .map(Item::advance)
            .collect()
    }
}

///////////////////////////////////////////////////////////////////////////////
