use crate::error::SessionError;
use crate::grammar::Grammar;
use crate::items::Item;
use crate::stateset::StateSet;
use tracing::debug;

/// One-shot recognizer over a complete input.
///
/// Builds every state set from scratch by sweeping predictions and
/// completions over the whole set until it stops growing. It shares no
/// closure code with `Session`, which makes it a ground truth to check the
/// incremental chart against.
pub struct EarleyRecognizer {
    pub grammar: Grammar,
}

impl EarleyRecognizer {
    pub fn new(grammar: Grammar) -> EarleyRecognizer {
        EarleyRecognizer { grammar }
    }

    /// Items derived in one sweep over `statesets[idx]`
    fn sweep(&self, statesets: &[StateSet], idx: usize) -> Vec<Item> {
        statesets[idx].iter().flat_map(|trigger| -> Vec<Item> {
            if let Some(name) = trigger.next_nonterm() {
                self.grammar.rules_for(name).iter()
                    .map(|rule| Item::predict_new(rule, idx))
                    .collect()
            } else if trigger.complete() {
                statesets[trigger.origin].iter()
                    .filter(|source| source.awaits(trigger))
                    .map(Item::advance)
                    .collect()
            } else {
                // Scan items populate next stateset only when done with current state
                Vec::new()
            }
        }).collect()
    }

    /// All state sets for `tokenizer`, position 0 included.
    pub fn build_chart<T>(&self, tokenizer: T) -> Result<Vec<StateSet>, SessionError>
            where T: IntoIterator, T::Item: AsRef<str> {
        let tokens: Vec<T::Item> = tokenizer.into_iter().collect();
        if let Some((position, bad)) = tokens.iter().enumerate()
                .find(|(_, t)| !self.grammar.accepts_lexeme(t.as_ref())) {
            return Err(SessionError::InvalidSymbol {
                symbol: bad.as_ref().to_string(),
                position: position + 1,
            });
        }

        // Populate S0, add items for each rule matching the start symbol
        let s0: StateSet = self.grammar.rules_for(self.grammar.start()).iter()
            .map(|rule| Item::predict_new(rule, 0))
            .collect();
        let mut statesets = vec![s0];

        for idx in 0..=tokens.len() {
            // Predict/Complete until no new Items are added to the StateSet
            let mut passes = 0;
            loop {
                passes += 1;
                let new_items = self.sweep(&statesets, idx);
                let stateset = &mut statesets[idx];
                let prev_len = stateset.len();
                stateset.extend(new_items);
                if prev_len == stateset.len() {
                    break;
                }
            }
            debug!(position = idx, passes, items = statesets[idx].len(), "batch position closed");
            // Build Si+1 with items in the current state that accept the next token
            if let Some(lexeme) = tokens.get(idx) {
                let next: StateSet = statesets[idx].iter()
                    .filter(|item| item.can_scan(lexeme.as_ref()))
                    .map(Item::advance)
                    .collect();
                statesets.push(next);
            }
        }
        Ok(statesets)
    }

    /// Check that at least one item is a. complete, b. starts at the idx 0,
    /// and c. the name of the rule matches the starting symbol, at the last
    /// position.
    pub fn recognize<T>(&self, tokenizer: T) -> Result<bool, SessionError>
            where T: IntoIterator, T::Item: AsRef<str> {
        let statesets = self.build_chart(tokenizer)?;
        Ok(statesets.last()
            .is_some_and(|last| last.completed(self.grammar.start(), 0).next().is_some()))
    }
}

///////////////////////////////////////////////////////////////////////////////
