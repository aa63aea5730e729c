use crate::grammar::{Rule, Symbol};
use std::fmt;
use std::sync::Arc;


/// An Item is a partially matched `Rule`. `dot` shows the match progress.
///
/// Items are plain values: two items are the same item when rule, dot and
/// origin match. Advancing the dot builds a new Item, never mutates.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub rule: Arc<Rule>, // LR0item (dotted rule)
    pub dot: usize,      // dot position within the rule
    pub origin: usize,   // chart position where the derivation started
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pre = self.rule.spec.iter().take(self.dot)
            .map(|s| s.name()).collect::<Vec<_>>().join(" ");
        let post = self.rule.spec.iter().skip(self.dot)
            .map(|s| s.name()).collect::<Vec<_>>().join(" ");
        write!(f, "[{}] {} -> {}\u{2022}{}", self.origin, self.rule.head, pre, post)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Item {
    /// Item is complete if Rule has being fully matched
    pub fn complete(&self) -> bool {
        self.dot >= self.rule.spec.len()
    }

    /// Exposes the next symbol in the progress of the Rule
    pub fn next_symbol(&self) -> Option<&Symbol> {
        self.rule.spec.get(self.dot).map(|sym| &**sym)
    }

    /// Name of the nonterminal right after the dot, if any
    pub fn next_nonterm(&self) -> Option<&str> {
        self.next_symbol().and_then(Symbol::nonterm)
    }

    pub fn head(&self) -> &str {
        &self.rule.head
    }

    /// Build a new `Prediction` based Item.
    pub fn predict_new(rule: &Arc<Rule>, origin: usize) -> Item {
        Item { rule: rule.clone(), dot: 0, origin }
    }

    /// The same derivation with the dot moved past the next symbol.
    /// Used both after scanning a terminal and after completing a nonterm.
    pub fn advance(&self) -> Item {
        assert!(!self.complete(), "Can't advance a complete Item: {}", self);
        Item { rule: self.rule.clone(), dot: self.dot + 1, origin: self.origin }
    }

    /// Check if `self` waits on the nonterm that `completed` just finished
    pub fn awaits(&self, completed: &Item) -> bool {
        completed.complete() && self.next_nonterm() == Some(completed.head())
    }

    /// Check item's next symbol is a terminal that scans lexeme
    pub fn can_scan(&self, lexeme: &str) -> bool {
        self.next_symbol().is_some_and(|s| s.matches(lexeme))
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use super::{Rule, Item, Symbol};

    fn digit() -> Arc<Symbol> {
        Arc::new(Symbol::Term("d".to_string(),
            Box::new(|n: &str| n.chars().all(|c| "123".contains(c)))))
    }

    fn gen_rule1() -> Arc<Rule> {
        fn testfn(o: &str) -> bool { o.len() == 1 && "+-".contains(o) }
        // S -> S +- d
        Arc::new(Rule::new("S", &[
            Arc::new(Symbol::NonTerm("S".to_string())),
            Arc::new(Symbol::Term("+-".to_string(), Box::new(testfn))),
            digit(),
        ]))
    }

    fn gen_rule2() -> Arc<Rule> {
        fn testfn(o: &str) -> bool { o.len() == 1 && "*/".contains(o) }
        // S -> S */ d
        Arc::new(Rule::new("S", &[
            Arc::new(Symbol::NonTerm("S".to_string())),
            Arc::new(Symbol::Term("*/".to_string(), Box::new(testfn))),
            digit(),
        ]))
    }

    fn item(rule: Arc<Rule>, dot: usize, origin: usize) -> Item {
        Item { rule, dot, origin }
    }

    #[test]
    fn item_basics() {
        // Check item equality
        assert_eq!(item(gen_rule1(), 0, 0), item(gen_rule1(), 0, 0));
        assert_ne!(item(gen_rule2(), 0, 0), item(gen_rule1(), 0, 0));
        assert_ne!(item(gen_rule1(), 1, 0), item(gen_rule1(), 0, 0));
        assert_ne!(item(gen_rule1(), 0, 1), item(gen_rule1(), 0, 0));
        // Check item complete
        assert!(!item(gen_rule2(), 2, 0).complete());
        assert!(item(gen_rule2(), 3, 0).complete());
        // Check next symbol
        assert_eq!(item(gen_rule1(), 0, 0).next_nonterm(), Some("S"));
        assert!(item(gen_rule1(), 2, 0).next_symbol().unwrap().is_terminal());
        assert!(item(gen_rule1(), 3, 0).next_symbol().is_none());
    }

    #[test]
    fn item_value_dedup() {
        let mut set = HashSet::new();
        set.insert(item(gen_rule1(), 1, 0));
        set.insert(item(gen_rule1(), 1, 0));
        set.insert(Item::predict_new(&gen_rule1(), 0).advance());
        assert_eq!(set.len(), 1);
        set.insert(item(gen_rule1(), 1, 2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn item_predict_advance() {
        let predict = Item::predict_new(&gen_rule1(), 23);
        assert_eq!(item(gen_rule1(), 0, 23), predict);
        let advanced = predict.advance().advance();
        assert_eq!(item(gen_rule1(), 2, 23), advanced);
        // advancing never touches the source item
        assert_eq!(predict.dot, 0);
        assert!(advanced.can_scan("2"));
        assert!(!advanced.can_scan("+"));
    }

    #[test]
    fn item_awaits() {
        // S -> d .
        let done = item(Arc::new(Rule::new("S", &[digit()])), 1, 0);
        assert!(item(gen_rule1(), 0, 0).awaits(&done));
        assert!(!item(gen_rule1(), 1, 0).awaits(&done));
        assert!(!item(gen_rule1(), 0, 0).awaits(&item(gen_rule2(), 1, 0)));
    }

    #[test]
    #[should_panic]
    fn item_advance_complete() {
        item(gen_rule1(), 3, 0).advance();
    }

    #[test]
    fn item_display() {
        assert_eq!(item(gen_rule1(), 1, 4).to_string(), "[4] S -> S\u{2022}+- d");
        let eps = Arc::new(Rule::new("B", &[]));
        assert_eq!(Item::predict_new(&eps, 2).to_string(), "[2] B -> \u{2022}");
    }
}
