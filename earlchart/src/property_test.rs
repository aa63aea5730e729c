//! Property-based checks of the incremental chart.
//!
//! 1. **Batch equivalence**: feeding a session one symbol at a time builds,
//!    position by position, the same item sets as the one-shot recognizer.
//! 2. **Closure is a fixed point**: re-closing a closed position adds nothing.
//! 3. **Dead ends are final**: after the first empty position all later
//!    positions are empty.
//! 4. **Chunking is irrelevant**: reading a string in arbitrary chunks gives
//!    the same answers as reading it symbol by symbol.

use proptest::prelude::*;

use crate::engine::Engine;
use crate::grammar::{Grammar, GrammarBuilder};
use crate::recognizer::EarleyRecognizer;
use crate::session::Session;

// ============================================================================
// Grammars
// ============================================================================

// $ -> A ; A -> a A B | b | c ; B -> A | a | <e>
fn grammar_abc() -> Grammar {
    GrammarBuilder::default()
        .nonterm("$").nonterm("A").nonterm("B")
        .literal("a").literal("b").literal("c")
        .rule("$", &["A"])
        .rule("A", &["a", "A", "B"])
        .rule("A", &["b"])
        .rule("A", &["c"])
        .rule("B", &["A"])
        .rule("B", &["a"])
        .rule::<_, &str>("B", &[])
        .into_grammar("$")
        .unwrap()
}

// S -> A ; A -> a A | <e>
fn grammar_epsilon() -> Grammar {
    GrammarBuilder::default()
        .nonterm("S").nonterm("A")
        .literal("a")
        .rule("S", &["A"])
        .rule("A", &["a", "A"])
        .rule::<_, &str>("A", &[])
        .into_grammar("S")
        .unwrap()
}

// A -> A a | b
fn grammar_left_recursive() -> Grammar {
    GrammarBuilder::default()
        .nonterm("A")
        .literal("a").literal("b")
        .rule("A", &["A", "a"])
        .rule("A", &["b"])
        .into_grammar("A")
        .unwrap()
}

// S -> S S X | b ; X -> <e>
fn grammar_ambiguous_epsilon() -> Grammar {
    GrammarBuilder::default()
        .nonterm("S").nonterm("X")
        .literal("b")
        .rule("S", &["S", "S", "X"])
        .rule::<_, &str>("X", &[])
        .rule("S", &["b"])
        .into_grammar("S")
        .unwrap()
}

// S -> X | Y ; X -> N a ; Y -> Z ; Z -> N b ; N -> M M ; M -> <e>
fn grammar_nested_nullable() -> Grammar {
    GrammarBuilder::default()
        .nonterm("S").nonterm("X").nonterm("Y").nonterm("Z")
        .nonterm("N").nonterm("M")
        .literal("a").literal("b")
        .rule("S", &["X"])
        .rule("S", &["Y"])
        .rule("X", &["N", "a"])
        .rule("Y", &["Z"])
        .rule("Z", &["N", "b"])
        .rule("N", &["M", "M"])
        .rule::<_, &str>("M", &[])
        .rule("Z", &["Z", "N", "b"])
        .into_grammar("S")
        .unwrap()
}

const ALPHABETS: &[&[&str]] = &[
    &["a", "b", "c"],
    &["a"],
    &["a", "b"],
    &["b"],
    &["a", "b"],
];

fn grammar(idx: usize) -> Grammar {
    match idx {
        0 => grammar_abc(),
        1 => grammar_epsilon(),
        2 => grammar_left_recursive(),
        3 => grammar_ambiguous_epsilon(),
        _ => grammar_nested_nullable(),
    }
}

// ============================================================================
// Generators
// ============================================================================

/// A grammar index with a string over that grammar's terminals
fn grammar_and_input() -> impl Strategy<Value = (usize, Vec<&'static str>)> {
    (0..ALPHABETS.len()).prop_flat_map(|g| {
        (Just(g), prop::collection::vec(prop::sample::select(ALPHABETS[g]), 0..10))
    })
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.min(128),
        ..default
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn session_matches_batch((g, input) in grammar_and_input()) {
        let grammar = grammar(g);
        let batch = EarleyRecognizer::new(grammar.clone()).build_chart(&input).unwrap();
        let mut session = Session::new(grammar.clone());
        for symbol in &input {
            session.advance(symbol).unwrap();
        }
        prop_assert_eq!(session.positions(), batch.len());
        for (pos, set) in batch.iter().enumerate() {
            let closed = session.chart().get(pos).unwrap();
            prop_assert!(closed.same_items(set),
                "position {} differs for {:?}: {:?} vs {:?}", pos, input, closed, set);
            let expected = EarleyRecognizer::new(grammar.clone())
                .recognize(&input[..pos]).unwrap();
            prop_assert_eq!(session.accepts_at(pos).unwrap(), expected);
        }
    }

    #[test]
    fn closure_is_a_fixed_point((g, input) in grammar_and_input()) {
        let grammar = grammar(g);
        let mut session = Session::new(grammar.clone());
        session.read(&input).unwrap();
        let engine = Engine::new(&grammar);
        for (pos, set) in session.chart().iter().enumerate() {
            let again = engine.close(&session.chart().prefix(pos), set.iter().cloned());
            prop_assert!(again.same_items(set), "position {} grew for {:?}", pos, input);
        }
    }

    #[test]
    fn dead_ends_are_final((g, input) in grammar_and_input()) {
        let mut session = Session::new(grammar(g));
        session.read(&input).unwrap();
        let chart = session.chart();
        if let Some(dead) = chart.iter().position(|set| set.is_empty()) {
            prop_assert!(chart.iter().skip(dead).all(|set| set.is_empty()));
            prop_assert!(session.is_dead());
        }
    }

    #[test]
    fn chunking_is_irrelevant((g, input) in grammar_and_input(), cut in 0usize..10) {
        let cut = cut.min(input.len());
        let mut whole = Session::new(grammar(g));
        for symbol in &input {
            whole.advance(symbol).unwrap();
        }
        let mut chunked = Session::new(grammar(g));
        chunked.read(&input[..cut]).unwrap();
        chunked.read(&input[cut..]).unwrap();
        prop_assert_eq!(whole.consumed(), chunked.consumed());
        for pos in 0..whole.positions() {
            prop_assert_eq!(whole.accepts_at(pos).unwrap(), chunked.accepts_at(pos).unwrap());
        }
    }

    #[test]
    fn epsilon_grammar_takes_every_a(n in 0usize..40) {
        let mut session = Session::new(grammar_epsilon());
        session.read(std::iter::repeat_n("a", n)).unwrap();
        prop_assert!(session.accepts_at(n).unwrap());
    }

    #[test]
    fn foreign_symbols_are_rejected(g in 0..ALPHABETS.len(), symbol in "[d-z]{1,3}") {
        let mut session = Session::new(grammar(g));
        prop_assert!(session.advance(&symbol).is_err());
        prop_assert_eq!(session.positions(), 1);
    }
}
