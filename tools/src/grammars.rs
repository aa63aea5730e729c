use clap::ValueEnum;
use earlchart::{Grammar, GrammarBuilder};
use std::str::FromStr;

/// Grammars bundled with the repl
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GrammarChoice {
    /// $ -> A ; A -> a A B | b | c ; B -> A | a | <e>
    Abc,
    /// S -> A ; A -> a A | <e>
    Epsilon,
    /// A -> A a | b
    LeftRecursive,
    /// arithmetic expressions over numbers, use with `--split whitespace`
    Arith,
}

impl GrammarChoice {
    pub fn build(self) -> Grammar {
        match self {
            GrammarChoice::Abc => abc(),
            GrammarChoice::Epsilon => epsilon(),
            GrammarChoice::LeftRecursive => left_recursive(),
            GrammarChoice::Arith => arith(),
        }
    }
}

fn abc() -> Grammar {
    GrammarBuilder::default()
      .nonterm("$")
      .nonterm("A")
      .nonterm("B")
      .literal("a")
      .literal("b")
      .literal("c")
      .rule("$", &["A"])
      .rule("A", &["a", "A", "B"])
      .rule("A", &["b"])
      .rule("A", &["c"])
      .rule("B", &["A"])
      .rule("B", &["a"])
      .rule::<_, &str>("B", &[])
      .into_grammar("$")
      .expect("Bad Grammar")
}

fn epsilon() -> Grammar {
    GrammarBuilder::default()
      .nonterm("S")
      .nonterm("A")
      .literal("a")
      .rule("S", &["A"])
      .rule("A", &["a", "A"])
      .rule::<_, &str>("A", &[])
      .into_grammar("S")
      .expect("Bad Grammar")
}

fn left_recursive() -> Grammar {
    GrammarBuilder::default()
      .nonterm("A")
      .literal("a")
      .literal("b")
      .rule("A", &["A", "a"])
      .rule("A", &["b"])
      .into_grammar("A")
      .expect("Bad Grammar")
}

fn arith() -> Grammar {
    GrammarBuilder::default()
      .nonterm("expr")
      .nonterm("term")
      .nonterm("factor")
      .nonterm("group")
      .terminal("[n]", |n| f64::from_str(n).is_ok())
      .literal("+")
      .literal("-")
      .literal("*")
      .literal("/")
      .literal("(")
      .literal(")")
      .rule("expr",   &["term"])
      .rule("expr",   &["expr", "+", "term"])
      .rule("expr",   &["expr", "-", "term"])
      .rule("term",   &["factor"])
      .rule("term",   &["term", "*", "factor"])
      .rule("term",   &["term", "/", "factor"])
      .rule("factor", &["group"])
      .rule("factor", &["-", "factor"])
      .rule("group",  &["[n]"])
      .rule("group",  &["(", "expr", ")"])
      .into_grammar("expr")
      .expect("Bad Grammar")
}
