fn main() {
    // Grammar:  $ -> A;  A -> a A B | b | c;  B -> A | a | <e>
    let grammar = earlchart::GrammarBuilder::default()
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
      .unwrap();

    // Feed the input in chunks, only printing positions added by each chunk
    let mut session = earlchart::Session::new(grammar);
    let mut shown = 0;
    for chunk in ["ab", "c", "c"] {
        session.read(chunk.chars().map(String::from)).unwrap();
        for snapshot in session.snapshots_since(shown) {
            println!("{}", snapshot);
        }
        shown = session.positions();
    }
}
