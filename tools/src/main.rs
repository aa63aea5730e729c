use clap::{Parser, ValueEnum};
use earlchart::{Grammar, Session};
use rustyline::error::ReadlineError;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod grammars;
use grammars::GrammarChoice;

/// Feed symbols to an incremental Earley chart and watch it grow
#[derive(Parser, Debug)]
#[command(name = "chartrepl", version)]
struct Args {
    /// Grammar to recognize
    #[arg(short, long, value_enum, default_value_t = GrammarChoice::Abc)]
    grammar: GrammarChoice,

    /// How a line of input is cut into symbols
    #[arg(short, long, value_enum, default_value_t = Split::Chars)]
    split: Split,

    /// Print every position after each line, not only the new ones
    #[arg(long)]
    all: bool,

    /// Symbols to read in one go; without them an interactive prompt starts
    input: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Split {
    /// every non-blank character is a symbol
    Chars,
    /// whitespace separated words are symbols
    Whitespace,
}

impl Split {
    fn symbols(self, line: &str) -> Vec<String> {
        match self {
            Split::Chars => line.chars()
                .filter(|c| !c.is_whitespace())
                .map(String::from)
                .collect(),
            Split::Whitespace => line.split_whitespace().map(String::from).collect(),
        }
    }
}

// Read a line worth of symbols and print the resulting positions
fn feed(session: &mut Session, symbols: &[String], all: bool) {
    // the initial position hasn't been shown yet on the first line
    let shown = if all || session.is_empty() { 0 } else { session.positions() };
    match session.read(symbols) {
        Err(e) => println!("Read err: {}", e),
        Ok(_) => {
            for snapshot in session.snapshots_since(shown) {
                println!("{}", snapshot);
            }
        }
    }
}

fn print_grammar(grammar: &Grammar) {
    println!("start: {}", grammar.start());
    for rule in grammar.rules() {
        println!("  {}", rule);
    }
}

fn main() -> Result<(), ReadlineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let grammar = Arc::new(args.grammar.build());
    tracing::info!(grammar = ?args.grammar, rules = grammar.rules().count(), "grammar ready");
    let mut session = Session::new(grammar.clone());

    if !args.input.is_empty() {
        let symbols = args.split.symbols(&args.input.join(" "));
        feed(&mut session, &symbols, args.all);
        return Ok(());
    }

    let mut rl = rustyline::DefaultEditor::new()?;
    loop {
        let line = match rl.readline("~> ") {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(e) => return Err(e),
        };
        match line.trim() {
            "" => continue,
            ":reset" => {
                session = Session::new(grammar.clone());
                tracing::debug!("session reset");
                for snapshot in session.snapshots_since(0) {
                    println!("{}", snapshot);
                }
            }
            ":grammar" => print_grammar(&grammar),
            _ => {
                rl.add_history_entry(line.as_str())?;
                feed(&mut session, &args.split.symbols(&line), args.all);
            }
        }
    }
    Ok(())
}
