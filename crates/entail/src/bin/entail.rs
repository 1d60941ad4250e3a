//! Command-line front end: run a rule file, optionally drop into a REPL.

use entail::json::ReportJson;
use entail::{parse_problem_file, Answer, Fact, KnowledgeBase};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut file: Option<String> = None;
    let mut interactive = false;
    let mut json = false;

    for arg in &args[1..] {
        match arg.as_str() {
            "-i" | "--interactive" => interactive = true,
            "--json" => json = true,
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {other}");
                std::process::exit(1);
            }
            other => {
                if file.is_some() {
                    eprintln!("Only one input file is accepted");
                    std::process::exit(1);
                }
                file = Some(other.to_string());
            }
        }
    }

    let Some(file) = file else {
        eprintln!("Usage: {} <rule_file> [options]", args[0]);
        eprintln!("\nOptions:");
        eprintln!("  -i, --interactive   Enter a REPL after the initial queries");
        eprintln!("  --json              Print answers as JSON");
        std::process::exit(1);
    };

    let problem = match parse_problem_file(&file) {
        Ok(problem) => problem,
        Err(err) => {
            eprintln!("{file}: {err}");
            std::process::exit(1);
        }
    };

    let mut queries = problem.queries.clone();
    let mut kb = KnowledgeBase::from(problem);

    if !json {
        let initial: String = kb.initial_facts().map(|fact| fact.name()).collect();
        println!(
            "Initial facts: {}",
            if initial.is_empty() { "(none)" } else { initial.as_str() }
        );
        println!();
    }

    let answers = entail::run_queries(&kb, &queries);
    print_answers(&kb, &answers, json);

    if interactive {
        if let Err(err) = repl(&mut kb, &mut queries, json) {
            eprintln!("readline error: {err}");
            std::process::exit(1);
        }
    }
}

fn print_answers(kb: &KnowledgeBase, answers: &[Answer], json: bool) {
    if json {
        let report = ReportJson::from_answers(answers, kb);
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => eprintln!("json error: {err}"),
        }
        return;
    }
    for answer in answers {
        println!("{} is {}", answer.fact, answer.verdict);
        for event in &answer.events {
            println!("  {}", event.display(kb));
        }
        println!();
    }
}

/// Interactive loop: `+X` asserts, `-X` retracts, `?XYZ` re-runs queries
/// (bare `?` reruns the previous set), `/q` quits. Each command runs against
/// fresh solver sessions over the updated knowledge base.
fn repl(
    kb: &mut KnowledgeBase,
    queries: &mut Vec<Fact>,
    json: bool,
) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                match line.chars().next() {
                    Some('/') => {
                        if line == "/q" || line == "/quit" {
                            break;
                        }
                        eprintln!("Unknown command {line} (try +X, -X, ?XYZ or /q)");
                    }
                    Some('+') => apply_facts(kb, &line[1..], KnowledgeBase::assert_fact),
                    Some('-') => apply_facts(kb, &line[1..], KnowledgeBase::retract_fact),
                    Some('?') => {
                        let requested: Option<Vec<Fact>> = line[1..]
                            .chars()
                            .filter(|c| !c.is_whitespace())
                            .map(Fact::new)
                            .collect();
                        match requested {
                            Some(facts) => {
                                if !facts.is_empty() {
                                    *queries = facts;
                                }
                                let answers = entail::run_queries(kb, queries);
                                print_answers(kb, &answers, json);
                            }
                            None => eprintln!("Queries must be uppercase letters A-Z"),
                        }
                    }
                    _ => eprintln!("Unknown command {line} (try +X, -X, ?XYZ or /q)"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn apply_facts(kb: &mut KnowledgeBase, letters: &str, apply: fn(&mut KnowledgeBase, Fact)) {
    for c in letters.chars().filter(|c| !c.is_whitespace()) {
        match Fact::new(c) {
            Some(fact) => apply(kb, fact),
            None => eprintln!("`{c}` is not a fact letter (A-Z)"),
        }
    }
}
