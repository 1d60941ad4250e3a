//! Rule-file parsing: rules, the facts line, and the query line

use super::expr::parse_expr;
use super::lexer::{tokenize, Token};
use crate::error::{EntailError, ParseError, Result};
use crate::logic::{Expr, Fact, Rule};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// A fully parsed input file
#[derive(Debug, Clone)]
pub struct Problem {
    /// Rules in source order; biconditionals already expanded
    pub rules: Vec<Rule>,
    /// Facts asserted true on the `=` line
    pub initial: BTreeSet<Fact>,
    /// Queried facts, in source order
    pub queries: Vec<Fact>,
}

/// Split a rule line at its implication and parse both sides.
///
/// `<=>` expands into the forward and the reverse implication, in that
/// order. Exactly one implication token may appear on the line.
fn parse_rule_line(tokens: &[Token]) -> std::result::Result<Vec<(Expr, Expr)>, ParseError> {
    let mut split = None;
    for (i, token) in tokens.iter().enumerate() {
        if matches!(token, Token::Implies | Token::Iff) {
            if split.is_some() {
                return Err(ParseError::MultipleImplications);
            }
            split = Some((i, matches!(token, Token::Iff)));
        }
    }
    let Some((at, iff)) = split else {
        return Err(ParseError::NoImplication);
    };

    let (lhs, rhs) = (&tokens[..at], &tokens[at + 1..]);
    if lhs.is_empty() || rhs.is_empty() {
        return Err(ParseError::EmptySide);
    }
    let left = parse_expr(lhs)?;
    let right = parse_expr(rhs)?;

    Ok(if iff {
        vec![(left.clone(), right.clone()), (right, left)]
    } else {
        vec![(left, right)]
    })
}

/// Interpret the tail of a `=` or `?` line as a list of fact letters.
fn fact_list(tokens: &[Token], line: usize, section: &str) -> Result<Vec<Fact>> {
    tokens
        .iter()
        .map(|token| match token {
            Token::Fact(fact) => Ok(*fact),
            _ => Err(EntailError::Input(format!(
                "line {line}: the {section} line may only list fact letters"
            ))),
        })
        .collect()
}

/// Parse a whole input file: rules first, then the `=` facts line, then the
/// `?` query line. `#` starts a comment anywhere; blank lines are skipped.
pub fn parse_problem(text: &str) -> Result<Problem> {
    let mut rules: Vec<Rule> = Vec::new();
    let mut initial: Option<BTreeSet<Fact>> = None;
    let mut queries: Option<Vec<Fact>> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let tokens =
            tokenize(line).map_err(|source| EntailError::Lex { line: line_no, source })?;

        match tokens.first() {
            Some(Token::FactsMark) => {
                if initial.is_some() {
                    return Err(EntailError::Input(format!(
                        "line {line_no}: a second `=` facts line"
                    )));
                }
                if queries.is_some() {
                    return Err(EntailError::Input(format!(
                        "line {line_no}: facts line after the query line"
                    )));
                }
                let facts = fact_list(&tokens[1..], line_no, "facts")?;
                initial = Some(facts.into_iter().collect());
            }
            Some(Token::QueryMark) => {
                if queries.is_some() {
                    return Err(EntailError::Input(format!(
                        "line {line_no}: a second `?` query line"
                    )));
                }
                if initial.is_none() {
                    return Err(EntailError::Input(format!(
                        "line {line_no}: query line before the `=` facts line"
                    )));
                }
                let facts = fact_list(&tokens[1..], line_no, "query")?;
                if facts.is_empty() {
                    return Err(EntailError::Input(format!(
                        "line {line_no}: the query line needs at least one fact"
                    )));
                }
                queries = Some(facts);
            }
            _ => {
                if initial.is_some() || queries.is_some() {
                    return Err(EntailError::Input(format!(
                        "line {line_no}: rule after the facts/query section"
                    )));
                }
                let sides = parse_rule_line(&tokens)
                    .map_err(|source| EntailError::Parse { line: line_no, source })?;
                for (premise, conclusion) in sides {
                    let id = rules.len();
                    rules.push(Rule::new(id, premise, conclusion, line));
                }
            }
        }
    }

    let initial = initial
        .ok_or_else(|| EntailError::Input("missing `=` facts line".to_string()))?;
    let queries = queries
        .ok_or_else(|| EntailError::Input("missing `?` query line".to_string()))?;

    Ok(Problem {
        rules,
        initial,
        queries,
    })
}

/// Parse an input file from disk.
pub fn parse_problem_file(path: impl AsRef<Path>) -> Result<Problem> {
    let text = fs::read_to_string(path)?;
    parse_problem(&text)
}
