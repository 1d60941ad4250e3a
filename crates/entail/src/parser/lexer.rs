//! Tokenizer for rule-file lines

use crate::error::LexError;
use crate::logic::Fact;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{anychar, char},
    combinator::{map_opt, value},
    IResult,
};

/// One lexical token of the rule-file grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Fact(Fact),
    Not,
    And,
    Or,
    Xor,
    LParen,
    RParen,
    Implies,
    Iff,
    QueryMark,
    FactsMark,
}

// `<=>` must be tried before `=>`, and `=>` before the bare facts mark.
fn token(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Iff, tag("<=>")),
        value(Token::Implies, tag("=>")),
        value(Token::FactsMark, char('=')),
        value(Token::QueryMark, char('?')),
        value(Token::Not, char('!')),
        value(Token::And, char('+')),
        value(Token::Or, char('|')),
        value(Token::Xor, char('^')),
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
        map_opt(anychar, |c| Fact::new(c).map(Token::Fact)),
    ))(input)
}

/// Tokenize one logical line (comments already stripped).
///
/// Whitespace between tokens is insignificant; whitespace inside a
/// multi-character operator is not accepted. The scan is maximal munch.
pub fn tokenize(line: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut rest = line.trim_start();
    while let Some(found) = rest.chars().next() {
        match token(rest) {
            Ok((remaining, tok)) => {
                tokens.push(tok);
                rest = remaining.trim_start();
            }
            Err(_) => {
                return Err(LexError {
                    column: line.len() - rest.len() + 1,
                    found,
                });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_rule_line() {
        let tokens = tokenize("A + B => C").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Fact(Fact::new('A').unwrap()),
                Token::And,
                Token::Fact(Fact::new('B').unwrap()),
                Token::Implies,
                Token::Fact(Fact::new('C').unwrap()),
            ]
        );
    }

    #[test]
    fn test_iff_wins_over_implies() {
        let tokens = tokenize("A<=>B").unwrap();
        assert_eq!(tokens[1], Token::Iff);
    }

    #[test]
    fn test_implies_wins_over_facts_mark() {
        assert_eq!(tokenize("=>").unwrap(), vec![Token::Implies]);
        assert_eq!(tokenize("=").unwrap(), vec![Token::FactsMark]);
    }

    #[test]
    fn test_whitespace_is_insignificant_between_tokens() {
        assert_eq!(tokenize("  ! ( A )").unwrap().len(), 4);
    }

    #[test]
    fn test_split_operator_is_rejected() {
        // `< =>` is not a biconditional
        let err = tokenize("A < => B").unwrap_err();
        assert_eq!(err.found, '<');
        assert_eq!(err.column, 3);
    }

    #[test]
    fn test_lowercase_is_rejected_with_column() {
        let err = tokenize("A + b").unwrap_err();
        assert_eq!(err.found, 'b');
        assert_eq!(err.column, 5);
    }
}
