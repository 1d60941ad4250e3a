//! Shunting-yard expression parser

use super::lexer::Token;
use crate::error::ParseError;
use crate::logic::{BinaryOp, Expr};

/// Operator-stack entry. `LParen` is a sentinel that stops popping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackOp {
    Not,
    Binary(BinaryOp),
    LParen,
}

impl StackOp {
    fn precedence(self) -> u8 {
        match self {
            StackOp::Not => 4,
            StackOp::Binary(BinaryOp::And) => 3,
            StackOp::Binary(BinaryOp::Xor) => 2,
            StackOp::Binary(BinaryOp::Or) => 1,
            StackOp::LParen => 0,
        }
    }

    fn left_assoc(self) -> bool {
        matches!(self, StackOp::Binary(_))
    }
}

/// Pop one operator and materialize its AST node from the output stack.
fn reduce(op: StackOp, output: &mut Vec<Expr>) -> Result<(), ParseError> {
    match op {
        StackOp::Not => {
            let child = output.pop().ok_or(ParseError::MissingOperand("!"))?;
            output.push(Expr::not(child));
        }
        StackOp::Binary(binop) => {
            let right = output.pop().ok_or(ParseError::MissingOperand(binop.symbol()))?;
            let left = output.pop().ok_or(ParseError::MissingOperand(binop.symbol()))?;
            output.push(Expr::binary(binop, left, right));
        }
        StackOp::LParen => return Err(ParseError::UnbalancedParens),
    }
    Ok(())
}

/// Parse one expression token sequence into its AST.
///
/// Precedence (binding strength): `!` 4 (right), `+` 3, `^` 2, `|` 1 (all
/// left). Implication and section markers are not expression tokens and are
/// rejected here.
pub fn parse_expr(tokens: &[Token]) -> Result<Expr, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let mut output: Vec<Expr> = Vec::new();
    let mut ops: Vec<StackOp> = Vec::new();

    for token in tokens {
        let op = match token {
            Token::Fact(fact) => {
                output.push(Expr::fact(*fact));
                continue;
            }
            Token::Not => StackOp::Not,
            Token::And => StackOp::Binary(BinaryOp::And),
            Token::Or => StackOp::Binary(BinaryOp::Or),
            Token::Xor => StackOp::Binary(BinaryOp::Xor),
            Token::LParen => {
                ops.push(StackOp::LParen);
                continue;
            }
            Token::RParen => {
                loop {
                    match ops.pop() {
                        Some(StackOp::LParen) => break,
                        Some(op) => reduce(op, &mut output)?,
                        None => return Err(ParseError::UnbalancedParens),
                    }
                }
                continue;
            }
            Token::Implies => return Err(ParseError::MisplacedToken("=>")),
            Token::Iff => return Err(ParseError::MisplacedToken("<=>")),
            Token::QueryMark => return Err(ParseError::MisplacedToken("?")),
            Token::FactsMark => return Err(ParseError::MisplacedToken("=")),
        };

        while let Some(&top) = ops.last() {
            if top == StackOp::LParen {
                break;
            }
            let pops = if top.left_assoc() {
                top.precedence() >= op.precedence()
            } else {
                top.precedence() > op.precedence()
            };
            if !pops {
                break;
            }
            reduce(top, &mut output)?;
            ops.pop();
        }
        ops.push(op);
    }

    while let Some(op) = ops.pop() {
        if op == StackOp::LParen {
            return Err(ParseError::UnbalancedParens);
        }
        reduce(op, &mut output)?;
    }

    let expr = output.pop().ok_or(ParseError::EmptyExpression)?;
    if output.is_empty() {
        Ok(expr)
    } else {
        Err(ParseError::MissingOperator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parse(src: &str) -> Result<Expr, ParseError> {
        parse_expr(&tokenize(src).expect("lexes"))
    }

    fn shape(src: &str) -> String {
        parse(src).expect("parses").to_string()
    }

    #[test]
    fn test_precedence_and_binds_before_or() {
        assert_eq!(shape("A + B | C"), "((A+B)|C)");
    }

    #[test]
    fn test_precedence_xor_sits_between() {
        assert_eq!(shape("A | B ^ C + D"), "(A|(B^(C+D)))");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(shape("A + B + C"), "((A+B)+C)");
        assert_eq!(shape("A | B | C"), "((A|B)|C)");
    }

    #[test]
    fn test_parentheses_override() {
        assert_eq!(shape("A + (B | C)"), "(A+(B|C))");
    }

    #[test]
    fn test_double_negation_is_legal() {
        assert_eq!(shape("!!A"), "!!A");
        assert_eq!(shape("!(A + B)"), "!(A+B)");
    }

    #[test]
    fn test_not_binds_tighter_than_and() {
        assert_eq!(shape("!A + B"), "(!A+B)");
    }

    #[test]
    fn test_unbalanced_parens() {
        assert_eq!(parse("(A + B"), Err(ParseError::UnbalancedParens));
        assert_eq!(parse("A + B)"), Err(ParseError::UnbalancedParens));
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(parse("A +"), Err(ParseError::MissingOperand("+")));
        assert_eq!(parse("!"), Err(ParseError::MissingOperand("!")));
    }

    #[test]
    fn test_consecutive_operands() {
        assert_eq!(parse("A B"), Err(ParseError::MissingOperator));
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(parse(""), Err(ParseError::EmptyExpression));
    }

    #[test]
    fn test_section_marker_inside_expression() {
        assert_eq!(parse("A ? B"), Err(ParseError::MisplacedToken("?")));
    }
}
