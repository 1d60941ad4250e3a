//! Error types for entail

use thiserror::Error;

/// Unrecognised character or malformed multi-character operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unexpected character `{found}` at column {column}")]
pub struct LexError {
    /// 1-based column of the offending character within the logical line
    pub column: usize,
    pub found: char,
}

/// Structural problem in an expression or rule line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unbalanced parentheses")]
    UnbalancedParens,
    #[error("operator `{0}` is missing an operand")]
    MissingOperand(&'static str),
    #[error("missing operator between operands")]
    MissingOperator,
    #[error("empty expression")]
    EmptyExpression,
    #[error("`{0}` is not allowed inside an expression")]
    MisplacedToken(&'static str),
    #[error("a rule needs `=>` or `<=>`")]
    NoImplication,
    #[error("a rule may carry only one `=>` or `<=>`")]
    MultipleImplications,
    #[error("rule side is empty")]
    EmptySide,
}

/// Top-level error, carrying source-line context where it applies.
///
/// Lex/parse/input problems abort loading; solver-time findings
/// (contradictions, cycles) are trace diagnostics, never errors.
#[derive(Debug, Error)]
pub enum EntailError {
    #[error("line {line}: {source}")]
    Lex {
        line: usize,
        #[source]
        source: LexError,
    },
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },
    #[error("{0}")]
    Input(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EntailError>;
