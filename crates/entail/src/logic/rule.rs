//! Inference rules

use super::expr::Expr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single inference rule: premise implies conclusion.
///
/// Biconditional source lines are expanded by the parser into two rules, so
/// no biconditional survives here. `id` is the source-order index within the
/// knowledge base and is what diagnostics refer to; `text` is the original
/// line, kept for explanations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: usize,
    pub premise: Expr,
    pub conclusion: Expr,
    pub text: String,
}

impl Rule {
    pub fn new(id: usize, premise: Expr, conclusion: Expr, text: impl Into<String>) -> Self {
        Rule {
            id,
            premise,
            conclusion,
            text: text.into(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
