//! Expression trees over propositional facts

use super::truth::Truth;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A propositional variable: a single uppercase ASCII letter.
///
/// The universe is fixed at the 26 letters A-Z.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Fact(char);

impl Fact {
    /// Create a fact from its letter; `None` unless the letter is in A-Z.
    pub fn new(name: char) -> Option<Fact> {
        name.is_ascii_uppercase().then_some(Fact(name))
    }

    /// The letter naming this fact
    pub fn name(self) -> char {
        self.0
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binary connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
}

impl BinaryOp {
    /// The surface symbol of this connective
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::And => "+",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
        }
    }
}

/// An expression tree over facts
///
/// Trees are immutable after construction and owned by the rule that
/// contains them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Fact(Fact),
    Not(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn fact(fact: Fact) -> Expr {
        Expr::Fact(fact)
    }

    pub fn not(child: Expr) -> Expr {
        Expr::Not(Box::new(child))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn and(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::And, left, right)
    }

    pub fn or(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::Or, left, right)
    }

    pub fn xor(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOp::Xor, left, right)
    }

    /// Collect every fact mentioned anywhere in this expression
    pub fn facts(&self) -> BTreeSet<Fact> {
        let mut facts = BTreeSet::new();
        self.collect_facts(&mut facts);
        facts
    }

    fn collect_facts(&self, facts: &mut BTreeSet<Fact>) {
        match self {
            Expr::Fact(fact) => {
                facts.insert(*fact);
            }
            Expr::Not(child) => child.collect_facts(facts),
            Expr::Binary(_, left, right) => {
                left.collect_facts(facts);
                right.collect_facts(facts);
            }
        }
    }

    /// Canonical structural key: the `Display` rendering.
    ///
    /// Binary nodes are always parenthesized, so structurally equal trees
    /// render to equal strings.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Evaluate under a partial assignment supplied by `lookup`.
    ///
    /// The truth tables live on [`Truth`]; this walk only applies them.
    pub fn eval<F>(&self, lookup: &mut F) -> Truth
    where
        F: FnMut(Fact) -> Truth,
    {
        match self {
            Expr::Fact(fact) => lookup(*fact),
            Expr::Not(child) => child.eval(lookup).not(),
            Expr::Binary(op, left, right) => {
                let left = left.eval(lookup);
                let right = right.eval(lookup);
                match op {
                    BinaryOp::And => left.and(right),
                    BinaryOp::Or => left.or(right),
                    BinaryOp::Xor => left.xor(right),
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Fact(fact) => write!(f, "{}", fact),
            Expr::Not(child) => write!(f, "!{}", child),
            Expr::Binary(op, left, right) => {
                write!(f, "({}{}{})", left, op.symbol(), right)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(name: char) -> Expr {
        Expr::Fact(Fact::new(name).expect("test fact"))
    }

    #[test]
    fn test_display_is_canonical() {
        let e = Expr::or(Expr::and(fact('A'), fact('B')), Expr::not(fact('C')));
        assert_eq!(e.to_string(), "((A+B)|!C)");
        assert_eq!(e.key(), e.clone().key());
    }

    #[test]
    fn test_facts_collects_through_negation() {
        let e = Expr::xor(Expr::not(fact('B')), fact('A'));
        let names: Vec<char> = e.facts().into_iter().map(Fact::name).collect();
        assert_eq!(names, vec!['A', 'B']);
    }

    #[test]
    fn test_eval_uses_lookup() {
        let e = Expr::and(fact('A'), Expr::not(fact('B')));
        let mut lookup = |f: Fact| match f.name() {
            'A' => Truth::True,
            _ => Truth::Unknown,
        };
        assert_eq!(e.eval(&mut lookup), Truth::Unknown);
    }

    #[test]
    fn test_fact_rejects_non_letters() {
        assert!(Fact::new('a').is_none());
        assert!(Fact::new('1').is_none());
        assert!(Fact::new('Z').is_some());
    }
}
