//! Property-based tests for the solver using proptest.

use super::run_queries;
use crate::kb::KnowledgeBase;
use crate::logic::{BinaryOp, Expr, Fact, Rule, Truth};
use crate::parser::parse_problem;
use proptest::prelude::*;
use std::collections::BTreeSet;

const VARS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

fn fact(name: char) -> Fact {
    Fact::new(name).expect("test fact")
}

/// Expression description over a small fact pool, before building
#[derive(Debug, Clone)]
enum ExprDesc {
    Fact(u8),
    Not(Box<ExprDesc>),
    Binary(u8, Box<ExprDesc>, Box<ExprDesc>),
}

fn arb_expr_desc(max_depth: u32) -> BoxedStrategy<ExprDesc> {
    if max_depth == 0 {
        (0..VARS.len() as u8).prop_map(ExprDesc::Fact).boxed()
    } else {
        prop_oneof![
            3 => (0..VARS.len() as u8).prop_map(ExprDesc::Fact),
            1 => arb_expr_desc(max_depth - 1).prop_map(|e| ExprDesc::Not(Box::new(e))),
            2 => (0..3u8, arb_expr_desc(max_depth - 1), arb_expr_desc(max_depth - 1))
                .prop_map(|(op, l, r)| ExprDesc::Binary(op, Box::new(l), Box::new(r))),
        ]
        .boxed()
    }
}

fn build_expr(desc: &ExprDesc) -> Expr {
    match desc {
        ExprDesc::Fact(i) => Expr::fact(fact(VARS[*i as usize])),
        ExprDesc::Not(child) => Expr::not(build_expr(child)),
        ExprDesc::Binary(op, left, right) => {
            let op = match op % 3 {
                0 => BinaryOp::And,
                1 => BinaryOp::Or,
                _ => BinaryOp::Xor,
            };
            Expr::binary(op, build_expr(left), build_expr(right))
        }
    }
}

/// A random rule set plus a random initial-fact subset
fn arb_kb() -> impl Strategy<Value = KnowledgeBase> {
    (
        proptest::collection::vec((arb_expr_desc(2), arb_expr_desc(2)), 0..6),
        proptest::collection::btree_set(0..VARS.len() as u8, 0..VARS.len()),
    )
        .prop_map(|(rule_descs, initial)| {
            let rules: Vec<Rule> = rule_descs
                .iter()
                .enumerate()
                .map(|(id, (premise, conclusion))| {
                    let premise = build_expr(premise);
                    let conclusion = build_expr(conclusion);
                    let text = format!("{premise} => {conclusion}");
                    Rule::new(id, premise, conclusion, text)
                })
                .collect();
            let initial: BTreeSet<Fact> =
                initial.into_iter().map(|i| fact(VARS[i as usize])).collect();
            KnowledgeBase::new(rules, initial)
        })
}

fn all_verdicts(kb: &KnowledgeBase) -> Vec<Truth> {
    let queries: Vec<Fact> = VARS.iter().map(|&c| fact(c)).collect();
    run_queries(kb, &queries)
        .into_iter()
        .map(|answer| answer.verdict)
        .collect()
}

proptest! {
    /// Same rules and facts, same verdicts, every time.
    #[test]
    fn prop_solving_is_deterministic(kb in arb_kb()) {
        prop_assert_eq!(all_verdicts(&kb), all_verdicts(&kb));
    }

    /// Initial facts resolve True no matter what the rules say.
    #[test]
    fn prop_initial_facts_resolve_true(kb in arb_kb()) {
        let initial: Vec<Fact> = kb.initial_facts().collect();
        for answer in run_queries(&kb, &initial) {
            prop_assert_eq!(answer.verdict, Truth::True);
        }
    }

    /// A fact no rule concludes and nobody asserts defaults to False.
    #[test]
    fn prop_unmentioned_facts_are_false(kb in arb_kb()) {
        let unmentioned = fact('Z');
        let answers = run_queries(&kb, &[unmentioned]);
        prop_assert_eq!(answers[0].verdict, Truth::False);
    }

    /// Double negation evaluates identically under any assignment.
    #[test]
    fn prop_not_involution(
        desc in arb_expr_desc(3),
        assignment in proptest::collection::vec(0..3u8, VARS.len()),
    ) {
        let expr = build_expr(&desc);
        let doubled = Expr::not(Expr::not(expr.clone()));
        let mut lookup = |f: Fact| {
            let idx = VARS.iter().position(|&c| c == f.name()).unwrap_or(0);
            match assignment[idx] {
                0 => Truth::True,
                1 => Truth::False,
                _ => Truth::Unknown,
            }
        };
        prop_assert_eq!(expr.eval(&mut lookup), doubled.eval(&mut lookup));
    }

    /// `L <=> R` answers exactly like the two implications written out.
    #[test]
    fn prop_biconditional_is_two_implications(
        lhs in arb_expr_desc(2),
        rhs in arb_expr_desc(2),
        initial in proptest::collection::btree_set(0..VARS.len() as u8, 0..VARS.len()),
    ) {
        let left = build_expr(&lhs);
        let right = build_expr(&rhs);
        let letters: String = initial.iter().map(|&i| VARS[i as usize]).collect();

        let bicond = format!("{left} <=> {right}\n={letters}\n?ABCDE\n");
        let expanded = format!("{left} => {right}\n{right} => {left}\n={letters}\n?ABCDE\n");

        let kb_bicond = KnowledgeBase::from(parse_problem(&bicond).expect("parses"));
        let kb_expanded = KnowledgeBase::from(parse_problem(&expanded).expect("parses"));
        prop_assert_eq!(all_verdicts(&kb_bicond), all_verdicts(&kb_expanded));
    }
}
