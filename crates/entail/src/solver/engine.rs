//! Backward-chaining solver over three-valued logic

use super::trace::TraceEvent;
use crate::kb::KnowledgeBase;
use crate::logic::{BinaryOp, Expr, Fact, Truth};
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashMap, HashSet};

/// What a conclusion expression pins a given fact to.
///
/// AND distributes the asserted polarity over both children, NOT flips it,
/// and a bare fact asserts it. OR and XOR pin nothing: `X | Y` forces
/// neither X nor Y.
fn concluded_polarity(conclusion: &Expr, fact: Fact) -> (bool, bool) {
    let mut flags = (false, false);
    walk_conclusion(conclusion, fact, true, &mut flags);
    flags
}

fn walk_conclusion(expr: &Expr, fact: Fact, polarity: bool, flags: &mut (bool, bool)) {
    match expr {
        Expr::Fact(name) if *name == fact => {
            if polarity {
                flags.0 = true;
            } else {
                flags.1 = true;
            }
        }
        Expr::Fact(_) => {}
        Expr::Not(child) => walk_conclusion(child, fact, !polarity, flags),
        Expr::Binary(BinaryOp::And, left, right) => {
            walk_conclusion(left, fact, polarity, flags);
            walk_conclusion(right, fact, polarity, flags);
        }
        Expr::Binary(_, _, _) => {}
    }
}

/// One proof session over a read-only knowledge base.
///
/// State is per-session: verdicts are memoized, the active proof stack
/// detects cycles, and conclusions of fired rules are cached whole so later
/// premises can reuse composite (OR/XOR) conclusions. Sessions are created
/// per query and discarded.
pub struct Solver<'kb> {
    kb: &'kb KnowledgeBase,
    /// Completed verdicts
    memo: HashMap<Fact, Truth>,
    /// Facts currently being proven, innermost last
    path: IndexSet<Fact>,
    /// Facts on which a dependency loop was broken
    cycles: BTreeSet<Fact>,
    /// Structural keys of conclusions whose rule fired, cached whole
    proven_conclusions: HashSet<String>,
    /// Count of Unknowns rooted in indeterminate conclusions or
    /// contradictions, as opposed to broken cycles
    hard_unknowns: usize,
    events: Vec<TraceEvent>,
}

impl<'kb> Solver<'kb> {
    pub fn new(kb: &'kb KnowledgeBase) -> Self {
        Solver {
            kb,
            memo: HashMap::new(),
            path: IndexSet::new(),
            cycles: BTreeSet::new(),
            proven_conclusions: HashSet::new(),
            hard_unknowns: 0,
            events: Vec::new(),
        }
    }

    /// Events recorded so far, in reasoning order
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Facts involved in any broken dependency loop
    pub fn cycles(&self) -> &BTreeSet<Fact> {
        &self.cycles
    }

    pub fn take_events(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_cycles(&mut self) -> BTreeSet<Fact> {
        std::mem::take(&mut self.cycles)
    }

    /// Resolve `fact` by backward chaining.
    ///
    /// Initial facts are axioms. A fact already on the proof stack resolves
    /// `Unknown` for that path and is recorded as a cycle; whether that
    /// `Unknown` survives into the verdict depends on its provenance, see
    /// the verdict step below.
    pub fn solve(&mut self, fact: Fact) -> Truth {
        if self.kb.is_initial(fact) {
            if self.memo.insert(fact, Truth::True).is_none() {
                self.events.push(TraceEvent::InitialFact { fact });
            }
            return Truth::True;
        }
        if let Some(&verdict) = self.memo.get(&fact) {
            if verdict == Truth::Unknown {
                self.hard_unknowns += 1;
            }
            return verdict;
        }
        if self.path.contains(&fact) {
            if self.cycles.insert(fact) {
                self.events.push(TraceEvent::CycleDetected { fact });
            }
            // cycle break: soft Unknown, no hard_unknowns bump
            return Truth::Unknown;
        }

        self.path.insert(fact);
        let mut positive: Vec<usize> = Vec::new();
        let mut negative: Vec<usize> = Vec::new();
        let mut undetermined = false;

        let kb = self.kb;
        for &rule_id in kb.concluding(fact) {
            let rule = kb.rule(rule_id);
            let before = self.hard_unknowns;
            let mut premise = self.eval(&rule.premise);
            if premise == Truth::Unknown {
                // the walk above may have recorded composite conclusions;
                // a second pass sees them
                premise = self.eval(&rule.premise);
            }
            match premise {
                Truth::True => {
                    self.proven_conclusions.insert(rule.conclusion.key());
                    let (asserts_true, asserts_false) =
                        concluded_polarity(&rule.conclusion, fact);
                    if asserts_true {
                        positive.push(rule_id);
                        self.events.push(TraceEvent::RuleFired {
                            rule: rule_id,
                            fact,
                            value: true,
                        });
                    }
                    if asserts_false {
                        negative.push(rule_id);
                        self.events.push(TraceEvent::RuleFired {
                            rule: rule_id,
                            fact,
                            value: false,
                        });
                    }
                    if !asserts_true && !asserts_false {
                        undetermined = true;
                        self.events
                            .push(TraceEvent::Undetermined { rule: rule_id, fact });
                    }
                }
                Truth::Unknown => {
                    if self.hard_unknowns > before {
                        undetermined = true;
                    }
                }
                Truth::False => {}
            }
        }
        self.path.pop();

        let verdict = match (!positive.is_empty(), !negative.is_empty()) {
            (true, true) => {
                self.events.push(TraceEvent::Contradiction {
                    fact,
                    positive,
                    negative,
                });
                Truth::Unknown
            }
            (true, false) => Truth::True,
            (false, true) => Truth::False,
            (false, false) => {
                if undetermined {
                    Truth::Unknown
                } else {
                    self.events.push(TraceEvent::ClosedWorld { fact });
                    Truth::False
                }
            }
        };

        if verdict == Truth::Unknown {
            self.hard_unknowns += 1;
        }
        self.memo.insert(fact, verdict);
        verdict
    }

    /// Evaluate an expression under the current session state.
    ///
    /// Differs from [`Expr::eval`] in one way: any sub-expression whose key
    /// is a cached fired conclusion evaluates `True` as a whole, even while
    /// its facts are individually `Unknown`. This is what lets reasoning
    /// chain through OR/XOR conclusions.
    fn eval(&mut self, expr: &Expr) -> Truth {
        if !self.proven_conclusions.is_empty() && self.proven_conclusions.contains(&expr.key()) {
            return Truth::True;
        }
        match expr {
            Expr::Fact(fact) => self.solve(*fact),
            Expr::Not(child) => self.eval(child).not(),
            Expr::Binary(op, left, right) => {
                let left = self.eval(left);
                let right = self.eval(right);
                match op {
                    BinaryOp::And => left.and(right),
                    BinaryOp::Or => left.or(right),
                    BinaryOp::Xor => left.xor(right),
                }
            }
        }
    }
}
