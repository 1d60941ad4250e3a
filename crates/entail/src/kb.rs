//! Knowledge base: rules and initial facts, indexed for backward chaining

use crate::logic::{Fact, Rule};
use crate::parser::Problem;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Rules plus initial facts, with an index from each fact to the rules whose
/// conclusion mentions it.
///
/// The knowledge base is read-only while a solver session runs; interactive
/// mode mutates the initial-fact set between runs only.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    rules: Vec<Rule>,
    initial: BTreeSet<Fact>,
    by_conclusion: IndexMap<Fact, Vec<usize>>,
}

impl KnowledgeBase {
    pub fn new(rules: Vec<Rule>, initial: BTreeSet<Fact>) -> Self {
        let mut by_conclusion: IndexMap<Fact, Vec<usize>> = IndexMap::new();
        for rule in &rules {
            for fact in rule.conclusion.facts() {
                by_conclusion.entry(fact).or_default().push(rule.id);
            }
        }
        KnowledgeBase {
            rules,
            initial,
            by_conclusion,
        }
    }

    /// All rules, in source order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up a rule by its id
    pub fn rule(&self, id: usize) -> &Rule {
        &self.rules[id]
    }

    /// Ids of the rules whose conclusion mentions `fact`, in source order
    pub fn concluding(&self, fact: Fact) -> &[usize] {
        self.by_conclusion
            .get(&fact)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `fact` was asserted true initially
    pub fn is_initial(&self, fact: Fact) -> bool {
        self.initial.contains(&fact)
    }

    /// The initially-true facts, in letter order
    pub fn initial_facts(&self) -> impl Iterator<Item = Fact> + '_ {
        self.initial.iter().copied()
    }

    /// Assert `fact` as initially true. Only between solver runs.
    pub fn assert_fact(&mut self, fact: Fact) {
        self.initial.insert(fact);
    }

    /// Withdraw an initial-fact assertion. Only between solver runs.
    pub fn retract_fact(&mut self, fact: Fact) {
        self.initial.remove(&fact);
    }
}

impl From<Problem> for KnowledgeBase {
    fn from(problem: Problem) -> Self {
        KnowledgeBase::new(problem.rules, problem.initial)
    }
}
