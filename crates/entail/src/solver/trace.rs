//! Reasoning trace: the event log a solver session leaves behind

use crate::kb::KnowledgeBase;
use crate::logic::Fact;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One reasoning step recorded during a solve session.
///
/// Diagnostics (`CycleDetected`, `Contradiction`) never abort the session;
/// they explain why a verdict came out `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEvent {
    /// The fact was asserted on the `=` line
    InitialFact { fact: Fact },
    /// A rule's premise held and its conclusion pinned the fact
    RuleFired { rule: usize, fact: Fact, value: bool },
    /// A rule's premise held but its conclusion (OR/XOR) left the fact open
    Undetermined { rule: usize, fact: Fact },
    /// Proving the fact looped back onto itself
    CycleDetected { fact: Fact },
    /// Rules pinned the fact to both values in the same session
    Contradiction {
        fact: Fact,
        positive: Vec<usize>,
        negative: Vec<usize>,
    },
    /// No rule proved the fact; the closed-world default applies
    ClosedWorld { fact: Fact },
}

impl TraceEvent {
    /// Render against the knowledge base that produced it, so rule ids can
    /// be shown with their source text.
    pub fn display<'a>(&'a self, kb: &'a KnowledgeBase) -> TraceEventDisplay<'a> {
        TraceEventDisplay { event: self, kb }
    }
}

/// Borrowed display adaptor for [`TraceEvent`]
pub struct TraceEventDisplay<'a> {
    event: &'a TraceEvent,
    kb: &'a KnowledgeBase,
}

impl fmt::Display for TraceEventDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.event {
            TraceEvent::InitialFact { fact } => write!(f, "{fact} is an initial fact"),
            TraceEvent::RuleFired { rule, fact, value } => {
                write!(
                    f,
                    "rule #{rule} `{}` fires and sets {fact} to {}",
                    self.kb.rule(*rule),
                    if *value { "True" } else { "False" },
                )
            }
            TraceEvent::Undetermined { rule, fact } => {
                write!(
                    f,
                    "rule #{rule} `{}` fires but does not pin down {fact}",
                    self.kb.rule(*rule),
                )
            }
            TraceEvent::CycleDetected { fact } => {
                write!(f, "cycle detected while proving {fact}")
            }
            TraceEvent::Contradiction {
                fact,
                positive,
                negative,
            } => {
                write!(f, "contradiction on {fact}: ")?;
                write_rule_list(f, positive)?;
                write!(f, " against ")?;
                write_rule_list(f, negative)
            }
            TraceEvent::ClosedWorld { fact } => {
                write!(f, "no rule proves {fact}, defaulting to False")
            }
        }
    }
}

fn write_rule_list(f: &mut fmt::Formatter<'_>, rules: &[usize]) -> fmt::Result {
    for (i, rule) in rules.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "rule #{rule}")?;
    }
    Ok(())
}
