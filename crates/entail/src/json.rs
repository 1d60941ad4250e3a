//! JSON serialization types for query results

use crate::kb::KnowledgeBase;
use crate::solver::Answer;
use serde::{Deserialize, Serialize};

/// JSON representation of one answered query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerJson {
    pub fact: String,
    pub verdict: String,
    /// Rendered reasoning steps, in order
    pub trace: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub cycles: Vec<String>,
}

impl AnswerJson {
    /// Build from an answer; the knowledge base supplies rule text for the
    /// rendered trace lines.
    pub fn from_answer(answer: &Answer, kb: &KnowledgeBase) -> Self {
        AnswerJson {
            fact: answer.fact.to_string(),
            verdict: answer.verdict.to_string(),
            trace: answer
                .events
                .iter()
                .map(|event| event.display(kb).to_string())
                .collect(),
            cycles: answer.cycles.iter().map(|fact| fact.to_string()).collect(),
        }
    }
}

/// JSON representation of a whole query run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportJson {
    pub answers: Vec<AnswerJson>,
}

impl ReportJson {
    pub fn from_answers(answers: &[Answer], kb: &KnowledgeBase) -> Self {
        ReportJson {
            answers: answers
                .iter()
                .map(|answer| AnswerJson::from_answer(answer, kb))
                .collect(),
        }
    }
}
