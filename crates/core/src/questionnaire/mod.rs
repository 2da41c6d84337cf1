//! Questionnaire definition and the answers → investor profile mapping.

mod definition;

pub use definition::Question;

use crate::domain::AssetClass;
use crate::error::{AdvisorError, Result};
use crate::risk::RiskLevel;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Question index → selected option index.
pub type Answers = BTreeMap<usize, usize>;

pub const QUESTION_COUNT: usize = 15;
pub const RISK_COMFORT: usize = 2;
pub const RETURN_EXPECTATION: usize = 4;
pub const ESG_INTEREST: usize = 13;

/// Both scale questions feeding the derivations are five-point.
const SCALE_POINTS: usize = 5;

/// Only built through [`Questionnaire::new`], so every instance is validated.
#[derive(Debug, Clone, Serialize)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

static BUILTIN: OnceLock<Questionnaire> = OnceLock::new();

impl Questionnaire {
    pub fn builtin() -> &'static Questionnaire {
        BUILTIN.get_or_init(|| Questionnaire {
            questions: definition::builtin_questions(),
        })
    }

    pub fn new(questions: Vec<Question>) -> anyhow::Result<Self> {
        anyhow::ensure!(
            questions.len() == QUESTION_COUNT,
            "questionnaire must have exactly {QUESTION_COUNT} questions (got {})",
            questions.len()
        );
        let mut topics = std::collections::HashSet::new();
        for (idx, q) in questions.iter().enumerate() {
            anyhow::ensure!(!q.topic.trim().is_empty(), "question {idx} has an empty topic");
            anyhow::ensure!(!q.options.is_empty(), "question {idx} has no options");
            anyhow::ensure!(
                topics.insert(q.topic.as_str()),
                "question {idx} repeats topic {:?}",
                q.topic
            );
        }
        for idx in [RISK_COMFORT, RETURN_EXPECTATION] {
            anyhow::ensure!(
                questions[idx].options.len() == SCALE_POINTS,
                "question {idx} must be a {SCALE_POINTS}-point scale (got {} options)",
                questions[idx].options.len()
            );
        }
        Ok(Self { questions })
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(text)?;
        Self::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Every question must be answered with an in-range option; nothing is defaulted.
    pub fn interpret_answers(&self, answers: &Answers) -> Result<InvestorProfile> {
        if let Some((&idx, _)) = answers.range(self.questions.len()..).next() {
            return Err(AdvisorError::UnknownQuestion(idx));
        }

        let mut attributes = BTreeMap::new();
        for (idx, q) in self.questions.iter().enumerate() {
            let option = *answers.get(&idx).ok_or(AdvisorError::MissingAnswer(idx))?;
            let text = q.options.get(option).ok_or(AdvisorError::OptionOutOfRange {
                question: idx,
                option,
                available: q.options.len(),
            })?;
            attributes.insert(q.topic.clone(), text.clone());
        }

        tracing::debug!(answered = answers.len(), "interpreted questionnaire answers");

        Ok(InvestorProfile {
            attributes,
            selections: answers.clone(),
            esg_only: answers.get(&ESG_INTEREST) == Some(&0),
        })
    }
}

/// Interprets answers against the builtin questionnaire.
pub fn interpret_answers(answers: &Answers) -> Result<InvestorProfile> {
    Questionnaire::builtin().interpret_answers(answers)
}

/// Immutable result of a validated questionnaire. Only [`Questionnaire::interpret_answers`]
/// creates one, so every question has an in-range selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestorProfile {
    attributes: BTreeMap<String, String>,
    selections: Answers,
    esg_only: bool,
}

impl InvestorProfile {
    /// Topic → selected option text.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn get(&self, topic: &str) -> Option<&str> {
        self.attributes.get(topic).map(String::as_str)
    }

    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selections.get(&question).copied()
    }

    /// Three buckets over the five-point comfort scale: 0–1 defensive, 2 balanced, 3–4 growth.
    pub fn risk_level(&self) -> RiskLevel {
        match self.selection(RISK_COMFORT) {
            Some(0 | 1) => RiskLevel::DEFENSIVE,
            Some(2) => RiskLevel::BALANCED,
            _ => RiskLevel::GROWTH,
        }
    }

    /// The comfort check for bonds runs before any etf check.
    pub fn asset_class(&self) -> AssetClass {
        let comfort = self.selection(RISK_COMFORT);
        let returns = self.selection(RETURN_EXPECTATION);

        if matches!(comfort, Some(0 | 1)) || matches!(returns, Some(0 | 1)) {
            AssetClass::Bonds
        } else if matches!(comfort, Some(2 | 3)) || matches!(returns, Some(2 | 3)) {
            AssetClass::Etf
        } else {
            AssetClass::Stocks
        }
    }

    pub fn wants_esg_only(&self) -> bool {
        self.esg_only
    }
}
