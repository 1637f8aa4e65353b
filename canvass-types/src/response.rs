use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AnswerValue;

/// One recorded answer within a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question_id: String,
    pub value: AnswerValue,
    /// Updated every time the answer for this question changes.
    pub answered_at: DateTime<Utc>,
}

/// One respondent's in-progress or completed set of answers to a survey.
///
/// The survey reference is weak: deleting the survey does not cascade into
/// its responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub id: String,
    pub survey_id: String,
    /// `"anonymous"` when unauthenticated.
    pub respondent_id: String,

    /// One entry per answered question, keyed by question id.
    pub answers: HashMap<String, QuestionResponse>,

    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub is_complete: bool,

    /// Last-visited step index, persisted so a resumed response keeps its
    /// place.
    pub current_step: usize,
}

impl SurveyResponse {
    /// Create a fresh, empty response for a survey.
    pub fn new(
        id: impl Into<String>,
        survey_id: impl Into<String>,
        respondent_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            survey_id: survey_id.into(),
            respondent_id: respondent_id.into(),
            answers: HashMap::new(),
            started_at: Utc::now(),
            completed_at: None,
            is_complete: false,
            current_step: 0,
        }
    }

    /// Set or overwrite the answer for a question, stamping `answered_at`.
    pub fn record_answer(&mut self, question_id: impl Into<String>, value: AnswerValue) {
        let question_id = question_id.into();
        self.answers.insert(
            question_id.clone(),
            QuestionResponse {
                question_id,
                value,
                answered_at: Utc::now(),
            },
        );
    }

    /// The recorded value for a question, if any.
    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id).map(|a| &a.value)
    }
}
