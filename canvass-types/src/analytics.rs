use serde::{Deserialize, Serialize};

use crate::QuestionType;

/// How often one answer value occurred for a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerCount {
    pub value: String,
    pub count: usize,
    /// Share of answered responses, 0-100.
    pub percentage: f64,
}

/// Aggregated statistics for a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnalytics {
    pub question_id: String,
    pub question_title: String,
    pub question_type: QuestionType,
    /// How many responses answered this question.
    pub total_responses: usize,
    /// Share of all responses that answered this question, 0-100.
    pub response_rate: f64,
    /// Per-value distribution; populated for choice-like questions.
    pub answers: Vec<AnswerCount>,
    /// Raw text answers; populated for free-text questions.
    pub text_answers: Vec<String>,
}

/// Aggregated statistics for a survey, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyAnalytics {
    pub survey_id: String,
    pub total_responses: usize,
    /// Share of responses marked complete, 0-100.
    pub completion_rate: f64,
    pub question_analytics: Vec<QuestionAnalytics>,
}
