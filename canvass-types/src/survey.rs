use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Question;

/// Custom theme colors for a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTheme {
    pub primary_color: String,
    pub background_color: String,
    pub text_color: String,
}

/// Display and navigation settings for a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySettings {
    pub allow_anonymous: bool,
    pub show_progress_bar: bool,
    pub randomize_questions: bool,
    /// When set, the response flow paginates one question per step;
    /// otherwise all questions render on a single step.
    pub one_question_per_page: bool,
    pub allow_back_navigation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<CustomTheme>,
}

impl Default for SurveySettings {
    fn default() -> Self {
        Self {
            allow_anonymous: true,
            show_progress_bar: true,
            randomize_questions: false,
            one_question_per_page: false,
            allow_back_navigation: true,
            custom_theme: None,
        }
    }
}

/// A named, ordered collection of questions plus display settings.
///
/// Surveys are created as unpublished drafts; publishing is one-way and
/// stamps `published_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: String,
    pub title: String,
    pub description: String,

    /// Ordered questions. Invariant: `questions[i].order == i` after every
    /// mutation.
    pub questions: Vec<Question>,

    pub settings: SurveySettings,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Survey {
    /// Create a new draft survey with no questions and default settings.
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            questions: Vec::new(),
            settings: SurveySettings::default(),
            created_at: now,
            updated_at: now,
            published_at: None,
            is_published: false,
            tags: None,
        }
    }

    /// Find a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Find a question by id, mutably.
    pub fn question_mut(&mut self, id: &str) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id == id)
    }

    /// Re-establish the ordering invariant: each question's `order` field
    /// is set to its current index.
    pub fn renumber_questions(&mut self) {
        for (index, question) in self.questions.iter_mut().enumerate() {
            question.order = index;
        }
    }

    /// Check the ordering invariant.
    pub fn questions_in_order(&self) -> bool {
        self.questions.iter().enumerate().all(|(i, q)| q.order == i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuestionType;

    #[test]
    fn new_survey_is_draft() {
        let survey = Survey::new("s1", "Feedback", "");
        assert!(!survey.is_published);
        assert!(survey.published_at.is_none());
        assert!(survey.questions.is_empty());
        assert!(survey.settings.allow_anonymous);
        assert!(survey.settings.allow_back_navigation);
        assert!(!survey.settings.one_question_per_page);
    }

    #[test]
    fn renumber_restores_invariant() {
        let mut survey = Survey::new("s1", "Feedback", "");
        survey.questions = vec![
            Question::new("q1", QuestionType::Text, "A", 7),
            Question::new("q2", QuestionType::Text, "B", 3),
        ];
        assert!(!survey.questions_in_order());
        survey.renumber_questions();
        assert!(survey.questions_in_order());
    }
}
