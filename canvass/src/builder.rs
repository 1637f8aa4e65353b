//! The survey builder state machine: mutation operations over the survey
//! catalogue and the single "currently edited" survey.
//!
//! Operations against a missing id or an absent current survey are silent
//! no-ops; callers that need feedback check preconditions themselves.
//! The ordering invariant `questions[i].order == i` is re-established
//! after every mutation that touches the question list.

use chrono::Utc;

use crate::{
    BuilderError, ConditionalLogic, Question, QuestionOption, QuestionType, Survey,
    SurveySettings, ValidationRule, generate_id,
};

/// Initial fields for a new survey; unset fields fall back to defaults.
#[derive(Debug, Clone, Default)]
pub struct SurveySeed {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A partial update to the current survey. Unset fields are left alone;
/// `settings` replaces the whole settings object (no deep merge).
#[derive(Debug, Clone, Default)]
pub struct SurveyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub settings: Option<SurveySettings>,
    pub tags: Option<Vec<String>>,
}

/// A partial question: seeds a new question when adding (unset fields get
/// defaults) or merges into an existing one when updating.
#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub question_type: Option<QuestionType>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<QuestionOption>>,
    pub validation: Option<ValidationRule>,
    pub conditional_logic: Option<ConditionalLogic>,
}

impl QuestionPatch {
    fn apply(self, question: &mut Question) {
        if let Some(question_type) = self.question_type {
            question.question_type = question_type;
        }
        if let Some(title) = self.title {
            question.title = title;
        }
        if let Some(description) = self.description {
            question.description = Some(description);
        }
        if let Some(required) = self.required {
            question.required = required;
        }
        if let Some(options) = self.options {
            question.options = options;
        }
        if let Some(validation) = self.validation {
            question.validation = validation;
        }
        if let Some(conditional_logic) = self.conditional_logic {
            question.conditional_logic = Some(conditional_logic);
        }
    }
}

/// In-memory survey catalogue plus the currently edited survey.
///
/// The current survey is tracked by id and mutated in place in the
/// catalogue, so updates are never written to a detached copy.
#[derive(Debug, Clone, Default)]
pub struct SurveyBuilder {
    surveys: Vec<Survey>,
    current_id: Option<String>,
    is_editing: bool,
    preview_mode: bool,
}

impl SurveyBuilder {
    /// Create a builder with an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// All surveys in the catalogue.
    pub fn surveys(&self) -> &[Survey] {
        &self.surveys
    }

    /// Find a survey by id.
    pub fn survey(&self, id: &str) -> Option<&Survey> {
        self.surveys.iter().find(|s| s.id == id)
    }

    /// The currently edited survey, if any.
    pub fn current_survey(&self) -> Option<&Survey> {
        let id = self.current_id.as_deref()?;
        self.surveys.iter().find(|s| s.id == id)
    }

    fn current_mut(&mut self) -> Option<&mut Survey> {
        let id = self.current_id.clone()?;
        self.surveys.iter_mut().find(|s| s.id == id)
    }

    /// Whether a survey is open for editing.
    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    /// Whether the builder is in preview mode.
    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }

    /// Flip preview mode.
    pub fn toggle_preview_mode(&mut self) {
        self.preview_mode = !self.preview_mode;
    }

    /// Allocate a new draft survey, append it to the catalogue, and make
    /// it current. Returns the new survey's id.
    pub fn create_survey(&mut self, seed: SurveySeed) -> String {
        let survey = Survey::new(
            generate_id(),
            seed.title.unwrap_or_else(|| "Untitled Survey".to_string()),
            seed.description.unwrap_or_default(),
        );
        let id = survey.id.clone();
        self.current_id = Some(id.clone());
        self.is_editing = true;
        self.surveys.push(survey);
        id
    }

    /// Merge the patch into the current survey and stamp `updated_at`.
    /// No-op without a current survey.
    pub fn update_survey(&mut self, patch: SurveyPatch) {
        let Some(survey) = self.current_mut() else {
            return;
        };
        if let Some(title) = patch.title {
            survey.title = title;
        }
        if let Some(description) = patch.description {
            survey.description = description;
        }
        if let Some(settings) = patch.settings {
            survey.settings = settings;
        }
        if let Some(tags) = patch.tags {
            survey.tags = Some(tags);
        }
        survey.updated_at = Utc::now();
    }

    /// Append a new question to the current survey; unset patch fields get
    /// defaults (type text, title "New Question", not required). No-op
    /// without a current survey.
    pub fn add_question(&mut self, patch: QuestionPatch) {
        let Some(survey) = self.current_mut() else {
            return;
        };
        let mut question = Question::new(
            generate_id(),
            QuestionType::default(),
            "New Question",
            survey.questions.len(),
        );
        patch.apply(&mut question);
        survey.questions.push(question);
    }

    /// Merge the patch into the matching question. No-op if the id is not
    /// found in the current survey.
    pub fn update_question(&mut self, id: &str, patch: QuestionPatch) {
        let Some(survey) = self.current_mut() else {
            return;
        };
        if let Some(question) = survey.question_mut(id) {
            patch.apply(question);
        }
    }

    /// Remove the matching question and renumber the remainder.
    pub fn delete_question(&mut self, id: &str) {
        let Some(survey) = self.current_mut() else {
            return;
        };
        survey.questions.retain(|q| q.id != id);
        survey.renumber_questions();
    }

    /// Move the question at `from` to position `to`, renumbering all
    /// questions. Out-of-range indices are rejected rather than clamped.
    pub fn reorder_questions(&mut self, from: usize, to: usize) -> Result<(), BuilderError> {
        let Some(survey) = self.current_mut() else {
            return Ok(());
        };
        let len = survey.questions.len();
        if from >= len || to >= len {
            return Err(BuilderError::ReorderOutOfRange { from, to, len });
        }
        let question = survey.questions.remove(from);
        survey.questions.insert(to, question);
        survey.renumber_questions();
        Ok(())
    }

    /// Make the matching catalogue entry the current survey. No-op (current
    /// survey unchanged) if the id is not found.
    pub fn load_survey(&mut self, id: &str) {
        if self.surveys.iter().any(|s| s.id == id) {
            self.current_id = Some(id.to_string());
            self.is_editing = true;
        }
    }

    /// Remove the matching survey from the catalogue; clears the current
    /// pointer if it was the one being edited.
    pub fn delete_survey(&mut self, id: &str) {
        self.surveys.retain(|s| s.id != id);
        if self.current_id.as_deref() == Some(id) {
            self.current_id = None;
            self.is_editing = false;
            tracing::debug!(survey = id, "deleted the survey being edited");
        }
    }

    /// Deep-copy the matching survey: new survey and question ids, title
    /// suffixed with " (Copy)", reset to an unpublished draft with fresh
    /// timestamps. The current pointer is unchanged.
    pub fn duplicate_survey(&mut self, id: &str) -> Option<&Survey> {
        let original = self.surveys.iter().find(|s| s.id == id)?;
        let now = Utc::now();
        let mut copy = original.clone();
        copy.id = generate_id();
        copy.title = format!("{} (Copy)", original.title);
        copy.is_published = false;
        copy.published_at = None;
        copy.created_at = now;
        copy.updated_at = now;
        for question in &mut copy.questions {
            // Options keep their original ids; they are treated as
            // immutable templates on duplication.
            question.id = generate_id();
        }
        self.surveys.push(copy);
        self.surveys.last()
    }

    /// Publish the current survey: one-way, stamps `published_at`. No-op
    /// without a current survey.
    pub fn publish_survey(&mut self) {
        let Some(survey) = self.current_mut() else {
            return;
        };
        survey.is_published = true;
        survey.published_at = Some(Utc::now());
        tracing::debug!(survey = %survey.id, "survey published");
    }

    /// Replace the catalogue with surveys loaded from storage. The current
    /// pointer is kept only if its survey is still present.
    pub fn load_surveys(&mut self, surveys: Vec<Survey>) {
        self.surveys = surveys;
        if let Some(id) = &self.current_id
            && !self.surveys.iter().any(|s| &s.id == id)
        {
            self.current_id = None;
            self.is_editing = false;
        }
    }
}
