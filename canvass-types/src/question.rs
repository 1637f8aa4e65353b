use serde::{Deserialize, Serialize};

use crate::AnswerValue;

/// The type of a question, from the fixed catalogue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    /// Single-line text input.
    #[default]
    Text,
    /// Multi-line text input.
    Textarea,
    /// Numeric input.
    Number,
    /// Email address input.
    Email,
    /// Phone number input.
    Phone,
    /// Pick exactly one option.
    SingleChoice,
    /// Pick any number of options.
    MultipleChoice,
    /// Pick one option from a drop-down.
    Dropdown,
    /// Star-style rating.
    Rating,
    /// Numeric scale (e.g. 1-10).
    Scale,
    /// Date picker.
    Date,
    /// Time picker.
    Time,
    /// File upload placeholder (no upload handling in this core).
    FileUpload,
    /// Matrix grid of sub-questions.
    Matrix,
    /// Order the options by preference.
    Ranking,
}

impl QuestionType {
    /// Whether questions of this type carry an option list.
    pub fn has_options(self) -> bool {
        matches!(
            self,
            Self::SingleChoice | Self::MultipleChoice | Self::Dropdown | Self::Ranking
        )
    }

    /// Whether answers to this type are numeric.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Rating | Self::Scale)
    }
}

/// Optional validation rules attached to a question.
///
/// All fields are optional; unset rules are not enforced. The `required`
/// flag lives on the question itself, `ValidationRule::required` is kept
/// for model completeness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regular expression the textual answer must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Overrides the default message for required/pattern failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

/// Comparison operator for conditional display logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
}

/// What happens to the question when its condition matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionAction {
    Show,
    Hide,
    Require,
}

/// Conditional display logic, declared on the model but evaluated by the
/// presentation layer, not by this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalLogic {
    /// Id of the question this condition depends on.
    pub depends_on: String,
    pub condition: Condition,
    /// The value the dependency's answer is compared against.
    pub value: AnswerValue,
    pub action: ConditionAction,
}

/// One selectable option of a choice-like question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: String,
    /// Display text.
    pub label: String,
    /// Machine value; derived from the label by convention, but may be set
    /// independently.
    pub value: String,
    /// Position within the question's option list.
    pub order: usize,
}

impl QuestionOption {
    /// Create an option, deriving the machine value from the label.
    pub fn new(id: impl Into<String>, label: impl Into<String>, order: usize) -> Self {
        let label = label.into();
        let value = Self::value_for_label(&label);
        Self {
            id: id.into(),
            label,
            value,
            order,
        }
    }

    /// Rename the option, re-deriving the machine value by convention.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.value = Self::value_for_label(&self.label);
    }

    /// The conventional machine value for a label: lowercased, with every
    /// whitespace run replaced by a hyphen.
    pub fn value_for_label(label: &str) -> String {
        let mut value = String::with_capacity(label.len());
        let mut in_whitespace = false;
        for c in label.chars() {
            if c.is_whitespace() {
                if !in_whitespace {
                    value.push('-');
                    in_whitespace = true;
                }
            } else {
                value.extend(c.to_lowercase());
                in_whitespace = false;
            }
        }
        value
    }
}

/// A single question in a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    /// The prompt text shown to the respondent.
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether an answer must be present for the step to pass validation.
    pub required: bool,

    /// Options; populated only for choice-like types.
    #[serde(default)]
    pub options: Vec<QuestionOption>,

    #[serde(default)]
    pub validation: ValidationRule,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_logic: Option<ConditionalLogic>,

    /// Zero-based position within the survey; always matches the index.
    pub order: usize,
}

impl Question {
    /// Create a new question with defaults (not required, no options, no
    /// validation rules).
    pub fn new(
        id: impl Into<String>,
        question_type: QuestionType,
        title: impl Into<String>,
        order: usize,
    ) -> Self {
        Self {
            id: id.into(),
            question_type,
            title: title.into(),
            description: None,
            required: false,
            options: Vec::new(),
            validation: ValidationRule::default(),
            conditional_logic: None,
            order,
        }
    }

    /// Mark the question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach validation rules.
    pub fn with_validation(mut self, validation: ValidationRule) -> Self {
        self.validation = validation;
        self
    }

    /// Attach options.
    pub fn with_options(mut self, options: Vec<QuestionOption>) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_follows_label() {
        let mut option = QuestionOption::new("opt-1", "Very Satisfied", 0);
        assert_eq!(option.value, "very-satisfied");

        option.set_label("Not  At\tAll");
        assert_eq!(option.value, "not-at-all");
    }

    #[test]
    fn value_may_be_set_independently() {
        let mut option = QuestionOption::new("opt-1", "Yes", 0);
        option.value = "custom".to_string();
        assert_eq!(option.label, "Yes");
        assert_eq!(option.value, "custom");
    }

    #[test]
    fn question_type_serde_is_kebab_case() {
        assert_eq!(
            serde_json::to_string(&QuestionType::SingleChoice).unwrap(),
            "\"single-choice\""
        );
        let parsed: QuestionType = serde_json::from_str("\"file-upload\"").unwrap();
        assert_eq!(parsed, QuestionType::FileUpload);
    }

    #[test]
    fn option_bearing_types() {
        assert!(QuestionType::Dropdown.has_options());
        assert!(QuestionType::Ranking.has_options());
        assert!(!QuestionType::Email.has_options());
    }
}
