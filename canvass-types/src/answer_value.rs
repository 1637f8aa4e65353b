use serde::{Deserialize, Serialize};

/// A single answer value recorded for a question.
///
/// The shape is keyed by question type: text-like questions (text, textarea,
/// email, phone, date, time, single-choice, dropdown) store `Text`, numeric
/// questions (number, rating, scale) store `Number`, and multi-select
/// questions (multiple-choice, ranking) store `Choices`.
///
/// Serialized untagged, so stored blobs hold a plain string, number, or
/// string array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// A textual value, including machine values of selected options.
    Text(String),

    /// A numeric value (from number, rating, and scale questions).
    Number(f64),

    /// The machine values of all selected options (multi-select questions).
    Choices(Vec<String>),
}

impl AnswerValue {
    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get this value as a list of selected option values.
    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            Self::Choices(values) => Some(values),
            _ => None,
        }
    }

    /// The numeric reading of this value: a `Number`, or a `Text` that
    /// parses fully as a number.
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) if !s.trim().is_empty() => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Check whether this value counts as empty: blank text or an empty
    /// selection. Numbers are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Number(_) => false,
            Self::Choices(values) => values.is_empty(),
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Number(_) => "Number",
            Self::Choices(_) => "Choices",
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        Self::Choices(values)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Choices(values.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness() {
        assert!(AnswerValue::Text(String::new()).is_empty());
        assert!(AnswerValue::Choices(Vec::new()).is_empty());
        assert!(!AnswerValue::from("hi").is_empty());
        assert!(!AnswerValue::Number(0.0).is_empty());
    }

    #[test]
    fn numeric_reading_of_text() {
        assert_eq!(AnswerValue::from(" 42 ").numeric_value(), Some(42.0));
        assert_eq!(AnswerValue::from("42abc").numeric_value(), None);
        assert_eq!(AnswerValue::Number(1.5).numeric_value(), Some(1.5));
        assert_eq!(AnswerValue::from("").numeric_value(), None);
    }

    #[test]
    fn untagged_serde_shapes() {
        let text: AnswerValue = serde_json::from_str("\"satisfied\"").unwrap();
        assert_eq!(text, AnswerValue::from("satisfied"));

        let number: AnswerValue = serde_json::from_str("4").unwrap();
        assert_eq!(number, AnswerValue::Number(4.0));

        let choices: AnswerValue = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(choices, AnswerValue::from(vec!["a", "b"]));

        assert_eq!(
            serde_json::to_string(&AnswerValue::from(vec!["a"])).unwrap(),
            "[\"a\"]"
        );
    }
}
