//! The validation engine: pure functions mapping a question and a
//! candidate answer to at most one error message.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{AnswerValue, Question, QuestionResponse, QuestionType};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Optional leading `+`, then 1-16 digits with no leading zero.
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").unwrap());

/// Validate a single answer against a question's rules.
///
/// Rule order matters and the first violated rule wins:
/// 1. Required check. An empty answer to a non-required question passes
///    immediately, skipping all format checks.
/// 2. Length and pattern rules, for textual answers.
/// 3. Numeric range rules, for numbers and text that parses as a number.
/// 4. Type-specific shape checks (email, phone).
pub fn validate_answer(question: &Question, answer: Option<&AnswerValue>) -> Result<(), String> {
    let rules = &question.validation;

    let Some(answer) = answer.filter(|a| !a.is_empty()) else {
        if question.required {
            return Err(rules
                .custom_message
                .clone()
                .unwrap_or_else(|| "This field is required".to_string()));
        }
        return Ok(());
    };

    if let Some(text) = answer.as_text() {
        if let Some(min) = rules.min_length
            && text.chars().count() < min
        {
            return Err(format!("Minimum length is {min} characters"));
        }

        if let Some(max) = rules.max_length
            && text.chars().count() > max
        {
            return Err(format!("Maximum length is {max} characters"));
        }

        if let Some(pattern) = &rules.pattern {
            match Regex::new(pattern) {
                Ok(regex) => {
                    if !regex.is_match(text) {
                        return Err(rules
                            .custom_message
                            .clone()
                            .unwrap_or_else(|| "Invalid format".to_string()));
                    }
                }
                Err(error) => {
                    // An unparseable author-supplied pattern cannot fail the
                    // respondent; the rule is skipped.
                    tracing::warn!(question = %question.id, %error, "invalid validation pattern");
                }
            }
        }
    }

    if let Some(number) = answer.numeric_value() {
        if let Some(min) = rules.min
            && number < min
        {
            return Err(format!("Minimum value is {min}"));
        }

        if let Some(max) = rules.max
            && number > max
        {
            return Err(format!("Maximum value is {max}"));
        }
    }

    if question.question_type == QuestionType::Email
        && let Some(text) = answer.as_text()
        && !EMAIL.is_match(text)
    {
        return Err("Please enter a valid email address".to_string());
    }

    if question.question_type == QuestionType::Phone
        && let Some(text) = answer.as_text()
    {
        let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if !PHONE.is_match(&stripped) {
            return Err("Please enter a valid phone number".to_string());
        }
    }

    Ok(())
}

/// Validate every question in a step against the current answers,
/// collecting only failures keyed by question id.
///
/// Passing questions are absent from the result; an empty map means the
/// step passes.
pub fn validate_step(
    questions: &[Question],
    answers: &HashMap<String, QuestionResponse>,
) -> HashMap<String, String> {
    let mut errors = HashMap::new();

    for question in questions {
        let answer = answers.get(&question.id).map(|a| &a.value);
        if let Err(message) = validate_answer(question, answer) {
            errors.insert(question.id.clone(), message);
        }
    }

    errors
}
