//! Core types for the canvass crate.
//!
//! This crate provides the foundational types for authoring surveys and
//! collecting responses:
//! - `Survey`, `SurveySettings` - The top-level survey structure
//! - `Question`, `QuestionType`, `QuestionOption` - Individual questions
//! - `AnswerValue`, `SurveyResponse` - Collected answers
//! - `User` - The authentication collaborator's account record
//! - `SurveyAnalytics` - Read-only response summaries

mod answer_value;
pub use answer_value::AnswerValue;

mod question;
pub use question::{
    Condition, ConditionAction, ConditionalLogic, Question, QuestionOption, QuestionType,
    ValidationRule,
};

mod survey;
pub use survey::{CustomTheme, Survey, SurveySettings};

mod response;
pub use response::{QuestionResponse, SurveyResponse};

mod user;
pub use user::User;

mod analytics;
pub use analytics::{AnswerCount, QuestionAnalytics, SurveyAnalytics};

mod error;
pub use error::{AuthError, BuilderError};
