//! # canvass
//!
//! Client-side survey authoring and response collection. Surveys are built
//! from a fixed catalogue of question types, published, and filled out
//! through a multi-step response flow; a lightweight aggregator derives
//! response statistics. All state is in-memory and persisted to a
//! key-value byte store.
//!
//! The crate is presentation-agnostic: renderers consume the state
//! machines' outputs (current survey, current step, validation error map,
//! current response) and send user intents back as the only inbound calls.
//!
//! ## Usage
//!
//! ```rust
//! use canvass::{App, MemoryStore, QuestionPatch, SurveySeed};
//!
//! let mut app = App::load(MemoryStore::new());
//! app.create_survey(SurveySeed {
//!     title: Some("Customer Feedback".into()),
//!     ..Default::default()
//! });
//! app.add_question(QuestionPatch {
//!     title: Some("How did we do?".into()),
//!     required: Some(true),
//!     ..Default::default()
//! });
//! app.publish_survey();
//! ```

// Re-export all types from canvass-types
pub use canvass_types::*;

mod id;
pub use id::generate_id;

mod validation;
pub use validation::{validate_answer, validate_step};

mod step;
pub use step::StepPlan;

mod builder;
pub use builder::{QuestionPatch, SurveyBuilder, SurveyPatch, SurveySeed};

mod session;
pub use session::{Advance, Phase, ResponseSession};

mod storage;
pub use storage::{CatalogueStore, FileStore, KeyValueStore, MemoryStore};

mod analytics;
pub use analytics::survey_analytics;

mod auth;
pub use auth::AuthService;

mod app;
pub use app::App;
