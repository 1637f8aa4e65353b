//! The survey response state machine: stepping through a published
//! survey's questions, recording answers, validating per step, and
//! finalizing a submission.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;

use crate::{AnswerValue, StepPlan, Survey, SurveyResponse, validate_step};

static NO_ERRORS: Lazy<HashMap<String, String>> = Lazy::new(HashMap::new);

/// The lifecycle of one respondent's pass through a survey.
///
/// Submission state lives in the variant, so a completed response can
/// never coexist with a mid-survey step or a stale error map.
#[derive(Debug, Clone)]
pub enum Phase {
    /// No respondent active; ready to start.
    NotStarted,

    /// An author clicking through the structure. Nothing is recorded and
    /// nothing is validated.
    Preview { step: usize },

    /// A respondent filling out the survey.
    InProgress {
        response: SurveyResponse,
        errors: HashMap<String, String>,
    },

    /// The response has been appended to the catalogue; the confirmation
    /// is on screen until the grace deadline passes.
    Submitting { until: Instant },

    /// The grace period elapsed (or a preview reached its end). Starting
    /// a new response is allowed from here.
    Completed,
}

/// Outcome of a gated navigation or submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Validation passed; moved to the given step.
    Moved(usize),
    /// The response passed full validation and was appended to the
    /// catalogue.
    Submitted,
    /// A preview reached its terminal "finished" display.
    Finished,
    /// Validation failed (the error map is on the session), or there was
    /// nothing to advance.
    Blocked,
}

/// The response state machine plus the response catalogue it appends to.
#[derive(Debug, Clone)]
pub struct ResponseSession {
    phase: Phase,
    responses: Vec<SurveyResponse>,
    grace: Duration,
}

impl Default for ResponseSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSession {
    /// Grace period between submission and reset, matching the interval a
    /// respondent is shown the confirmation.
    pub const DEFAULT_GRACE: Duration = Duration::from_secs(2);

    /// Create an idle session with an empty response catalogue.
    pub fn new() -> Self {
        Self {
            phase: Phase::NotStarted,
            responses: Vec::new(),
            grace: Self::DEFAULT_GRACE,
        }
    }

    /// Override the grace period between submission and reset.
    pub fn with_grace_period(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The in-flight response, if a respondent is mid-survey.
    pub fn current_response(&self) -> Option<&SurveyResponse> {
        match &self.phase {
            Phase::InProgress { response, .. } => Some(response),
            _ => None,
        }
    }

    /// All finalized (and loaded) responses.
    pub fn responses(&self) -> &[SurveyResponse] {
        &self.responses
    }

    /// Whether a submission is inside its grace period.
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    /// The current validation error map; empty outside `InProgress`.
    pub fn validation_errors(&self) -> &HashMap<String, String> {
        match &self.phase {
            Phase::InProgress { errors, .. } => errors,
            _ => &NO_ERRORS,
        }
    }

    /// The last-visited step index.
    pub fn current_step(&self) -> usize {
        match &self.phase {
            Phase::InProgress { response, .. } => response.current_step,
            Phase::Preview { step } => *step,
            _ => 0,
        }
    }

    /// Begin a new response to the given survey, replacing whatever phase
    /// was active. `respondent_id` defaults to `"anonymous"`.
    pub fn start(&mut self, survey_id: &str, respondent_id: Option<&str>) {
        self.phase = Phase::InProgress {
            response: SurveyResponse::new(
                crate::generate_id(),
                survey_id,
                respondent_id.unwrap_or("anonymous"),
            ),
            errors: HashMap::new(),
        };
    }

    /// Begin a preview pass: stepping only, no response record.
    pub fn start_preview(&mut self) {
        self.phase = Phase::Preview { step: 0 };
    }

    /// Record (or overwrite) the answer for a question, stamping
    /// `answered_at` and optimistically clearing that question's
    /// validation error. No-op outside `InProgress`.
    pub fn update_answer(&mut self, question_id: &str, value: AnswerValue) {
        if let Phase::InProgress { response, errors } = &mut self.phase {
            response.record_answer(question_id, value);
            errors.remove(question_id);
        }
    }

    /// Move to the next step without validating. Prefer [`Self::advance`]
    /// for the gated transition.
    pub fn next_step(&mut self) {
        match &mut self.phase {
            Phase::InProgress { response, .. } => response.current_step += 1,
            Phase::Preview { step } => *step += 1,
            _ => {}
        }
    }

    /// Move back one step; no-op at step zero. Whether back-navigation is
    /// offered at all is the presentation layer's gate
    /// (`settings.allow_back_navigation`).
    pub fn previous_step(&mut self) {
        match &mut self.phase {
            Phase::InProgress { response, .. } if response.current_step > 0 => {
                response.current_step -= 1;
            }
            Phase::Preview { step } if *step > 0 => *step -= 1,
            _ => {}
        }
    }

    /// Replace the validation error map. No-op outside `InProgress`.
    pub fn set_validation_errors(&mut self, new_errors: HashMap<String, String>) {
        if let Phase::InProgress { errors, .. } = &mut self.phase {
            *errors = new_errors;
        }
    }

    /// Validate the current step and act on the result: store the errors
    /// and stay put, move forward, or submit when the last step passes.
    /// Previews skip validation and finish at the last step.
    pub fn advance(&mut self, survey: &Survey) -> Advance {
        let plan = StepPlan::for_survey(survey);
        match &mut self.phase {
            Phase::Preview { step } => {
                if plan.is_last_step(*step) {
                    self.phase = Phase::Completed;
                    Advance::Finished
                } else {
                    *step += 1;
                    Advance::Moved(*step)
                }
            }
            Phase::InProgress { response, errors } => {
                let step = response.current_step;
                let step_errors =
                    validate_step(plan.questions_for_step(survey, step), &response.answers);
                if !step_errors.is_empty() {
                    *errors = step_errors;
                    return Advance::Blocked;
                }
                errors.clear();
                if plan.is_last_step(step) {
                    self.submit(survey)
                } else {
                    response.current_step += 1;
                    Advance::Moved(step + 1)
                }
            }
            _ => Advance::Blocked,
        }
    }

    /// Re-validate every question of the survey against the accumulated
    /// answers. On failure the session stays `InProgress` with the error
    /// map surfaced; on success the response is marked complete, appended
    /// to the catalogue, and the grace period begins.
    pub fn submit(&mut self, survey: &Survey) -> Advance {
        if let Phase::Preview { .. } = self.phase {
            self.phase = Phase::Completed;
            return Advance::Finished;
        }

        if let Phase::InProgress { response, errors } = &mut self.phase {
            let failures = validate_step(&survey.questions, &response.answers);
            if !failures.is_empty() {
                *errors = failures;
                return Advance::Blocked;
            }
        } else {
            return Advance::Blocked;
        }

        // Full validation passed; take ownership and finalize.
        let previous = std::mem::replace(
            &mut self.phase,
            Phase::Submitting {
                until: Instant::now() + self.grace,
            },
        );
        if let Phase::InProgress { mut response, .. } = previous {
            response.is_complete = true;
            response.completed_at = Some(chrono::Utc::now());
            tracing::debug!(response = %response.id, survey = %survey.id, "response submitted");
            self.responses.push(response);
        }
        Advance::Submitted
    }

    /// Drive the delayed `Submitting -> Completed` transition. Safe to
    /// call in any phase at any time: a late tick against a phase that has
    /// already moved on is a no-op.
    pub fn tick(&mut self, now: Instant) {
        if let Phase::Submitting { until } = self.phase
            && now >= until
        {
            tracing::debug!("submission grace period elapsed, session ready");
            self.phase = Phase::Completed;
        }
    }

    /// Tear down whatever is in flight and return to idle. An in-progress
    /// response is discarded without being appended.
    pub fn abandon(&mut self) {
        self.phase = Phase::NotStarted;
    }

    /// Replace the response catalogue with responses loaded from storage.
    pub fn load_responses(&mut self, responses: Vec<SurveyResponse>) {
        self.responses = responses;
    }
}
