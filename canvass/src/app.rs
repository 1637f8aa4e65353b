//! The composition root: one value owning the builder, the response
//! session, the account service, and the catalogue store behind them.
//!
//! Every mutation flushes the affected catalogue immediately, so the
//! store always reflects the last completed operation.

use std::time::Instant;

use crate::{
    Advance, AnswerValue, AuthError, AuthService, BuilderError, CatalogueStore, KeyValueStore,
    QuestionPatch, ResponseSession, Survey, SurveyAnalytics, SurveyBuilder, SurveyPatch,
    SurveySeed, User, survey_analytics,
};

/// The whole application state over one key-value store.
#[derive(Debug)]
pub struct App<S> {
    catalogues: CatalogueStore<S>,
    builder: SurveyBuilder,
    session: ResponseSession,
    auth: AuthService,
}

impl<S: KeyValueStore> App<S> {
    /// Build the application from whatever the store holds. Absent or
    /// unreadable slots start empty.
    pub fn load(store: S) -> Self {
        let catalogues = CatalogueStore::new(store);
        let mut builder = SurveyBuilder::new();
        builder.load_surveys(catalogues.load_surveys());
        let mut session = ResponseSession::new();
        session.load_responses(catalogues.load_responses());
        let mut auth = AuthService::new();
        auth.load(catalogues.load_users(), catalogues.load_current_user());
        Self {
            catalogues,
            builder,
            session,
            auth,
        }
    }

    pub fn builder(&self) -> &SurveyBuilder {
        &self.builder
    }

    pub fn session(&self) -> &ResponseSession {
        &self.session
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    fn flush_surveys(&mut self) {
        self.catalogues.save_surveys(self.builder.surveys());
    }

    fn flush_responses(&mut self) {
        self.catalogues.save_responses(self.session.responses());
    }

    fn flush_users(&mut self) {
        self.catalogues.save_users(self.auth.users());
        match self.auth.current_user() {
            Some(user) => {
                let user = user.clone();
                self.catalogues.save_current_user(&user);
            }
            None => self.catalogues.clear_current_user(),
        }
    }

    // Authoring.

    /// Create a draft survey and make it current. Returns its id.
    pub fn create_survey(&mut self, seed: SurveySeed) -> String {
        let id = self.builder.create_survey(seed);
        self.flush_surveys();
        id
    }

    pub fn update_survey(&mut self, patch: SurveyPatch) {
        self.builder.update_survey(patch);
        self.flush_surveys();
    }

    pub fn add_question(&mut self, patch: QuestionPatch) {
        self.builder.add_question(patch);
        self.flush_surveys();
    }

    pub fn update_question(&mut self, id: &str, patch: QuestionPatch) {
        self.builder.update_question(id, patch);
        self.flush_surveys();
    }

    pub fn delete_question(&mut self, id: &str) {
        self.builder.delete_question(id);
        self.flush_surveys();
    }

    pub fn reorder_questions(&mut self, from: usize, to: usize) -> Result<(), BuilderError> {
        let result = self.builder.reorder_questions(from, to);
        self.flush_surveys();
        result
    }

    pub fn load_survey(&mut self, id: &str) {
        self.builder.load_survey(id);
    }

    pub fn delete_survey(&mut self, id: &str) {
        self.builder.delete_survey(id);
        self.flush_surveys();
    }

    /// Duplicate the matching survey, returning the copy's id.
    pub fn duplicate_survey(&mut self, id: &str) -> Option<String> {
        let copy_id = self.builder.duplicate_survey(id).map(|s| s.id.clone());
        self.flush_surveys();
        copy_id
    }

    pub fn publish_survey(&mut self) {
        self.builder.publish_survey();
        self.flush_surveys();
    }

    pub fn toggle_preview_mode(&mut self) {
        self.builder.toggle_preview_mode();
    }

    // Responding.

    /// Begin a response to the given survey, attributed to the signed-in
    /// user or `"anonymous"`.
    pub fn start_response(&mut self, survey_id: &str) {
        let respondent = self.auth.respondent_id();
        self.session.start(survey_id, Some(&respondent));
    }

    pub fn start_preview(&mut self) {
        self.session.start_preview();
    }

    pub fn update_answer(&mut self, question_id: &str, value: AnswerValue) {
        self.session.update_answer(question_id, value);
    }

    pub fn previous_step(&mut self) {
        self.session.previous_step();
    }

    /// Validate the current step and advance, submitting at the last step.
    /// Returns `Blocked` when no survey matches the active response.
    pub fn advance(&mut self) -> Advance {
        let Some(survey) = self.active_survey() else {
            return Advance::Blocked;
        };
        let outcome = self.session.advance(&survey);
        if outcome == Advance::Submitted {
            self.flush_responses();
        }
        outcome
    }

    /// Validate the whole survey and finalize the response.
    pub fn submit(&mut self) -> Advance {
        let Some(survey) = self.active_survey() else {
            return Advance::Blocked;
        };
        let outcome = self.session.submit(&survey);
        if outcome == Advance::Submitted {
            self.flush_responses();
        }
        outcome
    }

    /// Drive the post-submission reset.
    pub fn tick(&mut self, now: Instant) {
        self.session.tick(now);
    }

    pub fn abandon_response(&mut self) {
        self.session.abandon();
    }

    fn active_survey(&self) -> Option<Survey> {
        let id = match self.session.current_response() {
            Some(response) => response.survey_id.clone(),
            None => self.builder.current_survey()?.id.clone(),
        };
        self.builder.survey(&id).cloned()
    }

    // Accounts.

    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, AuthError> {
        let user = self
            .auth
            .register(email, password, first_name, last_name)?
            .clone();
        self.flush_users();
        Ok(user)
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.auth.login(email, password)?.clone();
        self.flush_users();
        Ok(user)
    }

    pub fn logout(&mut self) {
        self.auth.logout();
        self.flush_users();
    }

    // Reporting.

    /// Aggregate statistics for the matching survey over all stored
    /// responses.
    pub fn analytics_for(&self, survey_id: &str) -> Option<SurveyAnalytics> {
        let survey = self.builder.survey(survey_id)?;
        Some(survey_analytics(survey, self.session.responses()))
    }
}
