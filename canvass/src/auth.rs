//! The account collaborator: a user table and an optional signed-in user.
//!
//! Credentials are demo-grade. Any password is accepted at login and none
//! is stored.

use chrono::Utc;

use crate::{AuthError, User, generate_id};

/// Tracks registered users and who is currently signed in.
#[derive(Debug, Clone, Default)]
pub struct AuthService {
    users: Vec<User>,
    current: Option<User>,
}

impl AuthService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate the user table and the signed-in user.
    pub fn load(&mut self, users: Vec<User>, current: Option<User>) {
        self.users = users;
        self.current = current;
    }

    /// Register a new account and sign it in.
    ///
    /// Fails if the email is already taken; the table is left unchanged in
    /// that case. The password is not retained.
    pub fn register(
        &mut self,
        email: &str,
        _password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<&User, AuthError> {
        if self.users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailTaken(email.to_string()));
        }
        let user = User::new(generate_id(), email, first_name, last_name);
        self.users.push(user.clone());
        Ok(self.current.insert(user))
    }

    /// Sign in an existing account, stamping its last login time.
    ///
    /// Any password is accepted for a known email.
    pub fn login(&mut self, email: &str, _password: &str) -> Result<&User, AuthError> {
        let Some(user) = self.users.iter_mut().find(|u| u.email == email) else {
            return Err(AuthError::UserNotFound(email.to_string()));
        };
        user.last_login_at = Some(Utc::now());
        let user = user.clone();
        Ok(self.current.insert(user))
    }

    /// Sign out. A no-op when nobody is signed in.
    pub fn logout(&mut self) {
        self.current = None;
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The id responses are attributed to: the signed-in user's id, or
    /// `"anonymous"`.
    pub fn respondent_id(&self) -> String {
        self.current
            .as_ref()
            .map(|u| u.id.clone())
            .unwrap_or_else(|| "anonymous".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_signs_in() {
        let mut auth = AuthService::new();
        let user = auth.register("ada@example.com", "pw", "Ada", "Lovelace").unwrap();
        let id = user.id.clone();
        assert_eq!(auth.current_user().map(|u| u.id.as_str()), Some(id.as_str()));
        assert_eq!(auth.respondent_id(), id);
        assert_eq!(auth.users().len(), 1);
    }

    #[test]
    fn duplicate_email_leaves_table_unchanged() {
        let mut auth = AuthService::new();
        auth.register("ada@example.com", "pw", "Ada", "Lovelace").unwrap();
        auth.logout();

        let error = auth
            .register("ada@example.com", "other", "Imposter", "X")
            .unwrap_err();
        assert!(matches!(error, AuthError::EmailTaken(email) if email == "ada@example.com"));
        assert_eq!(auth.users().len(), 1);
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn login_accepts_any_password_and_stamps_last_login() {
        let mut auth = AuthService::new();
        auth.register("ada@example.com", "pw", "Ada", "Lovelace").unwrap();
        auth.logout();

        let user = auth.login("ada@example.com", "whatever").unwrap();
        assert!(user.last_login_at.is_some());
        assert!(auth.current_user().is_some());
    }

    #[test]
    fn login_unknown_email_fails() {
        let mut auth = AuthService::new();
        let error = auth.login("nobody@example.com", "pw").unwrap_err();
        assert!(matches!(error, AuthError::UserNotFound(email) if email == "nobody@example.com"));
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn anonymous_respondent_when_signed_out() {
        let auth = AuthService::new();
        assert_eq!(auth.respondent_id(), "anonymous");
    }
}
