//! The persistence adapter: whole-collection blobs in a key-value byte
//! store.
//!
//! Storage failures never reach the state machines. A failed save is
//! logged and means "nothing persisted this round"; an absent or corrupt
//! blob loads as an empty collection.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Survey, SurveyResponse, User};

const SURVEYS_KEY: &str = "canvass-surveys";
const RESPONSES_KEY: &str = "canvass-responses";
const USERS_KEY: &str = "canvass-users";
const CURRENT_USER_KEY: &str = "canvass-current-user";

/// A byte store with independent named slots.
///
/// Implementations may fail; the adapter catches and logs every failure
/// at this boundary.
pub trait KeyValueStore {
    /// Read the slot, `None` if absent.
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;

    /// Overwrite the slot.
    fn set(&mut self, key: &str, value: &[u8]) -> anyhow::Result<()>;

    /// Delete the slot; absent slots are fine.
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

/// An in-memory store, mainly for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        self.slots.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.slots.remove(key);
        Ok(())
    }
}

/// A store keeping one file per slot under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        match fs::read(self.path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error).with_context(|| format!("reading slot {key}")),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating store directory {}", self.dir.display()))?;
        fs::write(self.path(key), value).with_context(|| format!("writing slot {key}"))
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error).with_context(|| format!("removing slot {key}")),
        }
    }
}

/// Typed access to the four catalogue slots: surveys, responses, users,
/// and the current-user record.
#[derive(Debug, Clone)]
pub struct CatalogueStore<S> {
    store: S,
}

impl<S: KeyValueStore> CatalogueStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load_surveys(&self) -> Vec<Survey> {
        self.load_slot(SURVEYS_KEY).unwrap_or_default()
    }

    pub fn save_surveys(&mut self, surveys: &[Survey]) {
        self.save_slot(SURVEYS_KEY, &surveys);
    }

    pub fn load_responses(&self) -> Vec<SurveyResponse> {
        self.load_slot(RESPONSES_KEY).unwrap_or_default()
    }

    pub fn save_responses(&mut self, responses: &[SurveyResponse]) {
        self.save_slot(RESPONSES_KEY, &responses);
    }

    pub fn load_users(&self) -> Vec<User> {
        self.load_slot(USERS_KEY).unwrap_or_default()
    }

    pub fn save_users(&mut self, users: &[User]) {
        self.save_slot(USERS_KEY, &users);
    }

    pub fn load_current_user(&self) -> Option<User> {
        self.load_slot(CURRENT_USER_KEY)
    }

    pub fn save_current_user(&mut self, user: &User) {
        self.save_slot(CURRENT_USER_KEY, user);
    }

    pub fn clear_current_user(&mut self) {
        if let Err(error) = self.store.remove(CURRENT_USER_KEY) {
            tracing::warn!(slot = CURRENT_USER_KEY, %error, "failed to clear slot");
        }
    }

    fn load_slot<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.store.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(slot = key, %error, "failed to read slot, treating as empty");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(slot = key, %error, "corrupt slot, treating as empty");
                None
            }
        }
    }

    fn save_slot<T: Serialize>(&mut self, key: &str, value: &T) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!(slot = key, %error, "failed to serialize slot");
                return;
            }
        };
        if let Err(error) = self.store.set(key, &bytes) {
            tracing::warn!(slot = key, %error, "failed to save slot, nothing persisted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Question, QuestionType};

    fn sample_surveys() -> Vec<Survey> {
        let mut first = Survey::new("s1", "First", "A survey");
        first
            .questions
            .push(Question::new("q1", QuestionType::Text, "Name", 0));
        let second = Survey::new("s2", "Second", "");
        vec![first, second]
    }

    #[test]
    fn survey_catalogue_round_trip() {
        let mut catalogues = CatalogueStore::new(MemoryStore::new());
        let surveys = sample_surveys();
        catalogues.save_surveys(&surveys);
        assert_eq!(catalogues.load_surveys(), surveys);
    }

    #[test]
    fn response_catalogue_round_trip() {
        let mut catalogues = CatalogueStore::new(MemoryStore::new());
        let mut response = SurveyResponse::new("r1", "s1", "anonymous");
        response.record_answer("q1", crate::AnswerValue::from("hello"));
        catalogues.save_responses(std::slice::from_ref(&response));
        assert_eq!(catalogues.load_responses(), vec![response]);
    }

    #[test]
    fn absent_slots_load_as_empty() {
        let catalogues = CatalogueStore::new(MemoryStore::new());
        assert!(catalogues.load_surveys().is_empty());
        assert!(catalogues.load_responses().is_empty());
        assert!(catalogues.load_current_user().is_none());
    }

    #[test]
    fn corrupt_slot_loads_as_empty() {
        let mut store = MemoryStore::new();
        store.set(SURVEYS_KEY, b"{not json").unwrap();
        store.set(RESPONSES_KEY, b"[{\"wrong\": \"shape\"}]").unwrap();
        let catalogues = CatalogueStore::new(store);
        assert!(catalogues.load_surveys().is_empty());
        assert!(catalogues.load_responses().is_empty());
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalogues = CatalogueStore::new(FileStore::new(dir.path()));
        let surveys = sample_surveys();
        catalogues.save_surveys(&surveys);

        // A second adapter over the same directory sees the same data.
        let reopened = CatalogueStore::new(FileStore::new(dir.path()));
        assert_eq!(reopened.load_surveys(), surveys);
    }

    #[test]
    fn file_store_tolerates_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(format!("{SURVEYS_KEY}.json")), b"garbage").unwrap();
        let catalogues = CatalogueStore::new(FileStore::new(dir.path()));
        assert!(catalogues.load_surveys().is_empty());
    }

    #[test]
    fn current_user_slot_save_and_clear() {
        let mut catalogues = CatalogueStore::new(MemoryStore::new());
        let user = User::new("u1", "a@b.co", "Ada", "Lovelace");
        catalogues.save_current_user(&user);
        assert_eq!(catalogues.load_current_user(), Some(user));
        catalogues.clear_current_user();
        assert!(catalogues.load_current_user().is_none());
    }
}
