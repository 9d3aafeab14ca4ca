//! User and session persistence under the reserved key namespace.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page reads and writes the same `localStorage` keys, so this module is
//! the single owner of key names and encodings:
//!
//! - `jhmpro_users`: JSON array of [`UserRecord`]
//! - `jhmpro_current_user`: JSON snapshot of the logged-in user
//! - `jhmpro_session_start`: epoch milliseconds as a decimal string
//! - `jhmpro_reset_request`: JSON [`ResetRequest`]
//! - `jhmpro_temp_<name>`: scratch values dropped on logout
//!
//! ERROR HANDLING
//! ==============
//! Absent and malformed values both read as "no data", with one exception:
//! the user collection. A single account record this crate cannot read is
//! kept as raw JSON and written back untouched, and a collection that is not
//! a JSON array at all reads as `None` so callers refuse to overwrite it.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::config::AuthConfig;
use crate::storage::{KeyValueStore, load_json, save_json};
use crate::types::{ResetRequest, SessionRecord, UserRecord};

pub const USERS_KEY: &str = "users";
pub const CURRENT_USER_KEY: &str = "current_user";
pub const SESSION_START_KEY: &str = "session_start";
pub const RESET_REQUEST_KEY: &str = "reset_request";
pub const TEMP_KEY_PREFIX: &str = "temp_";

#[derive(Clone)]
pub struct Store {
    backend: Rc<dyn KeyValueStore>,
    prefix: String,
}

impl Store {
    pub fn new(backend: Rc<dyn KeyValueStore>, config: &AuthConfig) -> Self {
        Self { backend, prefix: config.prefix.clone() }
    }

    /// Underlying storage area.
    #[must_use]
    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    /// Full key for a name in the reserved namespace.
    #[must_use]
    pub fn key(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    /// Prefix shared by all scratch keys (`jhmpro_temp_`).
    #[must_use]
    pub fn temp_prefix(&self) -> String {
        self.key(TEMP_KEY_PREFIX)
    }

    // =========================================================================
    // USERS
    // =========================================================================

    /// Readable registered users; empty when absent or unreadable.
    #[must_use]
    pub fn load_users(&self) -> Vec<UserRecord> {
        match self.load_user_collection() {
            Some(collection) => collection.into_users(),
            None => Vec::new(),
        }
    }

    /// The stored collection, or `None` when the key holds something other
    /// than a JSON array. An absent key is an empty collection.
    #[must_use]
    pub fn load_user_collection(&self) -> Option<UserCollection> {
        let Some(raw) = self.backend.get_item(&self.key(USERS_KEY)) else {
            return Some(UserCollection::default());
        };
        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(values) => Some(UserCollection::from_values(values)),
            Err(e) => {
                log::warn!("user collection unreadable, leaving it untouched: {e}");
                None
            }
        }
    }

    pub fn save_user_collection(&self, collection: &UserCollection) {
        self.save(USERS_KEY, &collection.entries);
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    /// User snapshot of the remembered session, if any.
    #[must_use]
    pub fn load_current_user(&self) -> Option<UserRecord> {
        self.load(CURRENT_USER_KEY)
    }

    /// Session start timestamp, if present and well formed.
    #[must_use]
    pub fn load_session_start(&self) -> Option<OffsetDateTime> {
        let raw = self.backend.get_item(&self.key(SESSION_START_KEY))?;
        let Ok(millis) = raw.trim().parse::<i64>() else {
            log::warn!("ignoring malformed session start: {raw:?}");
            return None;
        };
        match OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000) {
            Ok(at) => Some(at),
            Err(e) => {
                log::warn!("ignoring out-of-range session start {millis}: {e}");
                None
            }
        }
    }

    /// The remembered session; requires both the snapshot and the start time.
    #[must_use]
    pub fn load_current_session(&self) -> Option<SessionRecord> {
        let current_user = self.load_current_user()?;
        let session_start = self.load_session_start()?;
        Some(SessionRecord { current_user, session_start })
    }

    pub fn save_current_session(&self, session: &SessionRecord) {
        self.save(CURRENT_USER_KEY, &session.current_user);
        self.backend.set_item(
            &self.key(SESSION_START_KEY),
            &unix_millis(session.session_start).to_string(),
        );
    }

    pub fn clear_current_session(&self) {
        self.backend.remove_item(&self.key(CURRENT_USER_KEY));
        self.backend.remove_item(&self.key(SESSION_START_KEY));
    }

    // =========================================================================
    // RESET REQUEST + SCRATCH
    // =========================================================================

    #[must_use]
    pub fn load_reset_request(&self) -> Option<ResetRequest> {
        self.load(RESET_REQUEST_KEY)
    }

    pub fn save_reset_request(&self, request: &ResetRequest) {
        self.save(RESET_REQUEST_KEY, request);
    }

    pub fn clear_reset_request(&self) {
        self.backend.remove_item(&self.key(RESET_REQUEST_KEY));
    }

    /// Scratch value under `jhmpro_temp_<name>`.
    #[must_use]
    pub fn load_temp<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        load_json(self.backend(), &format!("{}{name}", self.temp_prefix()))
    }

    pub fn save_temp<T: Serialize>(&self, name: &str, value: &T) {
        save_json(self.backend(), &format!("{}{name}", self.temp_prefix()), value);
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        load_json(self.backend(), &self.key(name))
    }

    fn save<T: Serialize + ?Sized>(&self, name: &str, value: &T) {
        save_json(self.backend(), &self.key(name), &value);
    }
}

// =============================================================================
// USER COLLECTION
// =============================================================================

/// One element of the stored user array.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
enum UserEntry {
    Known(UserRecord),
    /// Written by another script in a shape [`UserRecord`] rejects.
    Unrecognised(Value),
}

/// Stored accounts in their original order, including records that could
/// not be decoded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserCollection {
    entries: Vec<UserEntry>,
}

impl UserCollection {
    fn from_values(values: Vec<Value>) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match UserRecord::deserialize(&value) {
                Ok(user) => UserEntry::Known(user),
                Err(e) => {
                    log::warn!("keeping unrecognised user record at index {index}: {e}");
                    UserEntry::Unrecognised(value)
                }
            })
            .collect();
        Self { entries }
    }

    /// True only when no record of any shape is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn unrecognised_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, UserEntry::Unrecognised(_)))
            .count()
    }

    pub fn users(&self) -> impl Iterator<Item = &UserRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            UserEntry::Known(user) => Some(user),
            UserEntry::Unrecognised(_) => None,
        })
    }

    pub fn users_mut(&mut self) -> impl Iterator<Item = &mut UserRecord> {
        self.entries.iter_mut().filter_map(|entry| match entry {
            UserEntry::Known(user) => Some(user),
            UserEntry::Unrecognised(_) => None,
        })
    }

    /// Whether any record, readable or not, carries exactly `email`.
    #[must_use]
    pub fn contains_email(&self, email: &str) -> bool {
        self.entries.iter().any(|entry| match entry {
            UserEntry::Known(user) => user.email == email,
            UserEntry::Unrecognised(value) => value.get("email").and_then(Value::as_str) == Some(email),
        })
    }

    pub fn push(&mut self, user: UserRecord) {
        self.entries.push(UserEntry::Known(user));
    }

    #[must_use]
    pub fn into_users(self) -> Vec<UserRecord> {
        self.entries
            .into_iter()
            .filter_map(|entry| match entry {
                UserEntry::Known(user) => Some(user),
                UserEntry::Unrecognised(_) => None,
            })
            .collect()
    }
}

impl From<Vec<UserRecord>> for UserCollection {
    fn from(users: Vec<UserRecord>) -> Self {
        Self { entries: users.into_iter().map(UserEntry::Known).collect() }
    }
}

/// Milliseconds since the Unix epoch, the format the pages already use.
#[must_use]
pub fn unix_millis(at: OffsetDateTime) -> i64 {
    let millis = at.unix_timestamp_nanos() / 1_000_000;
    i64::try_from(millis).unwrap_or(i64::MAX)
}
