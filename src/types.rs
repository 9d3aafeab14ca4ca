//! Records persisted in browser storage.
//!
//! Field names serialize in camelCase so records written by the existing
//! pages (`fullName`, `userType`, `isActive`, ...) load unchanged.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Account role. Drives dashboard selection and role guards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }

    /// Parse the lowercase wire name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "admin" => Some(Self::Admin),
            "customer" => Some(Self::Customer),
            _ => None,
        }
    }
}

/// One registered account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub full_name: String,
    /// Unique, compared case-sensitively.
    pub email: String,
    /// Pages omit the field when the form left it blank.
    #[serde(default)]
    pub phone: String,
    /// Credential digest, see [`crate::password`].
    #[serde(rename = "password")]
    pub password_digest: String,
    #[serde(rename = "userType")]
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub last_login: Option<OffsetDateTime>,
    pub is_active: bool,
}

/// Registration form payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(rename = "userType")]
    pub role: Role,
}

/// The single remembered login.
///
/// `current_user` is a snapshot taken at login; later edits to the user
/// collection do not flow into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    pub current_user: UserRecord,
    pub session_start: OffsetDateTime,
}

/// Pending password-reset marker written by the reset form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub requested_at: OffsetDateTime,
}
