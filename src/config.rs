//! Session and navigation configuration.
//!
//! Defaults match the deployed pages. `from_env` exists for native test and
//! tooling builds; in the browser no variables are visible and every field
//! keeps its default.

use std::time::Duration;

/// Namespace for every storage key and cookie this crate owns.
pub const DEFAULT_PREFIX: &str = "jhmpro_";
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 30 * 60;
pub const DEFAULT_LOGOUT_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Reserved key prefix (`jhmpro_`).
    pub prefix: String,
    /// Sessions older than this are expired.
    pub session_timeout: Duration,
    /// Pause between the logout notification and the redirect.
    pub logout_delay: Duration,
    /// Login page relative to pages inside `/admin/` or `/Customer/`.
    pub nested_login_url: String,
    /// Login page relative to top-level pages.
    pub root_login_url: String,
    pub admin_dashboard_url: String,
    pub customer_dashboard_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            session_timeout: Duration::from_secs(DEFAULT_SESSION_TIMEOUT_SECS),
            logout_delay: Duration::from_millis(DEFAULT_LOGOUT_DELAY_MS),
            nested_login_url: "../login.html".to_owned(),
            root_login_url: "login.html".to_owned(),
            admin_dashboard_url: "admin/admin-dashboard.html".to_owned(),
            customer_dashboard_url: "Customer/dashboard-customer.html".to_owned(),
        }
    }
}

impl AuthConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `JHMPRO_SESSION_TIMEOUT_SECS`: default 1800
    /// - `JHMPRO_LOGOUT_DELAY_MS`: default 1000
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            session_timeout: Duration::from_secs(env_parse("JHMPRO_SESSION_TIMEOUT_SECS", DEFAULT_SESSION_TIMEOUT_SECS)),
            logout_delay: Duration::from_millis(env_parse("JHMPRO_LOGOUT_DELAY_MS", DEFAULT_LOGOUT_DELAY_MS)),
            ..Self::default()
        }
    }

    /// Full storage key for a name inside the reserved namespace.
    #[must_use]
    pub fn key(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
    T::Err: std::fmt::Display,
{
    let raw = match std::env::var(key) {
        Ok(raw) => raw,
        Err(std::env::VarError::NotPresent) => return default,
        Err(e) => {
            log::warn!("{key} unreadable, using default: {e}");
            return default;
        }
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{key}={raw:?} is not a valid value, using default: {e}");
            default
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
