//! Account and session lifecycle.
//!
//! ARCHITECTURE
//! ============
//! `SessionManager` is constructed by the caller with its storage areas, page
//! environment, and clock; nothing is global. Each operation re-reads storage
//! so pages in other tabs see the latest writes, and no state is cached.
//!
//! TRADE-OFFS
//! ==========
//! Storage has no transactions. Two tabs logging in at once can each rewrite
//! the user collection and one `lastLogin` update is lost. That is accepted.
//! Expiry is checked when asked, never by a timer.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::rc::Rc;

use time::Duration;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::env::{Clock, Environment, NavigateMode, NotifyLevel};
use crate::error::AuthError;
use crate::guard::RouteGuard;
use crate::nav::login_url_for;
use crate::password::{hash_password, needs_upgrade, verify_password};
use crate::storage::{KeyValueStore, remove_prefixed};
use crate::store::{Store, UserCollection};
use crate::types::{RegisterInput, ResetRequest, Role, SessionRecord, UserRecord};

pub const LOGOUT_MESSAGE: &str = "Anda telah berhasil logout";
pub const DEFAULT_FORCE_LOGOUT_REASON: &str = "Session ended";
pub const SESSION_EXPIRED_MESSAGE: &str = "Sesi Anda telah berakhir. Silakan login kembali.";

/// Where the remembered session stands relative to the timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    Active { remaining: Duration },
    Expired { overdue: Duration },
}

pub struct SessionManager {
    store: Store,
    session_storage: Rc<dyn KeyValueStore>,
    env: Rc<dyn Environment>,
    clock: Rc<dyn Clock>,
    config: AuthConfig,
}

impl SessionManager {
    pub fn new(
        local_storage: Rc<dyn KeyValueStore>,
        session_storage: Rc<dyn KeyValueStore>,
        env: Rc<dyn Environment>,
        clock: Rc<dyn Clock>,
        config: AuthConfig,
    ) -> Self {
        Self { store: Store::new(local_storage, &config), session_storage, env, clock, config }
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The per-tab area logout clears alongside the local one.
    #[must_use]
    pub fn session_storage(&self) -> &dyn KeyValueStore {
        self.session_storage.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Guards sharing this manager's storage and environment.
    #[must_use]
    pub fn guard(&self) -> RouteGuard {
        RouteGuard::new(self.store.clone(), self.env.clone(), self.config.clone())
    }

    // =========================================================================
    // ACCOUNTS
    // =========================================================================

    /// Create an account. Emails are unique by exact match.
    pub fn register(&self, input: RegisterInput) -> Result<UserRecord, AuthError> {
        let mut users = self
            .store
            .load_user_collection()
            .ok_or(AuthError::AccountsUnreadable)?;
        if users.contains_email(&input.email) {
            return Err(AuthError::DuplicateEmail);
        }

        let user = UserRecord {
            id: Uuid::new_v4().to_string(),
            full_name: input.full_name,
            email: input.email,
            phone: input.phone,
            password_digest: hash_password(&input.password),
            role: input.role,
            created_at: self.clock.now(),
            last_login: None,
            is_active: true,
        };
        users.push(user.clone());
        self.store.save_user_collection(&users);
        log::info!("registered {} account {}", user.role.as_str(), user.id);
        Ok(user)
    }

    #[must_use]
    pub fn get_user_by_email(&self, email: &str) -> Option<UserRecord> {
        self.store
            .load_users()
            .into_iter()
            .find(|u| u.email == email)
    }

    /// Seed the demo admin and customer when no accounts exist.
    ///
    /// Records of any shape count as existing, and an unreadable collection
    /// is never replaced. Returns true if anything was written.
    pub fn initialize_demo_users(&self) -> bool {
        match self.store.load_user_collection() {
            Some(users) if users.is_empty() => {}
            Some(_) => return false,
            None => {
                log::warn!("not seeding demo accounts over an unreadable user collection");
                return false;
            }
        }
        let now = self.clock.now();
        let seed = |id: &str, full_name: &str, email: &str, phone: &str, password: &str, role: Role| UserRecord {
            id: id.to_owned(),
            full_name: full_name.to_owned(),
            email: email.to_owned(),
            phone: phone.to_owned(),
            password_digest: hash_password(password),
            role,
            created_at: now,
            last_login: None,
            is_active: true,
        };
        self.store.save_user_collection(&UserCollection::from(vec![
            seed("1", "Admin JHMPRO", "admin@jhmpro.com", "08123456789", "admin123", Role::Admin),
            seed("2", "Customer Demo", "customer@demo.com", "08987654321", "customer123", Role::Customer),
        ]));
        log::info!("seeded demo accounts");
        true
    }

    /// Record a password-reset request for an existing account.
    pub fn request_password_reset(&self, email: &str) -> Result<ResetRequest, AuthError> {
        if self.get_user_by_email(email).is_none() {
            return Err(AuthError::UserNotFound);
        }
        let request = ResetRequest { email: email.to_owned(), requested_at: self.clock.now() };
        self.store.save_reset_request(&request);
        Ok(request)
    }

    // =========================================================================
    // LOGIN / LOGOUT
    // =========================================================================

    /// Verify credentials against the active account with `email`.
    ///
    /// Only `remember` writes a session; the returned record is the same
    /// either way.
    pub fn login(&self, email: &str, password: &str, remember: bool) -> Result<UserRecord, AuthError> {
        let mut users = self
            .store
            .load_user_collection()
            .ok_or(AuthError::AccountsUnreadable)?;
        let user = users
            .users_mut()
            .find(|u| u.email == email && u.is_active)
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(password, &user.password_digest) {
            log::info!("login rejected for account {}", user.id);
            return Err(AuthError::InvalidCredential);
        }
        if needs_upgrade(&user.password_digest) {
            user.password_digest = hash_password(password);
        }

        let now = self.clock.now();
        user.last_login = Some(now);
        let user = user.clone();
        self.store.save_user_collection(&users);

        if remember {
            self.store.save_current_session(&SessionRecord {
                current_user: user.clone(),
                session_start: now,
            });
        }
        log::info!("login succeeded for account {} (remember={remember})", user.id);
        Ok(user)
    }

    /// End the session, keep the accounts, and leave for the login page after
    /// the configured delay.
    pub fn logout(&self) {
        self.store.clear_current_session();
        self.store.clear_reset_request();
        remove_prefixed(self.store.backend(), &self.store.temp_prefix());
        remove_prefixed(self.session_storage.as_ref(), &self.config.prefix);
        self.env.clear_cookies_by_prefix(&self.config.prefix);
        self.env.notify(LOGOUT_MESSAGE, NotifyLevel::Info);

        let target = login_url_for(&self.env.current_path(), &self.config).to_owned();
        log::info!("logged out, redirecting to {target}");
        self.env
            .navigate_after(&target, NavigateMode::Replace, self.config.logout_delay);
    }

    /// Wipe every reserved key in both storage areas, accounts included, and
    /// leave immediately.
    pub fn force_logout(&self, reason: &str) {
        let removed = remove_prefixed(self.store.backend(), &self.config.prefix).len()
            + remove_prefixed(self.session_storage.as_ref(), &self.config.prefix).len();
        self.env.clear_cookies_by_prefix(&self.config.prefix);
        self.env.notify(reason, NotifyLevel::Warning);

        let target = login_url_for(&self.env.current_path(), &self.config).to_owned();
        log::warn!("forced logout ({reason}); cleared {removed} keys, redirecting to {target}");
        self.env.navigate(&target, NavigateMode::Replace);
    }

    // =========================================================================
    // SESSION STATE
    // =========================================================================

    #[must_use]
    pub fn current_user(&self) -> Option<UserRecord> {
        self.store.load_current_user()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }

    /// True once more than the timeout has passed since the session started,
    /// or when no start time is stored.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        match self.store.load_session_start() {
            Some(start) => self.clock.now() - start > self.config.session_timeout,
            None => true,
        }
    }

    #[must_use]
    pub fn session_status(&self) -> SessionStatus {
        if self.current_user().is_none() {
            return SessionStatus::Anonymous;
        }
        let Some(start) = self.store.load_session_start() else {
            return SessionStatus::Expired { overdue: Duration::ZERO };
        };
        let remaining = Duration::try_from(self.config.session_timeout)
            .unwrap_or(Duration::MAX)
            .saturating_sub(self.clock.now() - start);
        if remaining.is_negative() {
            SessionStatus::Expired { overdue: remaining.abs() }
        } else {
            SessionStatus::Active { remaining }
        }
    }

    /// Force a logout if a remembered session has expired.
    ///
    /// Returns true if the visitor was logged out.
    pub fn enforce_session_expiry(&self) -> bool {
        if !self.is_logged_in() || !self.is_session_expired() {
            return false;
        }
        self.force_logout(SESSION_EXPIRED_MESSAGE);
        true
    }
}
