//! Route guards run by pages before rendering.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page calls one guard on load. The rule is [`decide`], a
//! pure function of the stored session user, so the imperative
//! [`RouteGuard`] and the reactive guard in `crate::state` apply identical
//! redirects.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::rc::Rc;

use crate::config::AuthConfig;
use crate::env::{Environment, NavigateMode, NotifyLevel};
use crate::nav::dashboard_url_for;
use crate::store::Store;
use crate::types::{Role, UserRecord};

pub const DEFAULT_AUTH_REDIRECT: &str = "login.html";
pub const DEFAULT_ROLE_REDIRECT: &str = "index.html";
pub const ACCESS_DENIED_MESSAGE: &str = "Anda tidak memiliki akses ke halaman ini.";

/// What a page requires of the visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Any remembered session.
    SignedIn,
    /// A session with exactly this role.
    Role(Role),
    /// No session; login and register pages.
    SignedOut,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect {
        url: String,
        /// Error toast shown before leaving.
        notice: Option<&'static str>,
    },
}

/// Decide whether `user` may view a page requiring `access`.
///
/// `redirect` overrides the default target for the access kind.
#[must_use]
pub fn decide(access: Access, user: Option<&UserRecord>, redirect: Option<&str>, config: &AuthConfig) -> Decision {
    let redirect_to = |default: &str| redirect.unwrap_or(default).to_owned();
    match (access, user) {
        (Access::SignedIn, None) => Decision::Redirect { url: redirect_to(DEFAULT_AUTH_REDIRECT), notice: None },
        (Access::Role(_), None) => Decision::Redirect { url: redirect_to(DEFAULT_ROLE_REDIRECT), notice: None },
        (Access::Role(required), Some(user)) if user.role != required => Decision::Redirect {
            url: redirect_to(DEFAULT_ROLE_REDIRECT),
            notice: Some(ACCESS_DENIED_MESSAGE),
        },
        (Access::SignedOut, Some(user)) => Decision::Redirect {
            url: redirect_to(dashboard_url_for(user.role, config)),
            notice: None,
        },
        _ => Decision::Allow,
    }
}

/// Imperative guards over the stored session.
#[derive(Clone)]
pub struct RouteGuard {
    store: Store,
    env: Rc<dyn Environment>,
    config: AuthConfig,
}

impl RouteGuard {
    pub fn new(store: Store, env: Rc<dyn Environment>, config: AuthConfig) -> Self {
        Self { store, env, config }
    }

    /// Redirect to `redirect` (default `login.html`) without a session.
    pub fn require_auth(&self, redirect: Option<&str>) -> bool {
        self.enforce(Access::SignedIn, redirect)
    }

    /// Redirect to `redirect` (default `index.html`) unless the session has
    /// `role`. A mismatch also shows an access-denied toast.
    pub fn require_role(&self, role: Role, redirect: Option<&str>) -> bool {
        self.enforce(Access::Role(role), redirect)
    }

    /// Send signed-in visitors away from login/register pages, to `redirect`
    /// or their role's dashboard.
    pub fn prevent_auth_access(&self, redirect: Option<&str>) -> bool {
        self.enforce(Access::SignedOut, redirect)
    }

    /// Apply `access`; returns true when the page may render.
    pub fn enforce(&self, access: Access, redirect: Option<&str>) -> bool {
        let user = self.store.load_current_user();
        match decide(access, user.as_ref(), redirect, &self.config) {
            Decision::Allow => true,
            Decision::Redirect { url, notice } => {
                log::debug!("guard {access:?} redirecting to {url}");
                if let Some(message) = notice {
                    self.env.notify(message, NotifyLevel::Error);
                }
                self.env.navigate(&url, NavigateMode::Push);
                false
            }
        }
    }
}
