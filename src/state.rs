//! Reactive session state for Leptos pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages rendered with Leptos provide a `RwSignal<SessionState>` via context
//! and install one guard effect. The effect reuses [`crate::guard::decide`],
//! so reactive and imperative pages redirect identically.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::config::AuthConfig;
use crate::guard::{Access, Decision, decide};
use crate::store::Store;
use crate::types::UserRecord;

/// Current session user and whether it is still being read.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub user: Option<UserRecord>,
    pub loading: bool,
}

impl SessionState {
    /// Snapshot of the remembered session.
    #[must_use]
    pub fn from_store(store: &Store) -> Self {
        Self { user: store.load_current_user(), loading: false }
    }
}

/// Redirect target for `state`, or `None` while loading or when allowed.
#[must_use]
pub fn redirect_target(state: &SessionState, access: Access, config: &AuthConfig) -> Option<String> {
    if state.loading {
        return None;
    }
    match decide(access, state.user.as_ref(), None, config) {
        Decision::Allow => None,
        Decision::Redirect { url, .. } => Some(url),
    }
}

/// Navigate away whenever the session stops satisfying `access`.
pub fn install_guard_redirect<F>(session: RwSignal<SessionState>, access: Access, config: AuthConfig, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = session.get();
        if let Some(url) = redirect_target(&state, access, &config) {
            navigate(&url, NavigateOptions::default());
        }
    });
}
