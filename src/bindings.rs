//! JavaScript entry points for the static pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! The site is plain HTML. Each page loads the WASM bundle, which runs
//! [`start`] once and exposes the functions below to inline form handlers.
//! Every call builds a fresh [`SessionManager`] over the page's storage, so
//! there is no state held between calls.
//!
//! Form results cross the boundary as JSON strings shaped
//! `{"success": bool, "message": .., "field": .., "user": ..}`.

use serde_json::json;
use wasm_bindgen::prelude::*;

use crate::browser::{apply_breadcrumb, highlight_current_page, session_manager};
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::nav::{back_target, remember_previous_page, shortcut_target};
use crate::services::session::{DEFAULT_FORCE_LOGOUT_REASON, SessionManager};
use crate::services::validation::{check_password_strength, validate_email, validate_phone};
use crate::types::{RegisterInput, Role, UserRecord};

fn manager() -> Result<SessionManager, JsError> {
    session_manager(AuthConfig::from_env()).ok_or_else(|| JsError::new("browser storage is unavailable"))
}

fn success(user: &UserRecord, message: &str) -> String {
    json!({ "success": true, "message": message, "user": user }).to_string()
}

fn failure(err: &AuthError) -> String {
    json!({ "success": false, "message": err.to_string(), "field": err.field() }).to_string()
}

/// Page bootstrap: logging, demo accounts, breadcrumb, active links, and
/// previous-page tracking.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }

    let Some(manager) = session_manager(AuthConfig::from_env()) else {
        log::warn!("storage unavailable; auth disabled on this page");
        return;
    };
    manager.initialize_demo_users();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let path = match window.location().pathname() {
        Ok(path) => path,
        Err(e) => {
            log::warn!("pathname unavailable: {e:?}");
            return;
        }
    };
    apply_breadcrumb(&document, &path);
    highlight_current_page(&document, &path);

    match window.location().origin() {
        Ok(origin) => {
            remember_previous_page(manager.session_storage(), manager.config(), &document.referrer(), &origin);
        }
        Err(e) => log::debug!("origin unavailable: {e:?}"),
    }
}

// =============================================================================
// ACCOUNTS
// =============================================================================

/// Register from a JSON form payload (`fullName`, `email`, `phone`,
/// `password`, `userType`).
#[wasm_bindgen(js_name = registerUser)]
pub fn register_user(payload: &str) -> Result<String, JsError> {
    let input: RegisterInput = serde_json::from_str(payload)?;
    Ok(match manager()?.register(input) {
        Ok(user) => success(&user, "Registrasi berhasil"),
        Err(err) => failure(&err),
    })
}

#[wasm_bindgen(js_name = loginUser)]
pub fn login_user(email: &str, password: &str, remember: bool) -> Result<String, JsError> {
    Ok(match manager()?.login(email, password, remember) {
        Ok(user) => success(&user, "Login berhasil"),
        Err(err) => failure(&err),
    })
}

#[wasm_bindgen(js_name = requestPasswordReset)]
pub fn request_password_reset(email: &str) -> Result<String, JsError> {
    Ok(match manager()?.request_password_reset(email) {
        Ok(request) => json!({ "success": true, "email": request.email }).to_string(),
        Err(err) => failure(&err),
    })
}

#[wasm_bindgen(js_name = logoutUser)]
pub fn logout_user() -> Result<(), JsError> {
    manager()?.logout();
    Ok(())
}

#[wasm_bindgen(js_name = forceLogout)]
pub fn force_logout(reason: Option<String>) -> Result<(), JsError> {
    manager()?.force_logout(reason.as_deref().unwrap_or(DEFAULT_FORCE_LOGOUT_REASON));
    Ok(())
}

// =============================================================================
// SESSION + GUARDS
// =============================================================================

/// The remembered user as JSON, or `undefined`.
#[wasm_bindgen(js_name = getCurrentUser)]
pub fn current_user_json() -> Result<Option<String>, JsError> {
    match manager()?.current_user() {
        Some(user) => Ok(Some(serde_json::to_string(&user)?)),
        None => Ok(None),
    }
}

#[wasm_bindgen(js_name = isLoggedIn)]
pub fn is_logged_in() -> Result<bool, JsError> {
    Ok(manager()?.is_logged_in())
}

#[wasm_bindgen(js_name = isSessionExpired)]
pub fn is_session_expired() -> Result<bool, JsError> {
    Ok(manager()?.is_session_expired())
}

#[wasm_bindgen(js_name = enforceSessionExpiry)]
pub fn enforce_session_expiry() -> Result<bool, JsError> {
    Ok(manager()?.enforce_session_expiry())
}

#[wasm_bindgen(js_name = requireAuth)]
pub fn require_auth(redirect: Option<String>) -> Result<bool, JsError> {
    Ok(manager()?.guard().require_auth(redirect.as_deref()))
}

/// Unknown role names deny without redirecting.
#[wasm_bindgen(js_name = requireRole)]
pub fn require_role(role: &str, redirect: Option<String>) -> Result<bool, JsError> {
    let Some(role) = Role::parse(role) else {
        log::warn!("requireRole called with unknown role {role:?}");
        return Ok(false);
    };
    Ok(manager()?.guard().require_role(role, redirect.as_deref()))
}

#[wasm_bindgen(js_name = preventAuthAccess)]
pub fn prevent_auth_access(redirect: Option<String>) -> Result<bool, JsError> {
    Ok(manager()?.guard().prevent_auth_access(redirect.as_deref()))
}

// =============================================================================
// FORM + NAVIGATION HELPERS
// =============================================================================

#[wasm_bindgen(js_name = checkPasswordStrength)]
pub fn check_password_strength_json(password: &str) -> Result<String, JsError> {
    Ok(serde_json::to_string(&check_password_strength(password))?)
}

#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email_js(email: &str) -> bool {
    validate_email(email)
}

#[wasm_bindgen(js_name = validatePhone)]
pub fn validate_phone_js(phone: &str) -> bool {
    validate_phone(phone)
}

/// Page for an Alt+key shortcut pressed on the page at `path`.
#[wasm_bindgen(js_name = shortcutTarget)]
pub fn shortcut_target_js(key: &str, path: &str) -> Option<String> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => shortcut_target(c, path).map(str::to_owned),
        _ => None,
    }
}

/// Where a back button without an `href` goes; `undefined` means
/// `history.back()`.
#[wasm_bindgen(js_name = backTarget)]
pub fn back_target_js() -> Result<Option<String>, JsError> {
    let manager = manager()?;
    Ok(back_target(manager.session_storage(), manager.config()))
}
