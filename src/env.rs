//! Side-effect seams between session logic and the page.
//!
//! ARCHITECTURE
//! ============
//! Redirects, toast notifications, cookie clearing, and wall-clock reads are
//! the only things the session layer does to the outside world. They sit
//! behind [`Environment`] and [`Clock`] so the same code runs in the browser
//! (`crate::browser`) and in native tests with recording doubles.

#[cfg(test)]
#[path = "env_test.rs"]
mod env_test;

use std::time::Duration;

use time::OffsetDateTime;

/// How a navigation affects history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigateMode {
    /// `location.href = url`; the current page stays in history.
    Push,
    /// `location.replace(url)`; logout uses this so Back cannot return.
    Replace,
}

/// Toast severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotifyLevel {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl NotifyLevel {
    /// Background utility class for the toast.
    #[must_use]
    pub fn background_class(self) -> &'static str {
        match self {
            Self::Success => "bg-green-500",
            Self::Error => "bg-red-500",
            Self::Warning => "bg-yellow-500",
            Self::Info => "bg-blue-500",
        }
    }

    /// Font Awesome icon for the toast.
    #[must_use]
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Success => "fa-check-circle",
            Self::Error => "fa-exclamation-circle",
            Self::Warning => "fa-exclamation-triangle",
            Self::Info => "fa-info-circle",
        }
    }
}

/// Page-level effects the session layer needs.
pub trait Environment {
    /// `window.location.pathname`.
    fn current_path(&self) -> String;
    fn navigate(&self, url: &str, mode: NavigateMode);
    /// Navigate once `delay` has elapsed. Page unload cancels it.
    fn navigate_after(&self, url: &str, mode: NavigateMode, delay: Duration);
    fn notify(&self, message: &str, level: NotifyLevel);
    /// Expire every cookie whose name starts with `prefix`.
    fn clear_cookies_by_prefix(&self, prefix: &str);
}

/// Wall-clock source.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// Native clock backed by the system time.
#[cfg(not(feature = "hydrate"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

#[cfg(not(feature = "hydrate"))]
impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Class list for a toast container; starts off-screen to slide in.
#[must_use]
pub fn toast_class(level: NotifyLevel) -> String {
    format!(
        "fixed top-4 right-4 z-50 p-4 rounded-lg shadow-lg transform transition-all duration-300 translate-x-full {} text-white",
        level.background_class()
    )
}

/// Inner markup for a toast. `message` is escaped.
#[must_use]
pub fn toast_markup(message: &str, level: NotifyLevel) -> String {
    format!(
        r#"<div class="flex items-center space-x-2"><i class="fas {}"></i><span>{}</span><button onclick="this.parentElement.parentElement.remove()" class="ml-2 text-white hover:text-gray-200"><i class="fas fa-times"></i></button></div>"#,
        level.icon_class(),
        escape_html(message)
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Names of cookies in a `document.cookie` string that start with `prefix`.
#[must_use]
pub fn cookie_names_with_prefix(cookie_header: &str, prefix: &str) -> Vec<String> {
    cookie_header
        .split(';')
        .map(|pair| pair.split_once('=').map_or(pair, |(name, _)| name).trim())
        .filter(|name| !name.is_empty() && name.starts_with(prefix))
        .map(str::to_owned)
        .collect()
}

/// Assignment to `document.cookie` that expires `name` at the site root.
#[must_use]
pub fn expired_cookie(name: &str) -> String {
    format!("{name}=;expires=Thu, 01 Jan 1970 00:00:00 GMT;path=/")
}
