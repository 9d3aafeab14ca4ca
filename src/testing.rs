//! Recording doubles for the page environment and clock.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use time::OffsetDateTime;
use time::macros::datetime;

use crate::env::{Clock, Environment, NavigateMode, NotifyLevel};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Navigation {
    pub url: String,
    pub mode: NavigateMode,
    pub delay: Option<Duration>,
}

/// Captures every effect instead of touching a page.
#[derive(Debug)]
pub(crate) struct RecordingEnvironment {
    pub path: RefCell<String>,
    pub navigations: RefCell<Vec<Navigation>>,
    pub notifications: RefCell<Vec<(String, NotifyLevel)>>,
    pub cookies: RefCell<Vec<String>>,
}

impl RecordingEnvironment {
    pub fn at(path: &str) -> Self {
        Self {
            path: RefCell::new(path.to_owned()),
            navigations: RefCell::new(Vec::new()),
            notifications: RefCell::new(Vec::new()),
            cookies: RefCell::new(Vec::new()),
        }
    }

    pub fn with_cookies(self, names: &[&str]) -> Self {
        *self.cookies.borrow_mut() = names.iter().map(|n| (*n).to_owned()).collect();
        self
    }

    pub fn last_navigation(&self) -> Option<Navigation> {
        self.navigations.borrow().last().cloned()
    }
}

impl Environment for RecordingEnvironment {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn navigate(&self, url: &str, mode: NavigateMode) {
        self.navigations
            .borrow_mut()
            .push(Navigation { url: url.to_owned(), mode, delay: None });
    }

    fn navigate_after(&self, url: &str, mode: NavigateMode, delay: Duration) {
        self.navigations
            .borrow_mut()
            .push(Navigation { url: url.to_owned(), mode, delay: Some(delay) });
    }

    fn notify(&self, message: &str, level: NotifyLevel) {
        self.notifications
            .borrow_mut()
            .push((message.to_owned(), level));
    }

    fn clear_cookies_by_prefix(&self, prefix: &str) {
        self.cookies
            .borrow_mut()
            .retain(|name| !name.starts_with(prefix));
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub(crate) struct ManualClock {
    now: Cell<OffsetDateTime>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Cell::new(datetime!(2024-06-01 09:00:00 UTC)) }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        self.now.get()
    }
}
