//! `web-sys` implementations of the storage, environment, and clock seams.
//!
//! Only compiled with `hydrate`. Every browser call can fail (sandboxed
//! iframes, disabled storage, detached documents); failures are logged and
//! the operation degrades to a no-op.

use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use time::OffsetDateTime;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDocument, Storage, Window};

use crate::config::AuthConfig;
use crate::env::{
    Clock, Environment, NavigateMode, NotifyLevel, TOAST_DURATION, cookie_names_with_prefix, expired_cookie,
    toast_class, toast_markup,
};
use crate::nav::{
    ClassChange, LinkHighlight, breadcrumb, header_highlight, nav_highlight, render_breadcrumb_html, sidebar_highlight,
    sidebar_reset,
};
use crate::services::session::SessionManager;
use crate::storage::{KeyValueStore, MemoryStorage};

const TOAST_SLIDE_IN_MS: u32 = 100;
const TOAST_SLIDE_OUT_MS: u32 = 300;

fn millis_u32(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

// =============================================================================
// STORAGE
// =============================================================================

/// `localStorage` or `sessionStorage`.
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    #[must_use]
    pub fn local(window: &Window) -> Option<Self> {
        match window.local_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            Ok(None) => None,
            Err(e) => {
                log::warn!("localStorage unavailable: {e:?}");
                None
            }
        }
    }

    #[must_use]
    pub fn session(window: &Window) -> Option<Self> {
        match window.session_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            Ok(None) => None,
            Err(e) => {
                log::warn!("sessionStorage unavailable: {e:?}");
                None
            }
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("storage read of {key} failed: {e:?}");
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            log::warn!("storage write of {key} failed: {e:?}");
        }
    }

    fn remove_item(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            log::warn!("storage removal of {key} failed: {e:?}");
        }
    }

    fn keys(&self) -> Vec<String> {
        let len = match self.storage.length() {
            Ok(len) => len,
            Err(e) => {
                log::warn!("storage length unavailable: {e:?}");
                return Vec::new();
            }
        };
        (0..len)
            .filter_map(|i| match self.storage.key(i) {
                Ok(key) => key,
                Err(e) => {
                    log::warn!("storage key {i} unreadable: {e:?}");
                    None
                }
            })
            .collect()
    }
}

// =============================================================================
// ENVIRONMENT
// =============================================================================

pub struct BrowserEnvironment {
    window: Window,
}

impl BrowserEnvironment {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

fn go(window: &Window, url: &str, mode: NavigateMode) {
    let location = window.location();
    let result = match mode {
        NavigateMode::Push => location.set_href(url),
        NavigateMode::Replace => location.replace(url),
    };
    if let Err(e) = result {
        log::warn!("navigation to {url} failed: {e:?}");
    }
}

impl Environment for BrowserEnvironment {
    fn current_path(&self) -> String {
        match self.window.location().pathname() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("pathname unavailable: {e:?}");
                String::new()
            }
        }
    }

    fn navigate(&self, url: &str, mode: NavigateMode) {
        go(&self.window, url, mode);
    }

    fn navigate_after(&self, url: &str, mode: NavigateMode, delay: Duration) {
        let window = self.window.clone();
        let url = url.to_owned();
        Timeout::new(millis_u32(delay), move || go(&window, &url, mode)).forget();
    }

    fn notify(&self, message: &str, level: NotifyLevel) {
        let Some(document) = self.window.document() else {
            return;
        };
        if let Err(e) = show_toast(&document, message, level) {
            log::warn!("toast failed: {e:?}");
        }
    }

    fn clear_cookies_by_prefix(&self, prefix: &str) {
        let Some(document) = self.window.document() else {
            return;
        };
        let document = match document.dyn_into::<HtmlDocument>() {
            Ok(document) => document,
            Err(document) => {
                log::debug!("cookies need an HTML document, got {document:?}");
                return;
            }
        };
        let header = match document.cookie() {
            Ok(header) => header,
            Err(e) => {
                log::warn!("cookies unavailable: {e:?}");
                return;
            }
        };
        for name in cookie_names_with_prefix(&header, prefix) {
            if let Err(e) = document.set_cookie(&expired_cookie(&name)) {
                log::warn!("failed to expire cookie {name}: {e:?}");
            }
        }
    }
}

fn show_toast(document: &Document, message: &str, level: NotifyLevel) -> Result<(), wasm_bindgen::JsValue> {
    let Some(body) = document.body() else {
        return Ok(());
    };
    let toast = document.create_element("div")?;
    toast.set_class_name(&toast_class(level));
    toast.set_inner_html(&toast_markup(message, level));
    body.append_child(&toast)?;

    let slide_in = toast.clone();
    Timeout::new(TOAST_SLIDE_IN_MS, move || {
        log_class_error(slide_in.class_list().remove_1("translate-x-full"));
    })
    .forget();

    Timeout::new(millis_u32(TOAST_DURATION), move || {
        log_class_error(toast.class_list().add_1("translate-x-full"));
        Timeout::new(TOAST_SLIDE_OUT_MS, move || toast.remove()).forget();
    })
    .forget();
    Ok(())
}

fn log_class_error(result: Result<(), wasm_bindgen::JsValue>) {
    if let Err(e) = result {
        log::debug!("class update failed: {e:?}");
    }
}

// =============================================================================
// CLOCK
// =============================================================================

/// Clock backed by `Date.now()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now(&self) -> OffsetDateTime {
        let nanos = (js_sys::Date::now() * 1_000_000.0) as i128;
        match OffsetDateTime::from_unix_timestamp_nanos(nanos) {
            Ok(now) => now,
            Err(e) => {
                log::warn!("Date.now() out of range, using the epoch: {e}");
                OffsetDateTime::UNIX_EPOCH
            }
        }
    }
}

// =============================================================================
// WIRING + PAGE ENHANCEMENTS
// =============================================================================

/// Session manager bound to this page. `None` outside a window or when
/// `localStorage` is blocked.
#[must_use]
pub fn session_manager(config: AuthConfig) -> Option<SessionManager> {
    let window = web_sys::window()?;
    let local = BrowserStorage::local(&window)?;
    let session: Rc<dyn KeyValueStore> = match BrowserStorage::session(&window) {
        Some(storage) => Rc::new(storage),
        None => Rc::new(MemoryStorage::new()),
    };
    Some(SessionManager::new(
        Rc::new(local),
        session,
        Rc::new(BrowserEnvironment::new(window)),
        Rc::new(BrowserClock),
        config,
    ))
}

/// Fill the `.breadcrumb` container for the page at `path`.
pub fn apply_breadcrumb(document: &Document, path: &str) {
    match document.query_selector(".breadcrumb") {
        Ok(Some(container)) => container.set_inner_html(&render_breadcrumb_html(&breadcrumb(path))),
        Ok(None) => {}
        Err(e) => log::warn!("breadcrumb lookup failed: {e:?}"),
    }
}

const SIDEBAR_LINKS: &str = "#sidebar nav a";
const SIDEBAR_MARKED: &str = "#sidebar nav .bg-gray-primary.border-l-4";
const NAV_LINKS: &str = "nav a:not(#sidebar nav a), .sidebar a";
const HEADER_LINKS: &str = "header nav a";

/// Mark navigation links pointing at the page at `path`.
pub fn highlight_current_page(document: &Document, path: &str) {
    if let Some(reset) = sidebar_reset(path) {
        for link in elements(document, SIDEBAR_MARKED) {
            apply_highlight(&link, reset);
        }
    }
    mark_links(document, SIDEBAR_LINKS, path, sidebar_highlight);
    mark_links(document, NAV_LINKS, path, nav_highlight);
    mark_links(document, HEADER_LINKS, path, header_highlight);
}

fn mark_links(document: &Document, selector: &str, path: &str, rule: fn(&str, &str) -> Option<LinkHighlight>) {
    for link in elements(document, selector) {
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        if let Some(highlight) = rule(&href, path) {
            apply_highlight(&link, highlight);
        }
    }
}

fn apply_highlight(link: &Element, highlight: LinkHighlight) {
    apply_classes(link, highlight.link);
    let Some(change) = highlight.icon else {
        return;
    };
    match link.query_selector("i") {
        Ok(Some(icon)) => apply_classes(&icon, change),
        Ok(None) => {}
        Err(e) => log::debug!("icon lookup failed: {e:?}"),
    }
}

fn apply_classes(element: &Element, change: ClassChange) {
    let classes = element.class_list();
    for class in change.remove {
        log_class_error(classes.remove_1(class));
    }
    for class in change.add {
        log_class_error(classes.add_1(class));
    }
}

fn elements(document: &Document, selector: &str) -> Vec<Element> {
    let nodes = match document.query_selector_all(selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            log::warn!("query {selector} failed: {e:?}");
            return Vec::new();
        }
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| match node.dyn_into::<Element>() {
            Ok(element) => Some(element),
            Err(node) => {
                log::debug!("skipping non-element match for {selector}: {node:?}");
                None
            }
        })
        .collect()
}
