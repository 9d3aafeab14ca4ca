//! Path-driven navigation helpers.
//!
//! The site is three folders of static pages: the top level, `/admin/` and
//! `/Customer/`. Everything here derives from `location.pathname` alone so
//! highlighting, breadcrumbs, and shortcuts can be decided without a DOM.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::config::AuthConfig;
use crate::storage::KeyValueStore;
use crate::types::Role;

const INDEX_PAGE: &str = "index.html";
const PREVIOUS_PAGE_KEY: &str = "previous_page";

/// Which section of the site a path belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    Admin,
    Customer,
    Root,
}

impl Area {
    #[must_use]
    pub fn of(path: &str) -> Self {
        if path.contains("/admin/") {
            Self::Admin
        } else if path.contains("/Customer/") {
            Self::Customer
        } else {
            Self::Root
        }
    }
}

/// Last path segment, defaulting to `index.html` for directory paths.
#[must_use]
pub fn current_page(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(page) if !page.is_empty() => page,
        _ => INDEX_PAGE,
    }
}

/// Login page relative to the page at `path`.
#[must_use]
pub fn login_url_for<'a>(path: &str, config: &'a AuthConfig) -> &'a str {
    match Area::of(path) {
        Area::Admin | Area::Customer => &config.nested_login_url,
        Area::Root => &config.root_login_url,
    }
}

/// Dashboard a signed-in user lands on, relative to the top level.
#[must_use]
pub fn dashboard_url_for(role: Role, config: &AuthConfig) -> &str {
    match role {
        Role::Admin => &config.admin_dashboard_url,
        Role::Customer => &config.customer_dashboard_url,
    }
}

/// Display title for a page file name.
#[must_use]
pub fn page_title(page: &str) -> &'static str {
    match page {
        "index.html" => "Beranda",
        "dashboard-customer.html" => "Dashboard Customer",
        "booking-service.html" => "Booking Servis",
        "my-vehicles.html" => "Kendaraan Saya",
        "service-history.html" => "Riwayat Servis",
        "admin-dashboard.html" => "Admin Dashboard",
        "admin-booking.html" => "Manajemen Booking",
        "admin-customers.html" => "Manajemen Customer",
        "admin-services.html" => "Manajemen Layanan",
        "admin-inventory.html" => "Inventori",
        "admin-reports.html" => "Laporan",
        "admin-staff.html" => "Manajemen Staff",
        _ => "Halaman",
    }
}

// =============================================================================
// BREADCRUMBS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    pub label: &'static str,
    /// `None` for the current page.
    pub href: Option<&'static str>,
}

#[must_use]
pub fn breadcrumb(path: &str) -> Vec<Crumb> {
    let here = Crumb { label: page_title(current_page(path)), href: None };
    let home = Crumb { label: "Beranda", href: Some("../index.html") };
    match Area::of(path) {
        Area::Customer => vec![
            home,
            Crumb { label: "Dashboard Customer", href: Some("dashboard-customer.html") },
            here,
        ],
        Area::Admin => vec![
            home,
            Crumb { label: "Admin Dashboard", href: Some("admin-dashboard.html") },
            here,
        ],
        Area::Root => vec![here],
    }
}

/// Markup for the `.breadcrumb` container.
#[must_use]
pub fn render_breadcrumb_html(crumbs: &[Crumb]) -> String {
    crumbs
        .iter()
        .map(|crumb| match crumb.href {
            Some(href) => format!(
                r#"<a href="{href}" class="text-secondary-blue hover:text-primary-blue">{}</a>"#,
                crumb.label
            ),
            None => format!(r#"<span class="text-gray-600">{}</span>"#, crumb.label),
        })
        .collect::<Vec<_>>()
        .join(r#"<span class="mx-2 text-gray-400">/</span>"#)
}

// =============================================================================
// HIGHLIGHTING
// =============================================================================

/// Classes to add and remove on one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassChange {
    pub add: &'static [&'static str],
    pub remove: &'static [&'static str],
}

/// Changes for a link and the `<i>` icon inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkHighlight {
    pub link: ClassChange,
    pub icon: Option<ClassChange>,
}

const SIDEBAR_MARK: &[&str] = &["bg-gray-primary", "border-l-4", "border-secondary-blue"];
const SIDEBAR_HOVER: &[&str] = &["hover:bg-gray-primary"];
const ICON_ACTIVE: ClassChange = ClassChange { add: &["text-secondary-blue"], remove: &["text-gray-400"] };
const ICON_IDLE: ClassChange = ClassChange { add: &["text-gray-400"], remove: &["text-secondary-blue"] };

/// Whether a regular nav link's `href` points at the page at `path`.
/// Area-relative hrefs (`Customer/x.html` seen from `/Customer/x.html`) count.
#[must_use]
pub fn is_active_link(href: &str, path: &str) -> bool {
    let page = current_page(path);
    if href == page {
        return true;
    }
    match Area::of(path) {
        Area::Customer => href.strip_prefix("Customer/") == Some(page),
        Area::Admin => href.strip_prefix("admin/") == Some(page),
        Area::Root => false,
    }
}

/// Reset for sidebar links already marked active in the markup. Only the
/// admin sidebar ships a hard-coded marker.
#[must_use]
pub fn sidebar_reset(path: &str) -> Option<LinkHighlight> {
    (Area::of(path) == Area::Admin).then_some(LinkHighlight {
        link: ClassChange { add: SIDEBAR_HOVER, remove: SIDEBAR_MARK },
        icon: Some(ICON_IDLE),
    })
}

/// Marker for a `#sidebar nav` link. Sidebars exist only inside the admin
/// and customer areas and match the page name exactly.
#[must_use]
pub fn sidebar_highlight(href: &str, path: &str) -> Option<LinkHighlight> {
    if href != current_page(path) {
        return None;
    }
    match Area::of(path) {
        Area::Admin => Some(LinkHighlight {
            link: ClassChange { add: SIDEBAR_MARK, remove: SIDEBAR_HOVER },
            icon: Some(ICON_ACTIVE),
        }),
        Area::Customer => Some(LinkHighlight {
            link: ClassChange { add: SIDEBAR_MARK, remove: &[] },
            icon: Some(ICON_ACTIVE),
        }),
        Area::Root => None,
    }
}

/// Marker for navigation links outside the sidebar.
#[must_use]
pub fn nav_highlight(href: &str, path: &str) -> Option<LinkHighlight> {
    is_active_link(href, path).then_some(LinkHighlight {
        link: ClassChange { add: &["active", "text-primary-blue"], remove: &["text-secondary-blue"] },
        icon: None,
    })
}

/// Marker for header navigation links; exact page match only.
#[must_use]
pub fn header_highlight(href: &str, path: &str) -> Option<LinkHighlight> {
    (href == current_page(path)).then_some(LinkHighlight {
        link: ClassChange { add: &["text-primary-blue", "font-semibold"], remove: &["text-secondary-blue"] },
        icon: None,
    })
}

// =============================================================================
// KEYBOARD SHORTCUTS
// =============================================================================

/// Target of an Alt+`key` shortcut from the page at `path`.
#[must_use]
pub fn shortcut_target(key: char, path: &str) -> Option<&'static str> {
    let in_admin = path.contains("admin");
    let in_customer = path.contains("Customer");
    let target = match key {
        'h' if in_admin || in_customer => "../index.html",
        'h' => "index.html",
        'd' if in_admin => "admin-dashboard.html",
        'd' if in_customer => "dashboard-customer.html",
        'd' => "Customer/dashboard-customer.html",
        'b' if in_customer => "booking-service.html",
        'b' => "Customer/booking-service.html",
        's' if in_customer => "service-history.html",
        's' => "Customer/service-history.html",
        'v' if in_customer => "my-vehicles.html",
        'v' => "Customer/my-vehicles.html",
        _ => return None,
    };
    Some(target)
}

// =============================================================================
// MOBILE MENU
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MobileMenu {
    pub open: bool,
}

impl MobileMenu {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Outside clicks, link clicks and Escape all close the menu.
    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub fn icon_class(self) -> &'static str {
        if self.open { "fa-times" } else { "fa-bars" }
    }
}

// =============================================================================
// PREVIOUS PAGE
// =============================================================================

/// Record `referrer` in session storage when it comes from this site.
pub fn remember_previous_page(session: &dyn KeyValueStore, config: &AuthConfig, referrer: &str, origin: &str) {
    if referrer.is_empty() || origin.is_empty() || !referrer.contains(origin) {
        return;
    }
    session.set_item(&config.key(PREVIOUS_PAGE_KEY), referrer);
}

/// Where a back button without an `href` should go; `None` means history back.
#[must_use]
pub fn back_target(session: &dyn KeyValueStore, config: &AuthConfig) -> Option<String> {
    session.get_item(&config.key(PREVIOUS_PAGE_KEY))
}
