use super::*;
use crate::storage::MemoryStorage;

// =============================================================
// Area / current_page
// =============================================================

#[test]
fn area_from_path_segments() {
    assert_eq!(Area::of("/site/admin/admin-booking.html"), Area::Admin);
    assert_eq!(Area::of("/site/Customer/my-vehicles.html"), Area::Customer);
    assert_eq!(Area::of("/site/login.html"), Area::Root);
    // Folder match is case-sensitive.
    assert_eq!(Area::of("/site/customer/my-vehicles.html"), Area::Root);
}

#[test]
fn current_page_defaults_to_index() {
    assert_eq!(current_page("/Customer/booking-service.html"), "booking-service.html");
    assert_eq!(current_page("/"), "index.html");
    assert_eq!(current_page(""), "index.html");
}

#[test]
fn login_url_depends_on_area() {
    let cfg = AuthConfig::default();
    assert_eq!(login_url_for("/admin/admin-dashboard.html", &cfg), "../login.html");
    assert_eq!(login_url_for("/Customer/dashboard-customer.html", &cfg), "../login.html");
    assert_eq!(login_url_for("/index.html", &cfg), "login.html");
}

#[test]
fn dashboard_url_by_role() {
    let cfg = AuthConfig::default();
    assert_eq!(dashboard_url_for(Role::Admin, &cfg), "admin/admin-dashboard.html");
    assert_eq!(dashboard_url_for(Role::Customer, &cfg), "Customer/dashboard-customer.html");
}

// =============================================================
// breadcrumbs
// =============================================================

#[test]
fn page_title_known_and_unknown() {
    assert_eq!(page_title("admin-inventory.html"), "Inventori");
    assert_eq!(page_title("whatever.html"), "Halaman");
}

#[test]
fn breadcrumb_customer_area_has_three_levels() {
    let crumbs = breadcrumb("/Customer/service-history.html");
    let labels: Vec<_> = crumbs.iter().map(|c| c.label).collect();
    assert_eq!(labels, vec!["Beranda", "Dashboard Customer", "Riwayat Servis"]);
    assert_eq!(crumbs[1].href, Some("dashboard-customer.html"));
    assert_eq!(crumbs[2].href, None);
}

#[test]
fn breadcrumb_admin_area_links_admin_dashboard() {
    let crumbs = breadcrumb("/admin/admin-staff.html");
    assert_eq!(crumbs[1].label, "Admin Dashboard");
    assert_eq!(crumbs[2].label, "Manajemen Staff");
}

#[test]
fn breadcrumb_root_is_current_page_only() {
    assert_eq!(breadcrumb("/index.html"), vec![Crumb { label: "Beranda", href: None }]);
}

#[test]
fn render_breadcrumb_html_separates_crumbs() {
    let html = render_breadcrumb_html(&breadcrumb("/admin/admin-reports.html"));
    assert!(html.starts_with(r#"<a href="../index.html""#));
    assert_eq!(html.matches(r#"<span class="mx-2 text-gray-400">/</span>"#).count(), 2);
    assert!(html.ends_with(r#"<span class="text-gray-600">Laporan</span>"#));
}

// =============================================================
// highlighting + shortcuts
// =============================================================

#[test]
fn is_active_link_matches_page_and_area_relative_href() {
    assert!(is_active_link("my-vehicles.html", "/Customer/my-vehicles.html"));
    assert!(is_active_link("Customer/my-vehicles.html", "/Customer/my-vehicles.html"));
    assert!(is_active_link("admin/admin-booking.html", "/admin/admin-booking.html"));
    assert!(!is_active_link("admin/admin-booking.html", "/Customer/admin-booking.html"));
    assert!(!is_active_link("booking-service.html", "/Customer/my-vehicles.html"));
}

#[test]
fn shortcut_home_is_relative_to_area() {
    assert_eq!(shortcut_target('h', "/admin/admin-staff.html"), Some("../index.html"));
    assert_eq!(shortcut_target('h', "/index.html"), Some("index.html"));
}

#[test]
fn shortcut_dashboard_by_area() {
    assert_eq!(shortcut_target('d', "/admin/x.html"), Some("admin-dashboard.html"));
    assert_eq!(shortcut_target('d', "/Customer/x.html"), Some("dashboard-customer.html"));
    assert_eq!(shortcut_target('d', "/index.html"), Some("Customer/dashboard-customer.html"));
}

#[test]
fn shortcut_customer_pages_and_unknown_key() {
    assert_eq!(shortcut_target('b', "/Customer/x.html"), Some("booking-service.html"));
    assert_eq!(shortcut_target('s', "/index.html"), Some("Customer/service-history.html"));
    assert_eq!(shortcut_target('v', "/index.html"), Some("Customer/my-vehicles.html"));
    assert_eq!(shortcut_target('x', "/index.html"), None);
}

#[test]
fn shortcut_ignores_shifted_keys() {
    for key in ['H', 'D', 'B', 'S', 'V'] {
        assert_eq!(shortcut_target(key, "/Customer/x.html"), None, "key {key}");
    }
}

#[test]
fn sidebar_highlight_needs_area_and_exact_page() {
    assert!(sidebar_highlight("admin-booking.html", "/admin/admin-booking.html").is_some());
    assert!(sidebar_highlight("my-vehicles.html", "/Customer/my-vehicles.html").is_some());
    assert_eq!(sidebar_highlight("admin/admin-booking.html", "/admin/admin-booking.html"), None);
    assert_eq!(sidebar_highlight("index.html", "/index.html"), None);
    assert_eq!(sidebar_highlight("admin-staff.html", "/admin/admin-booking.html"), None);
}

#[test]
fn sidebar_highlight_swaps_icon_and_hover_by_area() {
    let admin = sidebar_highlight("admin-staff.html", "/admin/admin-staff.html").unwrap();
    assert_eq!(admin.link.add, &["bg-gray-primary", "border-l-4", "border-secondary-blue"]);
    assert_eq!(admin.link.remove, &["hover:bg-gray-primary"]);
    let icon = admin.icon.unwrap();
    assert_eq!(icon.add, &["text-secondary-blue"]);
    assert_eq!(icon.remove, &["text-gray-400"]);

    let customer = sidebar_highlight("my-vehicles.html", "/Customer/my-vehicles.html").unwrap();
    assert!(customer.link.remove.is_empty());
    assert_eq!(customer.icon, Some(icon));
}

#[test]
fn sidebar_reset_only_in_admin_area() {
    let reset = sidebar_reset("/admin/admin-reports.html").unwrap();
    assert_eq!(reset.link.add, &["hover:bg-gray-primary"]);
    assert_eq!(reset.link.remove, &["bg-gray-primary", "border-l-4", "border-secondary-blue"]);
    assert_eq!(reset.icon.unwrap().add, &["text-gray-400"]);
    assert_eq!(sidebar_reset("/Customer/my-vehicles.html"), None);
    assert_eq!(sidebar_reset("/index.html"), None);
}

#[test]
fn nav_highlight_accepts_area_relative_href() {
    let mark = nav_highlight("Customer/my-vehicles.html", "/Customer/my-vehicles.html").unwrap();
    assert_eq!(mark.link.add, &["active", "text-primary-blue"]);
    assert_eq!(mark.link.remove, &["text-secondary-blue"]);
    assert_eq!(mark.icon, None);
    assert_eq!(nav_highlight("booking-service.html", "/Customer/my-vehicles.html"), None);
}

#[test]
fn header_highlight_is_exact_and_bold() {
    let mark = header_highlight("dashboard-customer.html", "/Customer/dashboard-customer.html").unwrap();
    assert!(mark.link.add.contains(&"font-semibold"));
    assert_eq!(header_highlight("Customer/dashboard-customer.html", "/Customer/dashboard-customer.html"), None);
}

// =============================================================
// mobile menu + previous page
// =============================================================

#[test]
fn mobile_menu_toggle_and_close() {
    let mut menu = MobileMenu::default();
    assert_eq!(menu.icon_class(), "fa-bars");
    menu.toggle();
    assert!(menu.open);
    assert_eq!(menu.icon_class(), "fa-times");
    menu.close();
    assert!(!menu.open);
}

#[test]
fn previous_page_only_kept_for_same_origin() {
    let session = MemoryStorage::new();
    let cfg = AuthConfig::default();

    remember_previous_page(&session, &cfg, "https://evil.example/page", "https://jhmpro.test");
    assert_eq!(back_target(&session, &cfg), None);

    remember_previous_page(&session, &cfg, "https://jhmpro.test/Customer/my-vehicles.html", "https://jhmpro.test");
    assert_eq!(
        back_target(&session, &cfg).as_deref(),
        Some("https://jhmpro.test/Customer/my-vehicles.html")
    );
    assert!(session.get_item("jhmpro_previous_page").is_some());
}
