//! Client-side accounts, sessions, and route guards for the JHMPRO site.
//!
//! The crate compiles natively for tests and to WebAssembly (feature
//! `hydrate`) for the static pages. Everything the session layer touches in
//! the browser (storage, location, cookies, toasts, the clock) sits behind a
//! trait, so the logic below `browser` runs unchanged under `cargo test`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`storage`] | Key-value storage trait, in-memory backend, JSON helpers |
//! | [`store`] | Typed access to the reserved `jhmpro_` keys |
//! | [`services::session`] | Registration, login, logout, expiry |
//! | [`services::validation`] | Form field checks and password strength |
//! | [`guard`] | Page access rules and redirects |
//! | [`nav`] | Login/dashboard URLs, page titles, breadcrumbs, shortcuts |
//! | [`password`] | Credential digests |
//! | [`state`] | Leptos session signal and guard effect |
//! | [`env`] | Navigation, notification, cookie, and clock seams |
//! | [`config`] | Key prefix, timeouts, page URLs |
//! | `browser`, `bindings` | `web-sys` backends and JS exports (`hydrate` only) |

pub mod config;
pub mod env;
pub mod error;
pub mod guard;
pub mod nav;
pub mod password;
pub mod services;
pub mod state;
pub mod storage;
pub mod store;
pub mod types;

#[cfg(feature = "hydrate")]
pub mod bindings;
#[cfg(feature = "hydrate")]
pub mod browser;

#[cfg(test)]
mod testing;
