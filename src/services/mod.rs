//! Account services used by the pages.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the account and session rules so browser bindings can
//! stay focused on translating DOM events into calls.

pub mod session;
pub mod validation;
