//! Errors surfaced to form handlers.
//!
//! Messages are the exact strings the pages render inline under the form
//! fields, so they stay in the UI language.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Email sudah terdaftar")]
    DuplicateEmail,
    #[error("Email tidak ditemukan")]
    UserNotFound,
    #[error("Password salah")]
    InvalidCredential,
    /// The stored account list is not a JSON array; nothing may be written.
    #[error("Data akun tidak dapat dibaca")]
    AccountsUnreadable,
}

impl AuthError {
    /// Form field the message belongs under.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::DuplicateEmail | Self::UserNotFound | Self::AccountsUnreadable => "email",
            Self::InvalidCredential => "password",
        }
    }
}
