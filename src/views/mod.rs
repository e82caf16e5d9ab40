//! Headless page controllers
//!
//! Each controller owns its state as [`Signal`](crate::signal::Signal)s, drives
//! one or two resource-client calls and turns every failure into local state.
//! A rendering layer reads the signals and calls the controller methods.

mod create;
mod detail;
mod edit;
mod form;
mod list;
mod login;
mod modal;
mod navbar;
mod register;

use crate::error::{Error, ErrorKind};

pub use create::StudentCreateView;
pub use detail::StudentDetailView;
pub use edit::StudentEditView;
pub use form::*;
pub use list::{ListFilters, PageInfo, StudentListView};
pub use login::LoginView;
pub use modal::DeleteModal;
pub use navbar::Navbar;
pub use register::RegisterView;

/// Fallback message for auth failures and unexpected errors
pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";

/// Shown when a request comes back 401; the session is left as is
pub const UNAUTHORIZED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Shown when a record lookup comes back 404
pub const NOT_FOUND_MESSAGE: &str = "Student not found.";

/// Lifecycle of a view's request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Message for a failed request: 401 gets the session message, then the
/// server's own message, then `fallback`
pub fn describe_error(err: &Error, fallback: &str) -> String {
    if err.kind() == ErrorKind::Unauthorized {
        return UNAUTHORIZED_MESSAGE.to_string();
    }
    err.server_message()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

/// Like [`describe_error`] but with the not-found message for 404
pub fn describe_lookup_error(err: &Error, fallback: &str) -> String {
    if err.kind() == ErrorKind::NotFound {
        return NOT_FOUND_MESSAGE.to_string();
    }
    describe_error(err, fallback)
}
