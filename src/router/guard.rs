//! Navigation guards
//!
//! Guards are pure reads of the current auth flag. Nothing here talks to the
//! server.

use super::Route;

/// Which guard protects a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Only authenticated users may enter
    Authenticated,
    /// Only anonymous users may enter (login, register)
    Guest,
}

/// Result of running a guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(Route),
}

/// Require an authenticated user, sending others to login
///
/// The blocked destination travels along as the login `returnUrl`.
pub fn auth_guard(is_authenticated: bool, target: &Route) -> GuardOutcome {
    if is_authenticated {
        GuardOutcome::Allow
    } else {
        GuardOutcome::Redirect(Route::Login {
            return_url: Some(target.path()),
        })
    }
}

/// Require an anonymous user, sending authenticated ones to the list
pub fn guest_guard(is_authenticated: bool) -> GuardOutcome {
    if is_authenticated {
        GuardOutcome::Redirect(Route::StudentList)
    } else {
        GuardOutcome::Allow
    }
}

/// Run whichever guard protects `target`
pub fn check(is_authenticated: bool, target: &Route) -> GuardOutcome {
    match target.guard() {
        Guard::Authenticated => auth_guard(is_authenticated, target),
        Guard::Guest => guest_guard(is_authenticated),
    }
}
