//! Login screen

use reqwest::StatusCode;

use super::{FormController, LoadState, GENERIC_ERROR};
use crate::auth::{Auth, AuthRequest};
use crate::router::Route;
use crate::signal::Signal;

/// Shown when the server rejects the credentials
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Controller of the login form
pub struct LoginView {
    auth: Auth,
    return_url: Option<String>,
    form: Signal<FormController>,
    state: Signal<LoadState>,
}

impl LoginView {
    /// Create the view, remembering the `returnUrl` of the current route
    pub fn new(auth: Auth) -> Self {
        let return_url = match auth.router().current() {
            Route::Login { return_url } => return_url,
            _ => None,
        };
        Self {
            auth,
            return_url,
            form: Signal::new(FormController::credentials()),
            state: Signal::default(),
        }
    }

    pub fn return_url(&self) -> Option<&str> {
        self.return_url.as_deref()
    }

    pub fn form(&self) -> Signal<FormController> {
        self.form.clone()
    }

    pub fn state(&self) -> Signal<LoadState> {
        self.state.clone()
    }

    pub fn set_field(&self, name: &str, value: &str) {
        self.form.update(|form| form.set_value(name, value));
    }

    /// Log in; on success navigate to the return URL or the student list
    pub async fn submit(&self) {
        if self.state.with(LoadState::is_loading) {
            return;
        }
        if !self.form.with(FormController::is_valid) {
            self.form.update(FormController::mark_all_touched);
            return;
        }

        let request = self
            .form
            .with(|form| AuthRequest::new(form.value("username"), form.value("password")));

        self.state.set(LoadState::Loading);

        match self.auth.login(&request).await {
            Ok(_) => {
                self.state.set(LoadState::Success);
                let target = self.return_url.as_deref().unwrap_or("/students");
                self.auth.router().navigate_by_url(target);
            }
            Err(err) => {
                let message = if err.status() == Some(StatusCode::UNAUTHORIZED) {
                    INVALID_CREDENTIALS.to_string()
                } else {
                    err.server_message().unwrap_or(GENERIC_ERROR).to_string()
                };
                self.state.set(LoadState::Error(message));
            }
        }
    }
}
