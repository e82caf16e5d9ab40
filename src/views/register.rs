//! Account registration screen

use std::collections::BTreeMap;

use super::{FormController, LoadState, GENERIC_ERROR};
use crate::auth::{Auth, AuthRequest};
use crate::router::Route;
use crate::signal::Signal;

/// Controller of the registration form
///
/// A successful registration logs the new account in.
pub struct RegisterView {
    auth: Auth,
    form: Signal<FormController>,
    state: Signal<LoadState>,
    field_errors: Signal<BTreeMap<String, String>>,
}

impl RegisterView {
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            form: Signal::new(FormController::credentials()),
            state: Signal::default(),
            field_errors: Signal::default(),
        }
    }

    pub fn form(&self) -> Signal<FormController> {
        self.form.clone()
    }

    pub fn state(&self) -> Signal<LoadState> {
        self.state.clone()
    }

    pub fn field_errors(&self) -> Signal<BTreeMap<String, String>> {
        self.field_errors.clone()
    }

    pub fn set_field(&self, name: &str, value: &str) {
        self.form.update(|form| form.set_value(name, value));
    }

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
        self.field_errors.set(BTreeMap::new());

        match self.auth.register(&request).await {
            Ok(_) => {
                self.state.set(LoadState::Success);
                self.auth.router().navigate(Route::StudentList);
            }
            Err(err) => match err.field_errors() {
                Some(errors) => {
                    self.field_errors.set(errors.clone());
                    self.state.set(LoadState::Idle);
                }
                None => {
                    let message = err.server_message().unwrap_or(GENERIC_ERROR).to_string();
                    self.state.set(LoadState::Error(message));
                }
            },
        }
    }
}
