//! New student form

use std::collections::BTreeMap;

use super::{describe_error, FormController, LoadState};
use crate::router::{Route, Router};
use crate::signal::Signal;
use crate::students::{StudentClient, StudentRequest};

const CREATE_FAILED: &str = "Failed to create student. Please try again.";

/// Controller of the new-student form
pub struct StudentCreateView {
    client: StudentClient,
    router: Router,
    form: Signal<FormController>,
    state: Signal<LoadState>,
    field_errors: Signal<BTreeMap<String, String>>,
}

impl StudentCreateView {
    pub fn new(client: StudentClient, router: Router) -> Self {
        Self {
            client,
            router,
            form: Signal::new(FormController::student()),
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

    /// Server-side validation messages from the last submit
    pub fn field_errors(&self) -> Signal<BTreeMap<String, String>> {
        self.field_errors.clone()
    }

    pub fn set_field(&self, name: &str, value: &str) {
        self.form.update(|form| form.set_value(name, value));
    }

    /// Submit the form; on success go to the new record's detail screen
    pub async fn submit(&self) {
        if self.state.with(LoadState::is_loading) {
            return;
        }

        let request = self.form.with(|form| {
            form.level()
                .filter(|_| form.is_valid())
                .map(|level| StudentRequest::new(form.value("username"), level))
        });
        let request = match request {
            Some(request) => request,
            None => {
                self.form.update(FormController::mark_all_touched);
                return;
            }
        };

        self.state.set(LoadState::Loading);
        self.field_errors.set(BTreeMap::new());

        match self.client.create(&request).await {
            Ok(student) => {
                self.state.set(LoadState::Success);
                self.router.navigate(Route::StudentDetail(student.id));
            }
            Err(err) => match err.field_errors() {
                Some(errors) => {
                    self.field_errors.set(errors.clone());
                    self.state.set(LoadState::Idle);
                }
                None => self.state.set(LoadState::Error(describe_error(&err, CREATE_FAILED))),
            },
        }
    }
}
