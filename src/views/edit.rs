//! Edit form for an existing student

use std::collections::BTreeMap;

use super::{describe_error, describe_lookup_error, FormController, LoadState};
use crate::router::{Route, Router};
use crate::signal::Signal;
use crate::students::{Student, StudentClient, StudentRequest};

const LOAD_FAILED: &str = "Failed to load student details.";
const UPDATE_FAILED: &str = "Failed to update student. Please try again.";

/// Controller of the edit form
///
/// Submission stays disabled until the form differs from the record it was
/// loaded from and passes validation.
pub struct StudentEditView {
    client: StudentClient,
    router: Router,
    id: i64,
    original: Signal<Option<Student>>,
    page_state: Signal<LoadState>,
    form: Signal<FormController>,
    state: Signal<LoadState>,
    field_errors: Signal<BTreeMap<String, String>>,
}

impl StudentEditView {
    pub fn new(client: StudentClient, router: Router, id: i64) -> Self {
        Self {
            client,
            router,
            id,
            original: Signal::new(None),
            page_state: Signal::default(),
            form: Signal::new(FormController::student()),
            state: Signal::default(),
            field_errors: Signal::default(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// The record as loaded, the dirty-check baseline
    pub fn original(&self) -> Signal<Option<Student>> {
        self.original.clone()
    }

    /// State of the initial record fetch
    pub fn page_state(&self) -> Signal<LoadState> {
        self.page_state.clone()
    }

    pub fn form(&self) -> Signal<FormController> {
        self.form.clone()
    }

    /// State of the update request
    pub fn state(&self) -> Signal<LoadState> {
        self.state.clone()
    }

    pub fn field_errors(&self) -> Signal<BTreeMap<String, String>> {
        self.field_errors.clone()
    }

    pub fn set_field(&self, name: &str, value: &str) {
        self.form.update(|form| form.set_value(name, value));
    }

    /// Fetch the record and fill the form with it
    pub async fn load(&self) {
        self.page_state.set(LoadState::Loading);

        match self.client.get(self.id).await {
            Ok(student) => {
                self.form.update(|form| {
                    form.patch_value(&[
                        ("username", student.username.as_str()),
                        ("level", student.level.as_str()),
                    ])
                });
                self.original.set(Some(student));
                self.page_state.set(LoadState::Success);
            }
            Err(err) => self
                .page_state
                .set(LoadState::Error(describe_lookup_error(&err, LOAD_FAILED))),
        }
    }

    /// Whether the form differs from the loaded record
    pub fn is_dirty(&self) -> bool {
        self.original.with(|original| match original {
            Some(original) => self.form.with(|form| {
                form.value("username") != original.username
                    || form.value("level") != original.level.as_str()
            }),
            None => false,
        })
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.is_dirty()
            && self.form.with(FormController::is_valid)
            && !self.state.with(LoadState::is_loading)
    }

    /// Submit the changes; on success go to the record's detail screen
    pub async fn submit(&self) {
        if self.state.with(LoadState::is_loading) {
            return;
        }
        if !self.form.with(FormController::is_valid) {
            self.form.update(FormController::mark_all_touched);
            return;
        }
        if !self.is_dirty() {
            return;
        }

        let request = match self.form.with(|form| {
            form.level()
                .map(|level| StudentRequest::new(form.value("username"), level))
        }) {
            Some(request) => request,
            None => return,
        };

        self.state.set(LoadState::Loading);
        self.field_errors.set(BTreeMap::new());

        match self.client.update(self.id, &request).await {
            Ok(student) => {
                self.state.set(LoadState::Success);
                self.router.navigate(Route::StudentDetail(student.id));
            }
            Err(err) => match err.field_errors() {
                Some(errors) => {
                    self.field_errors.set(errors.clone());
                    self.state.set(LoadState::Idle);
                }
                None => self.state.set(LoadState::Error(describe_error(&err, UPDATE_FAILED))),
            },
        }
    }
}
