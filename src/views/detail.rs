//! Single student screen with delete confirmation

use super::{describe_error, describe_lookup_error, DeleteModal, LoadState};
use crate::router::{Route, Router};
use crate::signal::Signal;
use crate::students::{Student, StudentClient};

const LOAD_FAILED: &str = "Failed to load student details.";
const DELETE_FAILED: &str = "Failed to delete student.";

/// Controller of the single-record screen
pub struct StudentDetailView {
    client: StudentClient,
    router: Router,
    id: i64,
    student: Signal<Option<Student>>,
    state: Signal<LoadState>,
    delete: Signal<DeleteModal>,
}

impl StudentDetailView {
    pub fn new(client: StudentClient, router: Router, id: i64) -> Self {
        Self {
            client,
            router,
            id,
            student: Signal::new(None),
            state: Signal::default(),
            delete: Signal::default(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn student(&self) -> Signal<Option<Student>> {
        self.student.clone()
    }

    pub fn state(&self) -> Signal<LoadState> {
        self.state.clone()
    }

    pub fn delete_modal(&self) -> Signal<DeleteModal> {
        self.delete.clone()
    }

    pub async fn load(&self) {
        self.state.set(LoadState::Loading);

        match self.client.get(self.id).await {
            Ok(student) => {
                self.student.set(Some(student));
                self.state.set(LoadState::Success);
            }
            Err(err) => self.state.set(LoadState::Error(describe_lookup_error(&err, LOAD_FAILED))),
        }
    }

    /// Ask for confirmation; a no-op until the record is loaded
    pub fn open_delete(&self) {
        if let Some(student) = self.student.get() {
            self.delete.update(|modal| modal.open_for(student));
        }
    }

    pub fn close_delete(&self) {
        self.delete.update(DeleteModal::close);
    }

    /// Delete the record awaiting confirmation and return to the list
    ///
    /// Does nothing unless the confirmation modal is open.
    pub async fn confirm_delete(&self) {
        let target = self.delete.with(|modal| {
            if modal.open && !modal.in_progress {
                modal.target.clone()
            } else {
                None
            }
        });
        let student = match target {
            Some(student) => student,
            None => return,
        };

        self.delete.update(|modal| modal.in_progress = true);
        let result = self.client.delete(student.id).await;
        self.delete.update(|modal| {
            modal.in_progress = false;
            modal.close();
        });

        match result {
            Ok(()) => {
                self.router.navigate(Route::StudentList);
            }
            Err(err) => self.state.set(LoadState::Error(describe_error(&err, DELETE_FAILED))),
        }
    }
}
