//! Delete confirmation modal

use crate::students::Student;

/// State of the delete-confirmation modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteModal {
    pub open: bool,
    /// Record awaiting confirmation
    pub target: Option<Student>,
    /// A delete request is in flight
    pub in_progress: bool,
}

impl DeleteModal {
    /// Confirmation prompt for the current target
    pub fn message(&self) -> String {
        let username = self
            .target
            .as_ref()
            .map(|student| student.username.as_str())
            .unwrap_or("");
        format!(
            "Are you sure you want to delete student '{}'? This action cannot be undone.",
            username
        )
    }

    pub(crate) fn open_for(&mut self, student: Student) {
        self.open = true;
        self.target = Some(student);
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
        self.target = None;
    }
}
