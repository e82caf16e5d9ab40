//! Student Records Client Library
//!
//! A Rust client for the student records API: login and registration with a
//! persisted bearer token, guarded navigation between screens, a resource
//! client for the `/api/students` endpoints and headless controllers for the
//! list, detail, create, edit, login and register screens.

pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod router;
pub mod signal;
pub mod students;
pub mod views;

use reqwest::Client;
use std::sync::Arc;

use crate::auth::{Auth, MemoryStorage, TokenStorage};
use crate::config::ClientOptions;
use crate::fetch::BearerInterceptor;
use crate::router::Router;
use crate::students::StudentClient;
use crate::views::{
    LoginView, Navbar, RegisterView, StudentCreateView, StudentDetailView, StudentEditView,
    StudentListView,
};

/// The main entry point for the student records client
pub struct StudentRecords {
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth state holder
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
    students: StudentClient,
}

impl StudentRecords {
    /// Create a client for the API at `api_url` with in-memory storage
    ///
    /// # Example
    ///
    /// ```
    /// use student_records::StudentRecords;
    ///
    /// let records = StudentRecords::new("http://localhost:8080");
    /// assert!(!records.auth().is_authenticated());
    /// ```
    pub fn new(api_url: &str) -> Self {
        Self::new_with_options(ClientOptions::default().with_api_url(api_url))
    }

    /// Create a client with custom options and in-memory storage
    pub fn new_with_options(options: ClientOptions) -> Self {
        Self::new_with_storage(options, Arc::new(MemoryStorage::new()))
    }

    /// Create a client whose session lives in `storage`
    ///
    /// A token already present in `storage` is picked up, so the client
    /// starts authenticated.
    pub fn new_with_storage(options: ClientOptions, storage: Arc<dyn TokenStorage>) -> Self {
        let http_client = Client::new();

        let auth = Auth::new(http_client.clone(), options.clone(), Arc::clone(&storage));
        let interceptor = BearerInterceptor::new(storage);
        let students = StudentClient::new(http_client.clone(), options.clone(), interceptor);

        Self {
            http_client,
            auth,
            options,
            students,
        }
    }

    /// Get a reference to the auth state holder
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Get a reference to the guarded navigator
    pub fn router(&self) -> &Router {
        self.auth.router()
    }

    /// Get a reference to the student resource client
    pub fn students(&self) -> &StudentClient {
        &self.students
    }

    pub fn login_view(&self) -> LoginView {
        LoginView::new(self.auth.clone())
    }

    pub fn register_view(&self) -> RegisterView {
        RegisterView::new(self.auth.clone())
    }

    pub fn navbar(&self) -> Navbar {
        Navbar::new(self.auth.clone())
    }

    pub fn list_view(&self) -> StudentListView {
        StudentListView::new(self.students.clone(), &self.options)
    }

    pub fn detail_view(&self, id: i64) -> StudentDetailView {
        StudentDetailView::new(self.students.clone(), self.router().clone(), id)
    }

    pub fn create_view(&self) -> StudentCreateView {
        StudentCreateView::new(self.students.clone(), self.router().clone())
    }

    pub fn edit_view(&self, id: i64) -> StudentEditView {
        StudentEditView::new(self.students.clone(), self.router().clone(), id)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{AuthRequest, FileStorage, MemoryStorage, TokenStorage};
    pub use crate::config::ClientOptions;
    pub use crate::error::{Error, ErrorKind};
    pub use crate::router::Route;
    pub use crate::students::{Level, SortDirection, Student, StudentQuery, StudentRequest};
    pub use crate::views::LoadState;
    pub use crate::StudentRecords;
}
