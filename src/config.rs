//! Configuration options for the student records client

use std::env;
use std::time::Duration;

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "STUDENT_RECORDS_API_URL";

/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_ENV: &str = "STUDENT_RECORDS_TIMEOUT_SECS";

/// Configuration options for the student records client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the records API, without trailing slash
    pub api_url: String,

    /// The request timeout. `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,

    /// Value of the `X-Client-Info` header
    pub client_info: String,

    /// Page size used by list views before the server reports one
    pub default_page_size: u32,

    /// Sort field used by list views until the user picks another
    pub default_sort_by: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            request_timeout: None,
            client_info: format!("student-records/{}", env!("CARGO_PKG_VERSION")),
            default_page_size: 10,
            default_sort_by: "id".to_string(),
        }
    }
}

impl ClientOptions {
    /// Build options from the process environment, falling back to defaults
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                options = options.with_api_url(&url);
            }
        }

        if let Ok(secs) = env::var(TIMEOUT_ENV) {
            match secs.trim().parse::<u64>() {
                Ok(secs) => options.request_timeout = Some(Duration::from_secs(secs)),
                Err(_) => log::warn!("ignoring invalid {}: {:?}", TIMEOUT_ENV, secs),
            }
        }

        options
    }

    /// Set the API base URL
    pub fn with_api_url(mut self, value: &str) -> Self {
        self.api_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }

    /// Set the default page size
    pub fn with_default_page_size(mut self, value: u32) -> Self {
        self.default_page_size = value;
        self
    }

    /// Set the default sort field
    pub fn with_default_sort_by(mut self, value: &str) -> Self {
        self.default_sort_by = value.to_string();
        self
    }
}
