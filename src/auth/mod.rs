//! Authentication state for the student records client

mod session;
mod storage;
mod types;

use log::info;
use reqwest::Client;
use std::sync::Arc;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::router::{Route, Router};
use crate::signal::Signal;

pub use session::*;
pub use storage::*;
pub use types::*;

/// Holder of the authentication state
///
/// The token and username live in [`TokenStorage`]; the two signals mirror
/// them for renderers. There is no expiry tracking and no refresh: an expired
/// token shows up as a 401 on whatever request uses it next.
#[derive(Clone)]
pub struct Auth {
    /// HTTP client used for requests
    client: Client,

    /// Client options
    options: ClientOptions,

    /// Durable storage for token and username
    storage: Arc<dyn TokenStorage>,

    is_authenticated: Signal<bool>,

    current_user: Signal<Option<String>>,

    router: Router,
}

impl Auth {
    /// Create a new Auth holder, restoring any session found in `storage`
    pub(crate) fn new(client: Client, options: ClientOptions, storage: Arc<dyn TokenStorage>) -> Self {
        let stored = Session::load(storage.as_ref());
        let is_authenticated = Signal::new(stored.is_some());
        let current_user = Signal::new(Session::username(storage.as_ref()));
        let router = Router::new(is_authenticated.clone());

        Self {
            client,
            options,
            storage,
            is_authenticated,
            current_user,
            router,
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/api/auth{}", self.options.api_url, path)
    }

    async fn authenticate(&self, path: &str, request: &AuthRequest) -> Result<AuthResponse, Error> {
        let url = self.get_auth_url(path);

        let response = Fetch::post(&self.client, &url)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .json(request)?
            .execute::<AuthResponse>()
            .await?;

        let session = Session::from_response(&response, &request.username);
        if let Err(err) = session.persist(self.storage.as_ref()) {
            Session::clear(self.storage.as_ref());
            return Err(err);
        }
        self.is_authenticated.set(true);
        self.current_user.set(Some(request.username.clone()));

        Ok(response)
    }

    /// Log in with a username and password
    pub async fn login(&self, request: &AuthRequest) -> Result<AuthResponse, Error> {
        let response = self.authenticate("/login", request).await?;
        info!("logged in as {}", request.username);
        Ok(response)
    }

    /// Register a new account; the returned token logs the user in
    pub async fn register(&self, request: &AuthRequest) -> Result<AuthResponse, Error> {
        let response = self.authenticate("/register", request).await?;
        info!("registered and logged in as {}", request.username);
        Ok(response)
    }

    /// Forget the session and go to the login screen
    pub fn logout(&self) {
        Session::clear(self.storage.as_ref());
        self.is_authenticated.set(false);
        self.current_user.set(None);
        info!("logged out");
        self.router.navigate(Route::login());
    }

    /// Whether a session is held
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated.get()
    }

    /// Observable authentication flag
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        self.is_authenticated.clone()
    }

    /// The logged-in username
    pub fn current_user(&self) -> Option<String> {
        self.current_user.get()
    }

    /// Observable logged-in username
    pub fn current_user_signal(&self) -> Signal<Option<String>> {
        self.current_user.clone()
    }

    /// The stored bearer token
    pub fn get_token(&self) -> Option<String> {
        Session::token(self.storage.as_ref())
    }

    /// The storage holding the session
    pub fn storage(&self) -> Arc<dyn TokenStorage> {
        Arc::clone(&self.storage)
    }

    /// The guarded navigator bound to this auth state
    pub fn router(&self) -> &Router {
        &self.router
    }
}
