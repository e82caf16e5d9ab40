//! Navigation bar with the current user and logout

use crate::auth::Auth;
use crate::signal::Signal;

/// Header bar showing the logged-in user and a logout action
pub struct Navbar {
    auth: Auth,
}

impl Navbar {
    pub fn new(auth: Auth) -> Self {
        Self { auth }
    }

    pub fn current_user(&self) -> Signal<Option<String>> {
        self.auth.current_user_signal()
    }

    pub fn is_authenticated(&self) -> Signal<bool> {
        self.auth.is_authenticated_signal()
    }

    pub fn logout(&self) {
        self.auth.logout();
    }
}
