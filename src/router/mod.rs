//! Application routes and the guarded navigator

mod guard;

use log::debug;
use std::fmt;
use url::{form_urlencoded, Url};

use crate::signal::Signal;

pub use guard::*;

/// A screen of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/auth/login`, optionally remembering where to go afterwards
    Login { return_url: Option<String> },
    /// `/auth/register`
    Register,
    /// `/students`
    StudentList,
    /// `/students/create`
    StudentCreate,
    /// `/students/{id}`
    StudentDetail(i64),
    /// `/students/{id}/edit`
    StudentEdit(i64),
}

impl Route {
    /// Plain login route
    pub fn login() -> Self {
        Route::Login { return_url: None }
    }

    /// Guard protecting this route
    pub fn guard(&self) -> Guard {
        match self {
            Route::Login { .. } | Route::Register => Guard::Guest,
            _ => Guard::Authenticated,
        }
    }

    /// Canonical path of the route
    pub fn path(&self) -> String {
        match self {
            Route::Login { return_url: None } => "/auth/login".to_string(),
            Route::Login {
                return_url: Some(url),
            } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("returnUrl", url)
                    .finish();
                format!("/auth/login?{}", query)
            }
            Route::Register => "/auth/register".to_string(),
            Route::StudentList => "/students".to_string(),
            Route::StudentCreate => "/students/create".to_string(),
            Route::StudentDetail(id) => format!("/students/{}", id),
            Route::StudentEdit(id) => format!("/students/{}/edit", id),
        }
    }

    /// Resolve a path; unknown paths fall back to the student list
    pub fn parse(path: &str) -> Route {
        let base = match Url::parse("http://app.local/") {
            Ok(base) => base,
            Err(_) => return Route::StudentList,
        };
        let url = match base.join(path) {
            Ok(url) => url,
            Err(_) => return Route::StudentList,
        };

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            ["auth"] => Route::login(),
            ["auth", "login"] => Route::Login {
                return_url: url
                    .query_pairs()
                    .find(|(key, _)| key == "returnUrl")
                    .map(|(_, value)| value.into_owned())
                    .filter(|value| !value.is_empty()),
            },
            ["auth", "register"] => Route::Register,
            ["students", "create"] => Route::StudentCreate,
            ["students", id] => id
                .parse()
                .map(Route::StudentDetail)
                .unwrap_or(Route::StudentList),
            ["students", id, "edit"] => id
                .parse()
                .map(Route::StudentEdit)
                .unwrap_or(Route::StudentList),
            _ => Route::StudentList,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Apply the route's guard, returning the route actually entered
pub fn resolve(is_authenticated: bool, target: Route) -> Route {
    match check(is_authenticated, &target) {
        GuardOutcome::Allow => target,
        GuardOutcome::Redirect(redirect) => {
            debug!("guard redirected {} to {}", target, redirect);
            redirect
        }
    }
}

/// Guarded navigator holding the current route
#[derive(Debug, Clone)]
pub struct Router {
    is_authenticated: Signal<bool>,
    current: Signal<Route>,
}

impl Router {
    /// Create a router reading the auth flag from `is_authenticated`
    ///
    /// The initial route is the application root, `/students`, after guards.
    pub fn new(is_authenticated: Signal<bool>) -> Self {
        let initial = resolve(is_authenticated.get(), Route::StudentList);
        Self {
            is_authenticated,
            current: Signal::new(initial),
        }
    }

    /// Navigate to `target`, subject to its guard
    pub fn navigate(&self, target: Route) -> Route {
        let entered = resolve(self.is_authenticated.get(), target);
        self.current.set(entered.clone());
        entered
    }

    /// Navigate to a path
    pub fn navigate_by_url(&self, url: &str) -> Route {
        self.navigate(Route::parse(url))
    }

    /// The route currently shown
    pub fn current(&self) -> Route {
        self.current.get()
    }

    /// Observable current route
    pub fn current_signal(&self) -> Signal<Route> {
        self.current.clone()
    }
}
