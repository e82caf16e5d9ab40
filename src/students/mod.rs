//! Resource client for the `/api/students` endpoints

mod query;
mod types;

use reqwest::Client;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::{BearerInterceptor, Fetch, FetchBuilder};

pub use query::*;
pub use types::*;

/// Client for student records
///
/// One method per endpoint. Responses come back as the server sent them and
/// errors are returned unchanged for the caller to classify.
#[derive(Clone)]
pub struct StudentClient {
    client: Client,
    options: ClientOptions,
    interceptor: BearerInterceptor,
}

impl StudentClient {
    /// Create a new StudentClient
    pub(crate) fn new(client: Client, options: ClientOptions, interceptor: BearerInterceptor) -> Self {
        Self {
            client,
            options,
            interceptor,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/api/students{}", self.options.api_url, path)
    }

    fn prepare<'a>(&self, fetch: FetchBuilder<'a>) -> FetchBuilder<'a> {
        fetch
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
            .intercept(&self.interceptor)
    }

    /// `GET /api/students`
    pub async fn list(&self, query: &StudentQuery) -> Result<StudentPage, Error> {
        let url = self.get_url("");
        self.prepare(Fetch::get(&self.client, &url))
            .query(query.to_builder().into_params())
            .execute::<StudentPage>()
            .await
    }

    /// `GET /api/students/{id}`
    pub async fn get(&self, id: i64) -> Result<Student, Error> {
        let url = self.get_url(&format!("/{}", id));
        self.prepare(Fetch::get(&self.client, &url))
            .execute::<Student>()
            .await
    }

    /// `POST /api/students`
    pub async fn create(&self, request: &StudentRequest) -> Result<Student, Error> {
        let url = self.get_url("");
        self.prepare(Fetch::post(&self.client, &url))
            .json(request)?
            .execute::<Student>()
            .await
    }

    /// `PUT /api/students/{id}`
    pub async fn update(&self, id: i64, request: &StudentRequest) -> Result<Student, Error> {
        let url = self.get_url(&format!("/{}", id));
        self.prepare(Fetch::put(&self.client, &url))
            .json(request)?
            .execute::<Student>()
            .await
    }

    /// `DELETE /api/students/{id}`
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        let url = self.get_url(&format!("/{}", id));
        self.prepare(Fetch::delete(&self.client, &url))
            .execute_empty()
            .await
    }

    /// `GET /api/students/search`, matching id or username substring
    pub async fn search(&self, text: &str, query: &StudentQuery) -> Result<StudentPage, Error> {
        let url = self.get_url("/search");
        self.prepare(Fetch::get(&self.client, &url))
            .query(query.to_search_builder(text).into_params())
            .execute::<StudentPage>()
            .await
    }

    /// `GET /api/students/level/{level}`
    pub async fn by_level(&self, level: Level, query: &StudentQuery) -> Result<StudentPage, Error> {
        let url = self.get_url(&format!("/level/{}", level));
        self.prepare(Fetch::get(&self.client, &url))
            .query(query.to_builder().into_params())
            .execute::<StudentPage>()
            .await
    }
}
