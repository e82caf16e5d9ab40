//! HTTP request building and the request-authorization middleware

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::auth::{Session, TokenStorage};
use crate::error::{ApiErrorBody, Error};

/// Path prefix of the public auth namespace
pub const PUBLIC_AUTH_PATH: &str = "/api/auth/";

/// Whether a request URL targets the public auth endpoints
pub fn is_public_endpoint(url: &str) -> bool {
    url.contains(PUBLIC_AUTH_PATH)
}

/// Attaches the stored bearer token to outgoing requests
///
/// Requests to the public auth namespace pass through untouched, as do all
/// requests while no token is stored. A 401 coming back is returned to the
/// caller as is; nothing here retries or refreshes.
#[derive(Clone)]
pub struct BearerInterceptor {
    storage: Arc<dyn TokenStorage>,
}

impl BearerInterceptor {
    /// Create an interceptor reading tokens from `storage`
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// Apply the authorization rule to a request's headers
    pub fn intercept(&self, url: &str, headers: &mut HeaderMap) {
        if is_public_endpoint(url) {
            return;
        }

        let token = match Session::token(self.storage.as_ref()) {
            Some(token) => token,
            None => return,
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            Err(_) => warn!("stored token is not a valid header value; sending request without it"),
        }
    }
}

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        Self {
            client,
            url: url.to_string(),
            method,
            headers: HeaderMap::new(),
            query_params: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => warn!("skipping invalid header {}", name),
        }
        self
    }

    /// Add query parameters to the request, in order
    pub fn query(mut self, params: Vec<(String, String)>) -> Self {
        self.query_params.extend(params);
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(json);
        Ok(self)
    }

    /// Override the transport timeout for this request
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the request through the authorization middleware
    pub fn intercept(mut self, interceptor: &BearerInterceptor) -> Self {
        interceptor.intercept(&self.url, &mut self.headers);
        self
    }

    /// The headers that will be sent
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder, Error> {
        let mut url = Url::parse(&self.url)?;

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        debug!("{} {}", self.method, url);

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    async fn send(&self) -> Result<Response, Error> {
        let response = self.build()?.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = match response.text().await {
                Ok(text) => text,
                Err(err) => {
                    warn!("failed to read error body of {} {}: {}", self.method, self.url, err);
                    String::new()
                }
            };
            warn!("{} {} failed with status {}", self.method, self.url, status);
            return Err(Error::Api {
                status,
                body: ApiErrorBody::parse(&text),
            });
        }

        Ok(response)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let response = self.send().await?;
        let bytes = response.bytes().await?;
        let result = serde_json::from_slice::<T>(&bytes)?;
        Ok(result)
    }

    /// Execute the request, expecting no meaningful body
    pub async fn execute_empty(&self) -> Result<(), Error> {
        self.send().await?;
        Ok(())
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }

    /// Create a PUT request
    pub fn put<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PUT)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}
