//! The generic request primitive that every resource call goes through.
//!
//! A request is described by [RequestOptions], encoded by [prepare] into a
//! [PreparedRequest] and handed to a [Transport]. [RequestClient::send]
//! resolves exactly once: there is no retry, no timeout and no way to cancel
//! a request once it has been sent.

use std::{fmt, sync::Arc};

use async_trait::async_trait;

use crate::{
    html::format_number,
    logging::{log_request, log_response},
};

/// The HTTP methods the dashboard uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flat value that can be sent as a query parameter or a form field.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Text(text) => f.write_str(text),
            Primitive::Integer(value) => write!(f, "{value}"),
            Primitive::Number(value) => f.write_str(&format_number(*value)),
            Primitive::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::Text(value.to_owned())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::Text(value)
    }
}

impl From<&String> for Primitive {
    fn from(value: &String) -> Self {
        Primitive::Text(value.clone())
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Primitive::Integer(value)
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Primitive::Integer(value.into())
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::Number(value)
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Bool(value)
    }
}

/// Key/value pairs sent with a request, kept in insertion order.
///
/// Inserting a key that is already present replaces its value without moving
/// it, so the order of a query string only depends on when a key was first
/// added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    entries: Vec<(String, Primitive)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [Payload::insert].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Primitive>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Primitive>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, existing_value)) => *existing_value = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Primitive> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Primitive)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Payload
where
    K: Into<String>,
    V: Into<Primitive>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Payload::new();
        iter.into_iter()
            .for_each(|(key, value)| payload.insert(key, value));
        payload
    }
}

/// What to send: the method, the URL and an optional flat payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub url: String,
    pub data: Option<Payload>,
}

impl RequestOptions {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Payload) -> Self {
        self.data = Some(data);
        self
    }
}

/// A request whose payload has been placed in either the URL or the body.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    /// The entries of the multipart form body, if there is a body.
    pub form: Option<Payload>,
}

/// Encode `options` for the transport.
///
/// GET payloads are appended to the URL as `key=value` pairs joined by `&`.
/// Values are inserted verbatim without percent-encoding, callers must make
/// sure they are safe to put in a URL. Any other method sends the payload as
/// a multipart form and leaves the URL untouched.
pub fn prepare(options: &RequestOptions) -> PreparedRequest {
    match (&options.data, options.method) {
        (Some(data), Method::Get) => PreparedRequest {
            method: Method::Get,
            url: append_query(&options.url, data),
            form: None,
        },
        (data, method) => PreparedRequest {
            method,
            url: options.url.clone(),
            form: data.clone(),
        },
    }
}

fn append_query(url: &str, data: &Payload) -> String {
    if data.is_empty() {
        return url.to_owned();
    }

    let query = data
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!("{url}?{query}")
}

/// The raw status and body returned by a [Transport].
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Moves a [PreparedRequest] over the network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` once.
    ///
    /// # Errors
    /// Returns [RequestError::Transport] if the request could not be sent or
    /// no response was received.
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse, RequestError>;
}

/// The ways a request can fail before the server's answer is inspected.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum RequestError {
    /// The request could not be opened or sent, e.g. a malformed URL or a
    /// refused connection.
    #[error("could not send request: {0}")]
    Transport(String),

    /// The server answered with a status outside of the 2xx range.
    #[error("the server responded with status {0}")]
    HttpStatus(u16),

    /// The server answered with a 2xx status but the body was not JSON.
    #[error("the response body is not valid JSON: {0}")]
    InvalidBody(String),
}

/// Sends requests through a shared [Transport].
#[derive(Clone)]
pub struct RequestClient {
    transport: Arc<dyn Transport>,
}

impl RequestClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send a single request and parse the JSON body of the response.
    ///
    /// A 2xx status only means the transport succeeded. Whether the server
    /// accepted the request is up to the caller to check in the body.
    ///
    /// # Errors
    /// Returns a [RequestError] if the request could not be sent, the status
    /// is not 2xx or the body is not JSON.
    pub async fn send(&self, options: RequestOptions) -> Result<serde_json::Value, RequestError> {
        let request = prepare(&options);
        log_request(&request);

        let response = self
            .transport
            .send(request)
            .await
            .inspect_err(|error| tracing::warn!("{} {} failed: {error}", options.method, options.url))?;

        log_response(response.status, &response.body);

        if !(200..300).contains(&response.status) {
            return Err(RequestError::HttpStatus(response.status));
        }

        serde_json::from_str(&response.body)
            .map_err(|error| RequestError::InvalidBody(error.to_string()))
    }
}
