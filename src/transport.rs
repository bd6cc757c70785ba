//! The [Transport] used outside of tests, backed by `reqwest`.

use async_trait::async_trait;
use reqwest::{
    Client, Url,
    multipart::Form,
};

use crate::{
    Error,
    request::{Method, Payload, PreparedRequest, RequestError, Transport, TransportResponse},
};

/// Sends requests to the dashboard API at `base_url`.
///
/// Request URLs are resolved by appending them to the base URL, so
/// `http://localhost:8000` and `/account?account_id=1` give
/// `http://localhost:8000/account?account_id=1`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http: Client,
}

impl HttpTransport {
    /// # Errors
    /// Returns [Error::HttpClient] if the HTTP client could not be built.
    pub fn new(base_url: Url) -> Result<Self, Error> {
        let http = Client::builder()
            .build()
            .map_err(|error| Error::HttpClient(error.to_string()))?;

        Ok(Self {
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse, RequestError> {
        let url = format!("{}{}", self.base_url, request.url);
        let mut builder = self.http.request(to_reqwest_method(request.method), url);

        if let Some(form) = &request.form {
            builder = builder.multipart(to_multipart(form));
        }

        let response = builder
            .send()
            .await
            .map_err(|error| RequestError::Transport(error.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| RequestError::Transport(error.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_multipart(payload: &Payload) -> Form {
    payload.iter().fold(Form::new(), |form, (name, value)| {
        form.text(name.to_owned(), value.to_string())
    })
}
