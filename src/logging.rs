//! Logging setup and the request/response logging used by the request client.

use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

use crate::request::{Payload, PreparedRequest};

/// Bodies longer than this many characters are truncated in `info` logs.
///
/// The full body is still logged at the `debug` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

const REDACTED_FIELDS: [&str; 2] = ["password", "confirm_password"];

/// Install a global subscriber that writes to stderr.
///
/// The filter is read from `RUST_LOG` and falls back to `default_directive`,
/// e.g. "info" or "budget_dashboard=debug".
///
/// # Errors
/// Returns an error if a global subscriber has already been installed.
pub fn setup_logging(default_directive: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_log)
        .try_init()
}

/// Log an outgoing request with its password fields redacted.
pub fn log_request(request: &PreparedRequest) {
    let url = redact_all(&request.url);
    let body = request
        .form
        .as_ref()
        .map(|form| redact_all(&form_text(form)))
        .unwrap_or_default();

    match truncate(&body) {
        Some(truncated) => {
            tracing::info!("Sending request: {} {url}\nbody: {truncated}...", request.method);
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Sending request: {} {url}\nbody: {body:?}", request.method),
    }
}

/// Log the status and body of a response.
pub fn log_response(status: u16, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Received response: {status}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Received response: {status}\nbody: {body:?}"),
    }
}

fn form_text(form: &Payload) -> String {
    form.iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn redact_all(text: &str) -> String {
    REDACTED_FIELDS
        .iter()
        .fold(text.to_owned(), |text, field| redact_password(&text, field))
}

fn redact_password(form_text: &str, field_name: &str) -> String {
    let needle = format!("{field_name}=");

    let start = match form_text
        .match_indices(&needle)
        .find(|(position, _)| {
            *position == 0 || matches!(form_text.as_bytes()[position - 1], b'&' | b'?')
        })
        .map(|(position, _)| position)
    {
        Some(position) => position,
        None => return form_text.to_owned(),
    };

    let end = form_text[start..]
        .find('&')
        .map(|end| start + end)
        .unwrap_or(form_text.len());

    format!(
        "{}{needle}********{}",
        &form_text[..start],
        &form_text[end..]
    )
}

/// The first [LOG_BODY_LENGTH_LIMIT] characters of `body`, if it is longer.
fn truncate(body: &str) -> Option<&str> {
    body.char_indices()
        .nth(LOG_BODY_LENGTH_LIMIT)
        .map(|(end, _)| &body[..end])
}
