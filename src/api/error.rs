use serde::de::DeserializeOwned;

use super::types::ErrorBody;

/// Failure of a backend call, surfaced inline in the result panel.
///
/// `Display` yields only the message; the panel prefixes it with `Error: `.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// Non-2xx response; carries the body's `error` field or the endpoint's generic text.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
    /// The body was not JSON or did not match the expected shape.
    #[error("{0}")]
    Malformed(String),
}

/// The two backend endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Analyze,
    BatchAnalyze,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Analyze => "/analyze",
            Self::BatchAnalyze => "/batch-analyze",
        }
    }

    /// Message shown when a failing response carries no `error` field.
    pub fn generic_failure(self) -> &'static str {
        match self {
            Self::Analyze => "Analysis failed",
            Self::BatchAnalyze => "Batch analysis failed",
        }
    }
}

/// Turn a status code and raw body into a typed result.
///
/// The body is parsed as JSON first regardless of status, so a non-JSON error page is
/// reported as a parse failure rather than a server error.
pub(crate) fn interpret_response<T: DeserializeOwned>(
    endpoint: Endpoint,
    status: u16,
    body: &str,
) -> Result<T, RequestError> {
    let value: serde_json::Value =
        serde_json::from_str(body.trim()).map_err(|err| RequestError::Malformed(err.to_string()))?;
    if !(200..300).contains(&status) {
        let message = serde_json::from_value::<ErrorBody>(value)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| endpoint.generic_failure().to_string());
        return Err(RequestError::Server { status, message });
    }
    serde_json::from_value(value).map_err(|err| RequestError::Malformed(err.to_string()))
}
