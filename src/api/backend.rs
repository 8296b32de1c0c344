//! Blocking HTTP transport used by the native runner.

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::{Endpoint, RequestError, interpret_response};
use super::types::{AnalyzeRequest, BatchAnalysis, BatchAnalyzeRequest, SingleAnalysis};
use crate::config::{ClientConfig, ConfigError, DEFAULT_NATIVE_BASE_URL};
use crate::http_client;

/// Anything that can answer the two sentiment endpoints.
///
/// Implementations are called from worker threads and must not touch the document.
pub trait SentimentBackend: Send + Sync {
    fn analyze(&self, request: &AnalyzeRequest) -> Result<SingleAnalysis, RequestError>;
    fn batch_analyze(&self, request: &BatchAnalyzeRequest) -> Result<BatchAnalysis, RequestError>;
}

/// [`SentimentBackend`] over HTTP with bounded response reads.
#[derive(Clone)]
pub struct HttpBackend {
    agent: ureq::Agent,
    base: Url,
    max_response_bytes: usize,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: http_client::agent(config.timeouts()),
            base: config.base_url_or(DEFAULT_NATIVE_BASE_URL)?,
            max_response_bytes: config.max_response_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<T, RequestError> {
        let url = super::endpoint_url(&self.base, endpoint)
            .map_err(|err| RequestError::Transport(err.to_string()))?;
        tracing::debug!("POST {url}");
        let request = self
            .agent
            .post(url.as_str())
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");

        let response = match request.send_json(body) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = http_client::read_body_limited(response, self.max_response_bytes)
                    .map_err(RequestError::Malformed)?;
                return interpret_response(endpoint, code, &body);
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(RequestError::Transport(err.to_string()));
            }
        };
        let status = response.status();
        let body = http_client::read_body_limited(response, self.max_response_bytes)
            .map_err(RequestError::Malformed)?;
        interpret_response(endpoint, status, &body)
    }
}

impl SentimentBackend for HttpBackend {
    fn analyze(&self, request: &AnalyzeRequest) -> Result<SingleAnalysis, RequestError> {
        self.post_json(Endpoint::Analyze, request)
    }

    fn batch_analyze(&self, request: &BatchAnalyzeRequest) -> Result<BatchAnalysis, RequestError> {
        self.post_json(Endpoint::BatchAnalyze, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_server::serve_once;

    fn backend_for(url: String) -> HttpBackend {
        HttpBackend::new(&ClientConfig {
            base_url: url,
            ..ClientConfig::default()
        })
        .unwrap()
    }

    fn json_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn analyze_posts_text_and_parses_success() {
        let body = r#"{"sentiment":"positive","confidence":0.92,"scores":{"pos":0.8,"neg":0.0,"neu":0.2,"compound":0.876}}"#;
        let (url, requests) = serve_once(json_response("200 OK", body));
        let result = backend_for(url)
            .analyze(&AnalyzeRequest {
                text: "I love this!".to_string(),
            })
            .unwrap();
        assert_eq!(result.sentiment.as_str(), "positive");

        let raw = requests.recv().unwrap();
        assert!(raw.starts_with("POST /analyze "));
        assert!(raw.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(raw.contains(r#"{"text":"I love this!"}"#));
    }

    #[test]
    fn server_error_surfaces_error_field() {
        let (url, _) = serve_once(json_response("500 Internal Server Error", r#"{"error":"boom"}"#));
        let err = backend_for(url)
            .analyze(&AnalyzeRequest {
                text: "hi".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn batch_posts_texts_to_batch_endpoint() {
        let body = r#"{"results":[],"summary":{"total_texts":0,"sentiment_distribution":{"positive":0,"negative":0,"neutral":0},"average_confidence":0.0}}"#;
        let (url, requests) = serve_once(json_response("200 OK", body));
        backend_for(url)
            .batch_analyze(&BatchAnalyzeRequest {
                texts: vec!["a".into(), "b".into(), "c".into()],
            })
            .unwrap();
        let raw = requests.recv().unwrap();
        assert!(raw.starts_with("POST /batch-analyze "));
        assert!(raw.contains(r#"{"texts":["a","b","c"]}"#));
    }

    #[test]
    fn connection_refused_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = backend_for(format!("http://{addr}"))
            .analyze(&AnalyzeRequest {
                text: "hi".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
    }
}
