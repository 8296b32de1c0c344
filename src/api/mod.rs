//! Backend contract: wire types, error mapping and transports.

mod error;
mod types;

#[cfg(not(target_arch = "wasm32"))]
mod backend;
#[cfg(target_arch = "wasm32")]
pub(crate) mod fetch;

pub use error::{Endpoint, RequestError};
pub use types::{
    AnalyzeRequest, BatchAnalysis, BatchAnalyzeRequest, BatchItem, BatchSummary,
    SentimentClass, SentimentDistribution, SentimentLabel, SentimentScores, SingleAnalysis,
};

#[cfg(not(target_arch = "wasm32"))]
pub use backend::{HttpBackend, SentimentBackend};
#[cfg(target_arch = "wasm32")]
pub use fetch::FetchBackend;

/// Resolve an endpoint against a base URL, keeping any path prefix on the base.
pub fn endpoint_url(base: &url::Url, endpoint: Endpoint) -> Result<url::Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(endpoint.path().trim_start_matches('/'))
}

/// Request target for `endpoint`: the bare path (same origin) when `base_url` is empty,
/// otherwise an absolute URL under it.
pub fn request_target(base_url: &str, endpoint: Endpoint) -> Result<String, url::ParseError> {
    match base_url.trim() {
        "" => Ok(endpoint.path().to_string()),
        base => endpoint_url(&url::Url::parse(base)?, endpoint).map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_base_targets_same_origin() {
        assert_eq!(request_target("", Endpoint::Analyze).unwrap(), "/analyze");
        assert_eq!(
            request_target("  ", Endpoint::BatchAnalyze).unwrap(),
            "/batch-analyze"
        );
        assert_eq!(
            request_target("http://api.test:8080/", Endpoint::Analyze).unwrap(),
            "http://api.test:8080/analyze"
        );
        assert!(request_target("not a url", Endpoint::Analyze).is_err());
    }

    #[test]
    fn endpoint_url_joins_root_and_prefixed_bases() {
        let root = url::Url::parse("http://127.0.0.1:5000").unwrap();
        assert_eq!(
            endpoint_url(&root, Endpoint::Analyze).unwrap().as_str(),
            "http://127.0.0.1:5000/analyze"
        );
        let prefixed = url::Url::parse("https://host.test/sentiment").unwrap();
        assert_eq!(
            endpoint_url(&prefixed, Endpoint::BatchAnalyze).unwrap().as_str(),
            "https://host.test/sentiment/batch-analyze"
        );
    }
}
