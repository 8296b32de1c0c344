//! Browser transport over `window.fetch`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use super::error::{Endpoint, RequestError, interpret_response};
use super::types::{AnalyzeRequest, BatchAnalysis, BatchAnalyzeRequest, SingleAnalysis};
use crate::config::ClientConfig;

/// Posts JSON to the sentiment endpoints from the page.
///
/// An empty `base_url` keeps requests on the page's own origin.
#[derive(Clone, Debug)]
pub struct FetchBackend {
    base_url: String,
}

impl FetchBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim().to_string(),
        }
    }

    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<SingleAnalysis, RequestError> {
        self.post_json(Endpoint::Analyze, request).await
    }

    pub async fn batch_analyze(
        &self,
        request: &BatchAnalyzeRequest,
    ) -> Result<BatchAnalysis, RequestError> {
        self.post_json(Endpoint::BatchAnalyze, request).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<T, RequestError> {
        let target = super::request_target(&self.base_url, endpoint)
            .map_err(|err| RequestError::Transport(err.to_string()))?;
        let payload =
            serde_json::to_string(body).map_err(|err| RequestError::Malformed(err.to_string()))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from_str(&payload));
        let request = Request::new_with_str_and_init(&target, &init).map_err(transport)?;
        let headers = request.headers();
        headers
            .set("Content-Type", "application/json")
            .map_err(transport)?;
        headers.set("Accept", "application/json").map_err(transport)?;

        let window = web_sys::window()
            .ok_or_else(|| RequestError::Transport("No window available".to_string()))?;
        tracing::debug!("POST {target}");
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?
            .dyn_into()
            .map_err(transport)?;
        let status = response.status();
        let text = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?;
        interpret_response(endpoint, status, &text.as_string().unwrap_or_default())
    }
}

fn transport(value: JsValue) -> RequestError {
    RequestError::Transport(describe_js_error(&value))
}

fn describe_js_error(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
