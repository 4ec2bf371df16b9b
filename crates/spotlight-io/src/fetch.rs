//! Image submission via the browser `fetch` API.
//!
//! Builds a one-field multipart `FormData` around the selected file,
//! POSTs it to the analysis endpoint asking for JSON, and hands the raw
//! status, content type, and body to `spotlight_flow` for
//! interpretation.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use spotlight_flow::{AnalysisResult, FlowConfig, FlowError, ImageFile, RawResponse};
use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FilePropertyBag, FormData, Request, RequestInit, Response};

/// Errors that can occur before an HTTP response is available.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A browser API call returned an error or a required object was missing.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for FetchError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

impl From<FetchError> for FlowError {
    fn from(err: FetchError) -> Self {
        Self::NetworkFailure(err.to_string())
    }
}

/// POST `file` as the multipart field `field` to `endpoint`.
///
/// Any status code counts as a response; only failures to obtain one
/// (network down, CORS, aborted page) are errors.
///
/// # Errors
///
/// Returns [`FetchError::JsError`] if the form cannot be built, the
/// request fails at the network level, or the body cannot be read.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn post_image(
    endpoint: &str,
    field: &str,
    file: &ImageFile,
) -> Result<RawResponse, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::JsError("no global window".into()))?;

    // Rebuild a `File` so the part keeps its name and MIME type.
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(file.bytes.as_ref()));
    let opts = FilePropertyBag::new();
    opts.set_type(&file.mime_type);
    let part = web_sys::File::new_with_u8_array_sequence_and_options(&parts, &file.name, &opts)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(field, &part, &file.name)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);
    let request = Request::new_with_str_and_init(endpoint, &init)?;
    request.headers().set("Accept", "application/json")?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    let content_type = response.headers().get("content-type")?;
    let body = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    Ok(RawResponse {
        status: response.status(),
        content_type,
        body,
    })
}

/// Submit `file` and reduce the reply to a renderable result.
///
/// Result image references are cache-busted with the current time.
///
/// # Errors
///
/// Returns [`FlowError::NetworkFailure`] if no response was obtained,
/// or the error [`spotlight_flow::outcome`] derives from the response.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn analyze(config: &FlowConfig, file: &ImageFile) -> Result<AnalysisResult, FlowError> {
    info!(
        endpoint = %config.endpoint,
        name = %file.name,
        bytes = file.len(),
        "submitting image"
    );
    let response = post_image(&config.endpoint, &config.upload_field, file)
        .await
        .inspect_err(|e| warn!(error = %e, "request failed"))?;
    debug!(
        status = response.status,
        content_type = ?response.content_type,
        body_len = response.body.len(),
        "response received"
    );
    spotlight_flow::outcome(&response, spotlight_flow::now_millis())
        .inspect_err(|e| warn!(error = ?e, status = response.status, "analysis failed"))
}
