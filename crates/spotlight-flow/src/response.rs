//! Interpretation of the analysis endpoint's response.
//!
//! The endpoint answers in one of two shapes: a JSON object (when it
//! honors `Accept: application/json`) or a rendered HTML page. Both are
//! reduced here to a single [`ImageRefs`] or a [`FlowError`], so the
//! rest of the flow never branches on the format.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::markup;
use crate::stats;
use crate::types::{AnalysisResult, FlowError};

/// An HTTP response as received by the browser layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Whether the server declared a JSON body.
    #[must_use]
    pub fn declares_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }

    fn status_message(&self) -> String {
        format!("HTTP error! status: {}", self.status)
    }
}

/// The JSON result object. All fields are optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StructuredBody {
    #[serde(default)]
    pub uploaded_image: Option<String>,
    #[serde(default)]
    pub result_image: Option<String>,
    #[serde(default, deserialize_with = "object_or_absent")]
    pub stats: Option<Map<String, Value>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A `stats` value that is not an object (`[]`, a scalar, `null`) is
/// treated as absent rather than failing the whole response.
fn object_or_absent<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => Some(map),
        _ => None,
    })
}

/// Image references and statistics from a successful response, before
/// cache-busting.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRefs {
    pub uploaded_image: String,
    pub result_image: String,
    pub stats: Option<Map<String, Value>>,
}

impl ImageRefs {
    /// Build the renderable result, suffixing both references with the
    /// cache-busting `stamp` (epoch milliseconds).
    #[must_use]
    pub fn into_result(self, stamp: u64) -> AnalysisResult {
        AnalysisResult {
            uploaded_image: crate::render::cache_bust(&self.uploaded_image, stamp),
            result_image: crate::render::cache_bust(&self.result_image, stamp),
            stats: self.stats.as_ref().map(stats::stat_cards).unwrap_or_default(),
        }
    }
}

/// Reduce a response to image references or a flow error.
///
/// JSON is tried first. A body is only treated as markup when the server
/// did not declare JSON and the body is not a JSON object.
///
/// # Errors
///
/// Returns [`FlowError::ServerReportedError`] for a non-success status
/// or a JSON `error` field (even with status 200).
/// Returns [`FlowError::UnparseableResponse`] when the body has neither
/// shape or lacks one of the two image references.
pub fn interpret(response: &RawResponse) -> Result<ImageRefs, FlowError> {
    match serde_json::from_str::<Value>(&response.body) {
        Ok(value @ Value::Object(_)) => interpret_structured(response, value),
        Ok(_) if response.declares_json() => Err(unparseable_or_status(
            response,
            "JSON body is not an object".to_owned(),
        )),
        Err(e) if response.declares_json() => {
            Err(unparseable_or_status(response, format!("invalid JSON: {e}")))
        }
        _ => interpret_markup(response),
    }
}

/// Reduce a response straight to a renderable result.
///
/// # Errors
///
/// See [`interpret`].
pub fn outcome(response: &RawResponse, stamp: u64) -> Result<AnalysisResult, FlowError> {
    interpret(response).map(|refs| refs.into_result(stamp))
}

fn interpret_structured(response: &RawResponse, value: Value) -> Result<ImageRefs, FlowError> {
    let body: StructuredBody = serde_json::from_value(value)
        .map_err(|e| unparseable_or_status(response, format!("unexpected JSON shape: {e}")))?;

    let error = body.error.filter(|e| !e.trim().is_empty());
    if !response.is_success() {
        return Err(FlowError::ServerReportedError(
            error.unwrap_or_else(|| response.status_message()),
        ));
    }
    if let Some(error) = error {
        return Err(FlowError::ServerReportedError(error));
    }

    let uploaded_image = non_empty(body.uploaded_image)
        .ok_or_else(|| FlowError::UnparseableResponse("missing uploaded_image".into()))?;
    let result_image = non_empty(body.result_image)
        .ok_or_else(|| FlowError::UnparseableResponse("missing result_image".into()))?;

    Ok(ImageRefs {
        uploaded_image,
        result_image,
        stats: body.stats,
    })
}

fn interpret_markup(response: &RawResponse) -> Result<ImageRefs, FlowError> {
    if !response.is_success() {
        // Plain-text bodies carry the server's message; error pages are
        // not worth showing verbatim.
        let text = response.body.trim();
        let message = if text.is_empty() || text.starts_with('<') {
            response.status_message()
        } else {
            text.to_owned()
        };
        return Err(FlowError::ServerReportedError(message));
    }

    let refs = markup::extract_image_refs(&response.body)?;
    Ok(ImageRefs {
        uploaded_image: refs.uploaded_image,
        result_image: refs.result_image,
        stats: None,
    })
}

fn unparseable_or_status(response: &RawResponse, detail: String) -> FlowError {
    if response.is_success() {
        FlowError::UnparseableResponse(detail)
    } else {
        FlowError::ServerReportedError(response.status_message())
    }
}

fn non_empty(reference: Option<String>) -> Option<String> {
    reference.filter(|r| !r.trim().is_empty())
}
