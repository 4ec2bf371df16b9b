//! Local image previews via Blob URLs.
//!
//! The chosen file is shown before upload by wrapping its bytes in a
//! `Blob` and handing the browser an object URL. [`PreviewUrl`] owns
//! that URL and revokes it when dropped, so replacing or clearing the
//! selection releases the Blob.

use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur while creating a preview URL.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for PreviewError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// An object URL for a local image, revoked on drop.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewUrl(String);

impl PreviewUrl {
    /// Create an object URL for `bytes` typed as `mime_type`.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::JsError`] if Blob or URL creation fails.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, PreviewError> {
        let uint8_array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::new();
        parts.push(&uint8_array);

        let opts = BlobPropertyBag::new();
        opts.set_type(mime_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

        let url = web_sys::Url::create_object_url_with_blob(&blob)?;
        Ok(Self(url))
    }

    /// The `blob:` URL, for use as an `<img src>`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        // Best-effort: a failed revoke only leaks the Blob until unload.
        let _ = web_sys::Url::revoke_object_url(&self.0);
    }
}
