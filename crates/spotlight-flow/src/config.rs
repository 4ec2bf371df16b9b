//! Upload flow configuration.

use serde::{Deserialize, Serialize};

/// Default analysis endpoint path.
pub const DEFAULT_ENDPOINT: &str = "/predict";

/// Default upload size limit: 10 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Default MIME type prefix accepted for uploads.
pub const DEFAULT_ACCEPTED_MIME_PREFIX: &str = "image/";

/// Default time a notice stays visible before dismissing itself.
pub const DEFAULT_NOTICE_TIMEOUT_MS: u32 = 5_000;

/// Default multipart field name carrying the file.
pub const DEFAULT_UPLOAD_FIELD: &str = "file";

/// Configuration for the upload flow.
///
/// Every field has a default, so a partial JSON document only needs to
/// name the values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Path (or absolute URL) the image is POSTed to.
    pub endpoint: String,

    /// Maximum accepted file size in bytes (inclusive).
    pub max_file_bytes: u64,

    /// A candidate is accepted only if its MIME type starts with this.
    pub accepted_mime_prefix: String,

    /// Milliseconds before a notice dismisses itself.
    pub notice_timeout_ms: u32,

    /// Multipart form field name for the uploaded file.
    pub upload_field: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            accepted_mime_prefix: DEFAULT_ACCEPTED_MIME_PREFIX.to_owned(),
            notice_timeout_ms: DEFAULT_NOTICE_TIMEOUT_MS,
            upload_field: DEFAULT_UPLOAD_FIELD.to_owned(),
        }
    }
}

impl FlowConfig {
    /// Parse a configuration document, falling back to defaults for
    /// missing fields.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `json` is not a valid
    /// configuration object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FlowConfig::default();
        assert_eq!(config.endpoint, "/predict");
        assert_eq!(config.max_file_bytes, 10_485_760);
        assert_eq!(config.accepted_mime_prefix, "image/");
        assert_eq!(config.notice_timeout_ms, 5_000);
        assert_eq!(config.upload_field, "file");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FlowConfig::from_json(r#"{"endpoint": "/api/detect"}"#).unwrap();
        assert_eq!(config.endpoint, "/api/detect");
        assert_eq!(config.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
    }

    #[test]
    fn json_round_trip() {
        let config = FlowConfig {
            notice_timeout_ms: 8_000,
            ..FlowConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(FlowConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(FlowConfig::from_json(r#"{"max_file_bytes": "big"}"#).is_err());
    }
}
