//! Client-side validation of upload candidates.

use crate::config::FlowConfig;
use crate::types::{ByteSize, Candidate, FlowError};

/// Check a candidate against the configured size limit and MIME prefix.
///
/// The size is checked first: an oversized file is rejected as
/// [`FlowError::TooLarge`] whatever its type, and never has to be read.
///
/// # Errors
///
/// Returns [`FlowError::TooLarge`] if `candidate.size` exceeds
/// `config.max_file_bytes` (the limit itself is accepted).
/// Returns [`FlowError::InvalidType`] if the MIME type does not start
/// with `config.accepted_mime_prefix`.
pub fn validate_candidate(candidate: &Candidate, config: &FlowConfig) -> Result<(), FlowError> {
    if candidate.size > config.max_file_bytes {
        return Err(FlowError::TooLarge {
            size: candidate.size,
            max_size: ByteSize(config.max_file_bytes),
        });
    }
    if !has_accepted_type(&candidate.mime_type, &config.accepted_mime_prefix) {
        return Err(FlowError::InvalidType {
            mime_type: candidate.mime_type.clone(),
        });
    }
    Ok(())
}

/// MIME types are case-insensitive, so `IMAGE/PNG` is accepted too.
fn has_accepted_type(mime_type: &str, prefix: &str) -> bool {
    mime_type
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_FILE_BYTES;

    fn check(mime: &str, size: u64) -> Result<(), FlowError> {
        validate_candidate(&Candidate::new("f", mime, size), &FlowConfig::default())
    }

    #[test]
    fn accepts_common_image_types() {
        for mime in ["image/png", "image/jpeg", "image/webp", "image/gif", "image/svg+xml"] {
            assert_eq!(check(mime, 1024), Ok(()), "{mime}");
        }
    }

    #[test]
    fn rejects_non_image_types() {
        for mime in ["text/plain", "application/pdf", "video/mp4", "", "image", "imag/png"] {
            assert!(
                matches!(check(mime, 1024), Err(FlowError::InvalidType { .. })),
                "{mime:?} should be rejected"
            );
        }
    }

    #[test]
    fn type_check_is_case_insensitive() {
        assert_eq!(check("IMAGE/PNG", 10), Ok(()));
    }

    #[test]
    fn limit_is_inclusive() {
        assert_eq!(check("image/png", DEFAULT_MAX_FILE_BYTES), Ok(()));
    }

    #[test]
    fn one_byte_over_is_too_large() {
        assert_eq!(
            check("image/png", DEFAULT_MAX_FILE_BYTES + 1),
            Err(FlowError::TooLarge {
                size: DEFAULT_MAX_FILE_BYTES + 1,
                max_size: ByteSize(DEFAULT_MAX_FILE_BYTES),
            })
        );
    }

    #[test]
    fn oversize_wins_over_bad_type() {
        for mime in ["text/plain", "image/png", ""] {
            assert!(
                matches!(
                    check(mime, DEFAULT_MAX_FILE_BYTES + 1),
                    Err(FlowError::TooLarge { .. })
                ),
                "{mime:?}"
            );
        }
    }

    #[test]
    fn multibyte_mime_does_not_panic() {
        assert!(matches!(
            check("ïmage/png", 1),
            Err(FlowError::InvalidType { .. })
        ));
    }

    #[test]
    fn custom_limit() {
        let config = FlowConfig {
            max_file_bytes: 100,
            ..FlowConfig::default()
        };
        let candidate = Candidate::new("a.png", "image/png", 101);
        assert!(validate_candidate(&candidate, &config).is_err());
    }
}
