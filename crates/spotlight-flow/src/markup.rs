//! Image reference extraction from an HTML result page.
//!
//! Servers that do not answer with JSON render a full page instead. The
//! page is scanned leniently with `quick-xml` (HTML is not XML: void
//! elements are never closed and attributes may be unquoted) for the two
//! `<img>` elements identified by their `alt` text.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::types::FlowError;

/// `alt` text of the `<img>` showing the uploaded image.
pub const UPLOADED_ALT: &str = "Uploaded Image";

/// `alt` text of the `<img>` showing the detection result.
pub const RESULT_ALT: &str = "Detected Result";

/// The two image references scraped from a result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupRefs {
    pub uploaded_image: String,
    pub result_image: String,
}

/// Find the first `<img alt="Uploaded Image">` and
/// `<img alt="Detected Result">` in `html` and return their `src`.
///
/// # Errors
///
/// Returns [`FlowError::UnparseableResponse`] if either element (or its
/// `src`) is missing.
pub fn extract_image_refs(html: &str) -> Result<MarkupRefs, FlowError> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut uploaded = None;
    let mut result = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag) | Event::Empty(tag)) => {
                if !tag.name().as_ref().eq_ignore_ascii_case(b"img") {
                    continue;
                }
                let Some((alt, src)) = img_alt_and_src(&tag) else {
                    continue;
                };
                if uploaded.is_none() && alt == UPLOADED_ALT {
                    uploaded = Some(src);
                } else if result.is_none() && alt == RESULT_ALT {
                    result = Some(src);
                }
                if uploaded.is_some() && result.is_some() {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            // Malformed trailing markup; judge by what was found so far.
            Err(_) => break,
        }
    }

    match (uploaded, result) {
        (Some(uploaded_image), Some(result_image)) => Ok(MarkupRefs {
            uploaded_image,
            result_image,
        }),
        (None, _) => Err(FlowError::UnparseableResponse(format!(
            "no <img alt=\"{UPLOADED_ALT}\"> in page"
        ))),
        (_, None) => Err(FlowError::UnparseableResponse(format!(
            "no <img alt=\"{RESULT_ALT}\"> in page"
        ))),
    }
}

/// The `alt` and non-empty `src` of an `<img>` tag, if both are present.
fn img_alt_and_src(tag: &BytesStart<'_>) -> Option<(String, String)> {
    let mut alt = None;
    let mut src = None;
    for attr in tag.html_attributes().flatten() {
        let key = attr.key.as_ref();
        let value = || {
            attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                Cow::into_owned,
            )
        };
        if key.eq_ignore_ascii_case(b"alt") {
            alt = Some(value());
        } else if key.eq_ignore_ascii_case(b"src") {
            src = Some(value());
        }
    }
    let src = src.filter(|s| !s.trim().is_empty())?;
    Some((alt?, src.trim().to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const RESULT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Detector</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <form id="uploadForm" enctype="multipart/form-data">
        <input type="file" id="fileInput" name="file" accept="image/*" hidden>
    </form>
    <div class="results">
        <img src="static/uploads/cat.jpg" alt="Uploaded Image" class="result-img">
        <br>
        <img src="static/uploads/result_cat.jpg" alt="Detected Result" class="result-img">
    </div>
</body>
</html>"#;

    #[test]
    fn extracts_both_images() {
        let refs = extract_image_refs(RESULT_PAGE).unwrap();
        assert_eq!(refs.uploaded_image, "static/uploads/cat.jpg");
        assert_eq!(refs.result_image, "static/uploads/result_cat.jpg");
    }

    #[test]
    fn self_closing_and_reordered_attributes() {
        let html = r#"<div>
            <img alt="Detected Result" src="/r.png"/>
            <img alt="Uploaded Image" src="/u.png" />
        </div>"#;
        let refs = extract_image_refs(html).unwrap();
        assert_eq!(refs.uploaded_image, "/u.png");
        assert_eq!(refs.result_image, "/r.png");
    }

    #[test]
    fn uppercase_tags_and_unquoted_src() {
        let html = r#"<IMG SRC=/u.png ALT="Uploaded Image"><IMG ALT="Detected Result" SRC=/r.png>"#;
        let refs = extract_image_refs(html).unwrap();
        assert_eq!(refs.uploaded_image, "/u.png");
        assert_eq!(refs.result_image, "/r.png");
    }

    #[test]
    fn entities_in_src_are_unescaped() {
        let html = r#"<img alt="Uploaded Image" src="/img?a=1&amp;b=2"><img alt="Detected Result" src="/r.png">"#;
        let refs = extract_image_refs(html).unwrap();
        assert_eq!(refs.uploaded_image, "/img?a=1&b=2");
    }

    #[test]
    fn first_match_wins() {
        let html = r#"<img alt="Uploaded Image" src="/first.png">
            <img alt="Uploaded Image" src="/second.png">
            <img alt="Detected Result" src="/r.png">"#;
        assert_eq!(extract_image_refs(html).unwrap().uploaded_image, "/first.png");
    }

    #[test]
    fn missing_result_image_fails() {
        let html = r#"<html><body><img alt="Uploaded Image" src="/u.png"></body></html>"#;
        assert!(matches!(
            extract_image_refs(html),
            Err(FlowError::UnparseableResponse(_))
        ));
    }

    #[test]
    fn missing_uploaded_image_fails() {
        let html = r#"<img alt="Detected Result" src="/r.png">"#;
        assert!(matches!(
            extract_image_refs(html),
            Err(FlowError::UnparseableResponse(_))
        ));
    }

    #[test]
    fn alt_must_match_exactly() {
        let html = r#"<img alt="uploaded image" src="/u.png"><img alt="Detected Result" src="/r.png">"#;
        assert!(extract_image_refs(html).is_err());
    }

    #[test]
    fn empty_src_counts_as_missing() {
        let html = r#"<img alt="Uploaded Image" src=""><img alt="Detected Result" src="/r.png">"#;
        assert!(extract_image_refs(html).is_err());
    }

    #[test]
    fn plain_text_body_fails() {
        assert!(extract_image_refs("No file part").is_err());
        assert!(extract_image_refs("").is_err());
    }
}
