//! End-to-end user journeys through the upload flow, driving the
//! selection with the same calls the browser layer makes.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use spotlight_flow::{
    Candidate, FlowConfig, FlowError, ImageFile, RawResponse, Selection, Status, outcome,
};

const STAMP: u64 = 1_700_000_000_123;

fn pick(selection: &mut Selection, name: &str, mime: &str, len: usize) -> Result<(), FlowError> {
    let config = FlowConfig::default();
    let candidate = Candidate::new(name, mime, u64::try_from(len).unwrap());
    selection.check_candidate(&candidate, &config)?;
    let file = ImageFile::from_candidate(candidate, vec![7u8; len]);
    selection.accept_file(file, format!("blob:{name}"), &config)
}

fn json_reply(status: u16, body: &serde_json::Value) -> RawResponse {
    RawResponse {
        status,
        content_type: Some("application/json".into()),
        body: body.to_string(),
    }
}

fn analyze(selection: &mut Selection, reply: &RawResponse) {
    let submission = selection.begin_submit().unwrap();
    assert_eq!(selection.status(), Status::Submitting);
    assert!(selection.finish(submission.id, outcome(reply, STAMP)));
}

#[test]
fn structured_journey_with_stats() {
    let mut selection = Selection::new();
    pick(&mut selection, "street.jpg", "image/jpeg", 2048).unwrap();
    assert_eq!(selection.status(), Status::PreviewReady);

    analyze(
        &mut selection,
        &json_reply(
            200,
            &json!({
                "uploaded_image": "static/uploads/street.jpg",
                "result_image": "static/uploads/result_street.jpg",
                "stats": { "confidence_score": 0.92, "objects_detected": 3 }
            }),
        ),
    );

    assert_eq!(selection.status(), Status::Success);
    let result = selection.result().unwrap();
    assert_eq!(
        result.uploaded_image,
        format!("static/uploads/street.jpg?t={STAMP}")
    );
    assert_eq!(
        result.result_image,
        format!("static/uploads/result_street.jpg?t={STAMP}")
    );
    let labels: Vec<_> = result.stats.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["Confidence Score", "Objects Detected"]);
}

#[test]
fn markup_journey_without_stats() {
    let mut selection = Selection::new();
    pick(&mut selection, "cat.png", "image/png", 10).unwrap();

    let page = r#"<!DOCTYPE html><html><body>
        <img src="static/uploads/cat.png" alt="Uploaded Image">
        <img src="static/uploads/result_cat.png" alt="Detected Result">
    </body></html>"#;
    analyze(
        &mut selection,
        &RawResponse {
            status: 200,
            content_type: Some("text/html; charset=utf-8".into()),
            body: page.into(),
        },
    );

    let result = selection.result().unwrap();
    assert!(result.stats.is_empty());
    assert!(result.result_image.starts_with("static/uploads/result_cat.png?t="));
}

#[test]
fn server_error_field_then_retry() {
    let mut selection = Selection::new();
    pick(&mut selection, "cat.png", "image/png", 10).unwrap();

    analyze(&mut selection, &json_reply(200, &json!({ "error": "bad image" })));
    assert_eq!(selection.status(), Status::Error);
    assert_eq!(selection.notice().unwrap().message, "bad image");
    assert!(selection.result().is_none());

    analyze(
        &mut selection,
        &json_reply(200, &json!({ "uploaded_image": "a.png", "result_image": "b.png" })),
    );
    assert_eq!(selection.status(), Status::Success);
    assert!(selection.notice().is_none());
}

#[test]
fn incomplete_markup_is_unparseable() {
    let mut selection = Selection::new();
    pick(&mut selection, "cat.png", "image/png", 10).unwrap();
    let reply = RawResponse {
        status: 200,
        content_type: Some("text/html".into()),
        body: r#"<img src="a.png" alt="Uploaded Image">"#.into(),
    };
    let submission = selection.begin_submit().unwrap();
    let result = outcome(&reply, STAMP);
    assert!(matches!(result, Err(FlowError::UnparseableResponse(_))));
    selection.finish(submission.id, result);
    assert_eq!(selection.status(), Status::Error);
    assert_eq!(
        selection.notice().unwrap().message,
        "Could not parse response."
    );
}

#[test]
fn network_failure_shows_generic_message() {
    let mut selection = Selection::new();
    pick(&mut selection, "cat.png", "image/png", 10).unwrap();
    let submission = selection.begin_submit().unwrap();
    selection.finish(
        submission.id,
        Err(FlowError::NetworkFailure("TypeError: Failed to fetch".into())),
    );
    assert_eq!(
        selection.notice().unwrap().message,
        "Failed to analyze image. Please try again."
    );
}

#[test]
fn rejected_files_never_reach_preview() {
    let mut selection = Selection::new();
    assert!(matches!(
        pick(&mut selection, "doc.pdf", "application/pdf", 10),
        Err(FlowError::InvalidType { .. })
    ));
    assert!(matches!(
        pick(&mut selection, "huge.png", "image/png", 10 * 1024 * 1024 + 1),
        Err(FlowError::TooLarge { .. })
    ));
    assert_eq!(selection.status(), Status::Idle);
    assert!(selection.file().is_none());
    assert_eq!(
        selection.notice().unwrap().message,
        "File size must be less than 10MB."
    );
}

#[test]
fn submit_without_file_makes_no_request() {
    let mut selection: Selection = Selection::new();
    assert_eq!(
        selection.begin_submit().unwrap_err(),
        FlowError::NoFileSelected
    );
    assert_eq!(selection.status(), Status::Idle);
}

#[test]
fn analyze_another_starts_clean() {
    let mut selection = Selection::new();
    pick(&mut selection, "one.png", "image/png", 10).unwrap();
    analyze(
        &mut selection,
        &json_reply(
            200,
            &json!({ "uploaded_image": "one.png", "result_image": "r1.png", "stats": { "n": 1 } }),
        ),
    );
    selection.reset_after_result();
    assert_eq!(selection.status(), Status::Idle);

    pick(&mut selection, "two.png", "image/png", 10).unwrap();
    assert_eq!(selection.status(), Status::PreviewReady);
    assert!(selection.result().is_none());
    assert_eq!(selection.file().unwrap().name, "two.png");
    assert_eq!(selection.preview().unwrap(), "blob:two.png");
}

#[test]
fn new_pick_replaces_finished_result() {
    let mut selection = Selection::new();
    pick(&mut selection, "one.png", "image/png", 10).unwrap();
    analyze(
        &mut selection,
        &json_reply(200, &json!({ "uploaded_image": "one.png", "result_image": "r1.png" })),
    );
    assert_eq!(selection.status(), Status::Success);

    pick(&mut selection, "two.png", "image/png", 12).unwrap();
    assert_eq!(selection.status(), Status::PreviewReady);
    assert!(selection.result().is_none());
    assert_eq!(selection.preview().unwrap(), "blob:two.png");

    analyze(
        &mut selection,
        &json_reply(200, &json!({ "uploaded_image": "two.png", "result_image": "r2.png" })),
    );
    assert_eq!(
        selection.result().unwrap().result_image,
        format!("r2.png?t={STAMP}")
    );
}
