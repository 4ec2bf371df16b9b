//! Upload flow controller: binds UI events to the [`Selection`].
//!
//! The root component owns one `Signal<Selection<PreviewUrl>>` and
//! passes it to these handlers. Each handler performs one transition,
//! logs it, and (when the transition raised a notice) arms the timer
//! that dismisses that notice.

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use spotlight_flow::{Candidate, FlowConfig, FlowError, ImageFile, Selection};
use tracing::{debug, error, info, warn};

use crate::fetch;
use crate::preview::PreviewUrl;

/// The page's single selection.
pub type SelectionSignal = Signal<Selection<PreviewUrl>>;

const PREVIEW_FAILED: &str = "Could not preview this image.";

/// Screen a picked or dropped file before reading it.
///
/// Returns whether the file should be read and passed to [`accept`].
pub fn screen(mut selection: SelectionSignal, candidate: &Candidate, config: &FlowConfig) -> bool {
    match selection.with_mut(|s| s.check_candidate(candidate, config)) {
        Ok(()) => true,
        Err(FlowError::Busy) => {
            debug!(name = %candidate.name, "file ignored: analysis in progress");
            false
        }
        Err(e) => {
            info!(
                name = %candidate.name,
                mime_type = %candidate.mime_type,
                size = candidate.size,
                reason = ?e,
                "file rejected"
            );
            arm_notice_timer(selection, config.notice_timeout_ms);
            false
        }
    }
}

/// Make a read file the current selection and show its preview.
pub fn accept(
    mut selection: SelectionSignal,
    candidate: Candidate,
    bytes: Vec<u8>,
    config: &FlowConfig,
) {
    let preview = match PreviewUrl::from_bytes(&bytes, &candidate.mime_type) {
        Ok(preview) => preview,
        Err(e) => {
            error!(name = %candidate.name, error = %e, "failed to create preview");
            report(selection, PREVIEW_FAILED, config);
            return;
        }
    };
    let file = ImageFile::from_candidate(candidate, bytes);
    let name = file.name.clone();
    match selection.with_mut(|s| s.accept_file(file, preview, config)) {
        Ok(()) => info!(%name, "file selected"),
        Err(FlowError::Busy) => debug!(%name, "file ignored: analysis in progress"),
        Err(e) => {
            info!(%name, reason = ?e, "file rejected");
            arm_notice_timer(selection, config.notice_timeout_ms);
        }
    }
}

/// Show a failure from outside the flow (a file read, a preview) as a
/// notice, and dismiss it after the configured delay.
pub fn report(mut selection: SelectionSignal, message: &str, config: &FlowConfig) {
    let id = selection.with_mut(|s| s.report(message));
    warn!(id, %message, "failure reported");
    arm_notice_timer(selection, config.notice_timeout_ms);
}

/// Remove the chosen file.
pub fn clear(mut selection: SelectionSignal) {
    selection.with_mut(Selection::clear_selection);
    debug!("selection cleared");
}

/// Return to the empty state after viewing a result.
pub fn reset(mut selection: SelectionSignal) {
    selection.with_mut(Selection::reset_after_result);
    debug!("selection reset");
}

/// Dismiss notice `id` (close button or timer).
pub fn dismiss(mut selection: SelectionSignal, id: u64) {
    if selection.with_mut(|s| s.dismiss_notice(id)) {
        debug!(id, "notice dismissed");
    }
}

/// Submit the chosen file and apply the outcome when it arrives.
///
/// Ignored while a submission is in flight. There is no cancellation
/// and no client-side timeout.
pub fn submit(mut selection: SelectionSignal, config: &FlowConfig) {
    let submission = match selection.with_mut(Selection::begin_submit) {
        Ok(submission) => submission,
        Err(FlowError::Busy) => {
            debug!("submit ignored: analysis in progress");
            return;
        }
        Err(e) => {
            warn!(reason = ?e, "submit refused");
            arm_notice_timer(selection, config.notice_timeout_ms);
            return;
        }
    };

    let config = config.clone();
    spawn(async move {
        let outcome = fetch::analyze(&config, &submission.file).await;
        let succeeded = outcome.is_ok();
        if !selection.with_mut(|s| s.finish(submission.id, outcome)) {
            debug!(id = submission.id, "stale submission result discarded");
            return;
        }
        if succeeded {
            info!(id = submission.id, "analysis complete");
        } else {
            arm_notice_timer(selection, config.notice_timeout_ms);
        }
    });
}

/// Dismiss the currently displayed notice after `timeout_ms`, unless a
/// newer notice has replaced it by then.
fn arm_notice_timer(selection: SelectionSignal, timeout_ms: u32) {
    let Some(id) = selection.peek().notice().map(|n| n.id) else {
        return;
    };
    spawn(async move {
        TimeoutFuture::new(timeout_ms).await;
        dismiss(selection, id);
    });
}
