//! Dioxus UI components for spotlight.
//!
//! Provides the upload drop zone, the pre-upload preview card, the
//! results panel, the notice banner, and the status badge.

mod badge;
mod notice;
mod preview;
mod results;
mod upload;

pub use badge::StatusBadge;
pub use notice::NoticeBanner;
pub use preview::ImagePreview;
pub use results::ResultsPanel;
pub use upload::FileUpload;

use dioxus::html::ScrollBehavior;
use dioxus::prelude::*;

/// Smoothly scroll a region into view as soon as it is mounted.
async fn reveal(evt: MountedEvent) {
    if let Err(e) = evt.data().scroll_to(ScrollBehavior::Smooth).await {
        tracing::debug!(error = ?e, "scroll into view failed");
    }
}
