//! spotlight-io: Browser I/O and Dioxus component library.
//!
//! Handles image submission over `fetch`, Blob URL previews, page-wide
//! drop handling, and the upload flow controller, and provides reusable
//! UI components for the spotlight web application.

pub mod components;
pub mod controller;
pub mod fetch;
pub mod page;
pub mod preview;

pub use components::{FileUpload, ImagePreview, NoticeBanner, ResultsPanel, StatusBadge};
pub use controller::SelectionSignal;
pub use preview::PreviewUrl;
