//! spotlight-flow: Upload flow state machine for spotlight (sans-IO).
//!
//! Validates image candidates, tracks the single [`Selection`] through
//! preview, submission, and result, and reduces the analysis endpoint's
//! JSON or HTML response to a renderable [`AnalysisResult`].
//!
//! This crate has **no browser dependencies** -- it operates on
//! in-memory data and returns structured results. All DOM, `fetch`, and
//! Blob URL handling lives in `spotlight-io`.

pub mod config;
pub mod markup;
pub mod render;
pub mod response;
pub mod selection;
pub mod stats;
pub mod types;
pub mod validate;

pub use config::FlowConfig;
pub use render::{cache_bust, now_millis};
pub use response::{ImageRefs, RawResponse, interpret, outcome};
pub use selection::{Selection, Submission};
pub use types::{
    ANALYSIS_COMPLETE, AnalysisResult, ByteSize, Candidate, FlowError, GENERIC_FAILURE, ImageFile,
    Notice, StatCard, Status,
};
pub use validate::validate_candidate;
