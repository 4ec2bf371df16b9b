//! Core types shared across the upload flow.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Metadata of a file offered by the picker or a drop, before its bytes
/// are read.
///
/// Validation only needs the declared MIME type and size, so the
/// browser layer can reject a candidate without loading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// File name as reported by the browser.
    pub name: String,
    /// Declared MIME type (e.g. `image/png`). Empty when unknown.
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl Candidate {
    /// Create a candidate from its name, MIME type, and byte length.
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// A validated image file held by the [`Selection`](crate::Selection).
///
/// The bytes are reference-counted so a pending submission can hold
/// them without cloning the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name sent as the multipart filename.
    pub name: String,
    /// MIME type sent as the multipart part type.
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Rc<[u8]>,
}

impl ImageFile {
    /// Build an image file from a validated candidate and its bytes.
    #[must_use]
    pub fn from_candidate(candidate: Candidate, bytes: impl Into<Rc<[u8]>>) -> Self {
        Self {
            name: candidate.name,
            mime_type: candidate.mime_type,
            bytes: bytes.into(),
        }
    }

    /// Size of the file contents in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file has no contents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Lifecycle status of the [`Selection`](crate::Selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// No file chosen.
    #[default]
    Idle,
    /// A valid file is chosen and previewed; ready to submit.
    PreviewReady,
    /// A request is in flight. Submission is disabled.
    Submitting,
    /// The last submission succeeded and a result is displayed.
    Success,
    /// The last submission failed. The file is still selected.
    Error,
}

impl Status {
    /// Whether the submit control should accept clicks.
    #[must_use]
    pub const fn can_submit(self) -> bool {
        !matches!(self, Self::Submitting)
    }

    /// Short label for the status badge.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Waiting",
            Self::PreviewReady => "Ready",
            Self::Submitting => "Processing...",
            Self::Success => "Detected",
            Self::Error => "Failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One statistic card in the results panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    /// Human-readable label (e.g. `Confidence Score`).
    pub label: String,
    /// Display value (e.g. `0.92`).
    pub value: String,
}

/// Outcome of a successful analysis, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Cache-busted reference to the uploaded image as stored by the server.
    pub uploaded_image: String,
    /// Cache-busted reference to the annotated result image.
    pub result_image: String,
    /// Statistic cards. Empty when the server sent none, in which case
    /// the results panel shows [`ANALYSIS_COMPLETE`] instead.
    pub stats: Vec<StatCard>,
}

/// Placeholder shown when a result carries no statistics.
pub const ANALYSIS_COMPLETE: &str = "Analysis complete";

/// A transient, auto-dismissing error message.
///
/// `id` increases with every notice raised on a selection, so a timer
/// started for one notice never clears a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
}

/// Fallback message when a failure carries no usable detail.
pub const GENERIC_FAILURE: &str = "Failed to analyze image. Please try again.";

/// Errors raised by the upload flow.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// The candidate's MIME type is not an image type.
    #[error("Please select a valid image file.")]
    InvalidType {
        /// The rejected MIME type.
        mime_type: String,
    },

    /// The candidate exceeds the size limit.
    #[error("File size must be less than {max_size}.")]
    TooLarge {
        /// Size of the rejected file.
        size: u64,
        /// Configured limit.
        max_size: ByteSize,
    },

    /// `submit` was called with no file selected.
    #[error("Please select an image first.")]
    NoFileSelected,

    /// An input arrived while a submission was in flight. Never shown
    /// as a notice; the input is simply ignored.
    #[error("An analysis is already in progress.")]
    Busy,

    /// The request never produced an HTTP response.
    #[error("Failed to analyze image. Please try again.")]
    NetworkFailure(String),

    /// The server answered with an error field or a non-success status.
    #[error("{0}")]
    ServerReportedError(String),

    /// The response body matched neither supported shape.
    #[error("Could not parse response.")]
    UnparseableResponse(String),
}

/// A byte count that displays the way the UI states limits (`10MB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ByteSize(pub u64);

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MIB: u64 = 1024 * 1024;
        let bytes = self.0;
        if bytes >= MIB && bytes % MIB == 0 {
            write!(f, "{}MB", bytes / MIB)
        } else if bytes >= 1024 && bytes % 1024 == 0 {
            write!(f, "{}KB", bytes / 1024)
        } else {
            write!(f, "{bytes} bytes")
        }
    }
}
