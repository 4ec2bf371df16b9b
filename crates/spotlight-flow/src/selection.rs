//! The upload flow state machine.
//!
//! A [`Selection`] is the single record of what the user has chosen and
//! what became of it:
//!
//! ```text
//! Idle --accept_file--> PreviewReady --begin_submit--> Submitting
//! Submitting --finish(Ok)--> Success --reset_after_result--> Idle
//! Submitting --finish(Err)--> Error --dismiss_notice / accept_file--> PreviewReady
//! PreviewReady --clear_selection--> Idle
//! ```
//!
//! Rejected candidates and a `begin_submit` without a file leave the
//! status unchanged and only raise a transient [`Notice`]. So `Error`
//! is only ever reached from `Submitting`, and the file is present in
//! every status except `Idle`.
//!
//! The selection owns the preview handle `P` of the chosen file. The
//! browser layer uses a handle that revokes its Blob URL on drop, so
//! every transition that discards a file also releases its preview.

use crate::config::FlowConfig;
use crate::types::{AnalysisResult, Candidate, FlowError, ImageFile, Notice, Status};
use crate::validate::validate_candidate;

/// A request the caller must now perform.
///
/// Returned by [`Selection::begin_submit`]. Its `id` must be passed
/// back to [`Selection::finish`] with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a submission must be sent and then finished"]
pub struct Submission {
    pub id: u64,
    pub file: ImageFile,
}

/// The chosen image and its processing outcome.
#[derive(Debug)]
pub struct Selection<P = String> {
    file: Option<ImageFile>,
    preview: Option<P>,
    status: Status,
    result: Option<AnalysisResult>,
    notice: Option<Notice>,
    notices_raised: u64,
    submissions_started: u64,
}

impl<P> Default for Selection<P> {
    fn default() -> Self {
        Self {
            file: None,
            preview: None,
            status: Status::Idle,
            result: None,
            notice: None,
            notices_raised: 0,
            submissions_started: 0,
        }
    }
}

impl<P> Selection<P> {
    /// A fresh selection in [`Status::Idle`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn file(&self) -> Option<&ImageFile> {
        self.file.as_ref()
    }

    #[must_use]
    pub const fn preview(&self) -> Option<&P> {
        self.preview.as_ref()
    }

    /// The result of the last submission, present only in
    /// [`Status::Success`].
    #[must_use]
    pub const fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether the submit control should be enabled.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        self.file.is_some() && self.status.can_submit()
    }

    /// Screen a candidate before its bytes are read.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Busy`] while a submission is in flight
    /// (no notice is raised). Returns the validation error otherwise,
    /// after raising it as a notice. The selection is left unchanged.
    pub fn check_candidate(
        &mut self,
        candidate: &Candidate,
        config: &FlowConfig,
    ) -> Result<(), FlowError> {
        if self.status == Status::Submitting {
            return Err(FlowError::Busy);
        }
        validate_candidate(candidate, config).inspect_err(|e| self.raise(e))
    }

    /// Make `file` the current selection, with `preview` as its local
    /// preview, and move to [`Status::PreviewReady`].
    ///
    /// Any previous file, preview, result, and notice are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Busy`] while a submission is in flight.
    /// Returns [`FlowError::InvalidType`] or [`FlowError::TooLarge`] (and
    /// raises a notice) if the file fails validation. In both cases the
    /// selection is unchanged and `preview` is dropped.
    pub fn accept_file(
        &mut self,
        file: ImageFile,
        preview: P,
        config: &FlowConfig,
    ) -> Result<(), FlowError> {
        let candidate = Candidate {
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            size: u64::try_from(file.len()).unwrap_or(u64::MAX),
        };
        self.check_candidate(&candidate, config)?;
        self.file = Some(file);
        self.preview = Some(preview);
        self.result = None;
        self.notice = None;
        self.status = Status::PreviewReady;
        Ok(())
    }

    /// Drop the chosen file and return to [`Status::Idle`].
    ///
    /// Ignored while a submission is in flight.
    pub fn clear_selection(&mut self) {
        if self.status == Status::Submitting {
            return;
        }
        self.file = None;
        self.preview = None;
        self.result = None;
        self.notice = None;
        self.status = Status::Idle;
    }

    /// Start submitting the chosen file.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Busy`] while another submission is in
    /// flight; it is ignored and no notice is raised.
    /// Returns [`FlowError::NoFileSelected`] (and raises a notice) if no
    /// file is chosen; no request must be made.
    pub fn begin_submit(&mut self) -> Result<Submission, FlowError> {
        if self.status == Status::Submitting {
            return Err(FlowError::Busy);
        }
        let Some(file) = self.file.clone() else {
            let err = FlowError::NoFileSelected;
            self.raise(&err);
            return Err(err);
        };
        self.submissions_started += 1;
        self.status = Status::Submitting;
        self.result = None;
        self.notice = None;
        Ok(Submission {
            id: self.submissions_started,
            file,
        })
    }

    /// Apply the outcome of submission `id`.
    ///
    /// Returns `false` (and changes nothing) if `id` is not the
    /// submission currently in flight.
    pub fn finish(&mut self, id: u64, outcome: Result<AnalysisResult, FlowError>) -> bool {
        if self.status != Status::Submitting || id != self.submissions_started {
            return false;
        }
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.status = Status::Success;
            }
            Err(err) => {
                self.raise(&err);
                self.status = Status::Error;
            }
        }
        true
    }

    /// Return fully to [`Status::Idle`] after viewing a result.
    ///
    /// Ignored while a submission is in flight.
    pub fn reset_after_result(&mut self) {
        self.clear_selection();
    }

    /// Clear notice `id`, if it is still the one displayed.
    ///
    /// Leaving a failed submission's notice returns to
    /// [`Status::PreviewReady`] so the file can be resubmitted. Returns
    /// whether a notice was cleared.
    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        if self.notice.as_ref().is_none_or(|n| n.id != id) {
            return false;
        }
        self.notice = None;
        if self.status == Status::Error {
            self.status = Status::PreviewReady;
        }
        true
    }

    /// Show `message` as the current notice without changing the status.
    ///
    /// For failures outside the flow's own transitions, such as a file
    /// that could not be read or previewed. Returns the notice id.
    pub fn report(&mut self, message: impl Into<String>) -> u64 {
        self.notices_raised += 1;
        self.notice = Some(Notice {
            id: self.notices_raised,
            message: message.into(),
        });
        self.notices_raised
    }

    fn raise(&mut self, err: &FlowError) {
        self.report(err.to_string());
    }
}
