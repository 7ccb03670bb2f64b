// src/form.rs
//! Submission form state: the text, the picked resume, the last outcome and
//! the request status, with the transitions that keep them consistent.
//!
//! Results and errors are cleared the moment a submission starts, and the
//! in-flight status is always cleared when the current request completes.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::AnalysisBackend;
use crate::errors::{FormError, SubmitError};
use crate::types::response::{AdviceResult, AnalysisResponse, MatchResult};
use crate::utils::{declared_media_type, read_file_bytes, PDF_MEDIA_TYPE};

/// A file as handed over by a picker: a name, the declared media type and
/// the bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Load a file from disk, declaring its media type from the extension.
    pub async fn from_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = read_file_bytes(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume.pdf")
            .to_string();
        let media_type = declared_media_type(&name);

        Ok(Self::new(name, media_type, bytes))
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }
}

/// What goes over the wire: the raw text and the file.
#[derive(Debug, Clone)]
pub struct Submission {
    pub job_description: String,
    pub resume: ResumeFile,
}

/// A started submission, tagged with the sequence number it must complete
/// under.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub sequence: u64,
    pub submission: Submission,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    /// Only held inside `begin_submit` while the checks run; a caller sees
    /// `Failed` or `Submitting` once it returns.
    Validating,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct SubmissionForm {
    job_description: String,
    resume: Option<ResumeFile>,
    match_result: Option<MatchResult>,
    advice: Option<AdviceResult>,
    last_response: Option<AnalysisResponse>,
    error: Option<String>,
    status: RequestStatus,
    sequence: u64,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn resume(&self) -> Option<&ResumeFile> {
        self.resume.as_ref()
    }

    pub fn match_result(&self) -> Option<&MatchResult> {
        self.match_result.as_ref()
    }

    pub fn advice(&self) -> Option<&AdviceResult> {
        self.advice.as_ref()
    }

    /// Full body of the last successful response, pass-through parts included.
    pub fn last_response(&self) -> Option<&AnalysisResponse> {
        self.last_response.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.status == RequestStatus::Submitting
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Stored verbatim.
    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn select_resume(&mut self, file: ResumeFile) -> Result<(), FormError> {
        self.error = None;

        if !file.is_pdf() {
            warn!(
                "Rejected resume '{}' with media type {}",
                file.name, file.media_type
            );
            let err = FormError::NotPdf {
                media_type: file.media_type,
            };
            self.resume = None;
            self.error = Some(err.to_string());
            return Err(err);
        }

        debug!("Selected resume '{}' ({} bytes)", file.name, file.bytes.len());
        self.resume = Some(file);
        Ok(())
    }

    pub fn clear_resume(&mut self) {
        self.resume = None;
    }

    /// Validate, clear the previous outcome and enter the in-flight state.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, FormError> {
        if self.is_in_flight() {
            warn!("Submission refused: request {} still in flight", self.sequence);
            return Err(FormError::InFlight);
        }

        self.status = RequestStatus::Validating;

        if self.job_description.trim().is_empty() {
            return Err(self.reject(FormError::MissingDescription));
        }

        let Some(resume) = self.resume.clone() else {
            return Err(self.reject(FormError::MissingResume));
        };

        self.error = None;
        self.match_result = None;
        self.advice = None;
        self.last_response = None;
        self.sequence += 1;
        self.status = RequestStatus::Submitting;

        info!(
            "Submitting request {} ({} chars, resume '{}')",
            self.sequence,
            self.job_description.len(),
            resume.name
        );

        Ok(PendingSubmission {
            sequence: self.sequence,
            submission: Submission {
                job_description: self.job_description.clone(),
                resume,
            },
        })
    }

    /// Apply the outcome of request `sequence`. Returns false when the
    /// outcome belongs to an older request and was dropped.
    pub fn complete(
        &mut self,
        sequence: u64,
        outcome: Result<AnalysisResponse, SubmitError>,
    ) -> bool {
        if !self.is_current(sequence) {
            return false;
        }

        match outcome {
            Ok(response) => self.apply_success(sequence, response),
            Err(err) => self.apply_failure(sequence, &err),
        }

        true
    }

    /// Abandon the in-flight request; its response will be dropped.
    pub fn cancel(&mut self) -> bool {
        if !self.is_in_flight() {
            return false;
        }

        info!("Cancelled request {}", self.sequence);
        self.sequence += 1;
        self.status = RequestStatus::Idle;
        true
    }

    /// Run one full submission against `backend`.
    pub async fn submit<B: AnalysisBackend>(&mut self, backend: &B) -> Result<(), FormError> {
        let pending = self.begin_submit()?;

        match backend.analyze(&pending.submission).await {
            Ok(response) => {
                if self.is_current(pending.sequence) {
                    self.apply_success(pending.sequence, response);
                }
                Ok(())
            }
            Err(err) => {
                if self.is_current(pending.sequence) {
                    self.apply_failure(pending.sequence, &err);
                }
                Err(FormError::Submit(err))
            }
        }
    }

    fn is_current(&self, sequence: u64) -> bool {
        if sequence == self.sequence && self.is_in_flight() {
            return true;
        }

        debug!(
            "Dropping outcome of request {} (current {}, status {:?})",
            sequence, self.sequence, self.status
        );
        false
    }

    fn apply_success(&mut self, sequence: u64, response: AnalysisResponse) {
        info!(
            "Request {} succeeded with score {}",
            sequence, response.match_result.overall_score
        );
        self.match_result = Some(response.match_result.clone());
        self.advice = response.advice.clone();
        self.last_response = Some(response);
        self.error = None;
        self.status = RequestStatus::Succeeded;
    }

    fn apply_failure(&mut self, sequence: u64, err: &SubmitError) {
        let message = err.user_message();
        warn!("Request {} failed: {}", sequence, message);
        self.error = Some(message.clone());
        self.status = RequestStatus::Failed(message);
    }

    fn reject(&mut self, err: FormError) -> FormError {
        let message = err.to_string();
        info!("Submission rejected: {}", message);
        self.error = Some(message.clone());
        self.status = RequestStatus::Failed(message);
        err
    }
}
