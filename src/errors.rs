// src/errors.rs
use thiserror::Error;

pub const NOT_PDF_MESSAGE: &str = "Please upload a PDF file only.";
pub const MISSING_DESCRIPTION_MESSAGE: &str = "Please paste a job description.";
pub const MISSING_RESUME_MESSAGE: &str = "Please upload your resume as a PDF.";
pub const FALLBACK_MESSAGE: &str = "Something went wrong while analyzing.";

/// Anything that stops a submission attempt. `Display` is the banner text.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Please upload a PDF file only.")]
    NotPdf { media_type: String },

    #[error("Please paste a job description.")]
    MissingDescription,

    #[error("Please upload your resume as a PDF.")]
    MissingResume,

    #[error("An analysis is already in progress.")]
    InFlight,

    #[error("{}", .0.user_message())]
    Submit(#[from] SubmitError),
}

/// Failure talking to the analysis service.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Request failed with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("{}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    Transport { message: Option<String> },

    #[error("Failed to parse analysis response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SubmitError {
    /// Message shown to the user, never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        SubmitError::Transport {
            message: Some(err.to_string()),
        }
    }
}
