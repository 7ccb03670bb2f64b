//! Job-match client: validates a job description and resume PDF, submits
//! them to the analysis service and renders the match score and advice.

pub mod cli;
pub mod core;
pub mod errors;
pub mod form;
pub mod types;
pub mod utils;
pub mod view;
pub mod web;

pub use crate::core::{AnalysisBackend, ConfigManager, ServiceClient};
pub use errors::{FormError, SubmitError};
pub use form::{RequestStatus, ResumeFile, Submission, SubmissionForm};
pub use types::response::{AdviceResult, AnalysisResponse, MatchResult};
