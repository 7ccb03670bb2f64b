// src/core/service_client.rs
//! HTTP client for the job-match analysis service

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use tracing::{error, info, trace};

use crate::errors::SubmitError;
use crate::form::Submission;
use crate::types::response::AnalysisResponse;

pub const JOBMATCH_PDF_ENDPOINT: &str = "/api/jobmatch_pdf";

pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Anything that can turn a submission into an analysis.
pub trait AnalysisBackend: Send + Sync {
    fn analyze(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = std::result::Result<AnalysisResponse, SubmitError>> + Send;
}

#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client; `None` leaves requests without a deadline.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn endpoint_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            JOBMATCH_PDF_ENDPOINT
        )
    }

    /// Sends the job description and resume as multipart, receives the analysis
    pub async fn analyze_resume(
        &self,
        submission: &Submission,
    ) -> std::result::Result<AnalysisResponse, SubmitError> {
        let url = self.endpoint_url();
        let resume = &submission.resume;

        let resume_part = Part::bytes(resume.bytes.clone())
            .file_name(resume.name.clone())
            .mime_str(&resume.media_type)?;

        let form = Form::new()
            .text("jd_text", submission.job_description.clone())
            .part("resume_file", resume_part);

        info!("Calling analysis service: {}", url);

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Analysis service error response {}: {}", status, error_text);
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let response_text = response.text().await?;
        trace!("Raw analysis response: {}", response_text);

        let analysis: AnalysisResponse = serde_json::from_str(&response_text)?;
        Ok(analysis)
    }
}

impl AnalysisBackend for ServiceClient {
    async fn analyze(
        &self,
        submission: &Submission,
    ) -> std::result::Result<AnalysisResponse, SubmitError> {
        self.analyze_resume(submission).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ResumeFile, SubmissionForm};
    use crate::utils::PDF_MEDIA_TYPE;
    use crate::FormError;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    const ANALYSIS_BODY: &str = r#"{
        "match": {
            "overall_score": 64,
            "required_match_fraction": 0.5,
            "nice_to_have_match_fraction": 0.0,
            "matched_required_skills": ["rust"],
            "missing_required_skills": ["kafka"],
            "matched_nice_to_have": [],
            "missing_nice_to_have": []
        }
    }"#;

    fn submission(job_description: &str) -> Submission {
        Submission {
            job_description: job_description.to_string(),
            resume: ResumeFile::new("cv.pdf", PDF_MEDIA_TYPE, b"%PDF-1.4 test".to_vec()),
        }
    }

    /// Accepts a single connection, answers it with `status_line` and `body`,
    /// and yields the raw request it received.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let reply = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        (base_url, handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
            if request_complete(&raw) {
                break;
            }
        }
        String::from_utf8_lossy(&raw).into_owned()
    }

    fn request_complete(raw: &[u8]) -> bool {
        let Some(header_end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&raw[..header_end]).to_ascii_lowercase();
        let body = &raw[header_end + 4..];

        match headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
        {
            Some(len) => body.len() >= len.trim().parse::<usize>().unwrap_or(0),
            None => body.ends_with(b"0\r\n\r\n"),
        }
    }

    #[test]
    fn test_endpoint_url() {
        let client = ServiceClient::new("http://127.0.0.1:8000", None).unwrap();
        assert_eq!(
            client.endpoint_url(),
            "http://127.0.0.1:8000/api/jobmatch_pdf"
        );

        let trailing = ServiceClient::new("http://api.local/", None).unwrap();
        assert_eq!(trailing.endpoint_url(), "http://api.local/api/jobmatch_pdf");
    }

    #[tokio::test]
    async fn test_request_carries_both_parts() {
        let (base_url, server) = serve_once("200 OK", ANALYSIS_BODY).await;
        let client = ServiceClient::new(base_url, Some(Duration::from_secs(5))).unwrap();

        let analysis = client.analyze(&submission("  raw jd\n")).await.unwrap();
        assert_eq!(analysis.match_result.overall_score, 64.0);
        assert_eq!(analysis.match_result.missing_required_skills, vec!["kafka"]);
        assert!(analysis.advice.is_none());

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/jobmatch_pdf HTTP/1.1\r\n"));
        assert!(request
            .to_ascii_lowercase()
            .contains("content-type: multipart/form-data; boundary="));
        // Text goes out untrimmed.
        assert!(request.contains("name=\"jd_text\"\r\n\r\n  raw jd\n\r\n"));
        assert!(request.contains(
            "name=\"resume_file\"; filename=\"cv.pdf\"\r\nContent-Type: application/pdf\r\n\r\n%PDF-1.4 test"
        ));
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected_with_body() {
        let (base_url, server) = serve_once("500 Internal Server Error", "internal error").await;
        let client = ServiceClient::new(base_url, Some(Duration::from_secs(5))).unwrap();

        let err = client.analyze(&submission("Rust engineer")).await.unwrap_err();
        match &err {
            SubmitError::Rejected { status, body } => {
                assert_eq!(*status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
        assert_eq!(
            err.user_message(),
            "Request failed with status 500: internal error"
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unparseable_body_fails_the_form() {
        let (base_url, server) = serve_once("200 OK", "not json").await;
        let client = ServiceClient::new(base_url, Some(Duration::from_secs(5))).unwrap();

        let mut form = SubmissionForm::new();
        form.set_job_description("Rust engineer");
        form.select_resume(submission("").resume).unwrap();

        let err = form.submit(&client).await.unwrap_err();
        assert!(matches!(err, FormError::Submit(SubmitError::Decode(_))));
        assert!(form
            .error()
            .unwrap()
            .starts_with("Failed to parse analysis response: "));
        assert!(!form.is_in_flight());
        assert!(form.match_result().is_none());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) is closed on loopback.
        let client =
            ServiceClient::new("http://127.0.0.1:9", Some(Duration::from_secs(5))).unwrap();

        let err = client.analyze(&submission("Rust engineer")).await.unwrap_err();
        assert!(matches!(err, SubmitError::Transport { message: Some(_) }));
        assert!(!err.user_message().is_empty());
    }
}
