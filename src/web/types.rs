// src/web/types.rs

use askama::Template;
use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::serde::Serialize;
use tokio::sync::Mutex;

use crate::core::ServiceClient;
use crate::form::SubmissionForm;
use crate::view::FormView;

/// The one form the page shows, plus the client it submits through.
pub struct WebState {
    pub form: Mutex<SubmissionForm>,
    pub client: ServiceClient,
}

impl WebState {
    pub fn new(client: ServiceClient) -> Self {
        Self {
            form: Mutex::new(SubmissionForm::new()),
            client,
        }
    }
}

#[derive(FromForm)]
pub struct AnalyzeForm<'f> {
    #[field(default = String::new())]
    pub jd_text: String,
    pub resume_file: Option<TempFile<'f>>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub view: FormView,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: &'static str,
}
