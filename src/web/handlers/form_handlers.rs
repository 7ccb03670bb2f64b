// src/web/handlers/form_handlers.rs
//! Page rendering, submission and cancellation

use anyhow::{Context, Result};
use askama::Template;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::State;
use tracing::{error, info, warn};

use crate::core::AnalysisBackend;
use crate::form::{ResumeFile, SubmissionForm};
use crate::utils::{read_file_bytes, upload_file_name, OCTET_STREAM_MEDIA_TYPE};
use crate::view::FormView;
use crate::web::types::{AnalyzeForm, IndexPage, WebState};

pub fn render_page(form: &SubmissionForm) -> Result<RawHtml<String>, Status> {
    let page = IndexPage {
        view: FormView::from_form(form),
    };

    page.render().map(RawHtml).map_err(|e| {
        error!("Failed to render page: {}", e);
        Status::InternalServerError
    })
}

pub async fn index_handler(state: &State<WebState>) -> Result<RawHtml<String>, Status> {
    let form = state.form.lock().await;
    render_page(&form)
}

pub async fn analyze_handler(
    mut upload: Form<AnalyzeForm<'_>>,
    state: &State<WebState>,
) -> Result<RawHtml<String>, Status> {
    let selected = match upload.resume_file.as_mut() {
        Some(file) => read_upload(file).await.map_err(|e| {
            error!("Failed to read uploaded resume: {:#}", e);
            Status::InternalServerError
        })?,
        None => None,
    };

    let pending = {
        let mut form = state.form.lock().await;

        if form.is_in_flight() {
            warn!("Ignoring submission while request {} is in flight", form.sequence());
            return render_page(&form);
        }

        form.set_job_description(upload.jd_text.clone());

        if let Some(file) = selected {
            if form.select_resume(file).is_err() {
                return render_page(&form);
            }
        }

        match form.begin_submit() {
            Ok(pending) => pending,
            Err(_) => return render_page(&form),
        }
    };

    let outcome = state.client.analyze(&pending.submission).await;

    let mut form = state.form.lock().await;
    if !form.complete(pending.sequence, outcome) {
        info!("Request {} finished after being superseded", pending.sequence);
    }
    render_page(&form)
}

pub async fn cancel_handler(state: &State<WebState>) {
    let mut form = state.form.lock().await;
    if !form.cancel() {
        info!("Cancel requested with nothing in flight");
    }
}

/// Pull the uploaded file into memory. An empty part means no file was picked.
async fn read_upload(file: &mut TempFile<'_>) -> Result<Option<ResumeFile>> {
    if file.len() == 0 {
        return Ok(None);
    }

    let media_type = file
        .content_type()
        .map(|ct| ct.to_string())
        .unwrap_or_else(|| OCTET_STREAM_MEDIA_TYPE.to_string());
    let name = upload_file_name(file.raw_name().and_then(|n| n.as_str()), &media_type);

    let temp_path = std::env::temp_dir().join(format!("jobmatch_upload_{}", uuid::Uuid::new_v4()));
    file.persist_to(&temp_path)
        .await
        .context("Failed to save uploaded file")?;

    let bytes = read_file_bytes(&temp_path).await;
    let _ = tokio::fs::remove_file(&temp_path).await;

    Ok(Some(ResumeFile::new(name, media_type, bytes?)))
}
