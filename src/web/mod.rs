// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::figment::Figment;
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{catch, catchers, get, post, routes, uri, Build, Rocket, State};
use tracing::{error, info};

use crate::core::{ConfigManager, ServiceClient};

#[get("/")]
pub async fn index(state: &State<WebState>) -> Result<RawHtml<String>, Status> {
    handlers::index_handler(state).await
}

#[post("/", data = "<upload>")]
pub async fn analyze(
    upload: Form<AnalyzeForm<'_>>,
    state: &State<WebState>,
) -> Result<RawHtml<String>, Status> {
    handlers::analyze_handler(upload, state).await
}

#[post("/cancel")]
pub async fn cancel(state: &State<WebState>) -> Redirect {
    handlers::cancel_handler(state).await;
    Redirect::to(uri!("/"))
}

#[get("/health")]
pub fn health() -> Json<HealthResponse> {
    handlers::health_handler()
}

#[catch(422)]
fn unprocessable() -> RawHtml<&'static str> {
    RawHtml("<p>The form could not be read. <a href=\"/\">Back</a></p>")
}

#[catch(500)]
fn internal_error() -> RawHtml<&'static str> {
    RawHtml("<p>Something went wrong while analyzing. <a href=\"/\">Back</a></p>")
}

/// Figment for the served page: bind address, port and upload limits.
pub fn web_figment(config: &ConfigManager) -> Figment {
    rocket::Config::figment()
        .merge(("address", config.web.address))
        .merge(("port", config.web.port))
        .merge((
            "limits",
            Limits::default()
                .limit("file", 20.mebibytes())
                .limit("data-form", 21.mebibytes()),
        ))
}

pub fn build_rocket(figment: Figment, state: WebState) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(state)
        .register("/", catchers![unprocessable, internal_error])
        .mount("/", routes![index, analyze, cancel, health])
}

pub async fn start_web_server(config: &ConfigManager) -> Result<()> {
    let client = ServiceClient::new(
        config.service.api_base_url.clone(),
        config.service.timeout(),
    )?;

    info!("Starting JobMatch page");
    info!("Analysis service: {}", client.endpoint_url());
    info!(
        "Page: http://{}:{}",
        config.web.address, config.web.port
    );

    let _rocket = build_rocket(web_figment(config), WebState::new(client))
        .launch()
        .await
        .map_err(|e| {
            error!("Web server failed: {}", e);
            anyhow::anyhow!("Web server failed: {}", e)
        })?;

    Ok(())
}
