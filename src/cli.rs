// src/cli.rs
use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::core::{AnalysisBackend, ConfigManager, ServiceClient};
use crate::form::{ResumeFile, SubmissionForm};
use crate::utils::read_text_source;
use crate::view::FormView;
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "jobmatch")]
#[command(about = "Score a resume against a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the analysis service
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds, 0 for none
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a resume PDF against a job description
    Analyze {
        /// Job description file, `-` for stdin
        #[arg(long)]
        jd: PathBuf,
        /// Resume file (must be a PDF)
        #[arg(long)]
        resume: PathBuf,
        /// Print the full service response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the form page
    Serve {
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        address: Option<IpAddr>,
    },
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut ConfigManager) {
        if let Some(url) = &self.api_url {
            config.service.api_base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.service.timeout_seconds = timeout;
        }
        if let Command::Serve { port, address } = &self.command {
            if let Some(port) = port {
                config.web.port = *port;
            }
            if let Some(address) = address {
                config.web.address = *address;
            }
        }
    }

    /// `analyze` keeps stderr quiet unless asked otherwise.
    pub fn log_filter(&self, config: &ConfigManager) -> String {
        match self.command {
            Command::Analyze { .. } if !self.verbose => "jobmatch=warn".to_string(),
            _ => config.logging.filter.clone(),
        }
    }
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    match cli.command {
        Command::Analyze { jd, resume, json } => {
            let job_description = read_text_source(&jd).await?;
            let resume = ResumeFile::from_path(&resume).await?;
            let client = ServiceClient::new(
                config.service.api_base_url.clone(),
                config.service.timeout(),
            )?;

            let mut form = SubmissionForm::new();
            form.set_job_description(job_description);
            form.select_resume(resume)?;

            let output = run_analysis(&mut form, &client, json).await?;
            println!("{}", output);
        }
        Command::Serve { .. } => start_web_server(&config).await?,
    }

    Ok(())
}

/// Submit a prepared form and render the outcome as terminal text (or the
/// full response as JSON).
pub async fn run_analysis<B: AnalysisBackend>(
    form: &mut SubmissionForm,
    backend: &B,
    json: bool,
) -> Result<String> {
    form.submit(backend).await?;

    if json {
        let response = form
            .last_response()
            .context("Analysis finished without a response")?;
        return serde_json::to_string_pretty(response).context("Failed to encode response");
    }

    let results = FormView::from_form(form)
        .results
        .context("Analysis finished without a match result")?;
    info!("Rendered result for request {}", form.sequence());
    Ok(results.to_string())
}
