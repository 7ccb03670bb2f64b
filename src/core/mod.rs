// src/core/mod.rs
//! Core services shared by the CLI and the served page

pub mod config_manager;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use service_client::{AnalysisBackend, ServiceClient};
