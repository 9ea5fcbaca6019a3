//! Metadata refiner
//!
//! Normalizes Dataverse dataset documents coming from different source
//! systems (CBS, CID, LISS, DANS Data Stations, DataverseNL, Sicada) before
//! they are imported, exposed as a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod reference;
pub mod refine;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let services = services::Services::new(&config);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
