//! Business logic services

pub mod refinement;

use crate::config::AppConfig;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub refinement: refinement::RefinementService,
}

impl Services {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            refinement: refinement::RefinementService::new(config.refinement.clone()),
        }
    }
}
