//! Shared application state for the Axum API server.

use depot_common::config::AppConfig;
use depot_common::error::AppError;
use depot_quidax::QuidaxClient;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub quidax: QuidaxClient,
}

impl AppState {
    pub fn new(quidax: QuidaxClient) -> Self {
        Self { quidax }
    }

    /// Build state, including the upstream client, from loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self::new(QuidaxClient::new(config)?))
    }
}
