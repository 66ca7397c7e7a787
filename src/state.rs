use std::sync::Arc;

use crate::{
    config::{AppConfig, Backend},
    error::AppResult,
    services::{
        functions_api::FunctionsApi, functions_client::FunctionsApiClient,
        memory_store::InMemoryFunctionsApi,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn FunctionsApi>,
}

impl AppState {
    pub fn new(api: Arc<dyn FunctionsApi>) -> Self {
        Self { api }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryFunctionsApi::new()))
    }

    /// Picks the data-access adapter named by the configuration.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let state = match &config.backend {
            Backend::Memory => Self::in_memory(),
            Backend::Http { base_url } => {
                let client = FunctionsApiClient::new(base_url, config.request_timeout)?;
                Self::new(Arc::new(client))
            }
        };
        Ok(state)
    }
}
