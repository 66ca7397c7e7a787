use std::{env, time::Duration};

use anyhow::bail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Http { base_url: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend: Backend,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("APP_PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let request_timeout = lookup("FUNCTIONS_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let backend = match lookup("FUNCTIONS_BACKEND").as_deref() {
            None | Some("memory") => Backend::Memory,
            Some("http") => {
                let Some(base_url) = lookup("FUNCTIONS_BASE_URL") else {
                    bail!("FUNCTIONS_BASE_URL must be set when FUNCTIONS_BACKEND=http");
                };
                Backend::Http { base_url }
            }
            Some(other) => bail!("unknown FUNCTIONS_BACKEND `{other}` (expected memory or http)"),
        };

        Ok(Self {
            host,
            port,
            backend,
            request_timeout,
        })
    }
}
