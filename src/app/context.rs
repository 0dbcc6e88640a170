use std::sync::Arc;

use crate::api::{ApiClient, ApiSource, Source};
use crate::app::error::{Result, TrendlineError};
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpTransport;
use crate::fetcher::Transport;

pub struct AppContext {
    pub config: Config,
    pub source: Arc<dyn Source + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        if config.api.client_id.is_empty() {
            tracing::warn!("No client_id configured; token exchange will likely be rejected");
        }

        let transport = HttpTransport::with_timeout(&config.api.base_url, config.api.timeout())
            .map_err(|e| match e {
                TrendlineError::InvalidUrl(e) => TrendlineError::Config(format!(
                    "Invalid base_url {:?}: {}",
                    config.api.base_url, e
                )),
                other => other,
            })?;
        let transport: Arc<dyn Transport + Send + Sync> = Arc::new(transport);
        let client = ApiClient::new(transport, config.api.credentials());

        Ok(Self::with_source(config, Arc::new(ApiSource::new(client))))
    }

    pub fn with_source(config: Config, source: Arc<dyn Source + Send + Sync>) -> Self {
        Self { config, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_default_config() {
        assert!(AppContext::new(Config::default()).is_ok());
    }

    #[test]
    fn test_new_rejects_relative_base_url() {
        let mut config = Config::default();
        config.api.base_url = "/evaluation-service".to_string();

        let err = AppContext::new(config).err().unwrap();
        assert!(matches!(err, TrendlineError::Config(_)));
    }
}
