use std::sync::Arc;

use iams_sdk::{auth::TokenStore, IamsClient, PollPolicy};

use crate::{config::E2eConfig, error::SuiteResult};

/// State shared by every scenario of a run
#[derive(Clone)]
pub struct SuiteContext {
    config: Arc<E2eConfig>,
    http_client: reqwest::Client,
    token_store: TokenStore,
}

impl SuiteContext {
    pub fn new(config: E2eConfig) -> SuiteResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| iams_sdk::IamsError::Network { source: e })?;
        let token_store = TokenStore::new(config.auth.token_file.clone());

        Ok(Self {
            config: Arc::new(config),
            http_client,
            token_store,
        })
    }

    pub fn config(&self) -> &E2eConfig {
        &self.config
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.token_store
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.config.poll_policy()
    }

    /// Admin client authenticated with the token saved by the global setup
    pub async fn client(&self) -> SuiteResult<IamsClient> {
        let access_token = self.token_store.access_token().await?;
        Ok(IamsClient::new(self.config.api.base_url.clone(), access_token)?
            .with_http_client(self.http_client.clone()))
    }
}
