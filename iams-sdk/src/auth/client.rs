use reqwest::StatusCode;

use crate::{
    auth::types::{Credentials, TokenErrorResponse, TokenPair, TokenResponse},
    error::IamsError,
};

/// OAuth2 token endpoint client
pub struct TokenClient {
    token_url: String,
    http_client: reqwest::Client,
}

impl TokenClient {
    /// Create a client for the given token endpoint URL
    pub fn new(token_url: impl Into<String>) -> Result<Self, IamsError> {
        let token_url = token_url.into();
        if token_url.is_empty() {
            return Err(IamsError::invalid_request("Token URL cannot be empty"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| IamsError::Network { source: e })?;

        Ok(Self {
            token_url,
            http_client,
        })
    }

    /// Reuse an existing HTTP client
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Exchange resource-owner credentials for a token pair
    pub async fn password_grant(&self, credentials: &Credentials) -> Result<TokenPair, IamsError> {
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("client_id", credentials.client_id.as_str()),
            ("grant_type", "password"),
            ("scope", credentials.scope.as_str()),
        ];

        tracing::debug!(
            "Requesting password grant for '{}' at {}",
            credentials.username,
            self.token_url
        );
        self.request_token(&form).await
    }

    /// Exchange a refresh token for a fresh token pair
    pub async fn refresh(
        &self,
        client_id: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, IamsError> {
        if refresh_token.is_empty() {
            return Err(IamsError::authentication("Refresh token cannot be empty"));
        }

        let form = [
            ("client_id", client_id),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        tracing::debug!("Refreshing access token at {}", self.token_url);
        self.request_token(&form).await
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenPair, IamsError> {
        let response = self
            .http_client
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .map_err(|e| IamsError::Network { source: e })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status != StatusCode::OK {
            let detail = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(error_response) => error_response.to_string(),
                Err(_) => body,
            };
            return Err(IamsError::authentication(format!(
                "Failed to get access token. Status: {}, Body: {}",
                status.as_u16(),
                detail
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        if token.access_token.is_empty() {
            return Err(IamsError::authentication(
                "Token endpoint returned an empty access token",
            ));
        }

        Ok(token.into())
    }
}
