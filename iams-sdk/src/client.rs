use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    admin::{
        memberships::MembershipsApi, permissions::PermissionsApi, resources::ResourcesApi,
        roles::RolesApi, scopes::ScopesApi, tenants::TenantsApi, users::UsersApi,
    },
    error::IamsError,
};

/// Raw answer of an admin endpoint
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Fail unless the status is one of `allowed`
    pub fn expect_status(self, operation: &str, allowed: &[u16]) -> Result<Self, IamsError> {
        if allowed.contains(&self.status.as_u16()) {
            Ok(self)
        } else {
            Err(IamsError::unexpected_status(
                operation,
                allowed,
                self.status.as_u16(),
                self.body,
            ))
        }
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, IamsError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Identifier returned by a create endpoint
    ///
    /// The server answers either with the bare id or with a JSON string literal.
    pub fn created_id(&self) -> Result<String, IamsError> {
        let raw = self.body.trim();
        let id = match serde_json::from_str::<String>(raw) {
            Ok(id) => id,
            Err(_) => raw.to_string(),
        };

        if id.is_empty() {
            return Err(IamsError::api_error(
                self.status.as_u16(),
                "Create response did not contain an identifier".to_string(),
            ));
        }
        Ok(id)
    }
}

/// Bearer-authenticated client for the IAMS admin API
#[derive(Clone)]
pub struct IamsClient {
    base_url: String,
    access_token: String,
    http_client: reqwest::Client,
}

impl IamsClient {
    /// Create a new client for `base_url` authenticated with `access_token`
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, IamsError> {
        let access_token = access_token.into();
        if access_token.is_empty() {
            return Err(IamsError::authentication("Access token cannot be empty"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| IamsError::Network { source: e })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
            http_client,
        })
    }

    /// Reuse an existing HTTP client (connection pool, timeouts)
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tenants(&self) -> TenantsApi<'_> {
        TenantsApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn memberships(&self) -> MembershipsApi<'_> {
        MembershipsApi::new(self)
    }

    pub fn roles(&self) -> RolesApi<'_> {
        RolesApi::new(self)
    }

    pub fn scopes(&self) -> ScopesApi<'_> {
        ScopesApi::new(self)
    }

    pub fn resources(&self) -> ResourcesApi<'_> {
        ResourcesApi::new(self)
    }

    pub fn permissions(&self) -> PermissionsApi<'_> {
        PermissionsApi::new(self)
    }

    fn headers(&self) -> Result<HeaderMap, IamsError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.access_token))
                .map_err(|_| IamsError::authentication("Invalid access token format"))?,
        );
        Ok(headers)
    }

    /// Send a request to `/admin{path}` and return the raw answer
    ///
    /// Non-success statuses are not errors at this layer.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse, IamsError> {
        let url = format!("{}/admin{}", self.base_url, path);
        let mut headers = self.headers()?;

        let mut request = self.http_client.request(method.clone(), &url);
        if let Some(body) = body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request
            .headers(headers)
            .send()
            .await
            .map_err(|e| IamsError::Network { source: e })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IamsError::Network { source: e })?;

        tracing::debug!("{} {} -> {}", method, url, status.as_u16());
        Ok(ApiResponse { status, body })
    }

    pub(crate) async fn get(&self, path: &str) -> Result<ApiResponse, IamsError> {
        self.send::<()>(Method::GET, path, None).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<ApiResponse, IamsError> {
        self.send::<()>(Method::DELETE, path, None).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse, IamsError> {
        self.send(Method::POST, path, body).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, IamsError> {
        self.send(Method::PUT, path, Some(body)).await
    }
}

/// Percent-encode one path segment
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Statuses accepted for a successful delete or update
pub const OK_OR_NO_CONTENT: &[u16] = &[200, 204];
