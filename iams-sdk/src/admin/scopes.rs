use reqwest::StatusCode;

use crate::{
    client::{segment, IamsClient, OK_OR_NO_CONTENT},
    error::IamsError,
    types::{Resource, Scope, ScopeRequest},
};

/// `/admin/tenants/{tenantId}/scopes`
pub struct ScopesApi<'a> {
    client: &'a IamsClient,
}

impl<'a> ScopesApi<'a> {
    pub fn new(client: &'a IamsClient) -> Self {
        Self { client }
    }

    fn path(tenant_id: &str) -> String {
        format!("/tenants/{}/scopes", segment(tenant_id))
    }

    pub async fn create(&self, tenant_id: &str, name: &str) -> Result<String, IamsError> {
        let body = ScopeRequest {
            name: name.to_string(),
        };
        self.client
            .post(&Self::path(tenant_id), Some(&body))
            .await?
            .expect_status("create scope", &[201])?
            .created_id()
    }

    pub async fn list(&self, tenant_id: &str) -> Result<Vec<Scope>, IamsError> {
        self.client
            .get(&Self::path(tenant_id))
            .await?
            .expect_status("list scopes", &[200])?
            .json()
    }

    pub async fn update(&self, tenant_id: &str, scope_id: &str, name: &str) -> Result<(), IamsError> {
        let body = ScopeRequest {
            name: name.to_string(),
        };
        self.client
            .put(&format!("{}/{}", Self::path(tenant_id), segment(scope_id)), &body)
            .await?
            .expect_status("update scope", &[200])?;
        Ok(())
    }

    pub async fn delete(&self, tenant_id: &str, scope_id: &str) -> Result<StatusCode, IamsError> {
        let response = self
            .client
            .delete(&format!("{}/{}", Self::path(tenant_id), segment(scope_id)))
            .await?
            .expect_status("delete scope", OK_OR_NO_CONTENT)?;
        Ok(response.status)
    }

    /// Resources bound to a scope
    pub async fn resources(&self, tenant_id: &str, scope_id: &str) -> Result<Vec<Resource>, IamsError> {
        self.client
            .get(&format!(
                "{}/{}/resources",
                Self::path(tenant_id),
                segment(scope_id)
            ))
            .await?
            .expect_status("list scope resources", &[200])?
            .json()
    }
}
