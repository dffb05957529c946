use reqwest::StatusCode;

use crate::{
    client::{segment, IamsClient, OK_OR_NO_CONTENT},
    error::IamsError,
    types::{Tenant, TenantRequest},
};

/// `/admin/tenants`
pub struct TenantsApi<'a> {
    client: &'a IamsClient,
}

impl<'a> TenantsApi<'a> {
    pub fn new(client: &'a IamsClient) -> Self {
        Self { client }
    }

    /// Create a tenant and return its id
    pub async fn create(&self, name: &str) -> Result<String, IamsError> {
        let body = TenantRequest {
            name: name.to_string(),
        };
        self.client
            .post("/tenants", Some(&body))
            .await?
            .expect_status("create tenant", &[201])?
            .created_id()
    }

    pub async fn get(&self, tenant_id: &str) -> Result<Tenant, IamsError> {
        self.client
            .get(&format!("/tenants/{}", segment(tenant_id)))
            .await?
            .expect_status("get tenant", &[200])?
            .json()
    }

    pub async fn list(&self) -> Result<Vec<Tenant>, IamsError> {
        self.client
            .get("/tenants")
            .await?
            .expect_status("list tenants", &[200])?
            .json()
    }

    pub async fn update(&self, tenant_id: &str, name: &str) -> Result<(), IamsError> {
        let body = TenantRequest {
            name: name.to_string(),
        };
        self.client
            .put(&format!("/tenants/{}", segment(tenant_id)), &body)
            .await?
            .expect_status("update tenant", OK_OR_NO_CONTENT)?;
        Ok(())
    }

    /// Delete a tenant; returns the success status (200 or 204)
    pub async fn delete(&self, tenant_id: &str) -> Result<StatusCode, IamsError> {
        let response = self
            .client
            .delete(&format!("/tenants/{}", segment(tenant_id)))
            .await?
            .expect_status("delete tenant", OK_OR_NO_CONTENT)?;
        Ok(response.status)
    }
}
