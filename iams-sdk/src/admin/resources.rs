use reqwest::StatusCode;

use crate::{
    client::{segment, IamsClient, OK_OR_NO_CONTENT},
    error::IamsError,
    types::{Resource, ResourceRequest},
};

/// `/admin/tenants/{tenantId}/resources`
pub struct ResourcesApi<'a> {
    client: &'a IamsClient,
}

impl<'a> ResourcesApi<'a> {
    pub fn new(client: &'a IamsClient) -> Self {
        Self { client }
    }

    fn path(tenant_id: &str) -> String {
        format!("/tenants/{}/resources", segment(tenant_id))
    }

    fn item(tenant_id: &str, resource_id: &str) -> String {
        format!("{}/{}", Self::path(tenant_id), segment(resource_id))
    }

    pub async fn create(&self, tenant_id: &str, request: &ResourceRequest) -> Result<String, IamsError> {
        self.client
            .post(&Self::path(tenant_id), Some(request))
            .await?
            .expect_status("create resource", &[201])?
            .created_id()
    }

    pub async fn get(&self, tenant_id: &str, resource_id: &str) -> Result<Resource, IamsError> {
        self.client
            .get(&Self::item(tenant_id, resource_id))
            .await?
            .expect_status("get resource", &[200])?
            .json()
    }

    pub async fn list(&self, tenant_id: &str) -> Result<Vec<Resource>, IamsError> {
        self.client
            .get(&Self::path(tenant_id))
            .await?
            .expect_status("list resources", &[200])?
            .json()
    }

    pub async fn update(
        &self,
        tenant_id: &str,
        resource_id: &str,
        request: &ResourceRequest,
    ) -> Result<(), IamsError> {
        self.client
            .put(&Self::item(tenant_id, resource_id), request)
            .await?
            .expect_status("update resource", OK_OR_NO_CONTENT)?;
        Ok(())
    }

    pub async fn delete(&self, tenant_id: &str, resource_id: &str) -> Result<StatusCode, IamsError> {
        let response = self
            .client
            .delete(&Self::item(tenant_id, resource_id))
            .await?
            .expect_status("delete resource", OK_OR_NO_CONTENT)?;
        Ok(response.status)
    }
}
