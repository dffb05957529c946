use reqwest::StatusCode;

use crate::{
    client::{segment, IamsClient, OK_OR_NO_CONTENT},
    error::IamsError,
    types::{Permission, PermissionGrant},
};

/// Resource permissions granted to users
pub struct PermissionsApi<'a> {
    client: &'a IamsClient,
}

impl<'a> PermissionsApi<'a> {
    pub fn new(client: &'a IamsClient) -> Self {
        Self { client }
    }

    fn resource_path(tenant_id: &str, resource_id: &str) -> String {
        format!(
            "/tenants/{}/resources/{}/permissions",
            segment(tenant_id),
            segment(resource_id)
        )
    }

    /// Grant `scopes` on a resource to a user
    pub async fn grant(
        &self,
        tenant_id: &str,
        resource_id: &str,
        user_id: &str,
        scopes: &[String],
    ) -> Result<(), IamsError> {
        let body = PermissionGrant {
            user_id: user_id.to_string(),
            scopes: scopes.to_vec(),
        };
        self.client
            .post(&Self::resource_path(tenant_id, resource_id), Some(&body))
            .await?
            .expect_status("grant permission", &[201])?;
        Ok(())
    }

    /// Effective permissions of a user inside a tenant
    pub async fn list_for_user(&self, tenant_id: &str, user_id: &str) -> Result<Vec<Permission>, IamsError> {
        self.client
            .get(&format!(
                "/tenants/{}/users/{}/permissions",
                segment(tenant_id),
                segment(user_id)
            ))
            .await?
            .expect_status("list user permissions", &[200])?
            .json()
    }

    pub async fn revoke(
        &self,
        tenant_id: &str,
        resource_id: &str,
        user_id: &str,
    ) -> Result<StatusCode, IamsError> {
        let path = format!(
            "{}/{}",
            Self::resource_path(tenant_id, resource_id),
            segment(user_id)
        );
        let response = self
            .client
            .delete(&path)
            .await?
            .expect_status("revoke permission", OK_OR_NO_CONTENT)?;
        Ok(response.status)
    }
}
