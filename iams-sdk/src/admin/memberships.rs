use reqwest::StatusCode;

use crate::{
    client::{segment, IamsClient},
    error::IamsError,
    types::{MembershipOutcome, User},
};

/// `/admin/tenants/{tenantId}/memberships`
pub struct MembershipsApi<'a> {
    client: &'a IamsClient,
}

impl<'a> MembershipsApi<'a> {
    pub fn new(client: &'a IamsClient) -> Self {
        Self { client }
    }

    fn path(tenant_id: &str) -> String {
        format!("/tenants/{}/memberships", segment(tenant_id))
    }

    /// Add a user to a tenant; an existing membership (409) is not an error
    pub async fn add(&self, tenant_id: &str, user_id: &str) -> Result<MembershipOutcome, IamsError> {
        let path = format!("{}/{}", Self::path(tenant_id), segment(user_id));
        let response = self
            .client
            .post::<()>(&path, None)
            .await?
            .expect_status("add membership", &[201, 409])?;

        if response.status == StatusCode::CONFLICT {
            Ok(MembershipOutcome::AlreadyMember)
        } else {
            Ok(MembershipOutcome::Added)
        }
    }

    pub async fn list(&self, tenant_id: &str) -> Result<Vec<User>, IamsError> {
        self.client
            .get(&Self::path(tenant_id))
            .await?
            .expect_status("list memberships", &[200])?
            .json()
    }

    /// True once the user shows up in the tenant's membership listing
    ///
    /// A non-200 listing counts as "not yet visible" so callers can poll on it.
    pub async fn is_member(&self, tenant_id: &str, user_id: &str) -> Result<bool, IamsError> {
        let response = self.client.get(&Self::path(tenant_id)).await?;
        if response.status != StatusCode::OK {
            return Ok(false);
        }
        let members: Vec<User> = response.json()?;
        Ok(members.iter().any(|member| member.id == user_id))
    }

    /// Remove a user from a tenant; returns the success status
    pub async fn remove(&self, tenant_id: &str, user_id: &str) -> Result<StatusCode, IamsError> {
        let path = format!("{}/{}", Self::path(tenant_id), segment(user_id));
        let response = self
            .client
            .delete(&path)
            .await?
            .expect_status("remove membership", &[200, 204])?;
        Ok(response.status)
    }

    /// Number of members; the endpoint answers with a plain integer
    pub async fn count(&self, tenant_id: &str) -> Result<u64, IamsError> {
        let response = self
            .client
            .get(&format!("{}/count", Self::path(tenant_id)))
            .await?
            .expect_status("count memberships", &[200])?;

        response.body.trim().parse().map_err(|_| {
            IamsError::api_error(
                response.status.as_u16(),
                format!("Membership count is not an integer: {}", response.body),
            )
        })
    }
}
