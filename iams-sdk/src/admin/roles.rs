use reqwest::StatusCode;

use crate::{
    client::{segment, IamsClient},
    error::IamsError,
    types::{Role, RoleRef, RoleRequest, User, UserRef},
};

/// `/admin/tenants/{tenantId}/roles`, `roles-by-id` and user role mappings
pub struct RolesApi<'a> {
    client: &'a IamsClient,
}

impl<'a> RolesApi<'a> {
    pub fn new(client: &'a IamsClient) -> Self {
        Self { client }
    }

    fn by_name(tenant_id: &str, role_name: &str) -> String {
        format!("/tenants/{}/roles/{}", segment(tenant_id), segment(role_name))
    }

    fn by_id(tenant_id: &str, role_id: &str) -> String {
        format!("/tenants/{}/roles-by-id/{}", segment(tenant_id), segment(role_id))
    }

    fn user_roles(tenant_id: &str, user_id: &str) -> String {
        format!("/tenants/{}/users/{}/roles", segment(tenant_id), segment(user_id))
    }

    /// Start building a role inside `tenant_id`
    pub fn builder(&self, tenant_id: &str) -> RoleBuilder<'_> {
        RoleBuilder::new(self.client, tenant_id)
    }

    pub async fn create(&self, tenant_id: &str, request: &RoleRequest) -> Result<String, IamsError> {
        if request.name.is_empty() {
            return Err(IamsError::invalid_request("Role name cannot be empty"));
        }
        self.client
            .post(&format!("/tenants/{}/roles", segment(tenant_id)), Some(request))
            .await?
            .expect_status("create role", &[201])?
            .created_id()
    }

    pub async fn get(&self, tenant_id: &str, role_name: &str) -> Result<Role, IamsError> {
        self.client
            .get(&Self::by_name(tenant_id, role_name))
            .await?
            .expect_status("get role by name", &[200])?
            .json()
    }

    /// Look a role up by name, mapping 404 to `None`
    pub async fn find(&self, tenant_id: &str, role_name: &str) -> Result<Option<Role>, IamsError> {
        let response = self.client.get(&Self::by_name(tenant_id, role_name)).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        response
            .expect_status("find role by name", &[200])?
            .json()
            .map(Some)
    }

    pub async fn get_by_id(&self, tenant_id: &str, role_id: &str) -> Result<Role, IamsError> {
        self.client
            .get(&Self::by_id(tenant_id, role_id))
            .await?
            .expect_status("get role by id", &[200])?
            .json()
    }

    pub async fn list(&self, tenant_id: &str) -> Result<Vec<Role>, IamsError> {
        self.client
            .get(&format!("/tenants/{}/roles", segment(tenant_id)))
            .await?
            .expect_status("list roles", &[200])?
            .json()
    }

    /// Update the role currently named `role_name`; the request may rename it
    pub async fn update(
        &self,
        tenant_id: &str,
        role_name: &str,
        request: &RoleRequest,
    ) -> Result<(), IamsError> {
        self.client
            .put(&Self::by_name(tenant_id, role_name), request)
            .await?
            .expect_status("update role", &[200])?;
        Ok(())
    }

    pub async fn delete(&self, tenant_id: &str, role_name: &str) -> Result<StatusCode, IamsError> {
        let response = self
            .client
            .delete(&Self::by_name(tenant_id, role_name))
            .await?
            .expect_status("delete role by name", &[200])?;
        Ok(response.status)
    }

    pub async fn delete_by_id(&self, tenant_id: &str, role_id: &str) -> Result<StatusCode, IamsError> {
        let response = self
            .client
            .delete(&Self::by_id(tenant_id, role_id))
            .await?
            .expect_status("delete role by id", &[200])?;
        Ok(response.status)
    }

    pub async fn assign_to_user(
        &self,
        tenant_id: &str,
        user_id: &str,
        roles: &[RoleRef],
    ) -> Result<(), IamsError> {
        self.client
            .post(&Self::user_roles(tenant_id, user_id), Some(roles))
            .await?
            .expect_status("assign roles to user", &[201])?;
        Ok(())
    }

    pub async fn list_for_user(&self, tenant_id: &str, user_id: &str) -> Result<Vec<Role>, IamsError> {
        self.client
            .get(&Self::user_roles(tenant_id, user_id))
            .await?
            .expect_status("list user roles", &[200])?
            .json()
    }

    pub async fn unassign_from_user(
        &self,
        tenant_id: &str,
        user_id: &str,
        roles: &[RoleRef],
    ) -> Result<(), IamsError> {
        self.client
            .send(
                reqwest::Method::DELETE,
                &Self::user_roles(tenant_id, user_id),
                Some(roles),
            )
            .await?
            .expect_status("unassign roles from user", &[200])?;
        Ok(())
    }

    pub async fn assign_users(
        &self,
        tenant_id: &str,
        role_name: &str,
        users: &[UserRef],
    ) -> Result<(), IamsError> {
        let path = format!("{}/users", Self::by_name(tenant_id, role_name));
        self.client
            .post(&path, Some(users))
            .await?
            .expect_status("assign users to role", &[201])?;
        Ok(())
    }

    pub async fn list_users(&self, tenant_id: &str, role_name: &str) -> Result<Vec<User>, IamsError> {
        let path = format!("{}/users", Self::by_name(tenant_id, role_name));
        self.client
            .get(&path)
            .await?
            .expect_status("list role users", &[200])?
            .json()
    }

    pub async fn unassign_user(
        &self,
        tenant_id: &str,
        role_name: &str,
        user_id: &str,
    ) -> Result<(), IamsError> {
        let path = format!("{}/users/{}", Self::by_name(tenant_id, role_name), segment(user_id));
        self.client
            .delete(&path)
            .await?
            .expect_status("unassign user from role", &[200])?;
        Ok(())
    }
}

/// Builder for role create/update requests
pub struct RoleBuilder<'a> {
    client: &'a IamsClient,
    tenant_id: String,
    name: Option<String>,
    description: Option<String>,
    client_role: bool,
    container_id: Option<String>,
}

impl<'a> RoleBuilder<'a> {
    /// Create a new role builder; the container defaults to the tenant
    pub fn new(client: &'a IamsClient, tenant_id: impl Into<String>) -> Self {
        let tenant_id = tenant_id.into();
        Self {
            client,
            container_id: Some(tenant_id.clone()),
            tenant_id,
            name: None,
            description: None,
            client_role: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn client_role(mut self, client_role: bool) -> Self {
        self.client_role = client_role;
        self
    }

    pub fn container_id(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    /// Build the request without sending it
    pub fn build(self) -> Result<RoleRequest, IamsError> {
        let name = self
            .name
            .ok_or_else(|| IamsError::invalid_request("Role name is required"))?;

        Ok(RoleRequest {
            name,
            description: self.description,
            client_role: self.client_role,
            container_id: self.container_id,
        })
    }

    /// Create the role and return its id
    pub async fn create(self) -> Result<String, IamsError> {
        let client = self.client;
        let tenant_id = self.tenant_id.clone();
        let request = self.build()?;
        client.roles().create(&tenant_id, &request).await
    }

    /// Update the role currently named `current_name` with the built fields
    pub async fn update(self, current_name: &str) -> Result<(), IamsError> {
        let client = self.client;
        let tenant_id = self.tenant_id.clone();
        let request = self.build()?;
        client.roles().update(&tenant_id, current_name, &request).await
    }
}
