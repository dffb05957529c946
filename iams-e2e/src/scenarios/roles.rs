use async_trait::async_trait;
use iams_sdk::{
    naming,
    types::{RoleRef, UserRef},
};
use tracing::{info, warn};

use crate::{
    context::SuiteContext,
    scenarios::common::{connect, connected, cleanup_tenant, cleanup_user, create_tenant, create_user},
    suite::{
        expect::{self, fixture},
        Scenario, ScenarioReport, SerialRun,
    },
};

const UPDATED_DESCRIPTION: &str = "Updated description";

/// Tenant roles: CRUD by name and id, user/role assignments in both directions
pub struct RolesScenario;

#[derive(Default)]
struct Fixtures {
    tenant_id: Option<String>,
    user_id: Option<String>,
    role_id: Option<String>,
    role_name: Option<String>,
}

impl Fixtures {
    fn role_ref(&self) -> Result<RoleRef, crate::error::SuiteError> {
        Ok(RoleRef {
            id: fixture(&self.role_id, "role id")?.to_string(),
            name: fixture(&self.role_name, "role name")?.to_string(),
        })
    }
}

#[async_trait]
impl Scenario for RolesScenario {
    fn name(&self) -> &'static str {
        "roles"
    }

    fn description(&self) -> &'static str {
        "Tenant roles: CRUD by name and id, user role mappings"
    }

    async fn run(&self, ctx: &SuiteContext) -> ScenarioReport {
        let mut run = SerialRun::new(self.name());
        let api = connect(&mut run, ctx).await;

        let mut fx = Fixtures::default();

        run.setup(async {
            let client = connected(&api)?;
            let tenant_id = create_tenant(client, "RoleTenant").await?;
            fx.tenant_id = Some(tenant_id.clone());
            let user_id = create_user(client, "roleuser").await?;
            fx.user_id = Some(user_id.clone());
            client.memberships().add(&tenant_id, &user_id).await?;

            let role_name = naming::uuid_suffixed("test-role");
            info!("Creating a test role: {}", role_name);
            let role_id = client
                .roles()
                .builder(&tenant_id)
                .name(role_name.as_str())
                .description("Test role created by the e2e suite")
                .create()
                .await?;
            fx.role_id = Some(role_id);
            fx.role_name = Some(role_name);
            Ok(())
        })
        .await;

        run.step(
            "1. POST /admin/tenants/{tenantId}/roles - Create a new role",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let new_role_id = client
                    .roles()
                    .builder(tenant_id)
                    .name(naming::uuid_suffixed("another-role"))
                    .description("Another test role")
                    .create()
                    .await?;
                expect::ensure(!new_role_id.is_empty(), "created role id is empty")?;
                client.roles().delete_by_id(tenant_id, &new_role_id).await?;
                Ok(())
            },
        )
        .await;

        run.step(
            "2. GET /admin/tenants/{tenantId}/roles/{role-name} - Get role by name",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let role_ref = fx.role_ref()?;
                let role = client.roles().get(tenant_id, &role_ref.name).await?;
                expect::equals(role.id.as_str(), role_ref.id.as_str(), "role id")?;
                expect::equals(role.name.as_str(), role_ref.name.as_str(), "role name")
            },
        )
        .await;

        run.step(
            "3. PUT /admin/tenants/{tenantId}/roles/{role-name} - Update a role",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?.to_string();
                let current_name = fixture(&fx.role_name, "role name")?.to_string();
                let updated_name = naming::uuid_suffixed("updated-role");

                client
                    .roles()
                    .builder(&tenant_id)
                    .name(updated_name.as_str())
                    .description(UPDATED_DESCRIPTION)
                    .update(&current_name)
                    .await?;

                let updated = client.roles().get(&tenant_id, &updated_name).await?;
                expect::equals(updated.name.as_str(), updated_name.as_str(), "updated role name")?;
                expect::equals(
                    updated.description.as_deref(),
                    Some(UPDATED_DESCRIPTION),
                    "updated role description",
                )?;

                fx.role_name = Some(updated_name);
                Ok(())
            },
        )
        .await;

        run.step(
            "4. GET /admin/tenants/{tenantId}/roles - List all roles",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let role_ref = fx.role_ref()?;
                let roles = client.roles().list(tenant_id).await?;
                let ours = expect::contains_id(&roles, &role_ref.id, "role")?;
                expect::equals(ours.name.as_str(), role_ref.name.as_str(), "listed role name")
            },
        )
        .await;

        run.step(
            "5. GET /admin/tenants/{tenantId}/roles-by-id/{roleId} - Get role by ID",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let role_ref = fx.role_ref()?;
                let role = client.roles().get_by_id(tenant_id, &role_ref.id).await?;
                expect::equals(role.id.as_str(), role_ref.id.as_str(), "role id")?;
                expect::equals(role.name.as_str(), role_ref.name.as_str(), "role name")
            },
        )
        .await;

        run.step(
            "6. POST /admin/tenants/{tenantId}/users/{userId}/roles - Assign a role to a user",
            async {
                let client = connected(&api)?;
                let (tenant_id, user_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.user_id, "user")?);
                client
                    .roles()
                    .assign_to_user(tenant_id, user_id, &[fx.role_ref()?])
                    .await?;
                Ok(())
            },
        )
        .await;

        run.step(
            "7. GET /admin/tenants/{tenantId}/users/{userId}/roles - List roles assigned to a user",
            async {
                let client = connected(&api)?;
                let (tenant_id, user_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.user_id, "user")?);
                let roles = client.roles().list_for_user(tenant_id, user_id).await?;
                expect::contains_id(&roles, fixture(&fx.role_id, "role id")?, "assigned role")?;
                Ok(())
            },
        )
        .await;

        run.step(
            "8. POST /admin/tenants/{tenantId}/roles/{role-name}/users - Assign a user to a role",
            async {
                let client = connected(&api)?;
                let (tenant_id, user_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.user_id, "user")?);
                let role_name = fixture(&fx.role_name, "role name")?;
                let users = [UserRef {
                    id: user_id.to_string(),
                }];
                client.roles().assign_users(tenant_id, role_name, &users).await?;
                Ok(())
            },
        )
        .await;

        run.step(
            "9. GET /admin/tenants/{tenantId}/roles/{role-name}/users - List users with a role",
            async {
                let client = connected(&api)?;
                let (tenant_id, user_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.user_id, "user")?);
                let role_name = fixture(&fx.role_name, "role name")?;
                let users = client.roles().list_users(tenant_id, role_name).await?;
                expect::contains_id(&users, user_id, "role member")?;
                Ok(())
            },
        )
        .await;

        run.step(
            "10. DELETE /admin/tenants/{tenantId}/users/{userId}/roles - Unassign roles from a user",
            async {
                let client = connected(&api)?;
                let (tenant_id, user_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.user_id, "user")?);
                client
                    .roles()
                    .unassign_from_user(tenant_id, user_id, &[fx.role_ref()?])
                    .await?;
                Ok(())
            },
        )
        .await;

        run.step(
            "11. DELETE /admin/tenants/{tenantId}/roles/{role-name}/users/{userId} - Unassign a user by role name and user id",
            async {
                let client = connected(&api)?;
                let (tenant_id, user_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.user_id, "user")?);
                let role_ref = fx.role_ref()?;

                // needs an assignment to remove
                if let Err(e) = client
                    .roles()
                    .assign_to_user(tenant_id, user_id, std::slice::from_ref(&role_ref))
                    .await
                {
                    warn!("Re-assigning role before unassign failed: {}", e);
                }

                client
                    .roles()
                    .unassign_user(tenant_id, &role_ref.name, user_id)
                    .await?;
                Ok(())
            },
        )
        .await;

        run.step(
            "12. DELETE /admin/tenants/{tenantId}/roles/{role-name} - Delete a role by name",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let role_name = fixture(&fx.role_name, "role name")?.to_string();
                let status = client.roles().delete(tenant_id, &role_name).await?;
                expect::status_is(status, 200, "delete role by name")?;
                fx.role_id = None;

                expect::not_found(client.roles().get(tenant_id, &role_name).await, "deleted role")
            },
        )
        .await;

        let Some(client) = api.as_ref() else {
            return run.finish();
        };

        info!("Cleaning up test role");
        if let (Some(tenant_id), Some(role_id)) = (fx.tenant_id.clone(), fx.role_id.take()) {
            run.teardown(&format!("delete role {}", role_id), async {
                client.roles().delete_by_id(&tenant_id, &role_id).await?;
                Ok(())
            })
            .await;
        }
        cleanup_user(&mut run, client, fx.user_id.take()).await;
        cleanup_tenant(&mut run, client, fx.tenant_id.take()).await;

        run.finish()
    }
}
