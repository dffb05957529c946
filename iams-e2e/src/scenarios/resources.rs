use async_trait::async_trait;
use iams_sdk::{naming, types::ResourceRequest};
use tracing::info;

use crate::{
    context::SuiteContext,
    scenarios::common::{connect, connected, cleanup_tenant, cleanup_user, create_tenant, create_user},
    suite::{
        expect::{self, fixture},
        Scenario, ScenarioReport, SerialRun,
    },
};

/// Resources bound to a scope, and user permissions on them
pub struct ResourcesScenario;

#[derive(Default)]
struct Fixtures {
    tenant_id: Option<String>,
    user_id: Option<String>,
    scope_id: Option<String>,
    resource_id: Option<String>,
    deleted_resource_id: Option<String>,
}

#[async_trait]
impl Scenario for ResourcesScenario {
    fn name(&self) -> &'static str {
        "resources"
    }

    fn description(&self) -> &'static str {
        "Tenant resources and resource permissions"
    }

    async fn run(&self, ctx: &SuiteContext) -> ScenarioReport {
        let mut run = SerialRun::new(self.name());
        let api = connect(&mut run, ctx).await;

        let mut fx = Fixtures::default();

        run.setup(async {
            let client = connected(&api)?;
            let tenant_id = create_tenant(client, "ResourceTenant").await?;
            fx.tenant_id = Some(tenant_id.clone());
            let user_id = create_user(client, "resourceuser").await?;
            fx.user_id = Some(user_id.clone());
            client.memberships().add(&tenant_id, &user_id).await?;

            let scope_id = client
                .scopes()
                .create(&tenant_id, &naming::timestamped("ResourceScope"))
                .await?;
            info!("Created scope with ID: {}", scope_id);
            fx.scope_id = Some(scope_id);
            Ok(())
        })
        .await;

        run.step(
            "1. POST /admin/tenants/{tenantId}/resources - Create a resource",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let scope_id = fixture(&fx.scope_id, "scope")?;
                let request = ResourceRequest {
                    name: naming::timestamped("TestResource"),
                    scopes: vec![scope_id.to_string()],
                };
                let resource_id = client.resources().create(tenant_id, &request).await?;
                info!("Created resource with ID: {}", resource_id);
                fx.resource_id = Some(resource_id);
                Ok(())
            },
        )
        .await;

        run.step(
            "2. GET /admin/tenants/{tenantId}/resources/{resourceId} - Get the resource",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let resource_id = fixture(&fx.resource_id, "resource")?;
                let resource = client.resources().get(tenant_id, resource_id).await?;
                expect::equals(resource.id.as_str(), resource_id, "resource id")?;
                expect::ensure(
                    resource.scopes.iter().any(|s| Some(s.as_str()) == fx.scope_id.as_deref()),
                    "resource is not bound to its scope",
                )
            },
        )
        .await;

        run.step(
            "3. GET /admin/tenants/{tenantId}/resources - Verify the resource is listed",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let resources = client.resources().list(tenant_id).await?;
                expect::contains_id(&resources, fixture(&fx.resource_id, "resource")?, "resource")?;
                Ok(())
            },
        )
        .await;

        run.step(
            "4. GET /admin/tenants/{tenantId}/scopes/{scopeId}/resources - Verify the scope lists the resource",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let scope_id = fixture(&fx.scope_id, "scope")?;
                let resources = client.scopes().resources(tenant_id, scope_id).await?;
                expect::contains_id(&resources, fixture(&fx.resource_id, "resource")?, "scope resource")?;
                Ok(())
            },
        )
        .await;

        run.step(
            "5. PUT /admin/tenants/{tenantId}/resources/{resourceId} - Rename the resource",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let resource_id = fixture(&fx.resource_id, "resource")?;
                let request = ResourceRequest {
                    name: naming::timestamped("UpdatedResource"),
                    scopes: vec![fixture(&fx.scope_id, "scope")?.to_string()],
                };
                client.resources().update(tenant_id, resource_id, &request).await?;

                let resource = client.resources().get(tenant_id, resource_id).await?;
                expect::equals(resource.name, Some(request.name), "resource name")
            },
        )
        .await;

        run.step(
            "6. POST /admin/tenants/{tenantId}/resources/{resourceId}/permissions - Grant a user permission",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let resource_id = fixture(&fx.resource_id, "resource")?;
                let user_id = fixture(&fx.user_id, "user")?;
                let scopes = vec![fixture(&fx.scope_id, "scope")?.to_string()];
                client
                    .permissions()
                    .grant(tenant_id, resource_id, user_id, &scopes)
                    .await?;
                Ok(())
            },
        )
        .await;

        run.step(
            "7. GET /admin/tenants/{tenantId}/users/{userId}/permissions - Verify the permission",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let user_id = fixture(&fx.user_id, "user")?;
                let permissions = client.permissions().list_for_user(tenant_id, user_id).await?;
                let granted = expect::contains_id(
                    &permissions,
                    fixture(&fx.resource_id, "resource")?,
                    "permission on resource",
                )?;
                expect::ensure(
                    granted.scopes.iter().any(|s| Some(s.as_str()) == fx.scope_id.as_deref()),
                    "permission does not carry the granted scope",
                )
            },
        )
        .await;

        run.step(
            "8. DELETE /admin/tenants/{tenantId}/resources/{resourceId}/permissions/{userId} - Revoke the permission",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let resource_id = fixture(&fx.resource_id, "resource")?;
                let user_id = fixture(&fx.user_id, "user")?;
                client.permissions().revoke(tenant_id, resource_id, user_id).await?;

                let permissions = client.permissions().list_for_user(tenant_id, user_id).await?;
                expect::absent_id(&permissions, resource_id, "permission on resource")
            },
        )
        .await;

        run.step(
            "9. DELETE /admin/tenants/{tenantId}/resources/{resourceId} - Delete the resource",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let resource_id = fixture(&fx.resource_id, "resource")?.to_string();
                client.resources().delete(tenant_id, &resource_id).await?;
                fx.resource_id = None;
                fx.deleted_resource_id = Some(resource_id);
                Ok(())
            },
        )
        .await;

        run.step(
            "10. GET /admin/tenants/{tenantId}/resources/{resourceId} - Verify the resource is gone",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let resource_id = fixture(&fx.deleted_resource_id, "deleted resource")?;
                expect::not_found(
                    client.resources().get(tenant_id, resource_id).await,
                    "deleted resource",
                )
            },
        )
        .await;

        let Some(client) = api.as_ref() else {
            return run.finish();
        };

        if let Some(tenant_id) = fx.tenant_id.clone() {
            if let Some(resource_id) = fx.resource_id.take() {
                run.teardown(&format!("delete resource {}", resource_id), async {
                    client.resources().delete(&tenant_id, &resource_id).await?;
                    Ok(())
                })
                .await;
            }
            if let Some(scope_id) = fx.scope_id.take() {
                run.teardown(&format!("delete scope {}", scope_id), async {
                    client.scopes().delete(&tenant_id, &scope_id).await?;
                    Ok(())
                })
                .await;
            }
        }
        cleanup_user(&mut run, client, fx.user_id.take()).await;
        cleanup_tenant(&mut run, client, fx.tenant_id.take()).await;

        run.finish()
    }
}
