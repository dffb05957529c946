use async_trait::async_trait;
use iams_sdk::naming;
use tracing::info;

use crate::{
    context::SuiteContext,
    scenarios::common::{connect, connected, cleanup_tenant, cleanup_user, create_tenant, create_user},
    suite::{
        expect::{self, fixture},
        Scenario, ScenarioReport, SerialRun,
    },
};

/// Scope CRUD inside a fresh tenant
pub struct ScopesScenario;

#[derive(Default)]
struct Fixtures {
    tenant_id: Option<String>,
    user_id: Option<String>,
    scope_id: Option<String>,
    deleted_scope_id: Option<String>,
}

#[async_trait]
impl Scenario for ScopesScenario {
    fn name(&self) -> &'static str {
        "scopes"
    }

    fn description(&self) -> &'static str {
        "Tenant scopes: create, list, rename, list resources, delete"
    }

    async fn run(&self, ctx: &SuiteContext) -> ScenarioReport {
        let mut run = SerialRun::new(self.name());
        let api = connect(&mut run, ctx).await;

        let mut fx = Fixtures::default();

        run.setup(async {
            let client = connected(&api)?;
            fx.tenant_id = Some(create_tenant(client, "ScopeTenant").await?);
            fx.user_id = Some(create_user(client, "scopeuser").await?);
            Ok(())
        })
        .await;

        run.step(
            "1. POST /admin/tenants/{tenantId}/scopes - Create a new tenant scope",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let scope_id = client
                    .scopes()
                    .create(tenant_id, &naming::timestamped("TestScope"))
                    .await?;
                info!("Created scope with ID: {}", scope_id);
                fx.scope_id = Some(scope_id);
                Ok(())
            },
        )
        .await;

        run.step(
            "2. GET /admin/tenants/{tenantId}/scopes - Verify the new scope exists",
            async {
                let client = connected(&api)?;
                let (tenant_id, scope_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.scope_id, "scope")?);
                let scopes = client.scopes().list(tenant_id).await?;
                expect::contains_id(&scopes, scope_id, "scope")?;
                Ok(())
            },
        )
        .await;

        run.step(
            "3. PUT /admin/tenants/{tenantId}/scopes/{scopeId} - Update a tenant scope",
            async {
                let client = connected(&api)?;
                let (tenant_id, scope_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.scope_id, "scope")?);
                let new_name = naming::timestamped("UpdatedScope");
                client.scopes().update(tenant_id, scope_id, &new_name).await?;

                let scopes = client.scopes().list(tenant_id).await?;
                let updated = expect::contains_id(&scopes, scope_id, "scope")?;
                expect::equals(updated.name.as_deref(), Some(new_name.as_str()), "scope name")?;
                info!("Verified scope name was updated successfully");
                Ok(())
            },
        )
        .await;

        run.step(
            "4. GET /admin/tenants/{tenantId}/scopes/{scopeId}/resources - List resources for a scope",
            async {
                let client = connected(&api)?;
                let (tenant_id, scope_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.scope_id, "scope")?);
                let resources = client.scopes().resources(tenant_id, scope_id).await?;
                info!("Scope {} lists {} resource(s)", scope_id, resources.len());
                Ok(())
            },
        )
        .await;

        run.step(
            "5. DELETE /admin/tenants/{tenantId}/scopes/{scopeId} - Delete a tenant scope",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let scope_id = fixture(&fx.scope_id, "scope")?.to_string();
                let status = client.scopes().delete(tenant_id, &scope_id).await?;
                expect::status_is(status, 200, "delete scope")?;
                info!("Deleted scope with ID: {}", scope_id);
                fx.scope_id = None;
                fx.deleted_scope_id = Some(scope_id);
                Ok(())
            },
        )
        .await;

        run.step(
            "6. GET /admin/tenants/{tenantId}/scopes - Verify the scope is deleted",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let scope_id = fixture(&fx.deleted_scope_id, "deleted scope")?;
                let scopes = client.scopes().list(tenant_id).await?;
                expect::absent_id(&scopes, scope_id, "scope")
            },
        )
        .await;

        let Some(client) = api.as_ref() else {
            return run.finish();
        };

        if let (Some(tenant_id), Some(scope_id)) = (fx.tenant_id.clone(), fx.scope_id.take()) {
            run.teardown(&format!("delete scope {}", scope_id), async {
                client.scopes().delete(&tenant_id, &scope_id).await?;
                Ok(())
            })
            .await;
        }
        cleanup_user(&mut run, client, fx.user_id.take()).await;
        cleanup_tenant(&mut run, client, fx.tenant_id.take()).await;

        run.finish()
    }
}
