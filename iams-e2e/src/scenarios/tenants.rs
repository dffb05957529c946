use async_trait::async_trait;
use iams_sdk::naming;
use tracing::info;

use crate::{
    context::SuiteContext,
    scenarios::common::{connect, connected, cleanup_tenant, create_tenant},
    suite::{
        expect::{self, fixture},
        Scenario, ScenarioReport, SerialRun,
    },
};

/// Tenant lifecycle through `/admin/tenants`
pub struct TenantsScenario;

#[derive(Default)]
struct Fixtures {
    tenant_id: Option<String>,
    deleted_tenant_id: Option<String>,
}

#[async_trait]
impl Scenario for TenantsScenario {
    fn name(&self) -> &'static str {
        "tenants"
    }

    fn description(&self) -> &'static str {
        "Tenants: create, get, list, rename, delete"
    }

    async fn run(&self, ctx: &SuiteContext) -> ScenarioReport {
        let mut run = SerialRun::new(self.name());
        let api = connect(&mut run, ctx).await;

        let mut fx = Fixtures::default();

        run.step("1. POST /admin/tenants - Create a tenant", async {
            let client = connected(&api)?;
            fx.tenant_id = Some(create_tenant(client, "Tenant").await?);
            Ok(())
        })
        .await;

        run.step("2. GET /admin/tenants/{tenantId} - Get the tenant", async {
            let client = connected(&api)?;
            let tenant_id = fixture(&fx.tenant_id, "tenant")?;
            let tenant = client.tenants().get(tenant_id).await?;
            expect::equals(tenant.id.as_str(), tenant_id, "tenant id")
        })
        .await;

        run.step("3. GET /admin/tenants - Verify the tenant is listed", async {
            let client = connected(&api)?;
            let tenant_id = fixture(&fx.tenant_id, "tenant")?;
            let tenants = client.tenants().list().await?;
            expect::contains_id(&tenants, tenant_id, "tenant")?;
            Ok(())
        })
        .await;

        run.step("4. PUT /admin/tenants/{tenantId} - Rename the tenant", async {
            let client = connected(&api)?;
            let tenant_id = fixture(&fx.tenant_id, "tenant")?;
            let new_name = naming::timestamped("RenamedTenant");
            client.tenants().update(tenant_id, &new_name).await?;

            let tenant = client.tenants().get(tenant_id).await?;
            expect::equals(tenant.name.as_deref(), Some(new_name.as_str()), "tenant name")
        })
        .await;

        run.step("5. DELETE /admin/tenants/{tenantId} - Delete the tenant", async {
            let client = connected(&api)?;
            let tenant_id = fixture(&fx.tenant_id, "tenant")?.to_string();
            client.tenants().delete(&tenant_id).await?;
            info!("Deleted tenant with ID: {}", tenant_id);
            fx.tenant_id = None;
            fx.deleted_tenant_id = Some(tenant_id);
            Ok(())
        })
        .await;

        run.step(
            "6. GET /admin/tenants/{tenantId} - Verify the tenant is gone",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.deleted_tenant_id, "deleted tenant")?;
                expect::not_found(client.tenants().get(tenant_id).await, "deleted tenant")?;

                let tenants = client.tenants().list().await?;
                expect::absent_id(&tenants, tenant_id, "tenant")
            },
        )
        .await;

        let Some(client) = api.as_ref() else {
            return run.finish();
        };

        cleanup_tenant(&mut run, client, fx.tenant_id.take()).await;

        run.finish()
    }
}
