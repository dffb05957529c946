use async_trait::async_trait;
use iams_sdk::{poll_until, types::MembershipOutcome};
use tracing::info;

use crate::{
    context::SuiteContext,
    error::SuiteError,
    scenarios::common::{connect, connected, cleanup_tenant, cleanup_user, create_tenant, create_user},
    suite::{
        expect::{self, fixture},
        Scenario, ScenarioReport, SerialRun,
    },
};

/// Add a user to a tenant, wait for it to show up, remove it again
pub struct MembershipsScenario;

#[derive(Default)]
struct Fixtures {
    tenant_id: Option<String>,
    user_id: Option<String>,
}

#[async_trait]
impl Scenario for MembershipsScenario {
    fn name(&self) -> &'static str {
        "memberships"
    }

    fn description(&self) -> &'static str {
        "Tenant memberships: add, eventual visibility, remove, count"
    }

    async fn run(&self, ctx: &SuiteContext) -> ScenarioReport {
        let mut run = SerialRun::new(self.name());
        let api = connect(&mut run, ctx).await;

        let mut fx = Fixtures::default();
        let policy = ctx.poll_policy();

        run.setup(async {
            let client = connected(&api)?;
            fx.tenant_id = Some(create_tenant(client, "MemberTenant").await?);
            fx.user_id = Some(create_user(client, "tenantmemberuser").await?);
            Ok(())
        })
        .await;

        run.step(
            "1. POST /admin/tenants/{tenantId}/memberships/{userId} - Add a user to a tenant",
            async {
                let client = connected(&api)?;
                let (tenant_id, user_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.user_id, "user")?);
                match client.memberships().add(tenant_id, user_id).await? {
                    MembershipOutcome::Added => info!("Added user {} to tenant {}", user_id, tenant_id),
                    MembershipOutcome::AlreadyMember => {
                        info!("User {} was already a member of tenant {}", user_id, tenant_id)
                    }
                }
                Ok(())
            },
        )
        .await;

        run.step(
            "2. GET /admin/tenants/{tenantId}/memberships - Verify user is a member",
            async {
                let client = connected(&api)?;
                let (tenant_id, user_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.user_id, "user")?);
                poll_until("membership to become visible", policy, || {
                    let memberships = client.memberships();
                    async move { memberships.is_member(tenant_id, user_id).await }
                })
                .await
                .map_err(|e| match e {
                    iams_sdk::IamsError::Timeout { .. } => SuiteError::assertion(format!(
                        "User {} did not become a member within the timeout",
                        user_id
                    )),
                    other => other.into(),
                })?;
                info!("Verified user {} is a member of tenant {}", user_id, tenant_id);
                Ok(())
            },
        )
        .await;

        run.step(
            "3. DELETE /admin/tenants/{tenantId}/memberships/{userId} - Remove a user from a tenant",
            async {
                let client = connected(&api)?;
                let (tenant_id, user_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.user_id, "user")?);
                let status = client.memberships().remove(tenant_id, user_id).await?;
                expect::status_is(status, 204, "remove membership")?;
                info!("Removed user {} from tenant {}", user_id, tenant_id);
                Ok(())
            },
        )
        .await;

        run.step(
            "4. GET /admin/tenants/{tenantId}/memberships - Verify user is no longer a member",
            async {
                let client = connected(&api)?;
                let (tenant_id, user_id) = (fixture(&fx.tenant_id, "tenant")?, fixture(&fx.user_id, "user")?);
                let members = client.memberships().list(tenant_id).await?;
                expect::absent_id(&members, user_id, "member")
            },
        )
        .await;

        run.step(
            "5. GET /admin/tenants/{tenantId}/memberships/count - Verify the membership count",
            async {
                let client = connected(&api)?;
                let tenant_id = fixture(&fx.tenant_id, "tenant")?;
                let count = client.memberships().count(tenant_id).await?;
                expect::equals(count, 0, "membership count")?;
                info!("Verified membership count for tenant {} is {}", tenant_id, count);
                Ok(())
            },
        )
        .await;

        let Some(client) = api.as_ref() else {
            return run.finish();
        };

        cleanup_user(&mut run, client, fx.user_id.take()).await;
        cleanup_tenant(&mut run, client, fx.tenant_id.take()).await;

        run.finish()
    }
}
