//! Fixture helpers shared by scenarios

use iams_sdk::{naming, types::UserRequest, IamsClient};
use tracing::info;

use crate::{
    context::SuiteContext,
    error::{SuiteError, SuiteResult},
    suite::SerialRun,
};

pub(crate) async fn create_tenant(client: &IamsClient, prefix: &str) -> SuiteResult<String> {
    let tenant_id = client.tenants().create(&naming::timestamped(prefix)).await?;
    info!("Created tenant with ID: {}", tenant_id);
    Ok(tenant_id)
}

pub(crate) async fn create_user(client: &IamsClient, prefix: &str) -> SuiteResult<String> {
    let user_id = client
        .users()
        .create(&UserRequest::new(naming::timestamped(prefix)))
        .await?;
    info!("Created user with ID: {}", user_id);
    Ok(user_id)
}

pub(crate) async fn cleanup_user(run: &mut SerialRun, client: &IamsClient, user_id: Option<String>) {
    if let Some(user_id) = user_id {
        run.teardown(&format!("delete user {}", user_id), async {
            client.users().delete(&user_id).await?;
            Ok(())
        })
        .await;
    }
}

pub(crate) async fn cleanup_tenant(run: &mut SerialRun, client: &IamsClient, tenant_id: Option<String>) {
    if let Some(tenant_id) = tenant_id {
        run.teardown(&format!("delete tenant {}", tenant_id), async {
            client.tenants().delete(&tenant_id).await?;
            Ok(())
        })
        .await;
    }
}

/// Admin client for a scenario; a missing token fails the setup phase
pub(crate) async fn connect(run: &mut SerialRun, ctx: &SuiteContext) -> Option<IamsClient> {
    match ctx.client().await {
        Ok(client) => {
            info!("Loaded access token from {}", ctx.token_store().path().display());
            Some(client)
        }
        Err(e) => {
            run.fail_setup(format!("Failed to load access token: {}", e));
            None
        }
    }
}

pub(crate) fn connected(client: &Option<IamsClient>) -> SuiteResult<&IamsClient> {
    client.as_ref().ok_or(SuiteError::MissingFixture("admin client"))
}
