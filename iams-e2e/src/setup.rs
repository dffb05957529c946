//! Global setup: acquire a token once and persist it for every scenario

use iams_sdk::auth::{TokenClient, TokenPair};
use tracing::info;

use crate::{context::SuiteContext, error::SuiteResult};

/// Run the password grant and write the token file
pub async fn global_setup(ctx: &SuiteContext) -> SuiteResult<TokenPair> {
    let config = ctx.config();
    let token_client = TokenClient::new(config.auth.token_url.clone())?
        .with_http_client(ctx.http_client().clone());

    let pair = token_client.password_grant(&config.credentials()).await?;
    ctx.token_store().save(&pair).await?;

    info!(
        "Access token generated and saved to {}",
        ctx.token_store().path().display()
    );
    Ok(pair)
}
