mod common;

use common::{MockIams, TokenDir, ACCESS_TOKEN, REFRESH_TOKEN};
use iams_e2e::{
    scenarios::{self, TenantsScenario},
    setup::global_setup,
    suite::StepOutcome,
    Runner, SuiteContext, SuiteError,
};
use iams_sdk::IamsError;

#[tokio::test]
async fn test_global_setup_writes_token_file() {
    let iams = MockIams::start().await;
    let tokens = TokenDir::new();
    let ctx = SuiteContext::new(iams.config(tokens.token_file())).unwrap();

    let pair = global_setup(&ctx).await.unwrap();
    assert_eq!(pair.access_token, ACCESS_TOKEN);

    let raw = std::fs::read_to_string(tokens.token_file()).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["accessToken"], ACCESS_TOKEN);
    assert_eq!(saved["refreshToken"], REFRESH_TOKEN);

    let client = ctx.client().await.unwrap();
    assert_eq!(client.base_url(), iams.url);

    iams.stop().await;
}

#[tokio::test]
async fn test_rejected_credentials_abort_the_run() {
    let iams = MockIams::start().await;
    let tokens = TokenDir::new();
    let mut config = iams.config(tokens.token_file());
    config.auth.password = "wrong".to_string();

    let ctx = SuiteContext::new(config).unwrap();
    let result = Runner::new(ctx, scenarios::all()).run().await;

    match result {
        Err(SuiteError::Sdk(IamsError::Authentication { message })) => {
            assert!(message.contains("Status: 401"), "{}", message);
            assert!(message.contains("invalid_grant"), "{}", message);
        }
        other => panic!("Expected authentication failure, got {:?}", other.map(|r| r.to_string())),
    }
    assert!(!tokens.token_file().exists());
    assert!(iams.requests().is_empty(), "no admin call may follow a failed setup");

    iams.stop().await;
}

#[tokio::test]
async fn test_skip_auth_without_token_file_fails_each_scenario() {
    let iams = MockIams::start().await;
    let tokens = TokenDir::new();
    let ctx = SuiteContext::new(iams.config(tokens.token_file())).unwrap();

    let report = Runner::new(ctx, vec![Box::new(TenantsScenario)])
        .skip_auth(true)
        .run()
        .await
        .unwrap();

    let scenario = report.scenario("tenants").unwrap();
    match &scenario.setup {
        StepOutcome::Failed(message) => {
            assert!(message.starts_with("Failed to load access token"), "{}", message)
        }
        other => panic!("Expected setup failure, got {:?}", other),
    }
    assert_eq!(scenario.steps.len(), 6);
    assert!(scenario
        .steps
        .iter()
        .all(|step| step.outcome == StepOutcome::Skipped));
    assert!(scenario.teardown.is_empty());

    let summary = report.to_string();
    assert!(summary.contains("[skip] 1. POST /admin/tenants - Create a tenant"), "{}", summary);
    assert_eq!(iams.token_requests(), 0);
    assert!(iams.requests().is_empty());

    iams.stop().await;
}

#[tokio::test]
async fn test_skip_auth_reuses_saved_token() {
    let iams = MockIams::start().await;
    let tokens = TokenDir::new();
    let ctx = SuiteContext::new(iams.config(tokens.token_file())).unwrap();
    global_setup(&ctx).await.unwrap();

    let report = Runner::new(ctx, vec![Box::new(TenantsScenario)])
        .skip_auth(true)
        .run()
        .await
        .unwrap();

    assert!(report.passed(), "suite failed:\n{}", report);
    assert_eq!(iams.token_requests(), 1);

    iams.stop().await;
}
