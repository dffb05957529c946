use async_trait::async_trait;
use iams_sdk::{naming, types::UserRequest};
use tracing::info;

use crate::{
    context::SuiteContext,
    scenarios::common::{cleanup_user, connect, connected},
    suite::{
        expect::{self, fixture},
        Scenario, ScenarioReport, SerialRun,
    },
};

/// User lifecycle through `/admin/users`
pub struct UsersScenario;

#[derive(Default)]
struct Fixtures {
    user_id: Option<String>,
    username: Option<String>,
    deleted_user_id: Option<String>,
}

#[async_trait]
impl Scenario for UsersScenario {
    fn name(&self) -> &'static str {
        "users"
    }

    fn description(&self) -> &'static str {
        "Users: create, get, update email, delete"
    }

    async fn run(&self, ctx: &SuiteContext) -> ScenarioReport {
        let mut run = SerialRun::new(self.name());
        let api = connect(&mut run, ctx).await;

        let mut fx = Fixtures::default();

        run.step("1. POST /admin/users - Create a user", async {
            let client = connected(&api)?;
            let username = naming::timestamped("e2euser");
            let user_id = client.users().create(&UserRequest::new(username.as_str())).await?;
            info!("Created user with ID: {}", user_id);
            fx.user_id = Some(user_id);
            fx.username = Some(username);
            Ok(())
        })
        .await;

        run.step("2. GET /admin/users/{userId} - Get the user", async {
            let client = connected(&api)?;
            let user_id = fixture(&fx.user_id, "user")?;
            let username = fixture(&fx.username, "username")?;
            let user = client.users().get(user_id).await?;
            expect::equals(user.username.as_deref(), Some(username), "username")?;
            expect::equals(
                user.email,
                Some(naming::email_for(username)),
                "email",
            )
        })
        .await;

        run.step("3. PUT /admin/users/{userId} - Update the user's email", async {
            let client = connected(&api)?;
            let user_id = fixture(&fx.user_id, "user")?;
            let username = fixture(&fx.username, "username")?;
            let new_email = format!("updated_{}", naming::email_for(username));
            let request = UserRequest::new(username).email(new_email.as_str());
            client.users().update(user_id, &request).await?;

            let user = client.users().get(user_id).await?;
            expect::equals(user.email.as_deref(), Some(new_email.as_str()), "updated email")
        })
        .await;

        run.step("4. DELETE /admin/users/{userId} - Delete the user", async {
            let client = connected(&api)?;
            let user_id = fixture(&fx.user_id, "user")?.to_string();
            client.users().delete(&user_id).await?;
            fx.user_id = None;
            fx.deleted_user_id = Some(user_id);
            Ok(())
        })
        .await;

        run.step("5. GET /admin/users/{userId} - Verify the user is gone", async {
            let client = connected(&api)?;
            let user_id = fixture(&fx.deleted_user_id, "deleted user")?;
            expect::not_found(client.users().get(user_id).await, "deleted user")
        })
        .await;

        let Some(client) = api.as_ref() else {
            return run.finish();
        };

        cleanup_user(&mut run, client, fx.user_id.take()).await;

        run.finish()
    }
}
