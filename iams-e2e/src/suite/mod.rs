//! Scenario trait and the runner driving a whole suite

pub mod expect;
pub mod report;
pub mod serial;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::info;

use crate::{context::SuiteContext, error::SuiteResult, setup::global_setup};

pub use report::{ScenarioReport, StepOutcome, StepReport, SuiteReport};
pub use serial::SerialRun;

/// A serial group of API checks sharing fixtures
#[async_trait]
pub trait Scenario: Send + Sync {
    /// Short identifier used on the command line
    fn name(&self) -> &'static str;

    /// One-line description for `--list`
    fn description(&self) -> &'static str;

    /// Setup, steps and teardown; never fails, outcomes go to the report
    async fn run(&self, ctx: &SuiteContext) -> ScenarioReport;
}

/// Runs the global setup once, then the selected scenarios
pub struct Runner {
    ctx: SuiteContext,
    scenarios: Vec<Box<dyn Scenario>>,
    parallel: bool,
    skip_auth: bool,
}

impl Runner {
    pub fn new(ctx: SuiteContext, scenarios: Vec<Box<dyn Scenario>>) -> Self {
        Self {
            ctx,
            scenarios,
            parallel: false,
            skip_auth: false,
        }
    }

    /// Run independent scenarios concurrently
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reuse the token file from an earlier run instead of authenticating
    pub fn skip_auth(mut self, skip_auth: bool) -> Self {
        self.skip_auth = skip_auth;
        self
    }

    pub fn context(&self) -> &SuiteContext {
        &self.ctx
    }

    /// Global setup errors abort the run; scenario failures land in the report
    pub async fn run(&self) -> SuiteResult<SuiteReport> {
        if !self.skip_auth {
            global_setup(&self.ctx).await?;
        }

        info!(
            "Running {} scenario(s){}",
            self.scenarios.len(),
            if self.parallel { " in parallel" } else { "" }
        );

        let scenarios = if self.parallel {
            join_all(self.scenarios.iter().map(|s| s.run(&self.ctx))).await
        } else {
            let mut reports = Vec::with_capacity(self.scenarios.len());
            for scenario in &self.scenarios {
                reports.push(scenario.run(&self.ctx).await);
            }
            reports
        };

        Ok(SuiteReport { scenarios })
    }
}
