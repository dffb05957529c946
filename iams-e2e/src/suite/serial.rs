use std::future::Future;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::{
    error::SuiteResult,
    suite::report::{ScenarioReport, StepOutcome, StepReport},
};

/// Serial execution of one scenario
///
/// Steps run in order; after the first failure the remaining steps are
/// recorded as skipped and their futures are dropped without being polled.
/// Teardown actions always run.
pub struct SerialRun {
    scenario: String,
    setup: StepOutcome,
    steps: Vec<StepReport>,
    teardown: Vec<StepReport>,
    broken: bool,
    started: Instant,
}

impl SerialRun {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            setup: StepOutcome::Passed,
            steps: Vec::new(),
            teardown: Vec::new(),
            broken: false,
            started: Instant::now(),
        }
    }

    /// True once setup or a step has failed
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Record a setup failure that happened outside `setup`, e.g. a missing token
    pub fn fail_setup(&mut self, message: String) {
        warn!("[{}] setup failed: {}", self.scenario, message);
        self.setup = StepOutcome::Failed(message);
        self.broken = true;
    }

    /// Run the fixture setup unless an earlier setup failure already broke the run
    pub async fn setup<F>(&mut self, fut: F)
    where
        F: Future<Output = SuiteResult>,
    {
        if self.is_broken() {
            return;
        }
        if let Err(e) = fut.await {
            self.fail_setup(e.to_string());
        }
    }

    pub async fn step<F>(&mut self, name: &str, fut: F)
    where
        F: Future<Output = SuiteResult>,
    {
        let started = Instant::now();
        let outcome = if self.broken {
            StepOutcome::Skipped
        } else {
            match fut.await {
                Ok(()) => {
                    info!("[{}] {} ... ok", self.scenario, name);
                    StepOutcome::Passed
                }
                Err(e) => {
                    warn!("[{}] {} ... FAILED: {}", self.scenario, name, e);
                    self.broken = true;
                    StepOutcome::Failed(e.to_string())
                }
            }
        };

        self.steps.push(StepReport {
            name: name.to_string(),
            outcome,
            duration: started.elapsed(),
        });
    }

    pub async fn teardown<F>(&mut self, name: &str, fut: F)
    where
        F: Future<Output = SuiteResult>,
    {
        let started = Instant::now();
        let outcome = match fut.await {
            Ok(()) => {
                info!("[{}] cleanup: {}", self.scenario, name);
                StepOutcome::Passed
            }
            Err(e) => {
                warn!("[{}] cleanup '{}' failed: {}", self.scenario, name, e);
                StepOutcome::Failed(e.to_string())
            }
        };

        self.teardown.push(StepReport {
            name: name.to_string(),
            outcome,
            duration: started.elapsed(),
        });
    }

    pub fn finish(self) -> ScenarioReport {
        ScenarioReport {
            name: self.scenario,
            setup: self.setup,
            steps: self.steps,
            teardown: self.teardown,
            duration: self.started.elapsed(),
        }
    }
}
