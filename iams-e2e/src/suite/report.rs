use std::{fmt, time::Duration};

/// Outcome of one setup, step or teardown action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Passed,
    Failed(String),
    /// Not run because an earlier step of the serial group failed
    Skipped,
}

impl StepOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, StepOutcome::Passed)
    }
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: String,
    pub outcome: StepOutcome,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: String,
    pub setup: StepOutcome,
    pub steps: Vec<StepReport>,
    pub teardown: Vec<StepReport>,
    pub duration: Duration,
}

impl ScenarioReport {
    /// Setup, every step and every teardown action passed
    pub fn passed(&self) -> bool {
        self.setup.is_passed()
            && self.steps.iter().all(|s| s.outcome.is_passed())
            && self.teardown.iter().all(|s| s.outcome.is_passed())
    }

    pub fn step(&self, name_prefix: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.name.starts_with(name_prefix))
    }

    pub fn count(&self, wanted: fn(&StepOutcome) -> bool) -> usize {
        self.steps.iter().filter(|s| wanted(&s.outcome)).count()
    }
}

/// Aggregated result of a suite run
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.scenarios.iter().all(ScenarioReport::passed)
    }

    pub fn scenario(&self, name: &str) -> Option<&ScenarioReport> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}

fn write_step(f: &mut fmt::Formatter<'_>, step: &StepReport) -> fmt::Result {
    let mark = match &step.outcome {
        StepOutcome::Passed => "ok  ",
        StepOutcome::Failed(_) => "FAIL",
        StepOutcome::Skipped => "skip",
    };
    write!(f, "    [{}] {} ({} ms)", mark, step.name, step.duration.as_millis())?;
    if let StepOutcome::Failed(message) = &step.outcome {
        write!(f, "\n           {}", message)?;
    }
    writeln!(f)
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for scenario in &self.scenarios {
            let verdict = if scenario.passed() { "PASSED" } else { "FAILED" };
            writeln!(
                f,
                "{} {} ({} ms)",
                verdict,
                scenario.name,
                scenario.duration.as_millis()
            )?;
            if let StepOutcome::Failed(message) = &scenario.setup {
                writeln!(f, "    setup failed: {}", message)?;
            }
            for step in &scenario.steps {
                write_step(f, step)?;
            }
            for step in &scenario.teardown {
                write_step(f, step)?;
            }
        }

        let failed = self.scenarios.iter().filter(|s| !s.passed()).count();
        write!(
            f,
            "{} scenario(s), {} passed, {} failed",
            self.scenarios.len(),
            self.scenarios.len() - failed,
            failed
        )
    }
}
