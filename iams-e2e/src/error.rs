use iams_sdk::IamsError;
use thiserror::Error;

/// Failures surfaced by the suite
#[derive(Error, Debug)]
pub enum SuiteError {
    /// An expectation on a status code or body did not hold
    #[error("Assertion failed: {message}")]
    Assertion { message: String },

    /// A step needed a fixture that setup never produced
    #[error("Missing fixture: {0}")]
    MissingFixture(&'static str),

    /// Error raised by the IAMS client
    #[error(transparent)]
    Sdk(#[from] IamsError),

    /// Unknown scenario requested
    #[error("Unknown scenario '{name}' (available: {available})")]
    UnknownScenario { name: String, available: String },
}

impl SuiteError {
    pub fn assertion<S: Into<String>>(message: S) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }
}

pub type SuiteResult<T = ()> = Result<T, SuiteError>;
