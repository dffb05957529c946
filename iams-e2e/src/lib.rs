//! End-to-end suite for the IAMS admin API
//!
//! A global setup acquires an OAuth2 token once and stores it in a token
//! file. Each [`suite::Scenario`] then loads that token, creates its own
//! fixtures, runs its steps serially and deletes what it created.

pub mod config;
pub mod context;
pub mod error;
pub mod scenarios;
pub mod setup;
pub mod suite;

pub use config::E2eConfig;
pub use context::SuiteContext;
pub use error::{SuiteError, SuiteResult};
pub use suite::{Runner, SuiteReport};
