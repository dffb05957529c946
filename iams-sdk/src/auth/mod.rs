//! OAuth2 token acquisition and the token file shared across a run

pub mod client;
pub mod store;
pub mod types;

pub use client::TokenClient;
pub use store::TokenStore;
pub use types::{Credentials, TokenPair};
