//! # IAMS SDK
//!
//! Typed async client for the IAMS admin API: tenants, users, memberships,
//! roles, scopes, resources and permissions, plus the OAuth2 password grant
//! used to obtain a bearer token.
//!
//! ## Example
//!
//! ```rust,no_run
//! use iams_sdk::{
//!     auth::{Credentials, TokenClient},
//!     client::IamsClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tokens = TokenClient::new("https://sso.example.com/realms/AOH/protocol/openid-connect/token")?
//!         .password_grant(&Credentials::new("admin", "secret", "web"))
//!         .await?;
//!
//!     let client = IamsClient::new("https://iams.example.com", tokens.access_token)?;
//!     let tenant_id = client.tenants().create("Example").await?;
//!     let scope_id = client.scopes().create(&tenant_id, "read").await?;
//!
//!     println!("Created scope {} in tenant {}", scope_id, tenant_id);
//!     client.tenants().delete(&tenant_id).await?;
//!     Ok(())
//! }
//! ```

pub mod admin;
pub mod auth;
pub mod client;
pub mod error;
pub mod naming;
pub mod poll;
pub mod types;

pub use client::{ApiResponse, IamsClient};
pub use error::IamsError;
pub use poll::{poll_until, PollPolicy};
