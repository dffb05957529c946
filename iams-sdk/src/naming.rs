//! Unique names for transient fixtures

use chrono::Utc;
use uuid::Uuid;

/// `<prefix>_<unix millis>`, e.g. `MemberTenant_1718000000000`
pub fn timestamped(prefix: &str) -> String {
    format!("{}_{}", prefix, Utc::now().timestamp_millis())
}

/// `<prefix>-<uuid v4>`, used for role names
pub fn uuid_suffixed(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Mailbox derived from a username
pub fn email_for(username: &str) -> String {
    format!("{}@example.com", username)
}
