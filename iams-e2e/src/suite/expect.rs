//! Assertions used by scenario steps

use std::fmt::Debug;

use iams_sdk::types::{Permission, Resource, Role, Scope, Tenant, User};
use reqwest::StatusCode;

use crate::error::{SuiteError, SuiteResult};

/// Entities that can be looked up by id in a listing
pub trait HasId {
    fn id(&self) -> &str;
}

impl HasId for Tenant {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for Role {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for Scope {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for Resource {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for Permission {
    fn id(&self) -> &str {
        &self.resource_id
    }
}

pub fn status_is(actual: StatusCode, expected: u16, what: &str) -> SuiteResult {
    status_in(actual, &[expected], what)
}

pub fn status_in(actual: StatusCode, allowed: &[u16], what: &str) -> SuiteResult {
    if allowed.contains(&actual.as_u16()) {
        Ok(())
    } else {
        Err(SuiteError::assertion(format!(
            "{}: expected status {:?}, got {}",
            what,
            allowed,
            actual.as_u16()
        )))
    }
}

pub fn equals<T: PartialEq + Debug>(actual: T, expected: T, what: &str) -> SuiteResult {
    if actual == expected {
        Ok(())
    } else {
        Err(SuiteError::assertion(format!(
            "{}: expected {:?}, got {:?}",
            what, expected, actual
        )))
    }
}

pub fn ensure(condition: bool, message: impl Into<String>) -> SuiteResult {
    if condition {
        Ok(())
    } else {
        Err(SuiteError::assertion(message))
    }
}

/// The listing contains `id`; returns the matching entry
pub fn contains_id<'a, T: HasId>(items: &'a [T], id: &str, what: &str) -> SuiteResult<&'a T> {
    items
        .iter()
        .find(|item| item.id() == id)
        .ok_or_else(|| SuiteError::assertion(format!("{} {} not found in listing", what, id)))
}

pub fn absent_id<T: HasId>(items: &[T], id: &str, what: &str) -> SuiteResult {
    ensure(
        items.iter().all(|item| item.id() != id),
        format!("{} {} is still listed", what, id),
    )
}

/// The result is a 404 from the server
pub fn not_found<T: Debug>(result: Result<T, iams_sdk::IamsError>, what: &str) -> SuiteResult {
    match result {
        Err(e) if e.is_not_found() => Ok(()),
        Err(e) => Err(SuiteError::assertion(format!(
            "{}: expected 404, got error {}",
            what, e
        ))),
        Ok(value) => Err(SuiteError::assertion(format!(
            "{}: expected 404, got {:?}",
            what, value
        ))),
    }
}

/// Borrow a fixture id recorded during setup
pub fn fixture<'a>(slot: &'a Option<String>, what: &'static str) -> SuiteResult<&'a str> {
    slot.as_deref().ok_or(SuiteError::MissingFixture(what))
}
