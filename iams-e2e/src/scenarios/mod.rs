//! The scenarios making up the suite

mod common;
pub mod memberships;
pub mod resources;
pub mod roles;
pub mod scopes;
pub mod tenants;
pub mod users;

use crate::{
    error::{SuiteError, SuiteResult},
    suite::Scenario,
};

pub use memberships::MembershipsScenario;
pub use resources::ResourcesScenario;
pub use roles::RolesScenario;
pub use scopes::ScopesScenario;
pub use tenants::TenantsScenario;
pub use users::UsersScenario;

/// Every scenario, in default execution order
pub fn all() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(TenantsScenario),
        Box::new(UsersScenario),
        Box::new(MembershipsScenario),
        Box::new(ScopesScenario),
        Box::new(RolesScenario),
        Box::new(ResourcesScenario),
    ]
}

/// Scenarios matching `names`, in the order given; empty selects all
pub fn select(names: &[String]) -> SuiteResult<Vec<Box<dyn Scenario>>> {
    if names.is_empty() {
        return Ok(all());
    }

    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        let scenario = all()
            .into_iter()
            .find(|s| s.name() == name.as_str())
            .ok_or_else(|| SuiteError::UnknownScenario {
                name: name.clone(),
                available: all().iter().map(|s| s.name()).collect::<Vec<_>>().join(", "),
            })?;
        selected.push(scenario);
    }
    Ok(selected)
}
