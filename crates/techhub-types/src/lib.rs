//! Techhub Types - Core types for skill routing
//!
//! This module defines the catalog records and routing results shared by the
//! catalog, the router and the CLI.

mod plan;
mod skill;
pub mod token;

pub use plan::{PlanStep, RoleSummary, RouteReason, RoutingPlan, RoutingRequest};
pub use skill::{Role, RoleDependency, SkillRecord, ALL_ROLES};
