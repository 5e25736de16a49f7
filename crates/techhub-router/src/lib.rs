//! Techhub router
//!
//! Maps a free-text request to an ordered plan of skills:
//!
//! 1. [`matcher::tokenize`] the request,
//! 2. [`matcher::match_skills`] by exact keyword overlap, best score first,
//! 3. [`expander::expand`] with mandatory collaborators (one level),
//! 4. attach owning roles and applicable role dependencies.
//!
//! Routing is a pure function of the request and the catalog. It never fails:
//! a request with nothing to match produces an empty plan.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables)]

pub mod expander;
pub mod matcher;
pub mod router;

pub use expander::{expand, Selected, Selection};
pub use matcher::{match_skills, score, tokenize, SkillMatch};
pub use router::{route, Router};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{route, Router};
    pub use techhub_types::{PlanStep, RouteReason, RoutingPlan};
}
