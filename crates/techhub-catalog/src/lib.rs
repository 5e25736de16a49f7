//! Techhub skill catalog
//!
//! Loads skill and role definitions from YAML, JSON or TOML, validates them
//! once and exposes a read-only catalog for routing.
//!
//! ## Validation
//!
//! Loading fails fast on duplicate ids, malformed ids or keywords, skills that
//! list themselves or unknown skills as mandatory collaborators, skills whose
//! role is not declared, and role skill lists that disagree with the skills.
//! A catalog that loads can never produce a plan pointing at a missing skill.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables)]

pub mod catalog;
pub mod definition;
pub mod error;

pub use catalog::SkillCatalog;
pub use definition::{CatalogDefinition, RoleDefinition, SourceFormat};
pub use error::{CatalogError, ValidationError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{CatalogDefinition, CatalogError, SkillCatalog, ValidationError};
}
