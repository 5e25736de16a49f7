//! Error types for catalog loading and lookup

use std::path::PathBuf;
use thiserror::Error;

/// Rule violated by a catalog definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Two skills share an id
    #[error("Duplicate skill id '{id}'")]
    DuplicateSkill {
        /// Skill id
        id: String,
    },

    /// Two roles share a name
    #[error("Duplicate role '{name}'")]
    DuplicateRole {
        /// Role name
        name: String,
    },

    /// Skill id does not look like `<prefix>-<two digits>`
    #[error("Skill id '{id}' must look like '<role-prefix>-<two digits>'")]
    InvalidSkillId {
        /// Skill id
        id: String,
    },

    /// Skill has no keywords at all
    #[error("Skill '{id}' has no keywords")]
    EmptyKeywords {
        /// Skill id
        id: String,
    },

    /// Keyword is empty, not lowercase, or contains whitespace
    #[error("Skill '{id}' has invalid keyword '{keyword}' (must be non-empty, lowercase, no whitespace)")]
    InvalidKeyword {
        /// Skill id
        id: String,
        /// Offending keyword
        keyword: String,
    },

    /// Skill lists itself as a mandatory collaborator
    #[error("Skill '{id}' lists itself in mandatory_with")]
    SelfReference {
        /// Skill id
        id: String,
    },

    /// `mandatory_with` names a skill that does not exist
    #[error("Skill '{id}' requires unknown skill '{missing}'")]
    DanglingReference {
        /// Skill id
        id: String,
        /// Referenced id that is missing
        missing: String,
    },

    /// Skill names a role that is not declared
    #[error("Skill '{id}' belongs to undeclared role '{role}'")]
    OrphanedRole {
        /// Skill id
        id: String,
        /// Undeclared role name
        role: String,
    },

    /// Role skill list and skill role fields disagree
    #[error("Role '{role}' and skill '{id}' disagree on ownership")]
    OwnershipMismatch {
        /// Role name
        role: String,
        /// Skill id
        id: String,
    },

    /// Role dependency names a role that is not declared
    #[error("Dependency {from} -> {to} names unknown role '{role}'")]
    UnknownDependencyRole {
        /// Dependency source role
        from: String,
        /// Dependency target role
        to: String,
        /// The unknown role
        role: String,
    },
}

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Definition failed validation
    #[error("Invalid catalog: {0}")]
    Validation(#[from] ValidationError),

    /// Lookup by skill id failed
    #[error("Skill '{0}' not found")]
    SkillNotFound(String),

    /// Lookup by role name failed
    #[error("Role '{0}' not found")]
    RoleNotFound(String),

    /// Catalog file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File extension is not yaml, yml, json or toml
    #[error("Unsupported catalog format for {0:?}")]
    UnsupportedFormat(PathBuf),

    /// YAML parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, CatalogError>;
