//! Catalog source format
//!
//! A catalog file lists roles, skills and optional role dependencies:
//!
//! ```yaml
//! roles:
//!   - name: security-architect
//!     title: Security Architect
//! skills:
//!   - id: sa-01
//!     role: security-architect
//!     name: PII Detection & Privacy
//!     keywords: [pii, privacy, gdpr]
//!     mandatory_with: []
//! dependencies:
//!   - { from: security-architect, to: all, kind: review }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use techhub_types::{RoleDependency, SkillRecord};

use crate::error::{CatalogError, Result};

/// Role entry as written in a catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Owned skill ids. Derived from the skills when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

impl RoleDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            skills: None,
        }
    }
}

/// Unvalidated catalog contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDefinition {
    #[serde(default)]
    pub roles: Vec<RoleDefinition>,
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
    #[serde(default)]
    pub dependencies: Vec<RoleDependency>,
}

/// Catalog file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
    Toml,
}

impl SourceFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

impl CatalogDefinition {
    /// Parse a definition in the given format
    pub fn parse(content: &str, format: SourceFormat) -> Result<Self> {
        let definition: Self = match format {
            SourceFormat::Yaml => serde_yaml::from_str(content)?,
            SourceFormat::Json => serde_json::from_str(content)?,
            SourceFormat::Toml => toml::from_str(content)?,
        };
        Ok(definition)
    }

    /// Read and parse a catalog file, format chosen by extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let format = SourceFormat::from_path(path)
            .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;

        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, format)
    }

    /// Builder helper used mostly by tests
    pub fn with_role(mut self, role: RoleDefinition) -> Self {
        self.roles.push(role);
        self
    }

    /// Builder helper used mostly by tests
    pub fn with_skill(mut self, skill: SkillRecord) -> Self {
        self.skills.push(skill);
        self
    }

    /// Add a role dependency
    pub fn with_dependency(mut self, dependency: RoleDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }
}
