use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Wildcard accepted as the target of a [`RoleDependency`]
pub const ALL_ROLES: &str = "all";

/// A single routable skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    /// Unique id, `<role-prefix>-<two digits>` (e.g. `sa-01`)
    pub id: String,
    /// Name of the owning role
    pub role: String,
    /// Human readable name
    pub name: String,
    /// Optional one-line description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lowercase trigger keywords
    pub keywords: BTreeSet<String>,
    /// Skills that must be included whenever this one is selected by keyword
    #[serde(default)]
    pub mandatory_with: Vec<String>,
}

impl SkillRecord {
    pub fn new(id: impl Into<String>, role: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            name: name.into(),
            description: None,
            keywords: BTreeSet::new(),
            mandatory_with: Vec::new(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn with_mandatory<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory_with.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check whether `keyword` is one of this skill's triggers
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    /// Format: "{id} {name} [{role}]"
    pub fn to_summary(&self) -> String {
        format!("{} {} [{}]", self.id, self.name, self.role)
    }
}

/// A named group of skills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    /// Display title, falls back to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub owned_skill_ids: BTreeSet<String>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            owned_skill_ids: BTreeSet::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    pub fn owns(&self, skill_id: &str) -> bool {
        self.owned_skill_ids.contains(skill_id)
    }
}

/// Cross-functional hand-off between two roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDependency {
    pub from: String,
    /// Role name or [`ALL_ROLES`]
    pub to: String,
    /// Kind of hand-off (data, deployment, review, ...)
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

impl RoleDependency {
    /// A dependency applies when `from` is present and `to` is present or the wildcard
    pub fn applies_to<'a, I>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        let has = |name: &str| roles.clone().into_iter().any(|r| r == name);
        has(&self.from) && (self.to == ALL_ROLES || has(&self.to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_builder() {
        let skill = SkillRecord::new("sa-01", "security", "PII Detection")
            .with_keywords(["pii", "privacy"])
            .with_mandatory(["sa-02"]);

        assert!(skill.has_keyword("pii"));
        assert!(!skill.has_keyword("PII"));
        assert_eq!(skill.mandatory_with, vec!["sa-02".to_string()]);
        assert_eq!(skill.to_summary(), "sa-01 PII Detection [security]");
    }

    #[test]
    fn test_role_display_name() {
        let mut role = Role::new("devops");
        assert_eq!(role.display_name(), "devops");
        role.title = Some("DevOps Engineer".into());
        assert_eq!(role.display_name(), "DevOps Engineer");
    }

    #[test]
    fn test_dependency_applies() {
        let dep = RoleDependency {
            from: "data-engineer".into(),
            to: "ml-engineer".into(),
            kind: "data".into(),
            description: String::new(),
        };
        assert!(dep.applies_to(["data-engineer", "ml-engineer"]));
        assert!(!dep.applies_to(["data-engineer"]));

        let review = RoleDependency {
            to: ALL_ROLES.into(),
            ..dep
        };
        assert!(review.applies_to(["data-engineer"]));
        assert!(!review.applies_to(["devops"]));
    }
}
