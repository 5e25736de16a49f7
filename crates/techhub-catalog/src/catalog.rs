//! Validated, read-only skill catalog

use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use techhub_types::{token, Role, RoleDependency, SkillRecord, ALL_ROLES};

use crate::definition::{CatalogDefinition, SourceFormat};
use crate::error::{CatalogError, Result, ValidationError};

/// Skill ids: role prefix, dash, two digits
const SKILL_ID_PATTERN: &str = r"^[a-z][a-z0-9]*-[0-9]{2}$";

#[allow(clippy::expect_used)]
static SKILL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SKILL_ID_PATTERN).expect("skill id pattern is valid"));

/// Bundled default catalog
const BUNDLED_CATALOG: &str = include_str!("../catalog/default.yaml");

/// Immutable, validated set of skills and roles
///
/// Built once with [`SkillCatalog::load`] and shared by reference afterwards.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    /// Skills in insertion order
    skills: Vec<SkillRecord>,
    /// Skill id -> index into `skills`
    index: HashMap<String, usize>,
    /// Roles in declaration order
    roles: Vec<Role>,
    dependencies: Vec<RoleDependency>,
}

impl SkillCatalog {
    /// Validate a definition and freeze it into a catalog
    pub fn load(definition: CatalogDefinition) -> std::result::Result<Self, ValidationError> {
        let CatalogDefinition {
            roles: role_defs,
            skills: skill_defs,
            dependencies,
        } = definition;

        // Roles
        let mut role_names: HashSet<String> = HashSet::new();
        for role in &role_defs {
            if !role_names.insert(role.name.clone()) {
                return Err(ValidationError::DuplicateRole {
                    name: role.name.clone(),
                });
            }
        }

        // Skills, checked one at a time
        let mut skills: Vec<SkillRecord> = Vec::with_capacity(skill_defs.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(skill_defs.len());

        for mut skill in skill_defs {
            validate_skill(&skill)?;

            if index.contains_key(&skill.id) {
                return Err(ValidationError::DuplicateSkill { id: skill.id });
            }

            if !role_names.contains(&skill.role) {
                return Err(ValidationError::OrphanedRole {
                    id: skill.id,
                    role: skill.role,
                });
            }

            dedup_mandatory(&mut skill);

            index.insert(skill.id.clone(), skills.len());
            skills.push(skill);
        }

        // Referential integrity
        for skill in &skills {
            if let Some(missing) = skill
                .mandatory_with
                .iter()
                .find(|id| !index.contains_key(id.as_str()))
            {
                return Err(ValidationError::DanglingReference {
                    id: skill.id.clone(),
                    missing: missing.clone(),
                });
            }
        }

        // Ownership, declared lists must agree with skill.role both ways
        let mut roles: Vec<Role> = Vec::with_capacity(role_defs.len());
        for def in role_defs {
            let derived: BTreeSet<String> = skills
                .iter()
                .filter(|s| s.role == def.name)
                .map(|s| s.id.clone())
                .collect();

            if let Some(declared) = &def.skills {
                let declared: BTreeSet<String> = declared.iter().cloned().collect();
                if let Some(id) = declared.symmetric_difference(&derived).next() {
                    return Err(ValidationError::OwnershipMismatch {
                        role: def.name,
                        id: id.clone(),
                    });
                }
            }

            if derived.is_empty() {
                debug!("Role '{}' owns no skills", def.name);
            }

            roles.push(Role {
                name: def.name,
                title: def.title,
                owned_skill_ids: derived,
            });
        }

        for dep in &dependencies {
            let unknown = if !role_names.contains(&dep.from) {
                Some(&dep.from)
            } else if dep.to != ALL_ROLES && !role_names.contains(&dep.to) {
                Some(&dep.to)
            } else {
                None
            };

            if let Some(role) = unknown {
                return Err(ValidationError::UnknownDependencyRole {
                    from: dep.from.clone(),
                    to: dep.to.clone(),
                    role: role.clone(),
                });
            }
        }

        info!(
            "Loaded skill catalog: {} roles, {} skills, {} dependencies",
            roles.len(),
            skills.len(),
            dependencies.len()
        );

        Ok(Self {
            skills,
            index,
            roles,
            dependencies,
        })
    }

    /// The catalog shipped with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_yaml_str(BUNDLED_CATALOG)
    }

    /// Raw YAML of the bundled catalog
    pub fn bundled_source() -> &'static str {
        BUNDLED_CATALOG
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::from_str_as(content, SourceFormat::Yaml)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_str_as(content, SourceFormat::Json)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_str_as(content, SourceFormat::Toml)
    }

    fn from_str_as(content: &str, format: SourceFormat) -> Result<Self> {
        let definition = CatalogDefinition::parse(content, format)?;
        Ok(Self::load(definition)?)
    }

    /// Load a catalog file (yaml, yml, json or toml)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading skill catalog from {:?}", path);
        let definition = CatalogDefinition::from_path(path)?;
        Ok(Self::load(definition)?)
    }

    /// Look up a skill by id
    pub fn get(&self, skill_id: &str) -> Result<&SkillRecord> {
        self.find(skill_id)
            .ok_or_else(|| CatalogError::SkillNotFound(skill_id.to_string()))
    }

    /// Look up a skill by id without an error value
    pub fn find(&self, skill_id: &str) -> Option<&SkillRecord> {
        self.index.get(skill_id).map(|&i| &self.skills[i])
    }

    /// All skills in insertion order
    ///
    /// The iterator is `Clone`, so a scan can be restarted from any point.
    pub fn all(&self) -> std::slice::Iter<'_, SkillRecord> {
        self.skills.iter()
    }

    /// Roles in declaration order
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn role(&self, name: &str) -> Result<&Role> {
        self.roles
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| CatalogError::RoleNotFound(name.to_string()))
    }

    /// Skills owned by a role, in insertion order
    pub fn role_skills(&self, name: &str) -> Result<Vec<&SkillRecord>> {
        let role = self.role(name)?;
        Ok(self.all().filter(|s| role.owns(&s.id)).collect())
    }

    /// Cross-functional role dependencies
    pub fn dependencies(&self) -> &[RoleDependency] {
        &self.dependencies
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Per-skill rules that need no other skill
fn validate_skill(skill: &SkillRecord) -> std::result::Result<(), ValidationError> {
    if !SKILL_ID_RE.is_match(&skill.id) {
        return Err(ValidationError::InvalidSkillId {
            id: skill.id.clone(),
        });
    }

    if skill.keywords.is_empty() {
        return Err(ValidationError::EmptyKeywords {
            id: skill.id.clone(),
        });
    }

    for keyword in &skill.keywords {
        if keyword.is_empty()
            || keyword.chars().any(char::is_whitespace)
            || keyword.to_lowercase() != *keyword
        {
            return Err(ValidationError::InvalidKeyword {
                id: skill.id.clone(),
                keyword: keyword.clone(),
            });
        }

        if !token::is_matchable(keyword) {
            warn!(
                "Skill '{}' keyword '{}' can never match a request token",
                skill.id, keyword
            );
        }
    }

    if skill.mandatory_with.iter().any(|id| *id == skill.id) {
        return Err(ValidationError::SelfReference {
            id: skill.id.clone(),
        });
    }

    Ok(())
}

/// Drop repeated ids from `mandatory_with`, keeping declared order
fn dedup_mandatory(skill: &mut SkillRecord) {
    let before = skill.mandatory_with.len();
    let mut seen = HashSet::new();
    skill.mandatory_with.retain(|id| seen.insert(id.clone()));

    if skill.mandatory_with.len() != before {
        warn!("Skill '{}' lists a mandatory collaborator twice", skill.id);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::definition::RoleDefinition;

    fn two_skill_definition() -> CatalogDefinition {
        CatalogDefinition::default()
            .with_role(RoleDefinition::new("security"))
            .with_role(RoleDefinition::new("ai"))
            .with_skill(
                SkillRecord::new("sa-01", "security", "PII Detection")
                    .with_keywords(["pii", "privacy", "personal"]),
            )
            .with_skill(
                SkillRecord::new("ai-02", "ai", "RAG Pipeline")
                    .with_keywords(["rag", "retrieval", "chatbot"])
                    .with_mandatory(["sa-01"]),
            )
    }

    #[test]
    fn test_load_valid() {
        let catalog = SkillCatalog::load(two_skill_definition()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("ai-02").unwrap().role, "ai");
        assert!(catalog.role("security").unwrap().owns("sa-01"));
    }

    #[test]
    fn test_get_not_found() {
        let catalog = SkillCatalog::load(two_skill_definition()).unwrap();
        assert!(matches!(
            catalog.get("x-99"),
            Err(CatalogError::SkillNotFound(id)) if id == "x-99"
        ));
    }

    #[test]
    fn test_all_is_insertion_order_and_restartable() {
        let catalog = SkillCatalog::load(two_skill_definition()).unwrap();
        let iter = catalog.all();
        let first: Vec<_> = iter.clone().map(|s| s.id.as_str()).collect();
        let second: Vec<_> = iter.map(|s| s.id.as_str()).collect();
        assert_eq!(first, vec!["sa-01", "ai-02"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_skill_id() {
        let def = two_skill_definition()
            .with_skill(SkillRecord::new("SA-1", "security", "Bad").with_keywords(["bad"]));
        assert!(matches!(
            SkillCatalog::load(def),
            Err(ValidationError::InvalidSkillId { .. })
        ));
    }

    #[test]
    fn test_uppercase_keyword_rejected() {
        let def = two_skill_definition()
            .with_skill(SkillRecord::new("sa-02", "security", "Threat").with_keywords(["STRIDE"]));
        assert_eq!(
            SkillCatalog::load(def).unwrap_err(),
            ValidationError::InvalidKeyword {
                id: "sa-02".into(),
                keyword: "STRIDE".into()
            }
        );
    }

    #[test]
    fn test_empty_keywords_rejected() {
        let def = two_skill_definition().with_skill(SkillRecord::new("sa-02", "security", "Threat"));
        assert!(matches!(
            SkillCatalog::load(def),
            Err(ValidationError::EmptyKeywords { .. })
        ));
    }

    #[test]
    fn test_mandatory_dedup() {
        let mut def = two_skill_definition();
        def.skills[1].mandatory_with.push("sa-01".into());
        let catalog = SkillCatalog::load(def).unwrap();
        assert_eq!(catalog.get("ai-02").unwrap().mandatory_with, vec!["sa-01"]);
    }
}
