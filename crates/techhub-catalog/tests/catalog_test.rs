//! Catalog loading and validation tests

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Write;

use techhub_catalog::{
    CatalogDefinition, CatalogError, RoleDefinition, SkillCatalog, ValidationError,
};
use techhub_types::{RoleDependency, SkillRecord};

fn base() -> CatalogDefinition {
    CatalogDefinition::default()
        .with_role(RoleDefinition::new("x"))
        .with_skill(SkillRecord::new("x-01", "x", "First").with_keywords(["first"]))
        .with_skill(SkillRecord::new("x-02", "x", "Second").with_keywords(["second"]))
}

#[test]
fn test_duplicate_skill_id() {
    let def = base().with_skill(SkillRecord::new("x-01", "x", "Again").with_keywords(["again"]));
    assert_eq!(
        SkillCatalog::load(def).unwrap_err(),
        ValidationError::DuplicateSkill { id: "x-01".into() }
    );
}

#[test]
fn test_duplicate_role() {
    let def = base().with_role(RoleDefinition::new("x"));
    assert_eq!(
        SkillCatalog::load(def).unwrap_err(),
        ValidationError::DuplicateRole { name: "x".into() }
    );
}

#[test]
fn test_self_reference_rejected() {
    let def = base().with_skill(
        SkillRecord::new("x-03", "x", "Loop")
            .with_keywords(["loop"])
            .with_mandatory(["x-03"]),
    );
    assert_eq!(
        SkillCatalog::load(def).unwrap_err(),
        ValidationError::SelfReference { id: "x-03".into() }
    );
}

#[test]
fn test_dangling_reference_rejected() {
    let mut def = base();
    def.skills[0].mandatory_with.push("x-99".into());
    assert_eq!(
        SkillCatalog::load(def).unwrap_err(),
        ValidationError::DanglingReference {
            id: "x-01".into(),
            missing: "x-99".into()
        }
    );
}

#[test]
fn test_orphaned_role_rejected() {
    let def = base().with_skill(SkillRecord::new("y-01", "y", "Orphan").with_keywords(["orphan"]));
    assert_eq!(
        SkillCatalog::load(def).unwrap_err(),
        ValidationError::OrphanedRole {
            id: "y-01".into(),
            role: "y".into()
        }
    );
}

#[test]
fn test_declared_ownership_must_match() {
    let mut missing_skill = base();
    missing_skill.roles[0].skills = Some(vec!["x-01".into()]);
    assert_eq!(
        SkillCatalog::load(missing_skill).unwrap_err(),
        ValidationError::OwnershipMismatch {
            role: "x".into(),
            id: "x-02".into()
        }
    );

    let mut foreign_skill = base().with_role(RoleDefinition::new("y"));
    foreign_skill.roles[1].skills = Some(vec!["x-01".into()]);
    assert!(matches!(
        SkillCatalog::load(foreign_skill),
        Err(ValidationError::OwnershipMismatch { role, .. }) if role == "y"
    ));

    let mut exact = base();
    exact.roles[0].skills = Some(vec!["x-02".into(), "x-01".into()]);
    assert!(SkillCatalog::load(exact).is_ok());
}

#[test]
fn test_every_skill_owned_by_exactly_one_role() {
    let catalog = SkillCatalog::bundled().unwrap();
    for skill in catalog.all() {
        let owners: Vec<_> = catalog
            .roles()
            .iter()
            .filter(|r| r.owns(&skill.id))
            .collect();
        assert_eq!(owners.len(), 1, "skill {}", skill.id);
        assert_eq!(owners[0].name, skill.role);
    }
}

#[test]
fn test_unknown_dependency_role() {
    let def = base().with_dependency(RoleDependency {
        from: "x".into(),
        to: "z".into(),
        kind: "data".into(),
        description: String::new(),
    });
    assert!(matches!(
        SkillCatalog::load(def),
        Err(ValidationError::UnknownDependencyRole { role, .. }) if role == "z"
    ));

    let wildcard = base().with_dependency(RoleDependency {
        from: "x".into(),
        to: "all".into(),
        kind: "review".into(),
        description: String::new(),
    });
    assert_eq!(SkillCatalog::load(wildcard).unwrap().dependencies().len(), 1);
}

#[test]
fn test_bundled_catalog() {
    let catalog = SkillCatalog::bundled().unwrap();
    assert_eq!(catalog.roles().len(), 8);
    assert_eq!(catalog.len(), 66);
    assert_eq!(catalog.get("sa-01").unwrap().role, "security-architect");
    assert!(catalog
        .get("ai-02")
        .unwrap()
        .mandatory_with
        .contains(&"sa-01".to_string()));
    assert_eq!(catalog.role_skills("finops").unwrap().len(), 8);
    assert!(matches!(
        catalog.role_skills("marketing"),
        Err(CatalogError::RoleNotFound(_))
    ));
}

#[test]
fn test_from_path_json() {
    let json = r#"{
        "roles": [{ "name": "security" }, { "name": "ai" }],
        "skills": [
            { "id": "sa-01", "role": "security", "name": "PII",
              "keywords": ["pii", "privacy", "personal"], "mandatory_with": [] },
            { "id": "ai-02", "role": "ai", "name": "RAG",
              "keywords": ["rag", "retrieval", "chatbot"], "mandatory_with": ["sa-01"] }
        ]
    }"#;

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let catalog = SkillCatalog::from_path(file.path()).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.role_skills("ai").unwrap()[0].id, "ai-02");
}

#[test]
fn test_from_path_missing_file() {
    let err = SkillCatalog::from_path("/nonexistent/catalog.yaml").unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn test_malformed_yaml() {
    let err = SkillCatalog::from_yaml_str("skills: [ {id: ").unwrap_err();
    assert!(matches!(err, CatalogError::Yaml(_)));
}

#[test]
fn test_validation_error_wrapped() {
    let yaml = r#"
roles: [{ name: x }]
skills:
  - { id: x-01, role: x, name: A, keywords: [a1], mandatory_with: [x-99] }
"#;
    let err = SkillCatalog::from_yaml_str(yaml).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ValidationError::DanglingReference { .. })
    ));
    assert!(err.to_string().contains("x-99"));
}
