//! Text rendering for command output

use std::fmt::Write;

use techhub_catalog::SkillCatalog;
use techhub_types::{RouteReason, RoutingPlan, SkillRecord};

/// Render a routing plan as numbered lines
pub fn render_plan(plan: &RoutingPlan, catalog: &SkillCatalog) -> String {
    if plan.is_empty() {
        return "No matching skills.\n".to_string();
    }

    let mut out = String::new();
    let primary = plan.roles().first().copied().unwrap_or_default();
    let _ = writeln!(
        out,
        "Routing plan ({} skills, primary role: {})",
        plan.len(),
        role_title(catalog, primary)
    );

    for (i, step) in plan.steps.iter().enumerate() {
        let name = catalog.find(&step.skill_id).map_or("", |s| s.name.as_str());
        let reason = match step.reason {
            RouteReason::KeywordMatch => format!("keyword match, score {}", step.score),
            RouteReason::MandatoryCollaboration => "mandatory collaboration".to_string(),
        };
        let _ = writeln!(
            out,
            "  {:>2}. {:<6} {} [{}] ({})",
            i + 1,
            step.skill_id,
            name,
            step.role,
            reason
        );
    }

    if !plan.dependencies.is_empty() {
        out.push_str("\nRole dependencies:\n");
        for dep in &plan.dependencies {
            let _ = write!(out, "  {} -> {} ({})", dep.from, dep.to, dep.kind);
            if !dep.description.is_empty() {
                let _ = write!(out, ": {}", dep.description);
            }
            out.push('\n');
        }
    }

    out
}

/// Render roles with their skills
pub fn render_roles(catalog: &SkillCatalog, only: Option<&str>) -> String {
    let mut out = String::new();
    for role in catalog
        .roles()
        .iter()
        .filter(|r| only.map_or(true, |name| r.name == name))
    {
        let _ = writeln!(
            out,
            "{} ({}, {} skills)",
            role.display_name(),
            role.name,
            role.owned_skill_ids.len()
        );
        for skill in catalog.all().filter(|s| role.owns(&s.id)) {
            let _ = writeln!(out, "  {:<6} {}", skill.id, skill.name);
        }
    }
    out
}

/// Render one skill in full
pub fn render_skill(skill: &SkillRecord, catalog: &SkillCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", skill.id, skill.name);
    let _ = writeln!(out, "  role:      {}", role_title(catalog, &skill.role));
    if let Some(description) = &skill.description {
        let _ = writeln!(out, "  about:     {description}");
    }
    let keywords: Vec<&str> = skill.keywords.iter().map(String::as_str).collect();
    let _ = writeln!(out, "  keywords:  {}", keywords.join(", "));
    if !skill.mandatory_with.is_empty() {
        let _ = writeln!(out, "  requires:  {}", skill.mandatory_with.join(", "));
    }
    out
}

fn role_title<'a>(catalog: &'a SkillCatalog, name: &'a str) -> &'a str {
    catalog.role(name).map_or(name, |r| r.display_name())
}
