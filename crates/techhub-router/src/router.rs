//! Request routing: tokenize, match, expand, build the plan

use tracing::debug;

use techhub_catalog::SkillCatalog;
use techhub_types::{PlanStep, RoutingPlan, RoutingRequest};

use crate::expander::{expand, Selection};
use crate::matcher::{match_skills, tokenize};

/// Routes free-text requests against a catalog
///
/// Holds only a shared reference to the catalog, so one router (or many) can
/// be used from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    catalog: &'a SkillCatalog,
    /// Cap on keyword matches kept before expansion
    max_matches: Option<usize>,
    /// Attach role dependencies to plans
    dependencies: bool,
}

impl<'a> Router<'a> {
    pub fn new(catalog: &'a SkillCatalog) -> Self {
        Self {
            catalog,
            max_matches: None,
            dependencies: true,
        }
    }

    /// Keep at most `max` keyword matches (0 means unlimited)
    pub fn with_max_matches(mut self, max: usize) -> Self {
        self.max_matches = (max > 0).then_some(max);
        self
    }

    /// Enable or disable role dependencies in plans
    pub fn with_dependencies(mut self, enabled: bool) -> Self {
        self.dependencies = enabled;
        self
    }

    pub fn catalog(&self) -> &'a SkillCatalog {
        self.catalog
    }

    pub fn route_request(&self, request: &RoutingRequest) -> RoutingPlan {
        self.route(&request.raw_text)
    }

    /// Build the plan for one request
    ///
    /// Keyword matches come first in score order, then mandatory
    /// collaborators. Text without usable tokens yields an empty plan.
    pub fn route(&self, raw_text: &str) -> RoutingPlan {
        let tokens = tokenize(raw_text);
        if tokens.is_empty() {
            debug!("No tokens in request, returning empty plan");
            return RoutingPlan::default();
        }

        let mut matches = match_skills(&tokens, self.catalog);
        let matched = matches.len();
        if let Some(max) = self.max_matches {
            matches.truncate(max);
        }

        let selection = expand(&Selection::from_matches(&matches), self.catalog);

        let steps: Vec<PlanStep> = selection
            .entries()
            .iter()
            .map(|entry| PlanStep {
                skill_id: entry.skill.id.clone(),
                role: entry.skill.role.clone(),
                reason: entry.reason,
                score: entry.score,
            })
            .collect();

        let mut plan = RoutingPlan::new(steps);

        if self.dependencies {
            let roles = plan.roles();
            let dependencies: Vec<_> = self
                .catalog
                .dependencies()
                .iter()
                .filter(|dep| dep.applies_to(roles.iter().copied()))
                .cloned()
                .collect();
            plan.dependencies = dependencies;
        }

        debug!(
            "Routed request: {} tokens, {} matched, {} steps, {} dependencies",
            tokens.len(),
            matched,
            plan.len(),
            plan.dependencies.len()
        );

        plan
    }
}

/// Route `raw_text` with default options
pub fn route(raw_text: &str, catalog: &SkillCatalog) -> RoutingPlan {
    Router::new(catalog).route(raw_text)
}
