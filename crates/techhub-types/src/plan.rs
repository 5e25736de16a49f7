use serde::{Deserialize, Serialize};

use crate::RoleDependency;

/// A free-text routing request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRequest {
    pub raw_text: String,
}

impl RoutingRequest {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }
}

impl From<&str> for RoutingRequest {
    fn from(raw_text: &str) -> Self {
        Self::new(raw_text)
    }
}

/// Why a skill ended up in a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteReason {
    KeywordMatch,
    MandatoryCollaboration,
}

impl RouteReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteReason::KeywordMatch => "keyword_match",
            RouteReason::MandatoryCollaboration => "mandatory_collaboration",
        }
    }
}

impl std::fmt::Display for RouteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a routing plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub skill_id: String,
    pub role: String,
    pub reason: RouteReason,
    /// Keyword score, 0 for mandatory collaborators
    pub score: usize,
}

/// Skills of one role inside a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub role: String,
    pub skill_ids: Vec<String>,
    /// The role owning the highest ranked step
    pub is_primary: bool,
}

/// Ordered result of routing one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingPlan {
    pub steps: Vec<PlanStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<RoleDependency>,
}

impl RoutingPlan {
    pub fn new(steps: Vec<PlanStep>) -> Self {
        Self {
            steps,
            dependencies: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn contains(&self, skill_id: &str) -> bool {
        self.position(skill_id).is_some()
    }

    /// Rank of a skill within the plan
    pub fn position(&self, skill_id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.skill_id == skill_id)
    }

    pub fn skill_ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.skill_id.as_str())
    }

    /// Distinct roles in plan order
    pub fn roles(&self) -> Vec<&str> {
        let mut roles: Vec<&str> = Vec::new();
        for step in &self.steps {
            if !roles.contains(&step.role.as_str()) {
                roles.push(&step.role);
            }
        }
        roles
    }

    /// Group steps by role, keeping plan order
    pub fn role_summary(&self) -> Vec<RoleSummary> {
        self.roles()
            .into_iter()
            .enumerate()
            .map(|(i, role)| RoleSummary {
                role: role.to_string(),
                skill_ids: self
                    .steps
                    .iter()
                    .filter(|s| s.role == role)
                    .map(|s| s.skill_id.clone())
                    .collect(),
                is_primary: i == 0,
            })
            .collect()
    }
}
