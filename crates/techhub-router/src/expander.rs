//! Mandatory collaboration expansion
//!
//! Skills selected by keyword pull in their `mandatory_with` skills. Expansion
//! goes one level deep: a collaborator never pulls in its own collaborators.
//! Re-expanding an expanded selection is a no-op and cyclic `mandatory_with`
//! graphs stay bounded.

use std::collections::{BTreeSet, HashSet};
use tracing::warn;

use techhub_catalog::SkillCatalog;
use techhub_types::{RouteReason, SkillRecord};

use crate::matcher::SkillMatch;

/// A skill chosen for a plan and why
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selected<'a> {
    pub skill: &'a SkillRecord,
    pub reason: RouteReason,
    /// Keyword score, 0 for collaborators
    pub score: usize,
}

/// Ordered, id-deduplicated list of selected skills
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection<'a> {
    entries: Vec<Selected<'a>>,
    ids: HashSet<&'a str>,
}

impl<'a> Selection<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a selection with keyword matches, keeping their order
    pub fn from_matches(matches: &[SkillMatch<'a>]) -> Self {
        let mut selection = Self::new();
        for m in matches {
            selection.push(m.skill, RouteReason::KeywordMatch, m.score);
        }
        selection
    }

    /// Append a skill unless already present. Returns whether it was added
    pub fn push(&mut self, skill: &'a SkillRecord, reason: RouteReason, score: usize) -> bool {
        if !self.ids.insert(skill.id.as_str()) {
            return false;
        }
        self.entries.push(Selected {
            skill,
            reason,
            score,
        });
        true
    }

    pub fn contains(&self, skill_id: &str) -> bool {
        self.ids.contains(skill_id)
    }

    pub fn entries(&self) -> &[Selected<'a>] {
        &self.entries
    }

    /// Set view of the selected ids
    pub fn skill_ids(&self) -> BTreeSet<String> {
        self.ids.iter().map(|id| (*id).to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Add the mandatory collaborators of every keyword-selected skill
///
/// Collaborators are appended after the existing entries, in the order of the
/// skill that requires them and then in declared order.
pub fn expand<'a>(selection: &Selection<'a>, catalog: &'a SkillCatalog) -> Selection<'a> {
    let mut expanded = selection.clone();

    for entry in selection
        .entries()
        .iter()
        .filter(|e| e.reason == RouteReason::KeywordMatch)
    {
        for id in &entry.skill.mandatory_with {
            match catalog.find(id) {
                Some(collaborator) => {
                    expanded.push(collaborator, RouteReason::MandatoryCollaboration, 0);
                }
                None => warn!(
                    "Skill '{}' requires '{}', which is not in the catalog",
                    entry.skill.id, id
                ),
            }
        }
    }

    expanded
}
