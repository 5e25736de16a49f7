//! Keyword matching: tokenize a request and score every skill against it

use std::collections::BTreeSet;

use techhub_catalog::SkillCatalog;
use techhub_types::{token, SkillRecord};

/// A skill with a positive keyword score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillMatch<'a> {
    pub skill: &'a SkillRecord,
    pub score: usize,
}

/// Split request text into a set of lowercase tokens
///
/// Punctuation (anything but letters, digits, `-`, `_` and whitespace) is
/// removed, then the text is split on whitespace. Leading and trailing `-`/`_`
/// are trimmed and tokens under two characters dropped.
pub fn tokenize(raw_text: &str) -> BTreeSet<String> {
    let stripped: String = raw_text
        .to_lowercase()
        .chars()
        .filter(|&c| token::is_token_char(c) || c.is_whitespace())
        .collect();

    stripped
        .split_whitespace()
        .map(|t| t.trim_matches(token::is_edge_char))
        .filter(|t| t.chars().count() >= token::MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Number of request tokens that are exactly one of the skill's keywords
pub fn score(tokens: &BTreeSet<String>, skill: &SkillRecord) -> usize {
    tokens.iter().filter(|t| skill.has_keyword(t)).count()
}

/// Score every catalog skill, keep positive scores, best first
///
/// Ties are broken by ascending skill id. An empty result is a valid outcome.
pub fn match_skills<'a>(
    tokens: &BTreeSet<String>,
    catalog: &'a SkillCatalog,
) -> Vec<SkillMatch<'a>> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<SkillMatch<'a>> = catalog
        .all()
        .filter_map(|skill| {
            let score = score(tokens, skill);
            (score > 0).then_some(SkillMatch { skill, score })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.skill.id.cmp(&b.skill.id))
    });

    matches
}
