//! Skill → company matching against a fixed lookup table.

use std::collections::BTreeSet;

use serde::Serialize;

/// Built-in skill keyword → companies known to hire for it.
const SKILL_COMPANIES: &[(&str, &[&str])] = &[
    ("java", &["Google", "Microsoft", "Capgemini"]),
    ("python", &["Google", "Microsoft", "Capgemini", "DeepSeek"]),
    ("machinelearning", &["Google", "Microsoft"]),
    ("c", &["Google", "Microsoft", "OpenAI"]),
    ("javascript", &["Google", "Microsoft", "Capgemini", "OpenAI"]),
];

/// Read-only keyword → companies table. Keywords are lowercase.
#[derive(Debug, Clone, Copy)]
pub struct SkillCompanyMap {
    entries: &'static [(&'static str, &'static [&'static str])],
}

/// Result of matching a skill list against the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "companies", rename_all = "snake_case")]
pub enum CompanyMatch {
    Matched(BTreeSet<String>),
    NoMatch,
}

impl CompanyMatch {
    pub fn companies(&self) -> Option<&BTreeSet<String>> {
        match self {
            CompanyMatch::Matched(set) => Some(set),
            CompanyMatch::NoMatch => None,
        }
    }
}

impl Default for SkillCompanyMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SkillCompanyMap {
    pub const fn builtin() -> Self {
        Self {
            entries: SKILL_COMPANIES,
        }
    }

    pub const fn from_entries(entries: &'static [(&'static str, &'static [&'static str])]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static [&'static str])> + '_ {
        self.entries.iter().copied()
    }

    /// Collects the companies of every keyword contained in any of `skills`.
    ///
    /// Skills are trimmed and lower-cased first. Empty input yields `NoMatch`.
    pub fn match_companies<S: AsRef<str>>(&self, skills: &[S]) -> CompanyMatch {
        let normalized: Vec<String> = skills
            .iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .collect();

        let mut matched = BTreeSet::new();
        for skill in &normalized {
            for (keyword, companies) in self.entries {
                if keyword_matches_skill(keyword, skill) {
                    matched.extend(companies.iter().map(|c| c.to_string()));
                }
            }
        }

        if matched.is_empty() {
            CompanyMatch::NoMatch
        } else {
            CompanyMatch::Matched(matched)
        }
    }
}

/// Matching policy: the keyword must appear somewhere inside the skill.
///
/// This is deliberately keyword-in-skill, so the one-letter keyword "c" hits
/// any skill containing a "c" ("machinelearning", "excel", "css"). Change the
/// policy here only.
pub fn keyword_matches_skill(keyword: &str, skill: &str) -> bool {
    skill.contains(keyword)
}

/// Splits a comma-separated skill list, trimming, lower-casing and dropping blanks.
pub fn parse_skill_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
