//! Skill classification — splits the flat skill list into the two groups
//! the Skills section prints.
//!
//! Pluggable the same way the renderer receives it: `Arc<dyn SkillClassifier>`.
//! The default `KeywordSkillClassifier` uses a case-insensitive substring test
//! against a vocabulary that can be replaced from configuration.

use serde::Serialize;

/// Built-in vocabulary of programming languages and developer tools.
///
/// Single letters and very short names ("c", "r", "go") are left out: as
/// substrings they match most words.
pub const DEFAULT_SKILL_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "golang",
    "rust",
    "kotlin",
    "swift",
    "ruby",
    "php",
    "scala",
    "matlab",
    "sql",
    "html",
    "css",
    "bash",
    "shell",
    "git",
    "linux",
    "vs code",
    "jupyter",
    "excel",
    "postman",
    "jira",
    "figma",
];

/// The two groups of the Skills section. Input order is kept in each group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillGroups {
    pub tools_and_languages: Vec<String>,
    pub technologies: Vec<String>,
}

impl SkillGroups {
    pub fn is_empty(&self) -> bool {
        self.tools_and_languages.is_empty() && self.technologies.is_empty()
    }
}

pub trait SkillClassifier: Send + Sync {
    /// True if the skill belongs under "Tools & Languages".
    fn is_tool_or_language(&self, skill: &str) -> bool;

    /// Places every skill in exactly one group.
    fn partition(&self, skills: &[String]) -> SkillGroups {
        let (tools_and_languages, technologies) = skills
            .iter()
            .cloned()
            .partition(|skill| self.is_tool_or_language(skill));
        SkillGroups {
            tools_and_languages,
            technologies,
        }
    }
}

/// Keyword membership classifier. Keywords are stored lowercase.
#[derive(Debug, Clone)]
pub struct KeywordSkillClassifier {
    keywords: Vec<String>,
}

impl KeywordSkillClassifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for KeywordSkillClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SKILL_KEYWORDS)
    }
}

impl SkillClassifier for KeywordSkillClassifier {
    fn is_tool_or_language(&self, skill: &str) -> bool {
        let skill_lower = skill.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| skill_lower.contains(keyword.as_str()))
    }
}
