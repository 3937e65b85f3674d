// Resume rendering: ResumeData → blocks → positioned pages → PDF bytes.
// Pure and deterministic. Callers on the async runtime must wrap `render`
// in tokio::task::spawn_blocking.

pub mod composer;
pub mod document;
pub mod pdf;
pub mod skills;

use std::sync::Arc;

use thiserror::Error;

use crate::layout::font_metrics::{default_page_config, PageConfig};
use crate::models::resume::ResumeData;
use skills::{KeywordSkillClassifier, SkillClassifier, SkillGroups};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Render failure: {0}")]
    Failure(String),
}

/// Renders snapshots into single-column PDF resumes.
#[derive(Clone)]
pub struct ResumeRenderer {
    classifier: Arc<dyn SkillClassifier>,
    page: PageConfig,
}

impl ResumeRenderer {
    pub fn new(classifier: Arc<dyn SkillClassifier>, page: PageConfig) -> Self {
        Self { classifier, page }
    }

    /// Produces the complete PDF for `data`. Never mutates the snapshot.
    pub fn render(&self, data: &ResumeData) -> Result<Vec<u8>, RenderError> {
        let blocks = document::build_document(data, self.classifier.as_ref())?;
        let pages = composer::compose(&blocks, &self.page);
        let bytes = pdf::encode_pdf(&pages, &self.page, data.personal.full_name.trim())?;
        tracing::debug!(
            blocks = blocks.len(),
            pages = pages.len(),
            bytes = bytes.len(),
            "Rendered resume"
        );
        Ok(bytes)
    }

    pub fn skill_groups(&self, skills: &[String]) -> SkillGroups {
        self.classifier.partition(skills)
    }
}

impl Default for ResumeRenderer {
    fn default() -> Self {
        Self::new(
            Arc::new(KeywordSkillClassifier::default()),
            default_page_config(),
        )
    }
}

/// Download name for a rendered resume: `<Full_Name>_Resume.pdf`.
///
/// Whitespace runs become underscores; quotes, slashes and control
/// characters are dropped so the name is safe in a Content-Disposition header.
pub fn suggested_filename(full_name: &str) -> String {
    let stem = full_name
        .split_whitespace()
        .map(|part| {
            part.chars()
                .filter(|c| !matches!(c, '"' | '\\' | '/') && !c.is_control())
                .collect::<String>()
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if stem.is_empty() {
        "Resume.pdf".to_string()
    } else {
        format!("{stem}_Resume.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::EducationEntry;
    use pdf::inspect::{page_count, text_runs};

    fn named(name: &str) -> ResumeData {
        let mut data = ResumeData::default();
        data.personal.full_name = name.to_string();
        data
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut data = named("Jane Doe");
        data.objective = "Build reliable systems.".to_string();
        data.skills = vec!["Python".to_string(), "Leadership".to_string()];
        let renderer = ResumeRenderer::default();
        let first = renderer.render(&data).unwrap();
        let second = renderer.render(&data).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_name_only_resume_has_no_section_headings() {
        let bytes = ResumeRenderer::default().render(&named("Jane Doe")).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert_eq!(page_count(&bytes), 1);
        assert_eq!(text_runs(&bytes), vec!["Jane Doe"]);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = ResumeRenderer::default()
            .render(&named("   "))
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingRequiredField("full_name")));
    }

    #[test]
    fn test_education_row_is_rendered() {
        let mut data = named("Jane Doe");
        data.education.push(EducationEntry {
            degree: "B.Tech CSE".to_string(),
            location: "Pune".to_string(),
            college: "MIT".to_string(),
            duration: "2019-2023".to_string(),
            cgpa: "8.9".to_string(),
        });
        let bytes = ResumeRenderer::default().render(&data).unwrap();
        let runs = text_runs(&bytes);
        for cell in ["Education", "Degree", "CGPA", "B.Tech CSE", "Pune", "MIT", "8.9"] {
            assert!(runs.iter().any(|run| run == cell), "missing {cell}");
        }
    }

    #[test]
    fn test_render_leaves_input_untouched() {
        let mut data = named("Jane Doe");
        data.skills = vec!["Rust".to_string(), "Teamwork".to_string()];
        let before = data.clone();
        ResumeRenderer::default().render(&data).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn test_skill_groups_use_classifier() {
        let renderer = ResumeRenderer::new(
            Arc::new(KeywordSkillClassifier::new(["docker"])),
            default_page_config(),
        );
        let groups = renderer.skill_groups(&["Docker".to_string(), "Python".to_string()]);
        assert_eq!(groups.tools_and_languages, vec!["Docker"]);
        assert_eq!(groups.technologies, vec!["Python"]);
    }

    #[test]
    fn test_suggested_filename() {
        assert_eq!(suggested_filename("Jane Doe"), "Jane_Doe_Resume.pdf");
        assert_eq!(suggested_filename("  Ana  María \"X\" "), "Ana_María_X_Resume.pdf");
        assert_eq!(suggested_filename("a/b\\c"), "abc_Resume.pdf");
        assert_eq!(suggested_filename(""), "Resume.pdf");
    }
}
