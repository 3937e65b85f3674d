use std::sync::Arc;

use crate::config::Config;
use crate::layout::default_page_config;
use crate::render::skills::{KeywordSkillClassifier, SkillClassifier};
use crate::render::ResumeRenderer;
use crate::session::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionRegistry,
    /// Carries the pluggable skill classifier. Default: built-in keyword list,
    /// replaced by SKILL_KEYWORDS / SKILL_KEYWORDS_FILE when set.
    pub renderer: ResumeRenderer,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let classifier: Arc<dyn SkillClassifier> = match &config.skill_keywords {
            Some(keywords) => Arc::new(KeywordSkillClassifier::new(keywords)),
            None => Arc::new(KeywordSkillClassifier::default()),
        };
        AppState {
            config,
            sessions: SessionRegistry::new(),
            renderer: ResumeRenderer::new(classifier, default_page_config()),
        }
    }
}
