// Text layout primitives: static font metrics, page geometry and word wrap.
// Pure and allocation-light; composition into pages lives in render::composer.

pub mod font_metrics;
pub mod wrap;

pub use font_metrics::default_page_config;
