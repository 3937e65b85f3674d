use thiserror::Error;

use crate::models::resume::Section;

/// Failures of a Data Store mutation. The store is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The index does not address an existing entry. Callers holding an index
    /// from before a removal must re-read the section.
    #[error("{section} entry {index} does not exist (section has {len} entries)")]
    OutOfRange {
        section: Section,
        index: usize,
        len: usize,
    },

    #[error("{section} entries have no field '{field}'")]
    UnknownField { section: Section, field: String },

    /// A single-line setter was used on a multi-line field, or vice versa.
    #[error("{path} is a {actual} field")]
    FieldKindMismatch { path: String, actual: &'static str },
}
