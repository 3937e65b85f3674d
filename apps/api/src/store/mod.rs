//! Resume Data Store — the in-memory record one editing session mutates.
//!
//! Repeatable sections share one implementation: [`SectionList`] is
//! implemented once for `Vec<E>` over every [`Entry`] type, and the store
//! dispatches to it by [`Section`]. Field edits are typed [`FieldPath`]s,
//! validated against the entry schema before anything is written.

pub mod error;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::models::resume::{find_field, Entry, FieldKind, PersonalField, ResumeData, Section};

pub use error::StoreError;
pub use text::{split_comma_list, split_lines};

// ────────────────────────────────────────────────────────────────────────────
// Field paths
// ────────────────────────────────────────────────────────────────────────────

/// Address of an editable value.
///
/// JSON form: `{"scope":"personal","field":"email"}`, `{"scope":"objective"}`,
/// `{"scope":"entry","section":"education","index":0,"field":"degree"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum FieldPath {
    Personal { field: PersonalField },
    Objective,
    Entry {
        section: Section,
        index: usize,
        field: String,
    },
}

impl FieldPath {
    pub fn entry(section: Section, index: usize, field: impl Into<String>) -> Self {
        FieldPath::Entry {
            section,
            index,
            field: field.into(),
        }
    }

    fn describe(&self) -> String {
        match self {
            FieldPath::Personal { field } => format!("personal.{}", personal_name(*field)),
            FieldPath::Objective => "objective".to_string(),
            FieldPath::Entry {
                section,
                index,
                field,
            } => format!("{section}[{index}].{field}"),
        }
    }
}

fn personal_name(field: PersonalField) -> &'static str {
    match field {
        PersonalField::FullName => "full_name",
        PersonalField::Phone => "phone",
        PersonalField::Email => "email",
        PersonalField::Linkedin => "linkedin",
        PersonalField::Portfolio => "portfolio",
        PersonalField::Address => "address",
        PersonalField::Field => "field",
        PersonalField::College => "college",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generic repeatable section
// ────────────────────────────────────────────────────────────────────────────

/// Index-addressed operations shared by every repeatable section.
pub trait SectionList {
    fn section(&self) -> Section;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a blank entry and returns its index.
    fn push_blank(&mut self) -> usize;

    fn remove_at(&mut self, index: usize) -> Result<(), StoreError>;

    fn set_text(&mut self, index: usize, field: &str, value: String) -> Result<(), StoreError>;

    fn set_lines(&mut self, index: usize, field: &str, lines: Vec<String>)
        -> Result<(), StoreError>;
}

impl<E: Entry> SectionList for Vec<E> {
    fn section(&self) -> Section {
        E::SECTION
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn push_blank(&mut self) -> usize {
        self.push(E::default());
        Vec::len(self) - 1
    }

    fn remove_at(&mut self, index: usize) -> Result<(), StoreError> {
        check_index::<E>(index, Vec::len(self))?;
        self.remove(index);
        Ok(())
    }

    fn set_text(&mut self, index: usize, field: &str, value: String) -> Result<(), StoreError> {
        check_field::<E>(index, field, FieldKind::SingleLine)?;
        check_index::<E>(index, Vec::len(self))?;
        let slot = self[index]
            .text_mut(field)
            .ok_or_else(|| unknown_field::<E>(field))?;
        *slot = value;
        Ok(())
    }

    fn set_lines(
        &mut self,
        index: usize,
        field: &str,
        lines: Vec<String>,
    ) -> Result<(), StoreError> {
        check_field::<E>(index, field, FieldKind::MultiLine)?;
        check_index::<E>(index, Vec::len(self))?;
        let slot = self[index]
            .lines_mut(field)
            .ok_or_else(|| unknown_field::<E>(field))?;
        *slot = lines;
        Ok(())
    }
}

fn check_index<E: Entry>(index: usize, len: usize) -> Result<(), StoreError> {
    if index < len {
        Ok(())
    } else {
        Err(StoreError::OutOfRange {
            section: E::SECTION,
            index,
            len,
        })
    }
}

fn check_field<E: Entry>(index: usize, field: &str, wanted: FieldKind) -> Result<(), StoreError> {
    let spec = find_field(E::SCHEMA, field).ok_or_else(|| unknown_field::<E>(field))?;
    if spec.kind == wanted {
        return Ok(());
    }
    Err(StoreError::FieldKindMismatch {
        path: format!("{}[{index}].{field}", E::SECTION),
        actual: kind_name(spec.kind),
    })
}

fn unknown_field<E: Entry>(field: &str) -> StoreError {
    StoreError::UnknownField {
        section: E::SECTION,
        field: field.to_string(),
    }
}

fn kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::SingleLine => "single-line",
        FieldKind::MultiLine => "multi-line",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

/// Owns the [`ResumeData`] of one session. Created empty.
#[derive(Debug, Clone, Default)]
pub struct ResumeStore {
    data: ResumeData,
}

impl ResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current values.
    pub fn snapshot(&self) -> &ResumeData {
        &self.data
    }

    pub fn section(&self, section: Section) -> &dyn SectionList {
        match section {
            Section::Education => &self.data.education,
            Section::Experience => &self.data.experience,
            Section::Projects => &self.data.projects,
            Section::Certifications => &self.data.certifications,
            Section::Achievements => &self.data.achievements,
        }
    }

    fn section_mut(&mut self, section: Section) -> &mut dyn SectionList {
        match section {
            Section::Education => &mut self.data.education,
            Section::Experience => &mut self.data.experience,
            Section::Projects => &mut self.data.projects,
            Section::Certifications => &mut self.data.certifications,
            Section::Achievements => &mut self.data.achievements,
        }
    }

    /// Appends a blank entry to `section` and returns its index.
    pub fn add_entry(&mut self, section: Section) -> usize {
        self.section_mut(section).push_blank()
    }

    /// Removes the entry at `index`; later entries move down by one.
    pub fn remove_entry(&mut self, section: Section, index: usize) -> Result<(), StoreError> {
        self.section_mut(section).remove_at(index)
    }

    /// Overwrites a single-line value.
    pub fn set_field(&mut self, path: &FieldPath, value: impl Into<String>) -> Result<(), StoreError> {
        let value = value.into();
        match path {
            FieldPath::Personal { field } => {
                *self.data.personal.get_mut(*field) = value;
                Ok(())
            }
            FieldPath::Objective => {
                self.data.objective = value;
                Ok(())
            }
            FieldPath::Entry {
                section,
                index,
                field,
            } => self.section_mut(*section).set_text(*index, field, value),
        }
    }

    /// Splits `raw_text` into trimmed non-empty lines and stores them in a
    /// multi-line field. Returns the stored lines.
    pub fn set_multiline_field(
        &mut self,
        path: &FieldPath,
        raw_text: &str,
    ) -> Result<Vec<String>, StoreError> {
        match path {
            FieldPath::Entry {
                section,
                index,
                field,
            } => {
                let lines = split_lines(raw_text);
                self.section_mut(*section)
                    .set_lines(*index, field, lines.clone())?;
                Ok(lines)
            }
            other => Err(StoreError::FieldKindMismatch {
                path: other.describe(),
                actual: kind_name(FieldKind::SingleLine),
            }),
        }
    }

    /// Replaces the skill list with the comma-split contents of every bucket,
    /// in bucket order. Duplicates are kept.
    pub fn set_skills<S: AsRef<str>>(&mut self, buckets: &[S]) -> &[String] {
        self.data.skills = buckets
            .iter()
            .flat_map(|bucket| split_comma_list(bucket.as_ref()))
            .collect();
        &self.data.skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_degrees(degrees: &[&str]) -> ResumeStore {
        let mut store = ResumeStore::new();
        for degree in degrees {
            let index = store.add_entry(Section::Education);
            store
                .set_field(&FieldPath::entry(Section::Education, index, "degree"), *degree)
                .unwrap();
        }
        store
    }

    fn degrees(store: &ResumeStore) -> Vec<&str> {
        store
            .snapshot()
            .education
            .iter()
            .map(|e| e.degree.as_str())
            .collect()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ResumeStore::new();
        assert_eq!(store.snapshot(), &ResumeData::default());
    }

    #[test]
    fn test_add_entry_appends_blank_and_returns_index() {
        let mut store = ResumeStore::new();
        assert_eq!(store.add_entry(Section::Projects), 0);
        assert_eq!(store.add_entry(Section::Projects), 1);
        assert_eq!(store.section(Section::Projects).len(), 2);
        assert!(store.snapshot().projects.iter().all(|p| p.name.is_empty()));
        assert_eq!(store.section(Section::Education).len(), 0);
    }

    #[test]
    fn test_remove_entry_shifts_later_entries_down() {
        let mut store = store_with_degrees(&["BSc", "MSc", "PhD", "Postdoc"]);
        store.remove_entry(Section::Education, 1).unwrap();
        assert_eq!(degrees(&store), vec!["BSc", "PhD", "Postdoc"]);
    }

    #[test]
    fn test_remove_every_index_decrements_count_by_one() {
        let original = ["a", "b", "c", "d", "e"];
        for i in 0..original.len() {
            let mut store = store_with_degrees(&original);
            store.remove_entry(Section::Education, i).unwrap();
            let after = degrees(&store);
            assert_eq!(after.len(), original.len() - 1);
            for (j, value) in original.iter().enumerate().skip(i + 1) {
                assert_eq!(after[j - 1], *value);
            }
            assert_eq!(&after[..i], &original[..i]);
        }
    }

    #[test]
    fn test_remove_out_of_range_fails_and_leaves_store_unchanged() {
        let mut store = store_with_degrees(&["BSc"]);
        let err = store.remove_entry(Section::Education, 1).unwrap_err();
        assert_eq!(
            err,
            StoreError::OutOfRange {
                section: Section::Education,
                index: 1,
                len: 1
            }
        );
        assert_eq!(degrees(&store), vec!["BSc"]);
    }

    #[test]
    fn test_set_field_on_stale_index_is_out_of_range() {
        let mut store = store_with_degrees(&["BSc", "MSc"]);
        store.remove_entry(Section::Education, 0).unwrap();
        let err = store
            .set_field(&FieldPath::entry(Section::Education, 1, "degree"), "PhD")
            .unwrap_err();
        assert!(matches!(err, StoreError::OutOfRange { index: 1, len: 1, .. }));
    }

    #[test]
    fn test_set_personal_and_objective() {
        let mut store = ResumeStore::new();
        store
            .set_field(
                &FieldPath::Personal {
                    field: PersonalField::FullName,
                },
                "Jane Doe",
            )
            .unwrap();
        store.set_field(&FieldPath::Objective, "Ship things.").unwrap();
        assert_eq!(store.snapshot().personal.full_name, "Jane Doe");
        assert_eq!(store.snapshot().objective, "Ship things.");
    }

    #[test]
    fn test_set_field_rejects_unknown_field() {
        let mut store = store_with_degrees(&["BSc"]);
        let err = store
            .set_field(&FieldPath::entry(Section::Education, 0, "gpa"), "4.0")
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownField { section: Section::Education, .. }));
    }

    #[test]
    fn test_set_field_rejects_multiline_field() {
        let mut store = ResumeStore::new();
        store.add_entry(Section::Experience);
        let err = store
            .set_field(
                &FieldPath::entry(Section::Experience, 0, "contributions"),
                "Did things",
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::FieldKindMismatch { actual: "multi-line", .. }));
    }

    #[test]
    fn test_set_multiline_field_stores_split_lines() {
        let mut store = ResumeStore::new();
        store.add_entry(Section::Experience);
        let lines = store
            .set_multiline_field(
                &FieldPath::entry(Section::Experience, 0, "contributions"),
                "Developed a feature\n\n  Optimized codebase  \n",
            )
            .unwrap();
        assert_eq!(lines, vec!["Developed a feature", "Optimized codebase"]);
        assert_eq!(store.snapshot().experience[0].contributions, lines);
    }

    #[test]
    fn test_set_multiline_field_rejects_scalar_targets() {
        let mut store = ResumeStore::new();
        store.add_entry(Section::Projects);
        let err = store
            .set_multiline_field(&FieldPath::entry(Section::Projects, 0, "name"), "a\nb")
            .unwrap_err();
        assert!(matches!(err, StoreError::FieldKindMismatch { actual: "single-line", .. }));

        let err = store
            .set_multiline_field(&FieldPath::Objective, "a\nb")
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::FieldKindMismatch {
                path: "objective".to_string(),
                actual: "single-line"
            }
        );
    }

    #[test]
    fn test_set_skills_concatenates_buckets_without_dedup() {
        let mut store = ResumeStore::new();
        let skills = store.set_skills(&["Python, SQL", " ", "Leadership, Python"]);
        assert_eq!(skills, ["Python", "SQL", "Leadership", "Python"]);
    }

    #[test]
    fn test_set_skills_replaces_previous_list() {
        let mut store = ResumeStore::new();
        store.set_skills(&["Python"]);
        store.set_skills(&["Rust"]);
        assert_eq!(store.snapshot().skills, vec!["Rust"]);
    }

    #[test]
    fn test_field_path_json_shape() {
        let path: FieldPath = serde_json::from_str(
            r#"{"scope":"entry","section":"projects","index":2,"field":"link"}"#,
        )
        .unwrap();
        assert_eq!(path, FieldPath::entry(Section::Projects, 2, "link"));

        let path: FieldPath = serde_json::from_str(r#"{"scope":"objective"}"#).unwrap();
        assert_eq!(path, FieldPath::Objective);

        let path: FieldPath =
            serde_json::from_str(r#"{"scope":"personal","field":"linkedin"}"#).unwrap();
        assert_eq!(
            path,
            FieldPath::Personal {
                field: PersonalField::Linkedin
            }
        );
    }
}
