//! Resume → block list. Decides which sections appear, in which order, and
//! the exact text of every line. Page geometry is the composer's job.

use crate::models::resume::{
    AchievementEntry, CertificationEntry, Entry, ExperienceEntry, PersonalDetails, ProjectEntry,
    ResumeData,
};
use crate::render::skills::SkillClassifier;
use crate::render::RenderError;

/// Space after each section (0.2").
pub const SECTION_GAP_PT: f32 = 14.4;
/// Space after each entry inside a section (0.1").
pub const ENTRY_GAP_PT: f32 = 7.2;

pub const OBJECTIVE_HEADING: &str = "Career Objective";
pub const EDUCATION_HEADING: &str = "Education";
pub const EXPERIENCE_HEADING: &str = "Work Experience";
pub const PROJECTS_HEADING: &str = "Projects";
pub const SKILLS_HEADING: &str = "Skills";
pub const ACHIEVEMENTS_HEADING: &str = "Achievements";
pub const CERTIFICATIONS_HEADING: &str = "Certifications";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Body,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: &'static str,
    /// Share of the content width.
    pub width_fraction: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    /// One cell per column; empty cells are empty strings.
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    /// Two-column contact grid; either cell may be empty.
    ContactTable(Vec<[String; 2]>),
    SectionHeading(&'static str),
    Line { text: String, style: TextStyle },
    /// Bold label followed by body text, e.g. "Technologies: AWS, Docker".
    Labeled { label: &'static str, text: String },
    Bullet(String),
    Table(Table),
    Spacer(f32),
}

fn education_columns() -> Vec<Column> {
    vec![
        Column {
            title: "Degree",
            width_fraction: 0.27,
        },
        Column {
            title: "Location",
            width_fraction: 0.18,
        },
        Column {
            title: "College",
            width_fraction: 0.27,
        },
        Column {
            title: "Duration",
            width_fraction: 0.17,
        },
        Column {
            title: "CGPA",
            width_fraction: 0.11,
        },
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Text helpers
// ────────────────────────────────────────────────────────────────────────────

fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Joins the non-blank parts with `sep`; blank parts leave no separator behind.
pub fn join_present(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .filter_map(|part| present(part))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Appends `" (suffix)"` when the suffix is non-blank.
pub fn with_suffix(base: String, suffix: &str) -> String {
    match present(suffix) {
        None => base,
        Some(s) if base.is_empty() => format!("({s})"),
        Some(s) => format!("{base} ({s})"),
    }
}

fn non_blank_items(items: &[String]) -> impl Iterator<Item = &str> {
    items.iter().filter_map(|item| present(item))
}

// ────────────────────────────────────────────────────────────────────────────
// Entry lines
// ────────────────────────────────────────────────────────────────────────────

/// `position – company (duration)`
pub fn experience_header(entry: &ExperienceEntry) -> String {
    let title = join_present(&[&entry.position, &entry.company], " \u{2013} ");
    with_suffix(title, &entry.duration)
}

/// `(location, Guide: name)`, or `None` when both are blank.
pub fn experience_detail(entry: &ExperienceEntry) -> Option<String> {
    let guide = present(&entry.guide)
        .map(|g| format!("Guide: {g}"))
        .unwrap_or_default();
    let joined = join_present(&[&entry.location, &guide], ", ");
    (!joined.is_empty()).then(|| format!("({joined})"))
}

/// `name (Active Users – N) (date)`
pub fn project_header(entry: &ProjectEntry) -> String {
    let users = present(&entry.users)
        .map(|u| format!("Active Users \u{2013} {u}"))
        .unwrap_or_default();
    let header = with_suffix(join_present(&[&entry.name], ""), &users);
    with_suffix(header, &entry.date)
}

/// `result in competition | organization (date)`
pub fn achievement_line(entry: &AchievementEntry) -> String {
    let head = join_present(&[&entry.result, &entry.competition], " in ");
    with_suffix(join_present(&[&head, &entry.organization], " | "), &entry.date)
}

/// `title - platform (date)`
pub fn certification_line(entry: &CertificationEntry) -> String {
    with_suffix(
        join_present(&[&entry.title, &entry.platform], " - "),
        &entry.date,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Document assembly
// ────────────────────────────────────────────────────────────────────────────

/// Builds the block list for `data`. Fails if the full name is blank.
pub fn build_document(
    data: &ResumeData,
    classifier: &dyn SkillClassifier,
) -> Result<Vec<Block>, RenderError> {
    let full_name =
        present(&data.personal.full_name).ok_or(RenderError::MissingRequiredField("full_name"))?;

    let mut blocks = vec![Block::Title(full_name.to_string())];
    push_contact(&mut blocks, &data.personal);
    blocks.push(Block::Spacer(SECTION_GAP_PT));

    if let Some(objective) = present(&data.objective) {
        blocks.push(Block::SectionHeading(OBJECTIVE_HEADING));
        blocks.push(body(objective));
        blocks.push(Block::Spacer(SECTION_GAP_PT));
    }

    let education: Vec<_> = non_blank_entries(&data.education).collect();
    if !education.is_empty() {
        let rows: Vec<Vec<String>> = education
            .iter()
            .map(|e| {
                [&e.degree, &e.location, &e.college, &e.duration, &e.cgpa]
                    .iter()
                    .map(|cell| cell.trim().to_string())
                    .collect()
            })
            .collect();
        blocks.push(Block::SectionHeading(EDUCATION_HEADING));
        blocks.push(Block::Table(Table {
            columns: education_columns(),
            rows,
        }));
        blocks.push(Block::Spacer(SECTION_GAP_PT));
    }

    let experience: Vec<_> = non_blank_entries(&data.experience).collect();
    if !experience.is_empty() {
        blocks.push(Block::SectionHeading(EXPERIENCE_HEADING));
        for entry in experience {
            push_bold(&mut blocks, experience_header(entry));
            if let Some(detail) = experience_detail(entry) {
                blocks.push(body(&detail));
            }
            blocks.extend(non_blank_items(&entry.contributions).map(bullet));
            blocks.push(Block::Spacer(ENTRY_GAP_PT));
        }
        blocks.push(Block::Spacer(SECTION_GAP_PT - ENTRY_GAP_PT));
    }

    let projects: Vec<_> = non_blank_entries(&data.projects).collect();
    if !projects.is_empty() {
        blocks.push(Block::SectionHeading(PROJECTS_HEADING));
        for entry in projects {
            push_bold(&mut blocks, project_header(entry));
            push_labeled(&mut blocks, "Guide", &entry.guide);
            push_labeled(&mut blocks, "Tech Stack", &entry.tech);
            blocks.extend(non_blank_items(&entry.description).map(bullet));
            push_labeled(&mut blocks, "Link", &entry.link);
            blocks.push(Block::Spacer(ENTRY_GAP_PT));
        }
        blocks.push(Block::Spacer(SECTION_GAP_PT - ENTRY_GAP_PT));
    }

    let skills: Vec<String> = non_blank_items(&data.skills).map(str::to_string).collect();
    let groups = classifier.partition(&skills);
    if !groups.is_empty() {
        blocks.push(Block::SectionHeading(SKILLS_HEADING));
        push_labeled(
            &mut blocks,
            "Tools & Languages",
            &groups.tools_and_languages.join(", "),
        );
        push_labeled(&mut blocks, "Technologies", &groups.technologies.join(", "));
        blocks.push(Block::Spacer(SECTION_GAP_PT));
    }

    let achievements: Vec<_> = non_blank_entries(&data.achievements).collect();
    if !achievements.is_empty() {
        blocks.push(Block::SectionHeading(ACHIEVEMENTS_HEADING));
        blocks.extend(achievements.into_iter().map(|a| body(&achievement_line(a))));
        blocks.push(Block::Spacer(SECTION_GAP_PT));
    }

    let certifications: Vec<_> = non_blank_entries(&data.certifications).collect();
    if !certifications.is_empty() {
        blocks.push(Block::SectionHeading(CERTIFICATIONS_HEADING));
        blocks.extend(
            certifications
                .into_iter()
                .map(|c| body(&certification_line(c))),
        );
        blocks.push(Block::Spacer(SECTION_GAP_PT));
    }

    Ok(blocks)
}

fn non_blank_entries<E: Entry>(entries: &[E]) -> impl Iterator<Item = &E> {
    entries.iter().filter(|entry| !entry.is_blank())
}

/// Contact grid when both email and LinkedIn are given, stacked lines otherwise.
fn push_contact(blocks: &mut Vec<Block>, personal: &PersonalDetails) {
    if present(&personal.email).is_some() && present(&personal.linkedin).is_some() {
        fn cell(value: &str) -> String {
            value.trim().to_string()
        }
        let mut rows = vec![[cell(&personal.email), cell(&personal.phone)]];
        rows.push([cell(&personal.linkedin), cell(&personal.portfolio)]);
        blocks.push(Block::ContactTable(rows));
    } else {
        let stacked = [
            &personal.email,
            &personal.phone,
            &personal.linkedin,
            &personal.portfolio,
        ];
        blocks.extend(stacked.into_iter().filter_map(|v| present(v)).map(body));
    }

    if let Some(address) = present(&personal.address) {
        blocks.push(body(address));
    }
    let study = join_present(&[&personal.field, &personal.college], ", ");
    if !study.is_empty() {
        blocks.push(body(&study));
    }
}

fn body(text: &str) -> Block {
    Block::Line {
        text: text.to_string(),
        style: TextStyle::Body,
    }
}

fn bullet(text: &str) -> Block {
    Block::Bullet(text.to_string())
}

fn push_bold(blocks: &mut Vec<Block>, text: String) {
    if !text.is_empty() {
        blocks.push(Block::Line {
            text,
            style: TextStyle::Bold,
        });
    }
}

fn push_labeled(blocks: &mut Vec<Block>, label: &'static str, value: &str) {
    if let Some(text) = present(value) {
        blocks.push(Block::Labeled {
            label,
            text: text.to_string(),
        });
    }
}
