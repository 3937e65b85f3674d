//! Resume aggregate and the entry schemas of its repeatable sections.
//!
//! Every string field defaults to `""`; optional fields are blank strings,
//! never `None`. Multi-line fields (`contributions`, `description`) hold the
//! already-split list of trimmed, non-empty lines.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Sections and field schemas
// ────────────────────────────────────────────────────────────────────────────

/// The repeatable sections of a resume, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Education,
    Experience,
    Projects,
    Certifications,
    Achievements,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Education,
        Section::Experience,
        Section::Projects,
        Section::Certifications,
        Section::Achievements,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::Achievements => "achievements",
        }
    }

    /// Field schema of the entries stored in this section.
    pub fn schema(&self) -> &'static [FieldSpec] {
        match self {
            Section::Education => EducationEntry::SCHEMA,
            Section::Experience => ExperienceEntry::SCHEMA,
            Section::Projects => ProjectEntry::SCHEMA,
            Section::Certifications => CertificationEntry::SCHEMA,
            Section::Achievements => AchievementEntry::SCHEMA,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("Unknown section '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Plain string, set verbatim.
    SingleLine,
    /// List of lines, set from a raw text block split on line breaks.
    MultiLine,
}

/// One field of an entry schema, with the label and placeholder the form shows.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Optional fields may stay blank without the form flagging them.
    pub optional: bool,
    pub label: &'static str,
    pub placeholder: &'static str,
}

const fn line(
    name: &'static str,
    optional: bool,
    label: &'static str,
    placeholder: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::SingleLine,
        optional,
        label,
        placeholder,
    }
}

const fn lines(name: &'static str, label: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::MultiLine,
        optional: true,
        label,
        placeholder,
    }
}

/// Looks up a field by name in a schema.
pub fn find_field(schema: &'static [FieldSpec], name: &str) -> Option<&'static FieldSpec> {
    schema.iter().find(|spec| spec.name == name)
}

/// An entry of a repeatable section, described by a static schema.
///
/// `text_mut` / `lines_mut` must answer for exactly the single-line and
/// multi-line fields listed in `SCHEMA`.
pub trait Entry: Default + Clone + fmt::Debug + Serialize + DeserializeOwned + Send {
    const SECTION: Section;
    const SCHEMA: &'static [FieldSpec];

    fn text_mut(&mut self, field: &str) -> Option<&mut String>;

    fn lines_mut(&mut self, _field: &str) -> Option<&mut Vec<String>> {
        None
    }

    /// True when every field is empty or whitespace.
    fn is_blank(&self) -> bool;
}

fn all_blank(values: &[&str]) -> bool {
    values.iter().all(|v| v.trim().is_empty())
}

fn lines_blank(items: &[String]) -> bool {
    items.iter().all(|item| item.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Personal details
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalDetails {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub linkedin: String,
    pub portfolio: String,
    pub address: String,
    /// Field of study.
    pub field: String,
    pub college: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    FullName,
    Phone,
    Email,
    Linkedin,
    Portfolio,
    Address,
    Field,
    College,
}

impl PersonalDetails {
    pub fn get_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::FullName => &mut self.full_name,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Email => &mut self.email,
            PersonalField::Linkedin => &mut self.linkedin,
            PersonalField::Portfolio => &mut self.portfolio,
            PersonalField::Address => &mut self.address,
            PersonalField::Field => &mut self.field,
            PersonalField::College => &mut self.college,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Repeatable entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub college: String,
    pub location: String,
    pub duration: String,
    pub cgpa: String,
}

impl Entry for EducationEntry {
    const SECTION: Section = Section::Education;
    const SCHEMA: &'static [FieldSpec] = &[
        line("degree", false, "Degree Name *", "B.Tech in Computer Science"),
        line("college", false, "College/University Name *", "IIT Jaipur"),
        line("location", true, "Location", "Jaipur, Rajasthan"),
        line("duration", false, "Duration *", "Aug 2019 - May 2023"),
        line("cgpa", true, "CGPA/Percentage", "8.5"),
    ];

    fn text_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "degree" => Some(&mut self.degree),
            "college" => Some(&mut self.college),
            "location" => Some(&mut self.location),
            "duration" => Some(&mut self.duration),
            "cgpa" => Some(&mut self.cgpa),
            _ => None,
        }
    }

    fn is_blank(&self) -> bool {
        all_blank(&[
            &self.degree,
            &self.college,
            &self.location,
            &self.duration,
            &self.cgpa,
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub position: String,
    pub company: String,
    pub duration: String,
    pub location: String,
    /// Supervisor name.
    pub guide: String,
    pub contributions: Vec<String>,
}

impl Entry for ExperienceEntry {
    const SECTION: Section = Section::Experience;
    const SCHEMA: &'static [FieldSpec] = &[
        line("position", false, "Position Title *", "Software Engineer Intern"),
        line("company", false, "Company Name *", "TechCorp"),
        line("duration", false, "Duration *", "June 2022 - Aug 2022"),
        line("location", true, "Location", "Bangalore, Karnataka"),
        line("guide", true, "Guide/Supervisor", "Dr. A. Sharma"),
        lines(
            "contributions",
            "Contributions (one per line)",
            "Developed a feature\nOptimized codebase",
        ),
    ];

    fn text_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "position" => Some(&mut self.position),
            "company" => Some(&mut self.company),
            "duration" => Some(&mut self.duration),
            "location" => Some(&mut self.location),
            "guide" => Some(&mut self.guide),
            _ => None,
        }
    }

    fn lines_mut(&mut self, field: &str) -> Option<&mut Vec<String>> {
        match field {
            "contributions" => Some(&mut self.contributions),
            _ => None,
        }
    }

    fn is_blank(&self) -> bool {
        all_blank(&[
            &self.position,
            &self.company,
            &self.duration,
            &self.location,
            &self.guide,
        ]) && lines_blank(&self.contributions)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub tech: String,
    pub description: Vec<String>,
    pub link: String,
    /// Active user count, free text.
    pub users: String,
    pub date: String,
    pub guide: String,
}

impl Entry for ProjectEntry {
    const SECTION: Section = Section::Projects;
    const SCHEMA: &'static [FieldSpec] = &[
        line("name", false, "Project Name *", "E-commerce Platform"),
        line("tech", false, "Tools/Tech Used *", "React, Node.js, MongoDB"),
        lines(
            "description",
            "Description (one per line)",
            "Built a full-stack application\nIntegrated payment gateway",
        ),
        line(
            "link",
            true,
            "GitHub/Live Link",
            "https://github.com/rajansingh/project",
        ),
        line("users", true, "Active Users", "1200"),
        line("date", true, "Date", "Mar 2023"),
        line("guide", true, "Guide/Mentor", "Prof. R. Gupta"),
    ];

    fn text_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "tech" => Some(&mut self.tech),
            "link" => Some(&mut self.link),
            "users" => Some(&mut self.users),
            "date" => Some(&mut self.date),
            "guide" => Some(&mut self.guide),
            _ => None,
        }
    }

    fn lines_mut(&mut self, field: &str) -> Option<&mut Vec<String>> {
        match field {
            "description" => Some(&mut self.description),
            _ => None,
        }
    }

    fn is_blank(&self) -> bool {
        all_blank(&[
            &self.name,
            &self.tech,
            &self.link,
            &self.users,
            &self.date,
            &self.guide,
        ]) && lines_blank(&self.description)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub title: String,
    pub platform: String,
    pub date: String,
}

impl Entry for CertificationEntry {
    const SECTION: Section = Section::Certifications;
    const SCHEMA: &'static [FieldSpec] = &[
        line("title", false, "Certificate Title *", "Python for Data Science"),
        line("platform", false, "Platform/Institute *", "Coursera"),
        line("date", false, "Completion Date *", "May 2023"),
    ];

    fn text_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "title" => Some(&mut self.title),
            "platform" => Some(&mut self.platform),
            "date" => Some(&mut self.date),
            _ => None,
        }
    }

    fn is_blank(&self) -> bool {
        all_blank(&[&self.title, &self.platform, &self.date])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementEntry {
    pub competition: String,
    pub result: String,
    pub organization: String,
    pub date: String,
}

impl Entry for AchievementEntry {
    const SECTION: Section = Section::Achievements;
    const SCHEMA: &'static [FieldSpec] = &[
        line("competition", false, "Competition Name *", "CodeJam"),
        line("result", false, "Rank/Result *", "1st Place"),
        line("organization", false, "Organization *", "Google"),
        line("date", false, "Date *", "Apr 2022"),
    ];

    fn text_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "competition" => Some(&mut self.competition),
            "result" => Some(&mut self.result),
            "organization" => Some(&mut self.organization),
            "date" => Some(&mut self.date),
            _ => None,
        }
    }

    fn is_blank(&self) -> bool {
        all_blank(&[
            &self.competition,
            &self.result,
            &self.organization,
            &self.date,
        ])
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate
// ────────────────────────────────────────────────────────────────────────────

/// Everything one editing session has entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub personal: PersonalDetails,
    pub objective: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<CertificationEntry>,
    pub achievements: Vec<AchievementEntry>,
}
