//! Résumé document model.
//!
//! The wire shape is camelCase JSON as submitted by the résumé builder form.
//! Deserialization is forgiving: a section of the wrong JSON type reads as
//! empty and list elements that are not objects are dropped. Inside an
//! entry, `null` or a mistyped scalar reads as blank (numbers and bools as
//! their text) so one bad field never costs the whole entry. The renderer
//! relies on this to always produce a document.

use std::fmt;
use std::str::FromStr;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

// ────────────────────────────────────────────────────────────────────────────
// Lenient field readers
// ────────────────────────────────────────────────────────────────────────────

/// Reads a JSON array of `T`, tolerating anything that is not an array and
/// dropping elements that do not parse.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| {
            if !item.is_object() {
                warn!("Dropping non-object résumé entry: {item}");
                return None;
            }
            match serde_json::from_value(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Dropping unreadable résumé entry: {e}");
                    None
                }
            }
        })
        .collect())
}

/// Reads an object section, falling back to its default on any mismatch.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("Falling back to empty section: {e}");
        T::default()
    }))
}

/// Reads a scalar that forms may submit as either a string or a number.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Like [`lenient_text`] for fields that always hold a string; `null` reads as "".
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Reads a list-ish field: a string, an array of strings, or nothing.
fn lenient_list<'de, D>(deserializer: D) -> Result<Option<TextList>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(TextList::Text(s)),
        Value::Array(items) => Some(TextList::Items(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
        )),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Free-text lists
// ────────────────────────────────────────────────────────────────────────────

/// A field the form may send as one block of text or as a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TextList {
    Text(String),
    Items(Vec<String>),
}

impl TextList {
    /// Non-empty, trimmed items. Text is split one item per line.
    pub fn items(&self) -> Vec<&str> {
        let raw: Vec<&str> = match self {
            TextList::Text(text) => text.lines().collect(),
            TextList::Items(items) => items.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Items joined for inline rendering.
    pub fn joined(&self) -> String {
        self.items().join(", ")
    }
}

/// Items of an optional list field (empty when absent).
pub fn list_items(list: &Option<TextList>) -> Vec<&str> {
    list.as_ref().map(TextList::items).unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub linkedin: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub github: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub website: Option<String>,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub institution: String,
    #[serde(deserialize_with = "lenient_string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient_text")]
    pub field: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub gpa: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub coursework: Option<TextList>,
    #[serde(deserialize_with = "lenient_list")]
    pub honors: Option<TextList>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub current: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_list")]
    pub achievements: Option<TextList>,
    #[serde(deserialize_with = "lenient_list")]
    pub skills: Option<TextList>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_list")]
    pub technologies: Option<TextList>,
    #[serde(deserialize_with = "lenient_text")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub github_url: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub live_url: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub highlights: Option<TextList>,
    #[serde(deserialize_with = "lenient_text")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub team_size: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Native,
}

impl Proficiency {
    pub fn label(self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
            Proficiency::Expert => "Expert",
            Proficiency::Native => "Native",
        }
    }
}

/// Unknown proficiency levels read as unrated rather than failing the entry.
fn lenient_proficiency<'de, D>(deserializer: D) -> Result<Option<Proficiency>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => {
            let level = Value::String(s.trim().to_ascii_lowercase());
            match serde_json::from_value(level) {
                Ok(p) => Some(p),
                Err(_) => {
                    warn!("Unknown language proficiency '{s}', treating as unrated");
                    None
                }
            }
        }
        _ => None,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LanguageSkill {
    Rated {
        #[serde(default, deserialize_with = "lenient_string")]
        language: String,
        #[serde(default, deserialize_with = "lenient_proficiency")]
        proficiency: Option<Proficiency>,
    },
    Named(String),
}

impl LanguageSkill {
    /// `French (Native)` style label, or just the name when unrated.
    pub fn label(&self) -> Option<String> {
        let (name, proficiency) = match self {
            LanguageSkill::Rated {
                language,
                proficiency,
            } => (language.trim(), *proficiency),
            LanguageSkill::Named(name) => (name.trim(), None),
        };
        if name.is_empty() {
            return None;
        }
        Some(match proficiency {
            Some(p) => format!("{name} ({})", p.label()),
            None => name.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Languages {
    Text(String),
    List(Vec<LanguageSkill>),
}

impl Languages {
    pub fn labels(&self) -> Vec<String> {
        match self {
            Languages::Text(text) => TextList::Text(text.clone())
                .items()
                .into_iter()
                .map(str::to_string)
                .collect(),
            Languages::List(list) => list.iter().filter_map(LanguageSkill::label).collect(),
        }
    }
}

fn lenient_languages<'de, D>(deserializer: D) -> Result<Option<Languages>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(Languages::Text(s)),
        Value::Array(items) => Some(Languages::List(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(name) => Some(LanguageSkill::Named(name)),
                    Value::Number(n) => Some(LanguageSkill::Named(n.to_string())),
                    Value::Object(_) => match serde_json::from_value(item) {
                        Ok(skill) => Some(skill),
                        Err(e) => {
                            warn!("Dropping unreadable language entry: {e}");
                            None
                        }
                    },
                    other => {
                        warn!("Dropping non-language entry: {other}");
                        None
                    }
                })
                .collect(),
        )),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Skills {
    #[serde(deserialize_with = "lenient_list")]
    pub technical: Option<TextList>,
    #[serde(deserialize_with = "lenient_list")]
    pub technical_other: Option<TextList>,
    #[serde(deserialize_with = "lenient_list")]
    pub soft: Option<TextList>,
    #[serde(deserialize_with = "lenient_list")]
    pub soft_other: Option<TextList>,
    #[serde(deserialize_with = "lenient_languages")]
    pub languages: Option<Languages>,
    #[serde(deserialize_with = "lenient_list")]
    pub certifications: Option<TextList>,
}

/// Current activity entry shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "lenient_text")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub organization: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub position: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub current: bool,
    #[serde(deserialize_with = "lenient_text")]
    pub hours_per_week: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_list")]
    pub achievements: Option<TextList>,
    #[serde(deserialize_with = "lenient_list")]
    pub skills_developed: Option<TextList>,
}

/// Legacy `extracurriculars` entry shape, still present in older documents.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtracurricularEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub activity: String,
    #[serde(deserialize_with = "lenient_text")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub organization: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub current: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_list")]
    pub achievements: Option<TextList>,
    #[serde(deserialize_with = "lenient_list")]
    pub skills_developed: Option<TextList>,
}

impl From<ExtracurricularEntry> for ActivityEntry {
    fn from(legacy: ExtracurricularEntry) -> Self {
        ActivityEntry {
            name: legacy.activity,
            kind: None,
            organization: legacy.organization,
            position: legacy.role,
            location: legacy.location,
            start_date: legacy.start_date,
            end_date: legacy.end_date,
            current: legacy.current,
            hours_per_week: None,
            description: legacy.description,
            achievements: legacy.achievements,
            skills_developed: legacy.skills_developed,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// Raw wire document, accepting both activity shapes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ResumeDocument {
    #[serde(deserialize_with = "lenient_object")]
    personal_info: PersonalInfo,
    #[serde(deserialize_with = "lenient_seq")]
    education: Vec<EducationEntry>,
    #[serde(deserialize_with = "lenient_seq")]
    experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "lenient_seq")]
    projects: Vec<ProjectEntry>,
    #[serde(deserialize_with = "lenient_object")]
    skills: Skills,
    #[serde(deserialize_with = "lenient_seq")]
    activities: Vec<ActivityEntry>,
    #[serde(deserialize_with = "lenient_seq")]
    extracurriculars: Vec<ExtracurricularEntry>,
}

/// The normalized résumé: legacy extracurriculars are folded into
/// `activities` (after any current-shape entries, order preserved).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "ResumeDocument")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Skills,
    pub activities: Vec<ActivityEntry>,
}

impl From<ResumeDocument> for ResumeData {
    fn from(doc: ResumeDocument) -> Self {
        let mut activities = doc.activities;
        activities.extend(doc.extracurriculars.into_iter().map(ActivityEntry::from));
        ResumeData {
            personal_info: doc.personal_info,
            education: doc.education,
            experience: doc.experience,
            projects: doc.projects,
            skills: doc.skills,
            activities,
        }
    }
}

impl ResumeData {
    /// Reads a stored or submitted document. Never fails: anything that is
    /// not an object yields the empty résumé.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return ResumeData::default();
        }
        serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("Unreadable résumé document, using empty defaults: {e}");
            ResumeData::default()
        })
    }

    /// Returns a copy of this document with one section replaced by `value`,
    /// read back through the same lenient rules as a full submission.
    pub fn with_section(&self, section: ResumeSection, value: Value) -> Self {
        let mut doc = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        match section {
            ResumeSection::Activities | ResumeSection::Extracurriculars => {
                doc.remove(ResumeSection::Activities.key());
                doc.remove(ResumeSection::Extracurriculars.key());
            }
            _ => {}
        }
        doc.insert(section.key().to_string(), value);
        ResumeData::from_value(Value::Object(doc))
    }
}

/// A patchable top-level section of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSection {
    PersonalInfo,
    Education,
    Experience,
    Projects,
    Skills,
    Activities,
    Extracurriculars,
}

impl ResumeSection {
    /// JSON key of the section in the wire document.
    pub fn key(self) -> &'static str {
        match self {
            ResumeSection::PersonalInfo => "personalInfo",
            ResumeSection::Education => "education",
            ResumeSection::Experience => "experience",
            ResumeSection::Projects => "projects",
            ResumeSection::Skills => "skills",
            ResumeSection::Activities => "activities",
            ResumeSection::Extracurriculars => "extracurriculars",
        }
    }
}

impl fmt::Display for ResumeSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown résumé section '{0}'")]
pub struct UnknownSection(pub String);

impl FromStr for ResumeSection {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personalInfo" | "personal_info" => Ok(ResumeSection::PersonalInfo),
            "education" => Ok(ResumeSection::Education),
            "experience" => Ok(ResumeSection::Experience),
            "projects" => Ok(ResumeSection::Projects),
            "skills" => Ok(ResumeSection::Skills),
            "activities" => Ok(ResumeSection::Activities),
            "extracurriculars" => Ok(ResumeSection::Extracurriculars),
            other => Err(UnknownSection(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_document_deserializes() {
        let data = ResumeData::from_value(json!({
            "personalInfo": {"firstName": "Jane", "lastName": "Doe", "email": "jane@example.com"},
            "education": [{"institution": "MIT", "degree": "BSc", "startDate": "2018", "gpa": 3.9}],
            "experience": [{"title": "Engineer", "company": "Acme", "startDate": "2022",
                            "current": true, "description": "Built things",
                            "achievements": ["Shipped v2", "Cut costs 30%"]}],
            "projects": [{"name": "Parser", "description": "A parser",
                          "technologies": "Rust, nom", "teamSize": 3}],
            "skills": {"technical": "Rust, Go", "languages": [{"language": "French", "proficiency": "native"}]},
            "activities": [{"name": "Chess Club", "position": "President", "description": "Ran events"}]
        }));

        assert_eq!(data.personal_info.full_name(), "Jane Doe");
        assert_eq!(data.education[0].gpa.as_deref(), Some("3.9"));
        assert!(data.experience[0].current);
        assert_eq!(list_items(&data.experience[0].achievements), vec!["Shipped v2", "Cut costs 30%"]);
        assert_eq!(data.projects[0].team_size.as_deref(), Some("3"));
        assert_eq!(
            data.skills.languages.as_ref().map(Languages::labels),
            Some(vec!["French (Native)".to_string()])
        );
        assert_eq!(data.activities.len(), 1);
    }

    #[test]
    fn test_non_array_sections_read_as_empty() {
        let data = ResumeData::from_value(json!({
            "education": {"institution": "MIT"},
            "experience": "not a list",
            "projects": null,
            "activities": 42
        }));
        assert!(data.education.is_empty());
        assert!(data.experience.is_empty());
        assert!(data.projects.is_empty());
        assert!(data.activities.is_empty());
    }

    #[test]
    fn test_non_object_elements_are_dropped_and_order_kept() {
        let data = ResumeData::from_value(json!({
            "experience": [
                {"title": "First"},
                "garbage",
                42,
                {"title": "Second"}
            ]
        }));
        let titles: Vec<_> = data.experience.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_null_and_numeric_fields_keep_the_entry() {
        let data = ResumeData::from_value(json!({
            "activities": [{"name": "Chess Club", "description": null}],
            "experience": [{"title": "Engineer", "company": "Acme", "startDate": 2020,
                            "description": "Built things", "location": 7}],
            "education": [{"institution": "MIT", "degree": ["BSc"], "startDate": null}]
        }));

        assert_eq!(data.activities.len(), 1);
        assert_eq!(data.activities[0].name, "Chess Club");
        assert_eq!(data.activities[0].description, "");
        assert_eq!(data.experience.len(), 1);
        assert_eq!(data.experience[0].start_date, "2020");
        assert_eq!(data.experience[0].location.as_deref(), Some("7"));
        assert_eq!(data.education.len(), 1);
        assert_eq!(data.education[0].degree, "");
        assert_eq!(data.education[0].start_date, "");
    }

    #[test]
    fn test_null_personal_field_keeps_the_rest() {
        let data = ResumeData::from_value(json!({
            "personalInfo": {"firstName": "Jane", "lastName": null, "email": "j@x.com",
                             "phone": 5550100}
        }));
        let info = &data.personal_info;
        assert_eq!(info.first_name, "Jane");
        assert_eq!(info.last_name, "");
        assert_eq!(info.email, "j@x.com");
        assert_eq!(info.phone.as_deref(), Some("5550100"));
    }

    #[test]
    fn test_patching_personal_info_with_null_keeps_other_fields() {
        let data = ResumeData::from_value(json!({
            "personalInfo": {"firstName": "Jane", "lastName": "Doe", "email": "j@x.com"}
        }));
        let patched = data.with_section(
            ResumeSection::PersonalInfo,
            json!({"firstName": "Jane", "lastName": "Doe", "email": "j@x.com", "phone": null}),
        );
        assert_eq!(patched.personal_info.full_name(), "Jane Doe");
        assert_eq!(patched.personal_info.phone, None);
    }

    #[test]
    fn test_unrated_and_unknown_languages_are_kept() {
        let data = ResumeData::from_value(json!({
            "skills": {"languages": [
                {"language": "French", "proficiency": "Fluent"},
                {"language": "German"},
                {"language": "Spanish", "proficiency": "EXPERT"},
                "Italian",
                true
            ]}
        }));
        assert_eq!(
            data.skills.languages.as_ref().map(Languages::labels),
            Some(vec![
                "French".to_string(),
                "German".to_string(),
                "Spanish (Expert)".to_string(),
                "Italian".to_string(),
            ])
        );
    }

    #[test]
    fn test_non_object_document_is_empty() {
        assert_eq!(ResumeData::from_value(json!([1, 2, 3])), ResumeData::default());
        assert_eq!(ResumeData::from_value(Value::Null), ResumeData::default());
    }

    #[test]
    fn test_personal_info_wrong_type_defaults() {
        let data = ResumeData::from_value(json!({"personalInfo": "Jane"}));
        assert_eq!(data.personal_info, PersonalInfo::default());
    }

    #[test]
    fn test_legacy_extracurriculars_fold_into_activities() {
        let data = ResumeData::from_value(json!({
            "activities": [{"name": "Robotics", "description": "Built robots"}],
            "extracurriculars": [{"activity": "Debate", "role": "Captain",
                                  "current": true, "description": "Won regionals"}]
        }));
        assert_eq!(data.activities.len(), 2);
        assert_eq!(data.activities[0].name, "Robotics");
        assert_eq!(data.activities[1].name, "Debate");
        assert_eq!(data.activities[1].position.as_deref(), Some("Captain"));
        assert!(data.activities[1].current);
    }

    #[test]
    fn test_normalized_document_has_no_legacy_key() {
        let data = ResumeData::from_value(json!({
            "extracurriculars": [{"activity": "Debate", "description": "d"}]
        }));
        let value = serde_json::to_value(&data).unwrap();
        assert!(value.get("extracurriculars").is_none());
        assert_eq!(value["activities"][0]["name"], "Debate");

        // Reading the normalized form back is stable.
        assert_eq!(ResumeData::from_value(value), data);
    }

    #[test]
    fn test_text_list_splits_lines() {
        let list = TextList::Text("Led team\n\n  Shipped v2  \n".to_string());
        assert_eq!(list.items(), vec!["Led team", "Shipped v2"]);
        assert_eq!(list.joined(), "Led team, Shipped v2");
    }

    #[test]
    fn test_language_variants() {
        let skills: Skills = serde_json::from_value(json!({
            "languages": ["English", {"language": "German", "proficiency": "intermediate"}, {"language": ""}]
        }))
        .unwrap();
        assert_eq!(
            skills.languages.unwrap().labels(),
            vec!["English".to_string(), "German (Intermediate)".to_string()]
        );

        let skills: Skills = serde_json::from_value(json!({"languages": "English, Spanish"})).unwrap();
        assert_eq!(skills.languages.unwrap().labels(), vec!["English, Spanish".to_string()]);
    }

    #[test]
    fn test_with_section_replaces_only_that_section() {
        let data = ResumeData::from_value(json!({
            "personalInfo": {"firstName": "Jane"},
            "education": [{"institution": "MIT"}]
        }));
        let patched = data.with_section(
            ResumeSection::Education,
            json!([{"institution": "Stanford"}, {"institution": "CMU"}]),
        );
        assert_eq!(patched.personal_info.first_name, "Jane");
        let names: Vec<_> = patched.education.iter().map(|e| e.institution.as_str()).collect();
        assert_eq!(names, vec!["Stanford", "CMU"]);
    }

    #[test]
    fn test_with_section_extracurriculars_replaces_activities() {
        let data = ResumeData::from_value(json!({
            "activities": [{"name": "Robotics"}]
        }));
        let patched = data.with_section(
            ResumeSection::Extracurriculars,
            json!([{"activity": "Debate"}]),
        );
        let names: Vec<_> = patched.activities.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Debate"]);
    }

    #[test]
    fn test_section_parsing() {
        assert_eq!("personalInfo".parse::<ResumeSection>().unwrap(), ResumeSection::PersonalInfo);
        assert_eq!("personal_info".parse::<ResumeSection>().unwrap(), ResumeSection::PersonalInfo);
        assert_eq!("extracurriculars".parse::<ResumeSection>().unwrap(), ResumeSection::Extracurriculars);
        assert!("latexCode".parse::<ResumeSection>().is_err());
    }
}
