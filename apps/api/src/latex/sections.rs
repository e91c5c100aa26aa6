//! Section generators: structured résumé entries → LaTeX fragments.
//!
//! Every `*_entries` function renders the body of a section (the entries
//! between the list start/end macros). Every `*_section` function wraps a
//! non-empty body in its `\section{...}` heading and returns `""` for an
//! empty input, so the default template never shows an empty heading.
//!
//! All user text goes through [`escape_latex`]. Labels are literal.

use crate::latex::escape::{escape_latex, escape_opt, escape_url};
use crate::resume::models::{
    list_items, ActivityEntry, EducationEntry, ExperienceEntry, Languages, ProjectEntry, Skills,
    TextList,
};

pub const EDUCATION_TITLE: &str = "Education";
pub const EXPERIENCE_TITLE: &str = "Experience";
pub const PROJECTS_TITLE: &str = "Projects";
pub const SKILLS_TITLE: &str = "Technical Skills";
pub const ACTIVITIES_TITLE: &str = "Extracurricular Activities";

const PRESENT: &str = "Present";

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Trimmed, non-empty view of an optional field.
pub(crate) fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|s| !s.is_empty())
}

/// Collapses all runs of whitespace (including newlines) to one space.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escapes a single-line field: whitespace runs (including newlines) become
/// one space, so form input cannot break a table cell or a header line.
pub(crate) fn inline(text: &str) -> String {
    escape_latex(&collapse_whitespace(text))
}

pub(crate) fn inline_opt(text: Option<&str>) -> String {
    escape_opt(text.map(collapse_whitespace).as_deref())
}

/// `start -- end`, with `Present` replacing the end date for current entries.
pub fn date_range(start: Option<&str>, end: Option<&str>, current: bool) -> String {
    let start = non_empty(start);
    let end = if current {
        Some(PRESENT)
    } else {
        non_empty(end)
    };
    match (start, end) {
        (Some(s), Some(e)) => format!("{} -- {}", inline(s), inline(e)),
        (Some(s), None) => inline(s),
        (None, Some(e)) => inline(e),
        (None, None) => String::new(),
    }
}

/// `\href` with an escaped target and a readable, escaped label.
pub fn href(url: &str) -> String {
    let url = url.trim();
    let target = if url.contains("://") || url.starts_with("mailto:") {
        url.to_string()
    } else {
        format!("https://{url}")
    };
    let label = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.")
        .trim_end_matches('/');
    format!(
        "\\href{{{}}}{{\\underline{{{}}}}}",
        escape_url(&target),
        inline(label)
    )
}

/// Renders escaped item lines as a nested item list, or `""` when there are none.
fn item_list(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = String::from("      \\resumeItemListStart\n");
    for item in items {
        out.push_str(&format!("        \\resumeItem{{{item}}}\n"));
    }
    out.push_str("      \\resumeItemListEnd\n");
    out
}

fn push_text(items: &mut Vec<String>, text: &str) {
    let text = collapse_whitespace(text);
    if !text.is_empty() {
        items.push(escape_latex(&text));
    }
}

fn push_each(items: &mut Vec<String>, list: &Option<TextList>) {
    items.extend(list_items(list).into_iter().map(escape_latex));
}

fn push_labeled(items: &mut Vec<String>, label: &str, list: &Option<TextList>) {
    let joined = list.as_ref().map(TextList::joined).unwrap_or_default();
    if !joined.is_empty() {
        items.push(format!("\\textit{{{label}:}} {}", escape_latex(&joined)));
    }
}

fn subheading(top_left: &str, top_right: &str, bottom_left: &str, bottom_right: &str) -> String {
    format!(
        "    \\resumeSubheading\n      {{{top_left}}}{{{top_right}}}\n      {{{bottom_left}}}{{{bottom_right}}}\n"
    )
}

/// Wraps a section body in its heading and list container.
pub fn section_block(title: &str, body: &str) -> String {
    format!(
        "\\section{{{title}}}\n  \\resumeSubHeadingListStart\n{body}  \\resumeSubHeadingListEnd\n\n"
    )
}

fn wrap_non_empty(title: &str, body: String) -> String {
    if body.is_empty() {
        String::new()
    } else {
        section_block(title, &body)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

pub fn education_entries(entries: &[EducationEntry]) -> String {
    entries.iter().map(education_entry).collect()
}

fn education_entry(entry: &EducationEntry) -> String {
    let degree = match non_empty(entry.field.as_deref()) {
        Some(field) => format!(
            "{}, {}",
            inline(&entry.degree),
            inline(field)
        ),
        None => inline(&entry.degree),
    };
    let dates = date_range(Some(entry.start_date.as_str()), entry.end_date.as_deref(), false);

    let mut items = Vec::new();
    if let Some(gpa) = non_empty(entry.gpa.as_deref()) {
        items.push(format!("GPA: {}", inline(gpa)));
    }
    if let Some(coursework) = &entry.coursework {
        let joined = coursework.joined();
        if !joined.is_empty() {
            items.push(format!("Relevant Coursework: {}", escape_latex(&joined)));
        }
    }
    if let Some(honors) = &entry.honors {
        let joined = honors.joined();
        if !joined.is_empty() {
            items.push(format!("Honors: {}", escape_latex(&joined)));
        }
    }

    let mut out = subheading(
        &inline(&entry.institution),
        &inline_opt(entry.location.as_deref()),
        &degree,
        &dates,
    );
    out.push_str(&item_list(&items));
    out
}

pub fn education_section(entries: &[EducationEntry]) -> String {
    wrap_non_empty(EDUCATION_TITLE, education_entries(entries))
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

pub fn experience_entries(entries: &[ExperienceEntry]) -> String {
    entries.iter().map(experience_entry).collect()
}

fn experience_entry(entry: &ExperienceEntry) -> String {
    let dates = date_range(
        Some(entry.start_date.as_str()),
        entry.end_date.as_deref(),
        entry.current,
    );

    let mut items = Vec::new();
    push_text(&mut items, &entry.description);
    push_each(&mut items, &entry.achievements);
    push_labeled(&mut items, "Skills", &entry.skills);

    let mut out = subheading(
        &inline(&entry.title),
        &dates,
        &inline(&entry.company),
        &inline_opt(entry.location.as_deref()),
    );
    out.push_str(&item_list(&items));
    out
}

pub fn experience_section(entries: &[ExperienceEntry]) -> String {
    wrap_non_empty(EXPERIENCE_TITLE, experience_entries(entries))
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

pub fn project_entries(entries: &[ProjectEntry]) -> String {
    entries.iter().map(project_entry).collect()
}

fn project_entry(entry: &ProjectEntry) -> String {
    let technologies = entry
        .technologies
        .as_ref()
        .map(TextList::joined)
        .unwrap_or_default();
    let title = if technologies.is_empty() {
        format!("\\textbf{{{}}}", inline(&entry.name))
    } else {
        format!(
            "\\textbf{{{}}} $|$ \\textbf{{\\small {}}}",
            inline(&entry.name),
            escape_latex(&technologies)
        )
    };
    let dates = date_range(entry.start_date.as_deref(), entry.end_date.as_deref(), false);

    let mut items = Vec::new();
    push_text(&mut items, &entry.description);
    if let Some(role) = non_empty(entry.role.as_deref()) {
        let line = match non_empty(entry.team_size.as_deref()) {
            Some(size) => format!(
                "\\textit{{Role:}} {} (team of {})",
                inline(role),
                inline(size)
            ),
            None => format!("\\textit{{Role:}} {}", inline(role)),
        };
        items.push(line);
    }
    push_each(&mut items, &entry.highlights);

    let links: Vec<String> = [
        ("Code", entry.github_url.as_deref()),
        ("Live", entry.live_url.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, url)| non_empty(url).map(|u| format!("\\textit{{{label}:}} {}", href(u))))
    .collect();
    if !links.is_empty() {
        items.push(links.join(" $|$ "));
    }

    let mut out = format!("    \\resumeProjectHeading\n      {{{title}}}{{{dates}}}\n");
    out.push_str(&item_list(&items));
    out
}

pub fn project_section(entries: &[ProjectEntry]) -> String {
    wrap_non_empty(PROJECTS_TITLE, project_entries(entries))
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

fn join_lists(lists: &[&Option<TextList>]) -> String {
    lists
        .iter()
        .flat_map(|list| list_items(list))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Labeled skill lines as (label, escaped content), empty categories skipped.
pub fn skill_lines(skills: &Skills) -> Vec<(&'static str, String)> {
    let technical = join_lists(&[&skills.technical, &skills.technical_other]);
    let languages = skills
        .languages
        .as_ref()
        .map(Languages::labels)
        .unwrap_or_default()
        .join(", ");
    let other = join_lists(&[&skills.soft, &skills.soft_other, &skills.certifications]);

    [("Technical", technical), ("Languages", languages), ("Other", other)]
        .into_iter()
        .filter(|(_, content)| !content.is_empty())
        .map(|(label, content)| (label, escape_latex(&content)))
        .collect()
}

/// Renders labeled lines in a single compact item.
pub fn skills_block(lines: &[(&str, String)]) -> String {
    let body = lines
        .iter()
        .map(|(label, content)| format!("     \\textbf{{{label}}}{{: {content}}}"))
        .collect::<Vec<_>>()
        .join(" \\\\\n");
    format!(
        " \\begin{{itemize}}[leftmargin=0.15in, label={{}}]\n    \\small{{\\item{{\n{body}\n    }}}}\n \\end{{itemize}}\n"
    )
}

pub fn skills_section(skills: &Skills) -> String {
    let lines = skill_lines(skills);
    if lines.is_empty() {
        return String::new();
    }
    format!("\\section{{{SKILLS_TITLE}}}\n{}\n", skills_block(&lines))
}

// ────────────────────────────────────────────────────────────────────────────
// Activities
// ────────────────────────────────────────────────────────────────────────────

pub fn activity_entries(entries: &[ActivityEntry]) -> String {
    entries.iter().map(activity_entry).collect()
}

fn activity_entry(entry: &ActivityEntry) -> String {
    let dates = date_range(
        entry.start_date.as_deref(),
        entry.end_date.as_deref(),
        entry.current,
    );
    let subtitle = [entry.position.as_deref(), entry.organization.as_deref()]
        .into_iter()
        .filter_map(non_empty)
        .map(inline)
        .collect::<Vec<_>>()
        .join(" -- ");

    let mut items = Vec::new();
    push_text(&mut items, &entry.description);
    push_each(&mut items, &entry.achievements);
    push_labeled(&mut items, "Skills Developed", &entry.skills_developed);
    if let Some(hours) = non_empty(entry.hours_per_week.as_deref()) {
        items.push(format!("\\textit{{Commitment:}} {} hours/week", inline(hours)));
    }

    let mut out = subheading(
        &inline(&entry.name),
        &dates,
        &subtitle,
        &inline_opt(entry.location.as_deref()),
    );
    out.push_str(&item_list(&items));
    out
}

pub fn activity_section(entries: &[ActivityEntry]) -> String {
    wrap_non_empty(ACTIVITIES_TITLE, activity_entries(entries))
}
