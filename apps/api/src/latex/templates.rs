//! Document templates: preambles, headers and section ordering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::latex::escape::{escape_latex, escape_url};
use crate::latex::sections::{
    activity_section, education_entries, education_section, experience_entries,
    experience_section, href, inline, non_empty, project_entries, project_section, section_block,
    skills_block, skills_section, EDUCATION_TITLE, EXPERIENCE_TITLE, PROJECTS_TITLE, SKILLS_TITLE,
};
use crate::resume::models::{PersonalInfo, ResumeData, TextList};

/// Label the custom layout prints on its skills line. It renders the
/// `technical` skills field, not language proficiencies. The label is kept
/// as-is until product confirms which one is intended.
pub const CUSTOM_SKILLS_LABEL: &str = "Languages";

/// Placeholder entry so an empty list container still compiles.
const EMPTY_LIST_ITEM: &str = "    \\item[]\n";

/// Layout selector, supplied by the caller per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Default,
    /// Jake Gutierrez style layout.
    Custom,
}

impl Template {
    pub fn as_str(self) -> &'static str {
        match self {
            Template::Default => "default",
            Template::Custom => "custom",
        }
    }

    /// Reads the `template` query parameter. Anything other than `custom`
    /// selects the default layout.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None => Template::Default,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Unknown template '{raw}', using default");
                Template::Default
            }),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Template::Default),
            "custom" => Ok(Template::Custom),
            other => Err(format!("unknown template '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Preambles
// ────────────────────────────────────────────────────────────────────────────

/// Formatting primitives shared by both layouts.
const CORE_MACROS: &str = r"\titleformat{\section}{
  \vspace{-4pt}\scshape\raggedright\large
}{}{0em}{}[\color{black}\titlerule \vspace{-5pt}]

\newcommand{\resumeItem}[1]{
  \item\small{
    {#1 \vspace{-2pt}}
  }
}

\newcommand{\resumeSubheading}[4]{
  \vspace{-2pt}\item
    \begin{tabular*}{0.97\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{#1} & #2 \\
      \textit{\small#3} & \textit{\small #4} \\
    \end{tabular*}\vspace{-7pt}
}

\newcommand{\resumeProjectHeading}[2]{
    \item
    \begin{tabular*}{0.97\textwidth}{l@{\extracolsep{\fill}}r}
      \small#1 & #2 \\
    \end{tabular*}\vspace{-7pt}
}

\renewcommand\labelitemii{$\vcenter{\hbox{\tiny$\bullet$}}$}

\newcommand{\resumeSubHeadingListStart}{\begin{itemize}[leftmargin=0.15in, label={}]}
\newcommand{\resumeSubHeadingListEnd}{\end{itemize}}
\newcommand{\resumeItemListStart}{\begin{itemize}}
\newcommand{\resumeItemListEnd}{\end{itemize}\vspace{-5pt}}
";

const DEFAULT_PREAMBLE: &str = r"\documentclass[letterpaper,11pt]{article}

\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
\usepackage[margin=0.75in]{geometry}
\usepackage{titlesec}
\usepackage[usenames,dvipsnames]{color}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\usepackage{fancyhdr}
\usepackage[english]{babel}
\usepackage{tabularx}

\pagestyle{fancy}
\fancyhf{}
\renewcommand{\headrulewidth}{0pt}
\renewcommand{\footrulewidth}{0pt}

\urlstyle{same}
\raggedright
\setlength{\tabcolsep}{0in}
";

const CUSTOM_PREAMBLE: &str = r"\documentclass[letterpaper,11pt]{article}

\usepackage{latexsym}
\usepackage[empty]{fullpage}
\usepackage{titlesec}
\usepackage{marvosym}
\usepackage[usenames,dvipsnames]{color}
\usepackage{verbatim}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\usepackage{fancyhdr}
\usepackage[english]{babel}
\usepackage{tabularx}
\usepackage[T1]{fontenc}
\input{glyphtounicode}

\pagestyle{fancy}
\fancyhf{}
\fancyfoot{}
\renewcommand{\headrulewidth}{0pt}
\renewcommand{\footrulewidth}{0pt}

\addtolength{\oddsidemargin}{-0.5in}
\addtolength{\evensidemargin}{-0.5in}
\addtolength{\textwidth}{1in}
\addtolength{\topmargin}{-.5in}
\addtolength{\textheight}{1.0in}

\urlstyle{same}
\raggedbottom
\raggedright
\setlength{\tabcolsep}{0in}

\pdfgentounicode=1
";

/// Extra macros only the custom layout defines.
const CUSTOM_MACROS: &str = r"
\newcommand{\resumeSubSubheading}[2]{
    \item
    \begin{tabular*}{0.97\textwidth}{l@{\extracolsep{\fill}}r}
      \textit{\small#1} & \textit{\small #2} \\
    \end{tabular*}\vspace{-7pt}
}

\newcommand{\resumeSubItem}[1]{\resumeItem{#1}\vspace{-4pt}}
";

// ────────────────────────────────────────────────────────────────────────────
// Headers
// ────────────────────────────────────────────────────────────────────────────

fn name_line(info: &PersonalInfo) -> String {
    format!(
        "    \\textbf{{\\Huge \\scshape {}}} \\\\ \\vspace{{1pt}}\n",
        inline(&info.full_name())
    )
}

fn mailto(email: &str) -> String {
    format!(
        "\\href{{mailto:{}}}{{\\underline{{{}}}}}",
        escape_url(email),
        inline(email)
    )
}

fn header_line(parts: Vec<String>) -> String {
    if parts.is_empty() {
        return String::new();
    }
    format!("    \\small {}\n", parts.join(" $|$ "))
}

fn default_header(info: &PersonalInfo) -> String {
    let mut contact = Vec::new();
    if let Some(phone) = non_empty(info.phone.as_deref()) {
        contact.push(inline(phone));
    }
    if let Some(email) = non_empty(Some(info.email.as_str())) {
        contact.push(mailto(email));
    }
    if let Some(address) = non_empty(info.address.as_deref()) {
        contact.push(inline(address));
    }
    let links: Vec<String> = [&info.linkedin, &info.github, &info.website]
        .into_iter()
        .filter_map(|url| non_empty(url.as_deref()).map(href))
        .collect();

    let mut out = String::from("\\begin{center}\n");
    out.push_str(&name_line(info));
    let contact_line = header_line(contact);
    let links_line = header_line(links);
    out.push_str(&contact_line);
    if !links_line.is_empty() {
        if !contact_line.is_empty() {
            out.push_str("    \\\\ \\vspace{1pt}\n");
        }
        out.push_str(&links_line);
    }
    out.push_str("\\end{center}\n\n");
    out
}

fn custom_header(info: &PersonalInfo) -> String {
    let mut contact = Vec::new();
    if let Some(phone) = non_empty(info.phone.as_deref()) {
        contact.push(inline(phone));
    }
    if let Some(email) = non_empty(Some(info.email.as_str())) {
        contact.push(mailto(email));
    }
    for url in [&info.linkedin, &info.github] {
        if let Some(url) = non_empty(url.as_deref()) {
            contact.push(href(url));
        }
    }

    let mut out = String::from("\\begin{center}\n");
    out.push_str(&name_line(info));
    out.push_str(&header_line(contact));
    out.push_str("\\end{center}\n\n");
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Default layout: populated sections only, in a fixed order.
pub fn render_default(data: &ResumeData) -> String {
    let mut doc = String::with_capacity(8 * 1024);
    doc.push_str(DEFAULT_PREAMBLE);
    doc.push('\n');
    doc.push_str(CORE_MACROS);
    doc.push_str("\n\\begin{document}\n\n");
    doc.push_str(&default_header(&data.personal_info));
    for fragment in [
        education_section(&data.education),
        experience_section(&data.experience),
        project_section(&data.projects),
        skills_section(&data.skills),
        activity_section(&data.activities),
    ] {
        doc.push_str(&fragment);
    }
    doc.push_str("\\end{document}\n");
    doc
}

fn always_block(title: &str, body: String) -> String {
    if body.is_empty() {
        section_block(title, EMPTY_LIST_ITEM)
    } else {
        section_block(title, &body)
    }
}

/// Custom layout: every section is emitted, even when empty.
pub fn render_custom(data: &ResumeData) -> String {
    let technical = data
        .skills
        .technical
        .as_ref()
        .map(TextList::joined)
        .unwrap_or_default();

    let mut doc = String::with_capacity(8 * 1024);
    doc.push_str(CUSTOM_PREAMBLE);
    doc.push('\n');
    doc.push_str(CORE_MACROS);
    doc.push_str(CUSTOM_MACROS);
    doc.push_str("\n\\begin{document}\n\n");
    doc.push_str(&custom_header(&data.personal_info));
    doc.push_str(&always_block(
        EDUCATION_TITLE,
        education_entries(&data.education),
    ));
    doc.push_str(&always_block(
        EXPERIENCE_TITLE,
        experience_entries(&data.experience),
    ));
    doc.push_str(&always_block(PROJECTS_TITLE, project_entries(&data.projects)));
    doc.push_str(&format!(
        "\\section{{{SKILLS_TITLE}}}\n{}\n",
        skills_block(&[(CUSTOM_SKILLS_LABEL, escape_latex(&technical))])
    ));
    doc.push_str("\\end{document}\n");
    doc
}
