use serde::{Deserialize, Serialize};

use crate::resume::models::{list_items, ResumeData};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    /// JSON path of the offending field, e.g. `education[1].degree`.
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeValidationResult {
    pub passed: bool,
    pub errors: Vec<FieldError>,
}

impl ResumeValidationResult {
    /// One line per error, for the error response body.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn require(errors: &mut Vec<FieldError>, field: String, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            message: "is required".to_string(),
        });
    }
}

/// Checks the required fields of a submitted résumé.
///
/// Rendering never depends on this; it only gates full saves so that stored
/// documents carry the fields the builder form marks as required.
pub fn validate_resume(data: &ResumeData) -> ResumeValidationResult {
    let mut errors = Vec::new();

    let info = &data.personal_info;
    require(&mut errors, "personalInfo.firstName".into(), &info.first_name);
    require(&mut errors, "personalInfo.lastName".into(), &info.last_name);
    require(&mut errors, "personalInfo.email".into(), &info.email);
    if !info.email.trim().is_empty() && !info.email.contains('@') {
        errors.push(FieldError {
            field: "personalInfo.email".to_string(),
            message: "must be an email address".to_string(),
        });
    }

    for (i, e) in data.education.iter().enumerate() {
        require(&mut errors, format!("education[{i}].institution"), &e.institution);
        require(&mut errors, format!("education[{i}].degree"), &e.degree);
        require(&mut errors, format!("education[{i}].startDate"), &e.start_date);
    }

    for (i, e) in data.experience.iter().enumerate() {
        require(&mut errors, format!("experience[{i}].title"), &e.title);
        require(&mut errors, format!("experience[{i}].company"), &e.company);
        require(&mut errors, format!("experience[{i}].description"), &e.description);
        require(&mut errors, format!("experience[{i}].startDate"), &e.start_date);
    }

    for (i, p) in data.projects.iter().enumerate() {
        require(&mut errors, format!("projects[{i}].name"), &p.name);
        require(&mut errors, format!("projects[{i}].description"), &p.description);
        if list_items(&p.technologies).is_empty() {
            errors.push(FieldError {
                field: format!("projects[{i}].technologies"),
                message: "is required".to_string(),
            });
        }
    }

    for (i, a) in data.activities.iter().enumerate() {
        require(&mut errors, format!("activities[{i}].name"), &a.name);
    }

    ResumeValidationResult {
        passed: errors.is_empty(),
        errors,
    }
}
