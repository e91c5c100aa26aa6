//! Axum route handlers for the Résumé API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::latex::{generate_latex, Template};
use crate::models::resume::{ResumeRow, ResumeSnapshotRow};
use crate::pdf::CompiledPdf;
use crate::resume::models::{ResumeData, ResumeSection};
use crate::resume::persistence::{get_resume, get_snapshot_history, patch_section, save_resume};
use crate::resume::validation::validate_resume;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatchQuery {
    pub user_id: Uuid,
    pub template: Option<String>,
}

/// Full résumé submission: the document plus its owner.
#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: Uuid,
    #[serde(flatten)]
    pub document: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilePdfRequest {
    #[serde(alias = "user_id")]
    pub user_id: Option<Uuid>,
    #[serde(alias = "latex_code")]
    pub latex_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub data: ResumeData,
    pub template: String,
    pub latex_code: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for ResumeResponse {
    fn from(row: ResumeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            data: ResumeData::from_value(row.data),
            template: row.template,
            latex_code: row.latex_code,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub template: Template,
    pub latex_code: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes?template=default|custom
///
/// Validates and stores the user's résumé, replacing any previous one.
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
    Json(request): Json<SaveResumeRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    let data = ResumeData::from_value(Value::Object(request.document));

    let validation = validate_resume(&data);
    if !validation.passed {
        return Err(AppError::Validation(validation.summary()));
    }

    let template = Template::from_param(query.template.as_deref());
    let row = save_resume(&state.db, request.user_id, &data, template).await?;
    Ok(Json(row.into()))
}

/// GET /api/v1/resumes?user_id=
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeResponse>, AppError> {
    let row = get_resume(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No résumé found for user {}", params.user_id)))?;
    Ok(Json(row.into()))
}

/// PATCH /api/v1/resumes/sections/:section?user_id=&template=
///
/// Replaces one section; the body is the new section value.
pub async fn handle_patch_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Query(params): Query<PatchQuery>,
    Json(value): Json<Value>,
) -> Result<Json<ResumeResponse>, AppError> {
    let section = section
        .parse::<ResumeSection>()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let template = params
        .template
        .as_deref()
        .map(|t| Template::from_param(Some(t)));

    let row = patch_section(&state.db, params.user_id, section, value, template).await?;
    Ok(Json(row.into()))
}

/// POST /api/v1/resumes/preview?template=
///
/// Renders a submitted document without storing it.
pub async fn handle_preview(
    Query(query): Query<TemplateQuery>,
    Json(document): Json<Value>,
) -> Json<PreviewResponse> {
    let template = Template::from_param(query.template.as_deref());
    let data = ResumeData::from_value(document);
    Json(PreviewResponse {
        template,
        latex_code: generate_latex(&data, template),
    })
}

/// GET /api/v1/resumes/history?user_id=
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeSnapshotRow>>, AppError> {
    Ok(Json(get_snapshot_history(&state.db, params.user_id).await?))
}

/// POST /api/v1/resumes/pdf
///
/// Compiles the given LaTeX, or the user's stored rendering when none is given.
pub async fn handle_compile_pdf(
    State(state): State<AppState>,
    Json(request): Json<CompilePdfRequest>,
) -> Result<Json<CompiledPdf>, AppError> {
    let latex = match (request.latex_code, request.user_id) {
        (Some(code), _) if !code.trim().is_empty() => code,
        (_, Some(user_id)) => {
            get_resume(&state.db, user_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("No résumé found for user {user_id}")))?
                .latex_code
        }
        _ => {
            return Err(AppError::Validation(
                "Either latexCode or userId is required".to_string(),
            ))
        }
    };

    info!("Compiling {} bytes of LaTeX", latex.len());
    let pdf = state.pdf.compile(&latex).await?;
    Ok(Json(pdf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_request_splits_owner_from_document() {
        let user_id = Uuid::new_v4();
        let request: SaveResumeRequest = serde_json::from_value(json!({
            "userId": user_id,
            "personalInfo": {"firstName": "Jane"},
            "latexCode": "\\evil"
        }))
        .unwrap();
        assert_eq!(request.user_id, user_id);
        assert!(request.document.contains_key("personalInfo"));

        // A client-supplied latexCode never reaches the stored document.
        let data = ResumeData::from_value(Value::Object(request.document));
        let stored = serde_json::to_value(&data).unwrap();
        assert!(stored.get("latexCode").is_none());
    }

    #[test]
    fn test_save_request_accepts_snake_case_owner() {
        let user_id = Uuid::new_v4();
        let request: SaveResumeRequest =
            serde_json::from_value(json!({"user_id": user_id})).unwrap();
        assert_eq!(request.user_id, user_id);
    }

    #[test]
    fn test_response_flattens_document() {
        let now = Utc::now();
        let row = ResumeRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            data: json!({"personalInfo": {"firstName": "Jane"}}),
            template: "custom".to_string(),
            latex_code: "\\documentclass{article}".to_string(),
            version: 3,
            created_at: now,
            updated_at: now,
        };
        let body = serde_json::to_value(ResumeResponse::from(row)).unwrap();
        assert_eq!(body["personalInfo"]["firstName"], "Jane");
        assert_eq!(body["latexCode"], "\\documentclass{article}");
        assert_eq!(body["version"], 3);
        assert!(body["education"].as_array().unwrap().is_empty());
    }
}
