//! Résumé persistence: one row per user, re-rendered on every write.
//!
//! Every write recomputes `latex_code` from the structured data inside the
//! same transaction that stores the data, and appends a snapshot row. The
//! stored LaTeX therefore never lags the document it was rendered from.
//! Concurrent saves for the same user are last-writer-wins.

use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::latex::{generate_latex, Template};
use crate::models::resume::{ResumeRow, ResumeSnapshotRow};
use crate::resume::models::{ResumeData, ResumeSection};

/// Serializes the normalized document for the `data` column.
fn to_document(data: &ResumeData) -> Result<Value, AppError> {
    serde_json::to_value(data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize résumé: {e}")))
}

async fn insert_snapshot(
    tx: &mut Transaction<'_, Postgres>,
    row: &ResumeRow,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO resume_snapshots (id, user_id, version, template, latex_code)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(row.user_id)
    .bind(row.version)
    .bind(&row.template)
    .bind(&row.latex_code)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Creates or fully replaces the user's résumé.
pub async fn save_resume(
    pool: &PgPool,
    user_id: Uuid,
    data: &ResumeData,
    template: Template,
) -> Result<ResumeRow, AppError> {
    let latex_code = generate_latex(data, template);
    let document = to_document(data)?;

    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, user_id, data, template, latex_code)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id) DO UPDATE
            SET data = EXCLUDED.data,
                template = EXCLUDED.template,
                latex_code = EXCLUDED.latex_code,
                version = resumes.version + 1,
                updated_at = now()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&document)
    .bind(template.as_str())
    .bind(&latex_code)
    .fetch_one(&mut *tx)
    .await?;

    insert_snapshot(&mut tx, &row).await?;
    tx.commit().await?;

    info!(
        "Saved résumé for user {user_id} (version {}, template {template})",
        row.version
    );
    Ok(row)
}

/// Applies a section update to a stored row and renders the result.
/// Without an explicit `template`, the stored one is reused.
fn prepare_patch(
    existing: &ResumeRow,
    section: ResumeSection,
    value: Value,
    template: Option<Template>,
) -> (ResumeData, Template, String) {
    let template =
        template.unwrap_or_else(|| Template::from_param(Some(existing.template.as_str())));
    let data = ResumeData::from_value(existing.data.clone()).with_section(section, value);
    let latex_code = generate_latex(&data, template);
    (data, template, latex_code)
}

/// Replaces a single section of an existing résumé and re-renders it.
///
/// Without an explicit `template`, the template of the last write is reused.
pub async fn patch_section(
    pool: &PgPool,
    user_id: Uuid,
    section: ResumeSection,
    value: Value,
    template: Option<Template>,
) -> Result<ResumeRow, AppError> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 FOR UPDATE",
    )
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("No résumé found for user {user_id}")))?;

    let (data, template, latex_code) = prepare_patch(&existing, section, value, template);
    let document = to_document(&data)?;

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        UPDATE resumes
        SET data = $2,
            template = $3,
            latex_code = $4,
            version = version + 1,
            updated_at = now()
        WHERE user_id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&document)
    .bind(template.as_str())
    .bind(&latex_code)
    .fetch_one(&mut *tx)
    .await?;

    insert_snapshot(&mut tx, &row).await?;
    tx.commit().await?;

    info!(
        "Patched section {section} for user {user_id} (version {})",
        row.version
    );
    Ok(row)
}

/// Returns the user's résumé, if one has been saved.
pub async fn get_resume(pool: &PgPool, user_id: Uuid) -> Result<Option<ResumeRow>, AppError> {
    Ok(
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?,
    )
}

/// Returns every stored rendering for a user, oldest first.
pub async fn get_snapshot_history(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ResumeSnapshotRow>, AppError> {
    Ok(sqlx::query_as::<_, ResumeSnapshotRow>(
        "SELECT * FROM resume_snapshots WHERE user_id = $1 ORDER BY version ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn stored(document: Value, template: Template) -> ResumeRow {
        let data = ResumeData::from_value(document.clone());
        let now = Utc::now();
        ResumeRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            data: document,
            template: template.as_str().to_string(),
            latex_code: generate_latex(&data, template),
            version: 2,
            created_at: now,
            updated_at: now,
        }
    }

    fn document() -> Value {
        json!({
            "personalInfo": {"firstName": "Jane", "lastName": "Doe", "email": "j@x.com"},
            "experience": [{"title": "Engineer", "company": "Acme", "startDate": "2022",
                            "description": "Built the API"}]
        })
    }

    #[test]
    fn test_patch_rerenders_with_stored_template() {
        let row = stored(document(), Template::Custom);
        let (data, template, latex) = prepare_patch(
            &row,
            ResumeSection::Experience,
            json!([{"title": "Staff Engineer", "company": "Initech", "startDate": "2024",
                    "description": "Led the platform team"}]),
            None,
        );

        assert_eq!(template, Template::Custom);
        assert_eq!(latex, generate_latex(&data, Template::Custom));
        assert_ne!(latex, row.latex_code);
        assert!(latex.contains("Staff Engineer"));
        assert!(!latex.contains("Built the API"));
        assert_eq!(data.personal_info.full_name(), "Jane Doe");
    }

    #[test]
    fn test_patch_with_explicit_template_switches_layout() {
        let row = stored(document(), Template::Custom);
        let (data, template, latex) = prepare_patch(
            &row,
            ResumeSection::Skills,
            json!({"technical": ["Rust"]}),
            Some(Template::Default),
        );

        assert_eq!(template, Template::Default);
        assert_eq!(latex, generate_latex(&data, Template::Default));
        assert!(latex.contains("\\textbf{Technical}{: Rust}"));
    }

    #[test]
    fn test_patch_with_unknown_stored_template_uses_default() {
        let mut row = stored(document(), Template::Default);
        row.template = "legacy".to_string();
        let (_, template, _) = prepare_patch(&row, ResumeSection::Projects, json!([]), None);
        assert_eq!(template, Template::Default);
    }

    #[test]
    fn test_patch_document_serializes_normalized() {
        let row = stored(document(), Template::Default);
        let (data, _, _) = prepare_patch(
            &row,
            ResumeSection::Extracurriculars,
            json!([{"activity": "Debate", "description": "Won regionals"}]),
            None,
        );
        let stored = to_document(&data).unwrap();
        assert!(stored.get("extracurriculars").is_none());
        assert_eq!(stored["activities"][0]["name"], "Debate");
    }
}
