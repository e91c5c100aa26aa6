use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One résumé per user. `latex_code` is always the rendering of `data`
/// with `template` as of the last write.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub data: Value,
    pub template: String,
    pub latex_code: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only record of every rendering that was stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeSnapshotRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub version: i32,
    pub template: String,
    pub latex_code: String,
    pub created_at: DateTime<Utc>,
}
