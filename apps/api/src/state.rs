use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::pdf::PdfCompiler;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Remote LaTeX compiler. Swappable so handlers can be exercised without the network.
    pub pdf: Arc<dyn PdfCompiler>,
}
