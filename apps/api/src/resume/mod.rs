// Résumé documents: data model, validation, persistence and HTTP handlers.
// Rendering lives in crate::latex; this module owns everything around it.

pub mod handlers;
pub mod models;
pub mod persistence;
pub mod validation;
