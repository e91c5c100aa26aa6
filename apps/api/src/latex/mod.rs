// LaTeX rendering of résumé documents.
// Pure and synchronous: no I/O, no shared state, safe to call from any request.

pub mod escape;
pub mod sections;
pub mod templates;

pub use templates::Template;

use crate::resume::models::ResumeData;

/// Renders a complete, compilable LaTeX document for `data` in the chosen layout.
///
/// Never fails: missing fields render blank and empty sections are skipped
/// (default layout) or emitted as empty containers (custom layout).
pub fn generate_latex(data: &ResumeData, template: Template) -> String {
    match template {
        Template::Default => templates::render_default(data),
        Template::Custom => templates::render_custom(data),
    }
}
