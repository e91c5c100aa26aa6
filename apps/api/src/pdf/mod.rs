/// PDF compiler client: hands rendered LaTeX to the remote compilation API.
///
/// The service accepts `{code, format, compiler}` and answers with either a
/// URL to the compiled PDF or an error payload carrying the compiler log.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const OUTPUT_FORMAT: &str = "pdf";
const COMPILER: &str = "pdflatex";
/// Upper bound on compiler log text forwarded to clients.
const MAX_LOG_CHARS: usize = 2000;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LaTeX compilation failed: {0}")]
    Compilation(String),

    #[error("Unexpected compiler response (status {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct CompileRequest<'a> {
    code: &'a str,
    format: &'a str,
    compiler: &'a str,
}

/// Either shape the compilation service may answer with.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
enum CompileResponse {
    Compiled {
        url: String,
    },
    Failed {
        error: String,
        #[serde(default)]
        log: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompiledPdf {
    pub url: String,
}

/// Anything that can turn LaTeX source into a hosted PDF.
#[async_trait]
pub trait PdfCompiler: Send + Sync {
    async fn compile(&self, latex: &str) -> Result<CompiledPdf, PdfError>;
}

#[derive(Clone)]
pub struct HttpPdfCompiler {
    client: Client,
    endpoint: String,
}

impl HttpPdfCompiler {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, PdfError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint,
        })
    }
}

#[async_trait]
impl PdfCompiler for HttpPdfCompiler {
    async fn compile(&self, latex: &str) -> Result<CompiledPdf, PdfError> {
        let request = CompileRequest {
            code: latex,
            format: OUTPUT_FORMAT,
            compiler: COMPILER,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Compiler responded {} ({} bytes)", status, body.len());

        interpret_response(status.as_u16(), &body)
    }
}

/// Maps a raw compiler reply to a result. Error payloads win over the status
/// code so that the compiler's own message reaches the caller.
fn interpret_response(status: u16, body: &str) -> Result<CompiledPdf, PdfError> {
    match serde_json::from_str::<CompileResponse>(body) {
        Ok(CompileResponse::Compiled { url }) if (200..300).contains(&status) => {
            Ok(CompiledPdf { url })
        }
        Ok(CompileResponse::Failed { error, log }) => {
            warn!("LaTeX compilation failed: {error}");
            let message = match log {
                Some(log) if !log.trim().is_empty() => {
                    format!("{error}\n{}", truncate(&log, MAX_LOG_CHARS))
                }
                _ => error,
            };
            Err(PdfError::Compilation(message))
        }
        _ => Err(PdfError::UnexpectedResponse {
            status,
            body: truncate(body, MAX_LOG_CHARS),
        }),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_payload() {
        let result = interpret_response(200, r#"{"url": "https://cdn.example.com/abc.pdf"}"#);
        assert_eq!(
            result.unwrap(),
            CompiledPdf {
                url: "https://cdn.example.com/abc.pdf".to_string()
            }
        );
    }

    #[test]
    fn test_error_payload_includes_log() {
        let body = r#"{"error": "Compilation failed", "log": "! Undefined control sequence."}"#;
        match interpret_response(400, body) {
            Err(PdfError::Compilation(msg)) => {
                assert!(msg.starts_with("Compilation failed"));
                assert!(msg.contains("Undefined control sequence"));
            }
            other => panic!("expected compilation error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_payload_on_success_status() {
        let result = interpret_response(200, r#"{"error": "timeout"}"#);
        assert!(matches!(result, Err(PdfError::Compilation(msg)) if msg == "timeout"));
    }

    #[test]
    fn test_url_with_error_status_is_unexpected() {
        let result = interpret_response(500, r#"{"url": "https://x"}"#);
        assert!(matches!(
            result,
            Err(PdfError::UnexpectedResponse { status: 500, .. })
        ));
    }

    #[test]
    fn test_non_json_body_is_unexpected() {
        let result = interpret_response(502, "<html>Bad Gateway</html>");
        match result {
            Err(PdfError::UnexpectedResponse { status, body }) => {
                assert_eq!(status, 502);
                assert!(body.contains("Bad Gateway"));
            }
            other => panic!("expected unexpected response, got {other:?}"),
        }
    }

    #[test]
    fn test_request_serialization() {
        let request = CompileRequest {
            code: "\\documentclass{article}",
            format: OUTPUT_FORMAT,
            compiler: COMPILER,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["format"], "pdf");
        assert_eq!(json["compiler"], "pdflatex");
        assert_eq!(json["code"], "\\documentclass{article}");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("héllo", 2), "hé");
    }
}
