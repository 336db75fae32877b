//! Turns uploaded PDF / DOCX / plain-text bytes into normalized resume text.

use std::io::Write;

use thiserror::Error;
use tracing::debug;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("Failed to stage upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Detects the kind from the declared content type, then from the file
    /// extension. Generic types such as `application/octet-stream` defer to
    /// the extension.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let from_mime = content_type.and_then(|ct| {
            let essence = ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase();
            match essence.as_str() {
                PDF_MIME => Some(Self::Pdf),
                DOCX_MIME => Some(Self::Docx),
                "text/plain" => Some(Self::PlainText),
                _ => None,
            }
        });
        from_mime.or_else(|| {
            let ext = file_name?.rsplit_once('.')?.1.to_ascii_lowercase();
            match ext.as_str() {
                "pdf" => Some(Self::Pdf),
                "docx" => Some(Self::Docx),
                "txt" => Some(Self::PlainText),
                _ => None,
            }
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::PlainText => "text",
        }
    }
}

/// Extracts and normalizes the text of a document.
///
/// PDF and DOCX parsing is CPU-bound and runs on the blocking pool.
pub async fn extract_text(kind: DocumentKind, bytes: Vec<u8>) -> Result<String, DocumentError> {
    let raw = match kind {
        DocumentKind::PlainText => String::from_utf8_lossy(&bytes).into_owned(),
        DocumentKind::Pdf => tokio::task::spawn_blocking(move || extract_pdf(&bytes)).await??,
        DocumentKind::Docx => tokio::task::spawn_blocking(move || extract_docx(&bytes)).await??,
    };
    let text = normalize_text(&raw);
    debug!(
        kind = kind.as_str(),
        raw_chars = raw.len(),
        chars = text.len(),
        "Document text extracted"
    );
    Ok(text)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, DocumentError> {
    // pdf-extract can panic on malformed PDFs.
    let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(DocumentError::Pdf(e.to_string())),
        Err(_) => Err(DocumentError::Pdf("malformed PDF".to_string())),
    }
}

/// docx-lite reads from a path, so the upload is staged in a temp file that is
/// removed on drop.
fn extract_docx(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut file = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(".docx")
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    docx_lite::extract_text(file.path()).map_err(|e| DocumentError::Docx(e.to_string()))
}

/// Unifies line endings, strips control characters and trailing whitespace,
/// and collapses runs of blank lines to a single blank line.
pub fn normalize_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(unified.len());
    let mut blank_run = 0;

    for line in unified.split('\n') {
        let cleaned: String = line
            .chars()
            .map(|c| if c == '\t' { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();
        let cleaned = cleaned.trim_end();
        if cleaned.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
            out.push('\n');
        } else {
            blank_run = 0;
            out.push_str(cleaned);
            out.push('\n');
        }
    }

    out.trim().to_string()
}
