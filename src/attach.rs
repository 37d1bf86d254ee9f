//! Resume attachment intake: PDF-only, stored fully inline.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use base64::Engine;

use crate::schema::ResumeFile;

pub const PDF_MIME: &str = "application/pdf";

/// Read a resume PDF and encode it as a self-contained data URI.
///
/// Anything that is not a PDF (by extension or leading magic bytes) is
/// rejected; the caller reports it and leaves state unchanged.
pub fn read_resume(path: &Path) -> Result<ResumeFile> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("resume path has no file name")?
        .to_string();

    if !name.to_lowercase().ends_with(".pdf") {
        bail!("only PDF files are allowed: {name}");
    }

    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if !data.starts_with(b"%PDF-") {
        bail!("{name} does not look like a PDF");
    }

    let b64 = base64::engine::general_purpose::STANDARD.encode(&data);
    Ok(ResumeFile {
        name,
        data: format!("data:{PDF_MIME};base64,{b64}"),
        mime_type: PDF_MIME.to_string(),
    })
}
