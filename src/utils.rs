// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::AsyncReadExt;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const OCTET_STREAM_MEDIA_TYPE: &str = "application/octet-stream";

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Media type a file picker would declare for a file, judged by its name.
pub fn declared_media_type(filename: &str) -> &'static str {
    match get_file_extension(filename).as_deref() {
        Some("pdf") => PDF_MEDIA_TYPE,
        Some("docx") => DOCX_MEDIA_TYPE,
        Some("doc") => "application/msword",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("rtf") => "application/rtf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => OCTET_STREAM_MEDIA_TYPE,
    }
}

/// Make sure an uploaded file name carries an extension matching its type.
pub fn upload_file_name(raw_name: Option<&str>, media_type: &str) -> String {
    let base = raw_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("resume");

    if media_type == PDF_MEDIA_TYPE && get_file_extension(base).as_deref() != Some("pdf") {
        format!("{}.pdf", base)
    } else {
        base.to_string()
    }
}

/// Read file content as string with proper error context
pub async fn read_file_content(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Read file bytes with proper error context
pub async fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Read text from a path, `-` meaning stdin.
pub async fn read_text_source(source: &Path) -> Result<String> {
    if source.as_os_str() == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read job description from stdin")?;
        Ok(text)
    } else {
        read_file_content(source).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("resume.pdf"), Some("pdf".to_string()));
        assert_eq!(
            get_file_extension("document.DOCX"),
            Some("docx".to_string())
        );
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_declared_media_type() {
        assert_eq!(declared_media_type("cv.pdf"), PDF_MEDIA_TYPE);
        assert_eq!(declared_media_type("CV.PDF"), PDF_MEDIA_TYPE);
        assert_eq!(declared_media_type("cv.docx"), DOCX_MEDIA_TYPE);
        assert_eq!(declared_media_type("notes.txt"), "text/plain");
        assert_eq!(declared_media_type("resume"), OCTET_STREAM_MEDIA_TYPE);
    }

    #[test]
    fn test_upload_file_name() {
        assert_eq!(upload_file_name(Some("cv.pdf"), PDF_MEDIA_TYPE), "cv.pdf");
        assert_eq!(upload_file_name(Some("cv"), PDF_MEDIA_TYPE), "cv.pdf");
        assert_eq!(upload_file_name(None, PDF_MEDIA_TYPE), "resume.pdf");
        assert_eq!(upload_file_name(Some("  "), "text/plain"), "resume");
        assert_eq!(upload_file_name(Some("notes.txt"), "text/plain"), "notes.txt");
    }

    #[tokio::test]
    async fn test_read_file_bytes_missing() {
        let err = read_file_bytes(Path::new("/definitely/not/here.pdf"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
