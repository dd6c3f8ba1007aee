//! Upload ingestion: pulls the `file` field out of a multipart body and
//! decides which extractor can read it.

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub content_type: String,
    pub format: DocumentFormat,
    pub bytes: Bytes,
}

const PDF_MAGIC: &[u8] = b"%PDF";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
// Old Word binary format (OLE compound file).
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Reads the multipart stream and returns the uploaded `file` field.
/// Other fields are skipped.
pub async fn read_upload(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<UploadedDocument, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e.status().as_u16(), e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e.status().as_u16(), e.body_text()))?;

        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        if bytes.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File is {} bytes; the limit is {max_bytes} bytes",
                bytes.len()
            )));
        }

        let format = detect_format(&bytes, &content_type, &file_name)?;

        return Ok(UploadedDocument {
            file_name,
            content_type,
            format,
            bytes,
        });
    }

    Err(AppError::Validation(
        "Missing multipart field 'file'".to_string(),
    ))
}

fn multipart_error(status: u16, message: String) -> AppError {
    if status == 413 {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(format!("Failed to read multipart body: {message}"))
    }
}

/// Detects the document format from magic bytes, then the declared MIME type,
/// then the file extension.
pub fn detect_format(
    bytes: &[u8],
    content_type: &str,
    file_name: &str,
) -> Result<DocumentFormat, AppError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if bytes.starts_with(OLE_MAGIC) || extension == "doc" || mime == "application/msword" {
        return Err(AppError::UnsupportedMedia(
            "Legacy .doc files are not supported; upload a PDF or DOCX".to_string(),
        ));
    }

    if bytes.starts_with(PDF_MAGIC) {
        return Ok(DocumentFormat::Pdf);
    }
    if bytes.starts_with(ZIP_MAGIC) {
        return Ok(DocumentFormat::Docx);
    }

    match (mime.as_str(), extension.as_str()) {
        ("application/pdf", _) | (_, "pdf") => Ok(DocumentFormat::Pdf),
        (DOCX_MIME, _) | (_, "docx") => Ok(DocumentFormat::Docx),
        ("text/plain" | "text/markdown", _) | (_, "txt" | "md" | "text") => {
            Ok(DocumentFormat::PlainText)
        }
        _ => Err(AppError::UnsupportedMedia(format!(
            "Unsupported file '{file_name}' ({content_type}). Supported formats: PDF, DOCX, TXT"
        ))),
    }
}
