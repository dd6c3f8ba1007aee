//! Text extraction. Turns an uploaded document into normalised plain text.
//!
//! PDF and DOCX decoding are CPU-bound and run inside `spawn_blocking`.

use std::io::{Cursor, Read};

use thiserror::Error;
use tracing::debug;

use crate::resume::ingest::{DocumentFormat, UploadedDocument};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("could not read DOCX: {0}")]
    Docx(String),

    #[error("document contains no extractable text")]
    EmptyText,

    #[error("extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Extracts and normalises the text of an uploaded document.
pub async fn extract_text(document: &UploadedDocument) -> Result<String, ExtractError> {
    let bytes = document.bytes.clone();
    let raw = match document.format {
        DocumentFormat::PlainText => decode_plain_text(&bytes),
        DocumentFormat::Pdf => {
            match tokio::task::spawn_blocking(move || extract_pdf(&bytes)).await {
                Ok(result) => result?,
                // pdf-extract panics on some malformed files
                Err(e) if e.is_panic() => {
                    return Err(ExtractError::Pdf("the PDF parser rejected the file".into()))
                }
                Err(e) => return Err(ExtractError::Task(e)),
            }
        }
        DocumentFormat::Docx => tokio::task::spawn_blocking(move || extract_docx(&bytes)).await??,
    };

    let text = normalize_text(&raw);
    debug!(
        "Extracted {} chars from '{}' ({:?})",
        text.len(),
        document.file_name,
        document.format
    );

    if text.is_empty() {
        return Err(ExtractError::EmptyText);
    }
    Ok(text)
}

fn decode_plain_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Largest `word/document.xml` we are willing to inflate.
const MAX_DOCUMENT_XML_BYTES: u64 = 32 * 1024 * 1024;

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let xml = read_document_xml(bytes, MAX_DOCUMENT_XML_BYTES)?;
    Ok(document_xml_to_text(&xml))
}

fn read_document_xml(bytes: &[u8], max_bytes: u64) -> Result<String, ExtractError> {
    let too_large = || ExtractError::Docx(format!("word/document.xml exceeds {max_bytes} bytes"));

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractError::Docx("missing word/document.xml".into()))?;
    if entry.size() > max_bytes {
        return Err(too_large());
    }

    // the declared size can lie, so the read is capped as well
    let mut xml = String::new();
    entry
        .take(max_bytes + 1)
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    if xml.len() as u64 > max_bytes {
        return Err(too_large());
    }
    Ok(xml)
}

/// Collects the text runs of a WordprocessingML body.
///
/// `<w:t>` content is kept, `</w:p>` and in-run `<w:br/>` become newlines and
/// in-run `<w:tab/>` becomes a tab. Everything else is markup and is dropped.
pub fn document_xml_to_text(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len() / 4);
    let mut in_run = false;
    let mut in_text_run = false;
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        if in_text_run {
            out.push_str(&decode_entities(&rest[..open]));
        }
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        let tag = &rest[open + 1..open + close];
        rest = &rest[open + close + 1..];

        let self_closing = tag.ends_with('/');
        let name = tag
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or_default();

        match name {
            "w:t" if tag.starts_with('/') => in_text_run = false,
            "w:t" => in_text_run = !self_closing,
            "w:r" => in_run = !tag.starts_with('/') && !self_closing,
            "w:p" if tag.starts_with('/') => out.push('\n'),
            "w:br" | "w:cr" if in_run => out.push('\n'),
            "w:tab" if in_run => out.push('\t'),
            _ => {}
        }
    }

    out
}

/// Decodes the five predefined XML entities and numeric character references.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        let decoded = after.find(';').and_then(|semi| {
            let entity = &after[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Normalises line endings, trims trailing whitespace per line and collapses
/// runs of blank lines into one.
pub fn normalize_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = true;

    for line in unified.lines() {
        let line = line.trim_end();
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        lines.push(if blank { "" } else { line });
        previous_blank = blank;
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines
        .iter()
        .map(|l| l.replace('\u{a0}', " "))
        .collect::<Vec<_>>()
        .join("\n")
}
