// Résumé parsing pipeline: upload ingestion → text extraction → field extraction.
// Field extraction is pluggable via `extractor::FieldExtractor`.

pub mod dates;
pub mod extract;
pub mod extractor;
pub mod handlers;
pub mod heuristics;
pub mod ingest;
pub mod models;
pub mod prompts;
pub mod sections;
pub mod vocabulary;
