//! Field extraction behind a pluggable trait.
//!
//! Default: `HeuristicExtractor` (pure-Rust, deterministic, fully testable).
//! With `ANTHROPIC_API_KEY` set: `LlmExtractor`, which falls back to the
//! heuristics whenever the model call fails.
//!
//! `AppState` holds an `Arc<dyn FieldExtractor>`, chosen at startup.

use async_trait::async_trait;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::resume::heuristics::{extract_fields, MAX_RECOMMENDED_ROLES};
use crate::resume::models::{push_unique, ResumeData};
use crate::resume::prompts::{RESUME_PARSE_PROMPT, RESUME_PARSE_SYSTEM};

/// Longest résumé text sent to the model, in characters.
const MAX_PROMPT_CHARS: usize = 30_000;

#[async_trait]
pub trait FieldExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<ResumeData, AppError>;

    /// Short name reported in logs.
    fn backend(&self) -> &'static str;
}

pub struct HeuristicExtractor;

#[async_trait]
impl FieldExtractor for HeuristicExtractor {
    async fn extract(&self, text: &str) -> Result<ResumeData, AppError> {
        Ok(extract_fields(text))
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

pub struct LlmExtractor(pub LlmClient);

#[async_trait]
impl FieldExtractor for LlmExtractor {
    async fn extract(&self, text: &str) -> Result<ResumeData, AppError> {
        let prompt = RESUME_PARSE_PROMPT.replace("{resume_text}", truncate_chars(text, MAX_PROMPT_CHARS));

        match self.0.complete_json::<ResumeData>(&prompt, RESUME_PARSE_SYSTEM).await {
            Ok(data) => Ok(tidy_model_output(data)),
            Err(e) => {
                warn!("LLM résumé extraction failed, using heuristics: {e}");
                Ok(extract_fields(text))
            }
        }
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Restores the invariants the model is not trusted to keep: `skills` is the
/// deduplicated union of the two skill lists, and roles are unique and capped.
fn tidy_model_output(mut data: ResumeData) -> ResumeData {
    if data.technical_skills.is_empty() && data.soft_skills.is_empty() {
        let skills = std::mem::take(&mut data.skills);
        for skill in &skills {
            push_unique(&mut data.skills, skill);
        }
    } else {
        data.merge_skills();
    }

    let roles = std::mem::take(&mut data.recommended_job_roles);
    for role in &roles {
        push_unique(&mut data.recommended_job_roles, role);
    }
    data.recommended_job_roles.truncate(MAX_RECOMMENDED_ROLES);
    data
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
