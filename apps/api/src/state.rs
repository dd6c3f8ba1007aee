use std::sync::Arc;

use crate::config::Config;
use crate::jsearch::JSearchClient;
use crate::resume::extractor::FieldExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub jsearch: JSearchClient,
    /// Pluggable résumé field extractor. Heuristic unless ANTHROPIC_API_KEY is set.
    pub extractor: Arc<dyn FieldExtractor>,
}
