use std::sync::Arc;

use crate::config::Config;
use crate::render::ResumePipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Template + compiler. Stateless per request, so one instance serves all callers.
    pub pipeline: Arc<ResumePipeline>,
}
