use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports service version and whether the resume template is readable.
/// Always 200; `status` is `degraded` when the template cannot be read.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let template_ok = tokio::fs::metadata(state.pipeline.template_path())
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    let status = if template_ok { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-api",
        "template": template_ok,
        "compiler": state.config.latex_compiler,
    }))
}
