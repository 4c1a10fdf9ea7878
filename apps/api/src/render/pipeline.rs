//! Pipeline Orchestrator: template → render → compile → PDF bytes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::ResumeInput;
use crate::render::template::{load_template, missing_placeholders, render};
use crate::render::{DocumentCompiler, RenderError};

/// Generates resume PDFs. Holds no per-request state, so one instance is shared
/// across all concurrent requests.
#[derive(Clone)]
pub struct ResumePipeline {
    template_path: PathBuf,
    compiler: Arc<dyn DocumentCompiler>,
}

impl ResumePipeline {
    pub fn new(template_path: impl Into<PathBuf>, compiler: Arc<dyn DocumentCompiler>) -> Self {
        Self {
            template_path: template_path.into(),
            compiler,
        }
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Startup probe: confirms the template is readable and warns about any
    /// placeholder it does not reference.
    pub async fn check_template(&self) -> Result<(), RenderError> {
        let template = load_template(&self.template_path).await?;
        let missing = missing_placeholders(&template);
        if !missing.is_empty() {
            warn!(
                template = %self.template_path.display(),
                "Template does not reference placeholders: {}",
                missing.join(", ")
            );
        }
        Ok(())
    }

    /// Runs the full pipeline for one resume. The template is re-read on every
    /// call; any stage failure is returned as-is and nothing is retried.
    pub async fn generate(&self, input: &ResumeInput) -> Result<Vec<u8>, RenderError> {
        let template = load_template(&self.template_path).await?;

        let source = render(&template, input);
        debug!(bytes = source.as_str().len(), "Rendered document source");

        let pdf = self.compiler.compile(&source).await?;
        info!(bytes = pdf.len(), "Resume PDF generated");
        Ok(pdf)
    }
}
