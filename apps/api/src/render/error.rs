use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single resume render. Every stage of the pipeline reports
/// through this type; nothing is retried.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The bundled template could not be read. Configuration defect.
    #[error("template not found at {path}: {source}")]
    TemplateMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compiler exited non-zero. Its diagnostics went to the service's own
    /// stdout/stderr; `work_dir` is gone by the time the caller sees this.
    #[error("LaTeX compilation failed (exit code {exit_code:?}). Check logs in {work_dir}")]
    CompilationFailed {
        work_dir: PathBuf,
        exit_code: Option<i32>,
    },

    #[error("LaTeX compilation in {work_dir} timed out after {seconds}s")]
    CompilationTimedOut { work_dir: PathBuf, seconds: u64 },

    /// The compiler reported success but did not leave the expected artifact.
    #[error("compiler exited successfully but produced no output at {path}")]
    OutputMissing { path: PathBuf },

    #[error("I/O failure while {action}: {source}")]
    Io {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    pub(crate) fn io(action: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| RenderError::Io { action, source }
    }

    /// Stable machine-readable tag, used for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::TemplateMissing { .. } => "template_missing",
            RenderError::CompilationFailed { .. } => "compilation_failed",
            RenderError::CompilationTimedOut { .. } => "compilation_timed_out",
            RenderError::OutputMissing { .. } => "output_missing",
            RenderError::Io { .. } => "io_failure",
        }
    }
}
