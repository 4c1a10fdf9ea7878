//! Compiler Invoker: turns a `DocumentSource` into PDF bytes by running an
//! external LaTeX compiler inside a private working directory.
//!
//! # Working directory lifecycle
//! Every call gets a fresh `resume-XXXXXX` directory under the configured root.
//! It is held by a [`WorkingDirectory`] guard, so it is removed on every exit
//! path: success, non-zero exit, timeout, or an I/O error half way through.
//! Removal failures are logged and never replace the call's own outcome.
//!
//! # Process
//! The compiler inherits the service's stdout/stderr so its diagnostics reach the
//! operator's log stream. Nothing is parsed from them. The child is awaited via
//! `tokio::process`, and with a timeout configured it is killed and reaped on
//! expiry.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::render::{DocumentSource, RenderError};

/// Name of the single input file written into the working directory.
pub const SOURCE_FILE_NAME: &str = "resume.tex";
/// Artifact the compiler derives from `SOURCE_FILE_NAME`.
pub const OUTPUT_FILE_NAME: &str = "resume.pdf";

const WORK_DIR_PREFIX: &str = "resume-";

/// Pluggable document compiler. Default: `LatexCompiler`.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    async fn compile(&self, source: &DocumentSource) -> Result<Vec<u8>, RenderError>;
}

/// Runs a pdflatex-compatible binary:
/// `<program> -interaction=nonstopmode -output-directory=<dir> <dir>/resume.tex`.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: PathBuf,
    work_root: PathBuf,
    timeout: Option<Duration>,
}

impl LatexCompiler {
    pub fn new(program: impl Into<PathBuf>, work_root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            work_root: work_root.into(),
            timeout: None,
        }
    }

    /// `None` waits for the compiler indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, work_dir: &Path, source_path: &Path) -> Result<ExitStatus, RenderError> {
        let mut output_dir_arg = OsString::from("-output-directory=");
        output_dir_arg.push(work_dir);

        let mut child = Command::new(&self.program)
            .arg("-interaction=nonstopmode")
            .arg(output_dir_arg)
            .arg(source_path)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(RenderError::io("spawning compiler"))?;

        let Some(limit) = self.timeout else {
            return child
                .wait()
                .await
                .map_err(RenderError::io("waiting for compiler"));
        };

        match tokio::time::timeout(limit, child.wait()).await {
            Ok(status) => status.map_err(RenderError::io("waiting for compiler")),
            Err(_) => {
                warn!(
                    work_dir = %work_dir.display(),
                    timeout_secs = limit.as_secs_f64(),
                    "Compiler timed out, killing child process"
                );
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill timed-out compiler: {e}");
                }
                Err(RenderError::CompilationTimedOut {
                    work_dir: work_dir.to_path_buf(),
                    seconds: limit.as_secs(),
                })
            }
        }
    }
}

#[async_trait]
impl DocumentCompiler for LatexCompiler {
    async fn compile(&self, source: &DocumentSource) -> Result<Vec<u8>, RenderError> {
        let work_dir = WorkingDirectory::create(&self.work_root)?;

        let source_path = work_dir.path().join(SOURCE_FILE_NAME);
        tokio::fs::write(&source_path, source.as_str())
            .await
            .map_err(RenderError::io("writing document source"))?;

        let status = self.run(work_dir.path(), &source_path).await?;
        if !status.success() {
            warn!(
                work_dir = %work_dir.path().display(),
                exit_code = ?status.code(),
                "LaTeX compilation failed"
            );
            return Err(RenderError::CompilationFailed {
                work_dir: work_dir.path().to_path_buf(),
                exit_code: status.code(),
            });
        }

        let output_path = work_dir.path().join(OUTPUT_FILE_NAME);
        match tokio::fs::read(&output_path).await {
            Ok(pdf) => {
                info!(bytes = pdf.len(), "LaTeX compilation succeeded");
                Ok(pdf)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(RenderError::OutputMissing { path: output_path })
            }
            Err(e) => Err(RenderError::Io {
                action: "reading compiled output",
                source: e,
            }),
        }
    }
}

/// Exclusively owned scratch directory for one compile call.
/// Dropping it deletes the whole tree.
struct WorkingDirectory {
    dir: Option<TempDir>,
}

impl WorkingDirectory {
    fn create(root: &Path) -> Result<Self, RenderError> {
        let dir = tempfile::Builder::new()
            .prefix(WORK_DIR_PREFIX)
            .tempdir_in(root)
            .map_err(RenderError::io("creating working directory"))?;
        debug!(work_dir = %dir.path().display(), "Created working directory");
        Ok(Self { dir: Some(dir) })
    }

    fn path(&self) -> &Path {
        match &self.dir {
            Some(dir) => dir.path(),
            None => Path::new(""),
        }
    }
}

impl Drop for WorkingDirectory {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        let path = dir.path().to_path_buf();
        match dir.close() {
            Ok(()) => debug!(work_dir = %path.display(), "Removed working directory"),
            Err(e) => warn!(
                work_dir = %path.display(),
                "Failed to clean up working directory: {e}"
            ),
        }
    }
}
