// Resume rendering core.
// Pure stages (escape, blocks, template) feed the compiler invoker; the pipeline
// sequences them and is the only place with filesystem and process side effects.

pub mod blocks;
pub mod compiler;
pub mod error;
pub mod escape;
pub mod pipeline;
pub mod template;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the API consumed by routes and main.
pub use compiler::{DocumentCompiler, LatexCompiler};
pub use error::RenderError;
pub use pipeline::ResumePipeline;
pub use template::DocumentSource;
