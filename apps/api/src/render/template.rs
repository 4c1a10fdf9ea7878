//! Fills the fixed LaTeX template with resume data.
//!
//! The template is split once into literal text and `\VAR{name}` markers.
//! Substitution then runs in two passes over that segment list: scalars first,
//! then section blocks. A marker that has been replaced becomes rendered text and
//! is never inspected again, so user data can never introduce new markers.
//! Markers with unknown names are written back unchanged.

use std::path::Path;

use crate::models::{ResumeContent, ResumeInput};
use crate::render::blocks::{render_education, render_experience, render_projects, render_skills};
use crate::render::error::RenderError;
use crate::render::escape::escape;

const MARKER_OPEN: &str = r"\VAR{";
const MARKER_CLOSE: char = '}';

pub const SCALAR_PLACEHOLDERS: [&str; 7] = [
    "name",
    "title",
    "photo_path",
    "phone",
    "email",
    "address",
    "summary",
];

pub const BLOCK_PLACEHOLDERS: [&str; 4] = [
    "skills_block",
    "education_block",
    "experience_block",
    "projects_block",
];

type BlockGenerator = fn(&ResumeContent) -> String;

/// Fully rendered LaTeX handed to the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource(String);

impl DocumentSource {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocumentSource {
    fn from(source: String) -> Self {
        Self(source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'t> {
    Literal(&'t str),
    /// `raw` is the full marker text, kept so unknown markers can be emitted verbatim.
    Placeholder { name: &'t str, raw: &'t str },
    Rendered(String),
}

/// Reads the template asset. Any read failure is reported as `TemplateMissing`.
pub async fn load_template(path: &Path) -> Result<String, RenderError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RenderError::TemplateMissing {
            path: path.to_path_buf(),
            source,
        })
}

/// Names of known placeholders that `template` never mentions.
pub fn missing_placeholders(template: &str) -> Vec<&'static str> {
    let present: Vec<&str> = parse_segments(template)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder { name, .. } => Some(name),
            _ => None,
        })
        .collect();

    SCALAR_PLACEHOLDERS
        .iter()
        .chain(BLOCK_PLACEHOLDERS.iter())
        .copied()
        .filter(|name| !present.contains(name))
        .collect()
}

/// Renders `template` for `input`. Pure and deterministic.
pub fn render(template: &str, input: &ResumeInput) -> DocumentSource {
    let mut segments = parse_segments(template);

    let scalars = scalar_values(input);
    substitute(&mut segments, |name| {
        scalars
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.clone())
    });

    let blocks = block_generators();
    substitute(&mut segments, |name| {
        blocks
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, generate)| generate(&input.content))
    });

    let mut out = String::with_capacity(template.len());
    for segment in &segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder { raw, .. } => out.push_str(raw),
            Segment::Rendered(text) => out.push_str(text),
        }
    }
    DocumentSource(out)
}

fn scalar_values(input: &ResumeInput) -> [(&'static str, String); 7] {
    let info = &input.content.personal_info;
    let photo_path = input.photo_path.to_string_lossy();
    [
        ("name", escape(info.name.as_deref())),
        ("title", escape(info.title.as_deref())),
        ("photo_path", escape(Some(&*photo_path))),
        ("phone", escape(info.phone.as_deref())),
        ("email", escape(info.email.as_deref())),
        ("address", escape(info.address.as_deref())),
        ("summary", escape(info.summary.as_deref())),
    ]
}

fn block_generators() -> [(&'static str, BlockGenerator); 4] {
    [
        ("skills_block", skills_block),
        ("education_block", education_block),
        ("experience_block", experience_block),
        ("projects_block", projects_block),
    ]
}

fn skills_block(content: &ResumeContent) -> String {
    render_skills(&content.skills)
}

fn education_block(content: &ResumeContent) -> String {
    render_education(&content.education)
}

fn experience_block(content: &ResumeContent) -> String {
    render_experience(&content.experience)
}

fn projects_block(content: &ResumeContent) -> String {
    render_projects(&content.projects)
}

/// Replaces every still-unresolved placeholder for which `lookup` yields a value.
fn substitute<F>(segments: &mut [Segment<'_>], lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for segment in segments.iter_mut() {
        let Segment::Placeholder { name, .. } = *segment else {
            continue;
        };
        if let Some(value) = lookup(name) {
            *segment = Segment::Rendered(value);
        }
    }
}

fn parse_segments(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find(MARKER_OPEN) {
        let after_open = &rest[start + MARKER_OPEN.len()..];
        let Some(close) = after_open.find(MARKER_CLOSE) else {
            break;
        };

        if start > 0 {
            segments.push(Segment::Literal(&rest[..start]));
        }
        let end = start + MARKER_OPEN.len() + close + MARKER_CLOSE.len_utf8();
        segments.push(Segment::Placeholder {
            name: &after_open[..close],
            raw: &rest[start..end],
        });
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    segments
}
