use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Contact block and free-text summary shown in the resume header.
/// Every field is optional; absent values render as empty text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub title: Option<String>,
    pub institution: Option<String>,
    pub period: Option<String>,
    /// Rendered as a single bullet.
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub employer: Option<String>,
    pub period: Option<String>,
    /// One bullet per line, in order.
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectExperienceEntry {
    pub title: Option<String>,
    pub technologies: Option<String>,
    /// Repository link. A blank link is treated as absent.
    pub link: Option<String>,
    pub description: Vec<String>,
}

impl ProjectExperienceEntry {
    /// Returns the link only when it carries non-whitespace content.
    pub fn visible_link(&self) -> Option<&str> {
        self.link.as_deref().filter(|l| !l.trim().is_empty())
    }
}

/// The structured resume as submitted in the `data` part of a generate request.
///
/// List order is significant: sections render entries in exactly this order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeContent {
    pub personal_info: PersonalInfo,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectExperienceEntry>,
}

/// Everything the render pipeline needs: validated content plus the path of a
/// photo that has already been persisted by the transport layer.
#[derive(Debug, Clone)]
pub struct ResumeInput {
    pub content: ResumeContent,
    pub photo_path: PathBuf,
}

impl ResumeInput {
    pub fn new(content: ResumeContent, photo_path: impl Into<PathBuf>) -> Self {
        Self {
            content,
            photo_path: photo_path.into(),
        }
    }
}
