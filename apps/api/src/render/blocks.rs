//! Section renderers: turn ordered lists of resume entries into LaTeX fragments.
//!
//! Every user-supplied field is escaped on its own before it is placed into a
//! skeleton. Assembled fragments are never escaped. Entries render in input
//! order and an empty list renders as an empty string.

use crate::models::{EducationEntry, ExperienceEntry, ProjectExperienceEntry};
use crate::render::escape::escape;

/// Anchor text of the trailing repository bullet on project entries.
pub const PROJECT_LINK_TEXT: &str = "Project on GitHub";

/// One `\skill{..}` per skill, newline separated.
pub fn render_skills(skills: &[String]) -> String {
    skills
        .iter()
        .map(|skill| format!(r"\skill{{{}}}", escape(Some(skill.as_str()))))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_education(entries: &[EducationEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        push_heading(&mut out, entry.title.as_deref(), entry.period.as_deref());
        out.push_str(&format!(
            "\\textit{{{}}}\\\\[2mm]\n",
            escape(entry.institution.as_deref())
        ));
        out.push_str("\\begin{itemize}\n");
        push_item(&mut out, entry.description.as_deref());
        push_list_end(&mut out);
    }
    out
}

pub fn render_experience(entries: &[ExperienceEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        push_heading(&mut out, entry.title.as_deref(), entry.period.as_deref());
        out.push_str(&format!(
            "\\textit{{{}}}\\\\[2mm]\n",
            escape(entry.employer.as_deref())
        ));
        out.push_str("\\begin{itemize}\n");
        for line in &entry.description {
            push_item(&mut out, Some(line.as_str()));
        }
        push_list_end(&mut out);
    }
    out
}

/// Projects have no period; the heading keeps the `\hfill` so titles align
/// with the other sections. A link bullet is appended only for a non-blank link.
pub fn render_projects(entries: &[ProjectExperienceEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        push_heading(&mut out, entry.title.as_deref(), None);
        out.push_str(&format!(
            "\\textit{{\\textcolor{{graytext}}{{Technologies: {}}}}}\\\\[2mm]\n",
            escape(entry.technologies.as_deref())
        ));
        out.push_str("\\begin{itemize}\n");
        for line in &entry.description {
            push_item(&mut out, Some(line.as_str()));
        }
        if let Some(link) = entry.visible_link() {
            out.push_str(&format!(
                "    \\item \\faGithub\\ \\href{{{}}}{{{}}}\n",
                escape(Some(link)),
                PROJECT_LINK_TEXT
            ));
        }
        push_list_end(&mut out);
    }
    out
}

fn push_heading(out: &mut String, title: Option<&str>, period: Option<&str>) {
    out.push_str(&format!(
        "\\textbf{{\\textcolor{{graytext}}{{{}}}}}\\hfill {}\\\\\n",
        escape(title),
        escape(period)
    ));
}

fn push_item(out: &mut String, text: Option<&str>) {
    out.push_str(&format!(
        "    \\item \\textcolor{{graytext}}{{{}}}\n",
        escape(text)
    ));
}

fn push_list_end(out: &mut String) {
    out.push_str("\\end{itemize}\n");
    out.push_str("\\vspace{4mm}\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(title: &str, link: Option<&str>) -> ProjectExperienceEntry {
        ProjectExperienceEntry {
            title: Some(title.to_string()),
            technologies: Some("Rust, Axum".to_string()),
            link: link.map(str::to_string),
            description: vec!["Wrote the parser".to_string()],
        }
    }

    fn experience(title: &str, lines: &[&str]) -> ExperienceEntry {
        ExperienceEntry {
            title: Some(title.to_string()),
            employer: Some("ACME".to_string()),
            period: Some("2020 - 2023".to_string()),
            description: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_lists_render_empty() {
        assert_eq!(render_skills(&[]), "");
        assert_eq!(render_education(&[]), "");
        assert_eq!(render_experience(&[]), "");
        assert_eq!(render_projects(&[]), "");
    }

    #[test]
    fn test_skills_joined_by_newline_and_escaped() {
        let skills = vec!["C#".to_string(), "Rust".to_string()];
        assert_eq!(render_skills(&skills), "\\skill{C\\#}\n\\skill{Rust}");
    }

    #[test]
    fn test_education_skeleton() {
        let entry = EducationEntry {
            title: Some("B.Sc. Computer Science".to_string()),
            institution: Some("TH Ingolstadt".to_string()),
            period: Some("2018 - 2021".to_string()),
            description: Some("Thesis on 100% safe parsing".to_string()),
        };

        let expected = "\\textbf{\\textcolor{graytext}{B.Sc. Computer Science}}\\hfill 2018 - 2021\\\\\n\
                        \\textit{TH Ingolstadt}\\\\[2mm]\n\
                        \\begin{itemize}\n    \\item \\textcolor{graytext}{Thesis on 100\\% safe parsing}\n\
                        \\end{itemize}\n\\vspace{4mm}\n\n";
        assert_eq!(render_education(&[entry]), expected);
    }

    #[test]
    fn test_education_missing_fields_render_empty() {
        let out = render_education(&[EducationEntry::default()]);
        assert!(out.contains("\\textbf{\\textcolor{graytext}{}}\\hfill \\\\\n"));
        assert!(out.contains("\\item \\textcolor{graytext}{}\n"));
    }

    #[test]
    fn test_experience_one_bullet_per_line() {
        let out = render_experience(&[experience("Engineer", &["Built X", "Led Y & Z"])]);

        let bullets: Vec<&str> = out.lines().filter(|l| l.contains("\\item")).collect();
        assert_eq!(bullets.len(), 2);
        assert!(bullets[0].contains("Built X"));
        assert!(bullets[1].contains("Led Y \\& Z"));
        assert!(!bullets[1].contains(" & "));
    }

    #[test]
    fn test_experience_without_description_has_empty_list_body() {
        let out = render_experience(&[experience("Engineer", &[])]);
        assert!(out.contains("\\begin{itemize}\n\\end{itemize}\n"));
        assert!(!out.contains("\\item"));
    }

    #[test]
    fn test_project_link_bullet_only_for_non_blank_link() {
        for link in [None, Some(""), Some("   ")] {
            let out = render_projects(&[project("Tool", link)]);
            assert!(!out.contains("\\href"), "unexpected link bullet for {link:?}");
            assert!(!out.contains("\\faGithub"));
            assert_eq!(out.matches("\\item").count(), 1);
        }

        let out = render_projects(&[project("Tool", Some("https://x"))]);
        assert_eq!(out.matches("\\href").count(), 1);
        assert!(out.contains("\\href{https://x}{Project on GitHub}"));

        let items: Vec<&str> = out.lines().filter(|l| l.contains("\\item")).collect();
        assert_eq!(items.len(), 2);
        assert!(items[1].contains("\\faGithub\\ \\href{https://x}"));
    }

    #[test]
    fn test_project_technologies_line() {
        let out = render_projects(&[project("Tool", None)]);
        assert!(out.starts_with("\\textbf{\\textcolor{graytext}{Tool}}\\hfill \\\\\n"));
        assert!(out.contains("\\textit{\\textcolor{graytext}{Technologies: Rust, Axum}}\\\\[2mm]\n"));
    }

    #[test]
    fn test_render_order_matches_input_order() {
        let skills = vec!["Zig".to_string(), "Ada".to_string(), "Go".to_string()];
        let out = render_skills(&skills);
        assert!(out.find("Zig").unwrap() < out.find("Ada").unwrap());
        assert!(out.find("Ada").unwrap() < out.find("Go").unwrap());

        let out = render_experience(&[experience("Second", &[]), experience("First", &[])]);
        assert!(out.find("Second").unwrap() < out.find("First").unwrap());

        let out = render_projects(&[project("Beta", None), project("Alpha", None)]);
        assert!(out.find("Beta").unwrap() < out.find("Alpha").unwrap());

        let edu = |t: &str| EducationEntry {
            title: Some(t.to_string()),
            ..Default::default()
        };
        let out = render_education(&[edu("Master"), edu("Bachelor")]);
        assert!(out.find("Master").unwrap() < out.find("Bachelor").unwrap());
    }

    #[test]
    fn test_renderers_are_deterministic() {
        let entries = vec![experience("Engineer", &["a_b", "c^d"])];
        assert_eq!(render_experience(&entries), render_experience(&entries));
    }
}
