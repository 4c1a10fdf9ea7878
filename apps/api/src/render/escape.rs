//! LaTeX text escaping.
//!
//! The input is scanned exactly once and each special character is mapped to
//! its literal-producing sequence. Output is never rescanned, so the
//! backslashes introduced by one substitution cannot be escaped again.

/// Escapes `text` for use as literal LaTeX text. Absent input yields `""`.
pub fn escape(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            other => out.push(other),
        }
    }
    out
}
