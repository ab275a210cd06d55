//! Escaping for text embedded in LaTeX documents.

fn escaped(ch: char) -> Option<&'static str> {
    Some(match ch {
        '\\' => r"\textbackslash{}",
        '{' => r"\{",
        '}' => r"\}",
        '$' => r"\$",
        '&' => r"\&",
        '#' => r"\#",
        '^' => r"\textasciicircum{}",
        '_' => r"\_",
        '%' => r"\%",
        '~' => r"\textasciitilde{}",
        _ => return None,
    })
}

/// Returns true if `text` contains a character LaTeX treats specially.
pub fn needs_escape(text: &str) -> bool {
    text.chars().any(|ch| escaped(ch).is_some())
}

/// Escapes every LaTeX special character in `text`.
pub fn escape(text: &str) -> String {
    if !needs_escape(text) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match escaped(ch) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
    out
}
