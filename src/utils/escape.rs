//! Escaping of plain text for LaTeX cell bodies

/// Escape special LaTeX characters in text
pub fn escape_latex_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => result.push_str("\\textbackslash{}"),
            '~' => result.push_str("\\textasciitilde{}"),
            '^' => result.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                result.push('\\');
                result.push(ch);
            }
            _ => result.push(ch),
        }
    }
    result
}

/// Whether `text` holds an `&` not preceded by a backslash
pub fn has_unescaped_ampersand(text: &str) -> bool {
    let mut escaped = false;
    for ch in text.chars() {
        match ch {
            '\\' => escaped = !escaped,
            '&' if !escaped => return true,
            _ => escaped = false,
        }
    }
    false
}
