/// Trim surrounding whitespace. The csv reader has already removed any field quoting.
pub fn clean_str(raw: &str) -> String {
    raw.trim().to_string()
}

/// `clean_str`, with blank cells collapsed to `None`.
pub fn clean_field(raw: Option<String>) -> Option<String> {
    raw.map(|s| clean_str(&s)).filter(|s| !s.is_empty())
}
