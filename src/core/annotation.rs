//! The `# kpt-set: ` line comment format.
//!
//! Other tooling recognizes setter-tagged fields by this exact prefix, so it is
//! reproduced byte-for-byte, including the trailing space after the colon.

/// Prefix of every setter annotation comment.
pub const SETTER_COMMENT_PREFIX: &str = "# kpt-set: ";

/// Build the full line comment for a template, e.g. `# kpt-set: ${image}:${tag}`.
pub fn format_annotation(template: &str) -> String {
    format!("{}{}", SETTER_COMMENT_PREFIX, template)
}

/// Build the placeholder token for a setter name, e.g. `${image}`.
pub fn placeholder(name: &str) -> String {
    format!("${{{}}}", name)
}

/// Extract the template from a line comment.
///
/// Returns `None` when the comment is not a setter annotation or the template
/// is blank.
pub fn extract_template(line_comment: &str) -> Option<&str> {
    let template = line_comment.strip_prefix(SETTER_COMMENT_PREFIX)?.trim();
    if template.is_empty() {
        None
    } else {
        Some(template)
    }
}

/// Strip the surrounding `${ }` from a placeholder token and trim whitespace.
///
/// Input that is not wrapped in `${ }` is only trimmed.
pub fn clean_placeholder(token: &str) -> &str {
    let token = token.trim();
    let inner = token.strip_prefix("${").unwrap_or(token);
    let inner = inner.strip_suffix('}').unwrap_or(inner);
    inner.trim()
}
