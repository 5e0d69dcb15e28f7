//! Template compiler: solve `${name}` placeholders against a concrete value.
//!
//! A template such as `my-app-layer.${stage}.${domain}` is escaped into a
//! literal-matching pattern, each escaped placeholder is replaced by a lazy
//! capture group, and the result is matched against the whole value:
//!
//! ```text
//! template: my-app-layer.${stage}.${domain}
//! escaped:  my\-app\-layer\.\$\{stage\}\.\$\{domain\}
//! pattern:  ^(?s:my\-app\-layer\.(.*?)\.(.*?))$
//! ```
//!
//! Any resolution that is incomplete or ambiguous is rejected instead of
//! guessed. Adjacent placeholders (`${a}${b}`) never resolve, because the lazy
//! first group always captures the empty string.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;

use super::annotation::{clean_placeholder, placeholder};

// Placeholder names may contain anything except `}`.
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").unwrap());

/// Capture group substituted for every placeholder.
const WILDCARD_GROUP: &str = "(.*?)";

/// A parsed setter template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
    /// Raw `${...}` tokens, left to right, duplicates kept.
    placeholders: Vec<String>,
}

impl Template {
    pub fn parse(text: &str) -> Self {
        let placeholders = PLACEHOLDER_REGEX
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        Self {
            text: text.to_string(),
            placeholders,
        }
    }

    /// Raw placeholder tokens in order of occurrence.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Cleaned placeholder names in order of occurrence.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.placeholders.iter().map(|token| clean_placeholder(token))
    }

    /// Whether the template contains the exact token `${name}`.
    pub fn references(&self, name: &str) -> bool {
        self.text.contains(&placeholder(name))
    }

    /// Compile the anchored matcher for this template.
    ///
    /// Placeholder tokens are escaped the same way as the template text, so
    /// names containing regex metacharacters are still found in the escaped
    /// pattern.
    pub fn matcher(&self) -> Option<Regex> {
        let mut pattern = regex::escape(&self.text);
        for token in &self.placeholders {
            pattern = pattern.replace(&regex::escape(token), WILDCARD_GROUP);
        }
        Regex::new(&format!("^(?s:{})$", pattern)).ok()
    }

    /// Solve the placeholders against `value`.
    ///
    /// Returns `None` when the value does not match, when the number of
    /// captured groups differs from the number of placeholders, or when any
    /// placeholder would bind to the empty string.
    pub fn resolve(&self, value: &str) -> Option<BindingSet> {
        let matcher = self.matcher()?;
        let captures = matcher.captures(value)?;
        if captures.len() - 1 != self.placeholders.len() {
            return None;
        }

        let mut bindings = BindingSet::default();
        for (token, group) in self.placeholders.iter().zip(captures.iter().skip(1)) {
            let group = group?;
            if group.as_str().is_empty() {
                return None;
            }
            bindings.insert(clean_placeholder(token), group.as_str());
        }
        Some(bindings)
    }
}

/// Placeholder name to the substring of the value it occupies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSet(BTreeMap<String, String>);

impl BindingSet {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }
}

/// Convenience wrapper: parse `template` and resolve it against `value`.
pub fn resolve(template: &str, value: &str) -> Option<BindingSet> {
    Template::parse(template).resolve(value)
}

#[cfg(test)]
mod tests {
    use crate::core::pattern::*;

    fn bindings(pairs: &[(&str, &str)]) -> BindingSet {
        let mut set = BindingSet::default();
        for (k, v) in pairs {
            set.insert(k, v);
        }
        set
    }

    #[test]
    fn test_placeholders_in_order_with_duplicates() {
        let template = Template::parse("${a}-${b}-${a}");
        assert_eq!(template.placeholders(), &["${a}", "${b}", "${a}"]);
        assert_eq!(template.names().collect::<Vec<_>>(), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_resolve_two_placeholders() {
        let result = resolve("foo-${environment}-bar-${region}-baz", "foo-dev-bar-us-east-1-baz");
        assert_eq!(
            result,
            Some(bindings(&[("environment", "dev"), ("region", "us-east-1")]))
        );
    }

    #[test]
    fn test_resolve_name_with_regex_metacharacters() {
        let result = resolve(
            r#"${registry}/${app~!@#$%^&*()<>?:"|}/${app-image-name}:${app-image-tag}"#,
            "gcr.io/my-app/my-app-backend:1.0.0",
        )
        .unwrap();

        assert_eq!(result.len(), 4);
        assert_eq!(result.get("registry"), Some("gcr.io"));
        assert_eq!(result.get(r#"app~!@#$%^&*()<>?:"|"#), Some("my-app"));
        assert_eq!(result.get("app-image-name"), Some("my-app-backend"));
        assert_eq!(result.get("app-image-tag"), Some("1.0.0"));
    }

    #[test]
    fn test_resolve_literal_text_is_escaped() {
        // `.` must match a literal dot, not any character
        assert_eq!(
            resolve("${app}.example.com", "web.example.com"),
            Some(bindings(&[("app", "web")]))
        );
        assert_eq!(resolve("${app}.example.com", "web-exampleXcom"), None);
    }

    #[test]
    fn test_resolve_no_match() {
        assert_eq!(resolve("${image}:${tag}", "foo-dev-bar-us-east-1-baz"), None);
    }

    #[test]
    fn test_adjacent_placeholders_never_resolve() {
        for value in ["nginx:1.2", "ab", "a", "", "long-value-with-dashes"] {
            assert_eq!(resolve("${image}${tag}", value), None, "value: {value:?}");
        }
        assert_eq!(resolve("${project-id}/${image}${tag}", "my-project/nginx:1.2"), None);
    }

    #[test]
    fn test_empty_binding_is_unresolved() {
        assert_eq!(resolve("${name}-deployment", "-deployment"), None);
    }

    #[test]
    fn test_match_is_anchored() {
        assert_eq!(resolve("${name}-deployment", "nginx-deployment-old"), None);
        assert_eq!(resolve("app-${name}", "my-app-nginx"), None);
    }

    #[test]
    fn test_template_without_placeholders() {
        assert_eq!(resolve("nginx", "nginx"), Some(BindingSet::default()));
        assert_eq!(resolve("nginx", "apache"), None);
    }

    #[test]
    fn test_duplicate_placeholder_binds_last_occurrence() {
        let result = resolve("${a}/${a}", "x/y").unwrap();
        assert_eq!(result.get("a"), Some("y"));
    }

    #[test]
    fn test_multiline_value() {
        assert_eq!(
            resolve("${first}\n${second}", "one\ntwo"),
            Some(bindings(&[("first", "one"), ("second", "two")]))
        );
    }

    #[test]
    fn test_references() {
        let template = Template::parse("${name}-deployment");
        assert!(template.references("name"));
        assert!(!template.references("nam"));
        assert!(!template.references("deployment"));
    }

    #[test]
    fn test_single_placeholder_snapshot() {
        let result = resolve("${image}:${tag}", "nginx:1.7.1").unwrap();
        let rendered = result
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",");
        insta::assert_snapshot!(rendered, @"image=nginx,tag=1.7.1");
    }
}
