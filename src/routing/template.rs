//! Route templates.
//!
//! # Syntax
//! `/` + base tag + `/` + [suffix], where the suffix may end with a literal
//! marker segment followed by a `{name}` placeholder, e.g. `/api/path/{name}`.
//!
//! # Matching
//! - Exact templates match only on string equality
//! - Variable templates match when the request starts with everything before
//!   the placeholder; the non-empty remainder is the variable's raw value

use std::fmt;

use crate::routing::RouteError;

/// A parsed route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    Exact(String),
    Variable { prefix: String, name: String },
}

/// Result of a successful template match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathMatch<'p> {
    /// Raw path variable, present for variable templates.
    pub variable: Option<&'p str>,
}

impl Template {
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidTemplate {
            template: raw.to_string(),
            reason: reason.to_string(),
        };

        let open = match raw.find('{') {
            Some(open) => open,
            None if raw.contains('}') => return Err(invalid("unbalanced '}'")),
            None => return Ok(Template::Exact(raw.to_string())),
        };

        if !raw.ends_with('}') || raw[open + 1..].contains(['{', '/']) {
            return Err(invalid("placeholder must be the last path segment"));
        }
        let name = &raw[open + 1..raw.len() - 1];
        if name.is_empty() || name.contains('}') {
            return Err(invalid("placeholder needs a single non-empty name"));
        }
        let prefix = &raw[..open];
        if !prefix.ends_with('/') {
            return Err(invalid("placeholder must follow '/'"));
        }

        Ok(Template::Variable {
            prefix: prefix.to_string(),
            name: name.to_string(),
        })
    }

    /// Match a request path (query string already removed).
    pub fn matches<'p>(&self, path: &'p str) -> Option<PathMatch<'p>> {
        match self {
            Template::Exact(template) => (template == path).then_some(PathMatch { variable: None }),
            Template::Variable { prefix, .. } => path
                .strip_prefix(prefix.as_str())
                .filter(|rest| !rest.is_empty())
                .map(|rest| PathMatch {
                    variable: Some(rest),
                }),
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Template::Variable { .. })
    }

    /// Placeholder name of a variable template.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Template::Variable { name, .. } => Some(name),
            Template::Exact(_) => None,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Exact(template) => f.write_str(template),
            Template::Variable { prefix, name } => write!(f, "{}{{{}}}", prefix, name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_template() {
        let template = Template::parse("/api/ints").unwrap();
        assert_eq!(template, Template::Exact("/api/ints".into()));
        assert!(template.matches("/api/ints").is_some());
        assert!(template.matches("/api/ints/").is_none());
        assert!(template.matches("/api/int").is_none());
    }

    #[test]
    fn test_variable_template_captures_remainder() {
        let template = Template::parse("/api/path/{pathvar}").unwrap();
        assert_eq!(template.variable_name(), Some("pathvar"));
        assert_eq!(template.to_string(), "/api/path/{pathvar}");

        let found = template.matches("/api/path/ola").unwrap();
        assert_eq!(found.variable, Some("ola"));

        let nested = template.matches("/api/path/a/b").unwrap();
        assert_eq!(nested.variable, Some("a/b"));
    }

    #[test]
    fn test_variable_template_needs_value() {
        let template = Template::parse("/api/path/{pathvar}").unwrap();
        assert!(template.matches("/api/path/").is_none());
        assert!(template.matches("/api/path").is_none());
        assert!(template.matches("/api/other/ola").is_none());
    }

    #[test]
    fn test_invalid_templates() {
        for raw in [
            "/api/{id}/more",
            "/api/{}",
            "/api/x{id}",
            "/api/{a{b}",
            "/api/id}",
        ] {
            assert!(
                matches!(Template::parse(raw), Err(RouteError::InvalidTemplate { .. })),
                "{} should be rejected",
                raw
            );
        }
    }
}
