//! Route template compilation and path matching.
//!
//! A template like `/tasks/:id` is parsed once at startup into a sequence
//! of literal and named-parameter segments. Matching an incoming path is a
//! segment-by-segment comparison; no pattern compilation happens per
//! request.

use std::collections::HashMap;

use thiserror::Error;

/// Named parameters extracted from a matched path.
pub type PathParams = HashMap<String, String>;

/// Errors raised while parsing a route template.
///
/// The route table is declared statically at startup, so these surface as
/// startup assertions rather than runtime error paths.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("route template must start with '/': {0}")]
    MissingLeadingSlash(String),

    #[error("empty parameter name in route template: {0}")]
    EmptyParamName(String),

    #[error("parameter marker inside literal segment: {0}")]
    EmbeddedParamMarker(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled route template.
#[derive(Debug, Clone)]
pub struct RouteTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl RouteTemplate {
    /// Parse a template of literal segments and `:name` parameter segments.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let Some(rest) = template.strip_prefix('/') else {
            return Err(TemplateError::MissingLeadingSlash(template.to_string()));
        };

        let mut segments = Vec::new();
        for part in rest.split('/') {
            if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() || name.contains(':') {
                    return Err(TemplateError::EmptyParamName(template.to_string()));
                }
                segments.push(Segment::Param(name.to_string()));
            } else {
                if part.contains(':') {
                    return Err(TemplateError::EmbeddedParamMarker(template.to_string()));
                }
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self { raw: template.to_string(), segments })
    }

    /// The template as written, for logging.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a request target (path plus optional `?query` suffix).
    ///
    /// Returns the extracted named parameters and the raw query substring
    /// (empty when the target carries no query). A parameter segment only
    /// matches a non-empty path segment; `/` never appears inside a
    /// parameter value because it delimits segments.
    pub fn match_path<'p>(&self, target: &'p str) -> Option<(PathParams, &'p str)> {
        let (path, raw_query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };

        let rest = path.strip_prefix('/')?;
        let given: Vec<&str> = rest.split('/').collect();
        if given.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, value) in self.segments.iter().zip(given) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != value {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), value.to_string());
                }
            }
        }

        Some((params, raw_query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_template_matches_exact_path() {
        let template = RouteTemplate::parse("/tasks").unwrap();

        let (params, query) = template.match_path("/tasks").unwrap();
        assert!(params.is_empty());
        assert_eq!(query, "");

        assert!(template.match_path("/tasks/1").is_none());
        assert!(template.match_path("/task").is_none());
        assert!(template.match_path("/").is_none());
    }

    #[test]
    fn param_template_extracts_value() {
        let template = RouteTemplate::parse("/tasks/:id").unwrap();

        let (params, _) = template.match_path("/tasks/abc-123").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("abc-123"));

        assert!(template.match_path("/tasks").is_none());
        assert!(template.match_path("/tasks/a/b").is_none());
    }

    #[test]
    fn param_never_matches_empty_segment() {
        let template = RouteTemplate::parse("/tasks/:id").unwrap();
        assert!(template.match_path("/tasks/").is_none());
    }

    #[test]
    fn query_suffix_is_captured_separately() {
        let template = RouteTemplate::parse("/tasks").unwrap();

        let (_, query) = template.match_path("/tasks?search=rust").unwrap();
        assert_eq!(query, "search=rust");

        let (_, query) = template.match_path("/tasks?").unwrap();
        assert_eq!(query, "");
    }

    #[test]
    fn query_does_not_leak_into_param() {
        let template = RouteTemplate::parse("/tasks/:id").unwrap();
        let (params, query) = template.match_path("/tasks/42?search=x").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert_eq!(query, "search=x");
    }

    #[test]
    fn malformed_templates_fail_to_parse() {
        assert_eq!(
            RouteTemplate::parse("tasks").unwrap_err(),
            TemplateError::MissingLeadingSlash("tasks".to_string())
        );
        assert_eq!(
            RouteTemplate::parse("/tasks/:").unwrap_err(),
            TemplateError::EmptyParamName("/tasks/:".to_string())
        );
        assert_eq!(
            RouteTemplate::parse("/ta:sks").unwrap_err(),
            TemplateError::EmbeddedParamMarker("/ta:sks".to_string())
        );
    }
}
