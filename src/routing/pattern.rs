use std::collections::HashMap;
use thiserror::Error;

use crate::error::ApiError;

/// Pattern parse failures. All of these are configuration mistakes and fatal
/// at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern must start with '/': {0}")]
    MissingLeadingSlash(String),

    #[error("unterminated parameter in pattern: {0}")]
    UnterminatedParameter(String),

    #[error("empty parameter name in pattern: {0}")]
    EmptyParameterName(String),

    #[error("duplicate parameter '{name}' in pattern: {pattern}")]
    DuplicateParameter { pattern: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Parameter(String),
}

/// A parsed path pattern: literal segments and single named-parameter
/// segments, e.g. `/restaurants/{slug}/menu`. No wildcards, no regex.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if !pattern.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
        }

        let mut segments = Vec::new();
        let mut seen: Vec<&str> = Vec::new();
        for part in pattern.split('/').filter(|p| !p.is_empty()) {
            if let Some(rest) = part.strip_prefix('{') {
                let name = rest
                    .strip_suffix('}')
                    .ok_or_else(|| PatternError::UnterminatedParameter(pattern.to_string()))?;
                if name.is_empty() {
                    return Err(PatternError::EmptyParameterName(pattern.to_string()));
                }
                if seen.contains(&name) {
                    return Err(PatternError::DuplicateParameter {
                        pattern: pattern.to_string(),
                        name: name.to_string(),
                    });
                }
                seen.push(name);
                segments.push(Segment::Parameter(name.to_string()));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// Match a concrete request path, extracting parameter values. Parameter
    /// values pass through uninterpreted; parsing them is the handler's job.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit.as_str() != *part {
                        return None;
                    }
                }
                Segment::Parameter(name) => {
                    params.insert(name.clone(), (*part).to_string());
                }
            }
        }
        Some(PathParams(params))
    }

    /// Substitute parameters to produce a concrete URL. On a missing
    /// parameter, returns its name.
    pub(crate) fn fill(&self, params: &[(&str, &str)]) -> Result<String, String> {
        let mut url = String::new();
        for segment in &self.segments {
            url.push('/');
            match segment {
                Segment::Literal(lit) => url.push_str(lit),
                Segment::Parameter(name) => {
                    let value = params
                        .iter()
                        .find(|(n, _)| n == name)
                        .map(|(_, v)| *v)
                        .ok_or_else(|| name.clone())?;
                    url.push_str(value);
                }
            }
        }
        if url.is_empty() {
            url.push('/');
        }
        Ok(url)
    }

    /// Literal segment count, used as the specificity score when several
    /// patterns match the same path.
    pub fn literal_segments(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Parameter values extracted from a matched path.
#[derive(Debug, Clone, Default)]
pub struct PathParams(HashMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// A parameter the matched pattern is guaranteed to carry. Absence means
    /// the registration and the handler disagree, which is a server bug.
    pub fn require(&self, name: &str) -> Result<&str, ApiError> {
        self.get(name).ok_or_else(|| {
            ApiError::internal_server_error(format!("route is missing parameter '{}'", name))
        })
    }

    /// Parse a numeric id parameter.
    pub fn id(&self, name: &str) -> Result<i64, ApiError> {
        let raw = self.require(name)?;
        raw.parse()
            .map_err(|_| ApiError::bad_request(format!("invalid id '{}'", raw)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literals_and_parameters() {
        let pattern = PathPattern::parse("/restaurants/{slug}/menu").unwrap();
        assert_eq!(pattern.literal_segments(), 2);

        let params = pattern.matches("/restaurants/thai-garden/menu").unwrap();
        assert_eq!(params.get("slug"), Some("thai-garden"));
    }

    #[test]
    fn root_pattern_matches_root_path() {
        let pattern = PathPattern::parse("/").unwrap();
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/anything").is_none());
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let pattern = PathPattern::parse("/menus").unwrap();
        assert!(pattern.matches("/menus/").is_some());
    }

    #[test]
    fn segment_count_must_match() {
        let pattern = PathPattern::parse("/restaurants/{slug}").unwrap();
        assert!(pattern.matches("/restaurants").is_none());
        assert!(pattern.matches("/restaurants/a/b").is_none());
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        assert!(matches!(
            PathPattern::parse("restaurants"),
            Err(PatternError::MissingLeadingSlash(_))
        ));
        assert!(matches!(
            PathPattern::parse("/restaurants/{slug"),
            Err(PatternError::UnterminatedParameter(_))
        ));
        assert!(matches!(
            PathPattern::parse("/restaurants/{}"),
            Err(PatternError::EmptyParameterName(_))
        ));
        assert!(matches!(
            PathPattern::parse("/x/{id}/y/{id}"),
            Err(PatternError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn fill_substitutes_and_reports_missing() {
        let pattern = PathPattern::parse("/restaurants/{restaurant}/edit").unwrap();
        assert_eq!(
            pattern.fill(&[("restaurant", "7")]).unwrap(),
            "/restaurants/7/edit"
        );
        assert_eq!(pattern.fill(&[]), Err("restaurant".to_string()));

        let root = PathPattern::parse("/").unwrap();
        assert_eq!(root.fill(&[]).unwrap(), "/");
    }
}
