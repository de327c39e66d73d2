//! Route pattern parsing
//!
//! ```text
//! /                 → []
//! /presale          → [Literal("presale")]
//! /users/:id        → [Literal("users"), Param("id")]
//! /:catchAll(.*)    → [CatchAll("catchAll")]
//! *                 → [CatchAll("")]
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::RouteError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly (case-sensitive)
    Literal(String),
    /// Accepts any non-empty path segment and binds it under this name
    Param(String),
    /// Matches any path; only valid as the sole segment of a pattern
    CatchAll(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();

        if raw == "*" {
            return Ok(Self {
                raw: raw.to_string(),
                segments: vec![Segment::CatchAll(String::new())],
            });
        }

        let body = raw
            .strip_prefix('/')
            .ok_or_else(|| RouteError::invalid(raw, "pattern must start with '/'"))?;
        let body = body.strip_suffix('/').unwrap_or(body);
        if body.ends_with('/') {
            return Err(RouteError::invalid(raw, "empty segment"));
        }

        let mut segments = Vec::new();
        if !body.is_empty() {
            for part in body.split('/') {
                segments.push(Self::parse_segment(raw, part)?);
            }
        }

        let has_catch_all = segments.iter().any(|s| matches!(s, Segment::CatchAll(_)));
        if has_catch_all && segments.len() > 1 {
            return Err(RouteError::invalid(
                raw,
                "a catch-all segment must be the only segment",
            ));
        }

        let mut seen: Vec<&str> = Vec::new();
        for segment in &segments {
            if let Segment::Param(name) = segment {
                if seen.contains(&name.as_str()) {
                    return Err(RouteError::invalid(
                        raw,
                        format!("parameter :{} appears twice", name),
                    ));
                }
                seen.push(name);
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    fn parse_segment(raw: &str, part: &str) -> Result<Segment> {
        if part.is_empty() {
            return Err(RouteError::invalid(raw, "empty segment"));
        }

        if part == "*" {
            return Ok(Segment::CatchAll(String::new()));
        }

        let Some(param) = part.strip_prefix(':') else {
            return Ok(Segment::Literal(part.to_string()));
        };

        if let Some(name) = param.strip_suffix("(.*)") {
            Self::check_param_name(raw, name)?;
            return Ok(Segment::CatchAll(name.to_string()));
        }

        if param.contains('(') {
            return Err(RouteError::invalid(
                raw,
                format!("unsupported parameter constraint in {:?}", part),
            ));
        }

        Self::check_param_name(raw, param)?;
        Ok(Segment::Param(param.to_string()))
    }

    fn check_param_name(raw: &str, name: &str) -> Result<()> {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(RouteError::invalid(
                raw,
                format!("invalid parameter name {:?}", name),
            ));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment::CatchAll(_)])
    }

    /// Parameter names in declaration order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for RoutePattern {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let pattern = RoutePattern::parse("/").unwrap();
        assert!(pattern.segments().is_empty());
        assert!(!pattern.is_catch_all());
    }

    #[test]
    fn test_parse_literal_and_param() {
        let pattern = RoutePattern::parse("/users/:id/").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("users".to_string()),
                Segment::Param("id".to_string())
            ]
        );
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn test_parse_catch_all() {
        let pattern = RoutePattern::parse("/:catchAll(.*)").unwrap();
        assert!(pattern.is_catch_all());
        assert_eq!(
            pattern.segments(),
            &[Segment::CatchAll("catchAll".to_string())]
        );

        assert!(RoutePattern::parse("*").unwrap().is_catch_all());
        assert!(RoutePattern::parse("/*").unwrap().is_catch_all());
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(RoutePattern::parse("presale").is_err());
        assert!(RoutePattern::parse("/a//b").is_err());
        assert!(RoutePattern::parse("//").is_err());
        assert!(RoutePattern::parse("/presale//").is_err());
        assert!(RoutePattern::parse("/:").is_err());
        assert!(RoutePattern::parse("/:id(\\d+)").is_err());
        assert!(RoutePattern::parse("/docs/:rest(.*)").is_err());
        assert!(RoutePattern::parse("/:a/:a").is_err());
    }
}
