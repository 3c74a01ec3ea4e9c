//! Path string parser.
//!
//! Paths are `.`-separated segments. A separator inside brackets does not
//! split, so `[version:1.5]` stays one segment. There is no escaping: a key
//! can never contain a `.`.

use super::ast::{PathSegment, YamlPath};
use super::error::PathError;
use crate::document::node::Scalar;
use std::str::FromStr;

/// Parser for path strings.
pub struct Parser {
    input: Vec<char>,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given path string.
    pub fn new(query: &str) -> Self {
        Self {
            input: query.chars().collect(),
            position: 0,
        }
    }

    /// Parses the path string into a YamlPath.
    pub fn parse(query: &str) -> Result<YamlPath, PathError> {
        let mut parser = Parser::new(query);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<YamlPath, PathError> {
        if self.input.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        loop {
            let start = self.position;
            let raw = self.scan_segment()?;
            if raw.is_empty() {
                return Err(PathError::EmptySegment { position: start });
            }
            segments.push(parse_segment(&raw)?);

            if self.peek().is_none() {
                break;
            }
            // separator
            self.position += 1;
        }

        Ok(YamlPath::new(segments))
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Reads up to the next top-level separator, tracking bracket depth.
    fn scan_segment(&mut self) -> Result<String, PathError> {
        let mut raw = String::new();
        let mut depth = 0usize;
        let mut opened_at = 0;

        while let Some(ch) = self.peek() {
            match ch {
                '.' if depth == 0 => break,
                '[' => {
                    if depth == 0 {
                        opened_at = self.position;
                    }
                    depth += 1;
                }
                ']' => {
                    if depth == 0 {
                        return Err(PathError::UnbalancedBracket {
                            position: self.position,
                        });
                    }
                    depth -= 1;
                }
                _ => {}
            }
            raw.push(ch);
            self.position += 1;
        }

        if depth > 0 {
            return Err(PathError::UnbalancedBracket {
                position: opened_at,
            });
        }
        Ok(raw)
    }
}

fn parse_segment(raw: &str) -> Result<PathSegment, PathError> {
    if let Some(inner) = raw.strip_prefix("[[").and_then(|s| s.strip_suffix("]]")) {
        check_inner(raw, inner)?;
        if let Some(index) = parse_index(raw, inner)? {
            return Ok(PathSegment::InsertIndex(index));
        }
        let (key, value) = parse_predicate(raw, inner)?;
        return Ok(PathSegment::InsertPredicate { key, value });
    }

    if let Some(inner) = raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        check_inner(raw, inner)?;
        if let Some(index) = parse_index(raw, inner)? {
            return Ok(PathSegment::Index(index));
        }
        let (key, value) = parse_predicate(raw, inner)?;
        return Ok(PathSegment::Predicate { key, value });
    }

    if raw.contains(['[', ']']) {
        return Err(PathError::InvalidKey {
            segment: raw.to_string(),
        });
    }
    Ok(PathSegment::Key(raw.to_string()))
}

/// Bracket content may not itself contain brackets (`[a][b]`).
fn check_inner(raw: &str, inner: &str) -> Result<(), PathError> {
    if inner.contains(['[', ']']) {
        return Err(PathError::InvalidPredicate {
            segment: raw.to_string(),
        });
    }
    Ok(())
}

/// Returns the index if `inner` is written as an integer, `None` if it is
/// something else entirely.
fn parse_index(raw: &str, inner: &str) -> Result<Option<isize>, PathError> {
    if inner.is_empty() {
        return Err(PathError::InvalidIndex {
            segment: raw.to_string(),
        });
    }
    let digits = inner.strip_prefix('-').unwrap_or(inner);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Ok(None);
    }
    inner
        .parse::<isize>()
        .map(Some)
        .map_err(|_| PathError::InvalidIndex {
            segment: raw.to_string(),
        })
}

fn parse_predicate(raw: &str, inner: &str) -> Result<(String, Scalar), PathError> {
    match inner.split_once(':') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), Scalar::parse(value))),
        _ => Err(PathError::InvalidPredicate {
            segment: raw.to_string(),
        }),
    }
}

impl FromStr for YamlPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> PathSegment {
        PathSegment::Key(name.to_string())
    }

    #[test]
    fn test_parse_single_key() {
        let path = Parser::parse("name").unwrap();
        assert_eq!(path.segments, vec![key("name")]);
    }

    #[test]
    fn test_parse_nested_keys() {
        let path = Parser::parse("spec.template.metadata").unwrap();
        assert_eq!(
            path.segments,
            vec![key("spec"), key("template"), key("metadata")]
        );
    }

    #[test]
    fn test_parse_index() {
        let path = Parser::parse("containers.[0].image").unwrap();
        assert_eq!(path.segments[1], PathSegment::Index(0));

        let path = Parser::parse("items.[-1]").unwrap();
        assert_eq!(path.segments[1], PathSegment::Index(-1));
    }

    #[test]
    fn test_parse_predicate_decodes_value() {
        let path = Parser::parse("foo.[name:2]").unwrap();
        assert_eq!(
            path.segments[1],
            PathSegment::Predicate {
                key: "name".to_string(),
                value: Scalar::Int(2)
            }
        );

        let path = Parser::parse("foo.[ok:true]").unwrap();
        assert_eq!(
            path.segments[1],
            PathSegment::Predicate {
                key: "ok".to_string(),
                value: Scalar::Bool(true)
            }
        );
    }

    #[test]
    fn test_parse_predicate_value_may_contain_separators() {
        let path = Parser::parse("images.[tag:1.5].name").unwrap();
        assert_eq!(path.segments.len(), 3);
        assert_eq!(
            path.segments[1],
            PathSegment::Predicate {
                key: "tag".to_string(),
                value: Scalar::Float(1.5)
            }
        );

        // only the first ':' splits
        let path = Parser::parse("c.[image:foo:latest]").unwrap();
        assert_eq!(
            path.segments[1],
            PathSegment::Predicate {
                key: "image".to_string(),
                value: Scalar::String("foo:latest".to_string())
            }
        );
    }

    #[test]
    fn test_parse_insert_forms() {
        let path = Parser::parse("containers.[[name:foo]]").unwrap();
        assert_eq!(
            path.segments[1],
            PathSegment::InsertPredicate {
                key: "name".to_string(),
                value: Scalar::String("foo".to_string())
            }
        );

        let path = Parser::parse("items.[[-2]]").unwrap();
        assert_eq!(path.segments[1], PathSegment::InsertIndex(-2));
    }

    #[test]
    fn test_parse_key_with_odd_characters() {
        let path = Parser::parse("a b/c:d").unwrap();
        assert_eq!(path.segments, vec![key("a b/c:d")]);
    }

    #[test]
    fn test_parse_empty_fails() {
        assert_eq!(Parser::parse(""), Err(PathError::Empty));
    }

    #[test]
    fn test_parse_empty_segment_fails() {
        assert_eq!(
            Parser::parse("a..b"),
            Err(PathError::EmptySegment { position: 2 })
        );
        assert_eq!(
            Parser::parse(".a"),
            Err(PathError::EmptySegment { position: 0 })
        );
        assert_eq!(
            Parser::parse("a."),
            Err(PathError::EmptySegment { position: 2 })
        );
    }

    #[test]
    fn test_parse_unbalanced_brackets_fail() {
        assert_eq!(
            Parser::parse("a.[0"),
            Err(PathError::UnbalancedBracket { position: 2 })
        );
        assert_eq!(
            Parser::parse("a.0]"),
            Err(PathError::UnbalancedBracket { position: 3 })
        );
        assert!(Parser::parse("a.[[name:x]").is_err());
    }

    #[test]
    fn test_parse_invalid_bracket_content() {
        assert!(matches!(
            Parser::parse("a.[name]"),
            Err(PathError::InvalidPredicate { .. })
        ));
        assert!(matches!(
            Parser::parse("a.[:x]"),
            Err(PathError::InvalidPredicate { .. })
        ));
        assert!(matches!(
            Parser::parse("a.[]"),
            Err(PathError::InvalidIndex { .. })
        ));
        assert!(matches!(
            Parser::parse("a.[99999999999999999999999]"),
            Err(PathError::InvalidIndex { .. })
        ));
        assert!(matches!(
            Parser::parse("a.[x:1][y:2]"),
            Err(PathError::InvalidPredicate { .. })
        ));
    }

    #[test]
    fn test_parse_brackets_inside_key_fail() {
        assert_eq!(
            Parser::parse("a[0]"),
            Err(PathError::InvalidKey {
                segment: "a[0]".to_string()
            })
        );
        assert_eq!(
            Parser::parse("a.[0]x"),
            Err(PathError::InvalidKey {
                segment: "[0]x".to_string()
            })
        );
        assert!(matches!(
            Parser::parse("a.x[[0]]"),
            Err(PathError::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_from_str() {
        let path: YamlPath = "a.[1]".parse().unwrap();
        assert_eq!(path.to_string(), "a.[1]");
    }
}
