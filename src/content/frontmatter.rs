//! Front-matter parsing
//!
//! An article starts with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Hello World
//! date: 2024-01-15
//! ---
//!
//! Body text.
//! ```
//!
//! Every value in the block must be a scalar. Scalars are kept as their
//! string form, so `skip: true` is stored as `"true"`.

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;
use thiserror::Error;

const FENCE: &str = "---";

/// Why a metadata block could not be read as key: value pairs
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("missing closing `---` delimiter")]
    Unterminated,

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("expected a list of key: value pairs")]
    NotAMapping,

    #[error("key {0:?} is not a string")]
    NonStringKey(String),

    #[error("value of `{0}` is not a scalar")]
    NonScalar(String),
}

/// Front-matter data from an article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    values: IndexMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches(['\n', '\r']);

        let Some(rest) = strip_fence(content) else {
            // No front-matter found
            return Ok((FrontMatter::default(), content));
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == FENCE {
                let yaml = &rest[..offset];
                let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
                return Ok((Self::from_yaml(yaml)?, body));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unterminated)
    }

    fn from_yaml(yaml: &str) -> Result<Self, FrontMatterError> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        let mapping = match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(mapping) => mapping,
            // A block holding only comments
            Value::Null => return Ok(FrontMatter::default()),
            _ => return Err(FrontMatterError::NotAMapping),
        };

        let mut values = IndexMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let key = match key {
                Value::String(key) => key,
                other => return Err(FrontMatterError::NonStringKey(describe(&other))),
            };
            let value = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
                    return Err(FrontMatterError::NonScalar(key))
                }
            };
            values.insert(key, value);
        }

        Ok(Self { values })
    }

    /// Value of a key, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys and values in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }
}

/// Strip an opening `---` line, returning what follows it
fn strip_fence(s: &str) -> Option<&str> {
    let (line, rest) = match s.find('\n') {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => (s, ""),
    };
    (line.trim_end() == FENCE).then_some(rest)
}

fn describe(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
description: "A first letter"
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title(), Some("Hello World"));
        assert_eq!(fm.date(), Some("2024-01-15"));
        assert_eq!(fm.get("description"), Some("A first letter"));
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_keys_keep_source_order() {
        let content = "---\nzeta: 1\nalpha: 2\nmid: 3\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<_> = fm.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_scalars_become_strings() {
        let content = "---\nskip: true\ncount: 3\nratio: 1.5\nempty:\n---\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("skip"), Some("true"));
        assert_eq!(fm.get("count"), Some("3"));
        assert_eq!(fm.get("ratio"), Some("1.5"));
        assert!(!fm.contains("empty"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = FrontMatter::parse("# Just a heading\n\nText.").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "# Just a heading\n\nText.");
    }

    #[test]
    fn test_empty_block() {
        let (fm, body) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\ntitle: Windows\r\n---\r\n\r\nBody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title(), Some("Windows"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_body_may_contain_separators() {
        let content = "---\ntitle: Rules\n---\n\nAbove\n\n---\n\nBelow";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title(), Some("Rules"));
        assert_eq!(body, "Above\n\n---\n\nBelow");
    }

    #[test]
    fn test_unterminated_block() {
        let err = FrontMatter::parse("---\ntitle: Open\n\nNo closing fence").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = FrontMatter::parse("---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_prose_is_not_a_mapping() {
        let err = FrontMatter::parse("---\njust some prose\n---\nBody").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping));
    }

    #[test]
    fn test_nested_values_rejected() {
        let content = "---\ntitle: Tags\ntags:\n  - rust\n  - web\n---\nBody";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, FrontMatterError::NonScalar(ref key) if key == "tags"));
    }
}
