//! Locations: the path (and optional query) a visitor asked for.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::GuardError;

/// A navigable location such as `/ServiceDetails?id=12`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl Location {
    /// A location with no query string.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
        }
    }

    /// Parses `"/path"` or `"/path?query"`.
    ///
    /// # Errors
    /// [`GuardError::InvalidLocation`] if the input doesn't start with `/`.
    pub fn parse(input: &str) -> Result<Self, GuardError> {
        let input = input.trim();
        if !input.starts_with('/') {
            return Err(GuardError::InvalidLocation(input.to_string()));
        }

        Ok(match input.split_once('?') {
            Some((path, query)) if !query.is_empty() => Self {
                path: path.to_string(),
                query: Some(query.to_string()),
            },
            Some((path, _)) => Self::new(path),
            None => Self::new(input),
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            Some(query) => write!(f, "{}?{}", self.path, query),
            None => f.write_str(&self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_only() {
        assert_eq!(Location::parse("/VendorList").unwrap(), Location::new("/VendorList"));
    }

    #[test]
    fn test_parse_keeps_query() {
        let location = Location::parse("/ServiceDetails?id=12").unwrap();
        assert_eq!(location.path, "/ServiceDetails");
        assert_eq!(location.query.as_deref(), Some("id=12"));
        assert_eq!(location.to_string(), "/ServiceDetails?id=12");
    }

    #[test]
    fn test_parse_empty_query_is_dropped() {
        assert_eq!(Location::parse("/payment?").unwrap().query, None);
    }

    #[test]
    fn test_parse_relative_path_fails() {
        assert!(matches!(
            Location::parse("Services"),
            Err(GuardError::InvalidLocation(ref s)) if s == "Services"
        ));
    }
}
