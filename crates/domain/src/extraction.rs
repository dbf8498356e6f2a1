//! Variable extraction specs (`path` or `path:alias`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// One extraction rule: read `path` from the response body and store it in
/// the run context under `alias`, or under `path` itself when no alias is
/// given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExtractionSpec {
    /// Dotted path into the response body.
    pub path: String,
    /// Context name to store the value under.
    pub alias: Option<String>,
}

impl ExtractionSpec {
    /// Creates a spec without alias.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
        }
    }

    /// Creates a spec with an alias.
    #[must_use]
    pub fn aliased(path: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: Some(alias.into()),
        }
    }

    /// The context name this spec writes to.
    #[must_use]
    pub fn target(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.path)
    }
}

impl fmt::Display for ExtractionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{}:{alias}", self.path),
            None => f.write_str(&self.path),
        }
    }
}

impl FromStr for ExtractionSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let invalid = |reason: &str| DomainError::InvalidExtractionSpec {
            spec: s.to_string(),
            reason: reason.to_string(),
        };

        let (path, alias) = match s.split_once(':') {
            Some((path, alias)) => (path.trim(), Some(alias.trim())),
            None => (s.trim(), None),
        };

        if path.is_empty() {
            return Err(invalid("path is empty"));
        }

        match alias {
            Some("") => Err(invalid("alias is empty")),
            Some(alias) if alias.contains(':') => Err(invalid("more than one ':'")),
            Some(alias) => Ok(Self::aliased(path, alias)),
            None => Ok(Self::new(path)),
        }
    }
}

impl TryFrom<String> for ExtractionSpec {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        value.parse()
    }
}

impl From<ExtractionSpec> for String {
    fn from(value: ExtractionSpec) -> Self {
        value.to_string()
    }
}
