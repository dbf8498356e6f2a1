//! Suite file loader.
//!
//! A suite file is a YAML or JSON document holding the default payload, the
//! named extension fragments and the ordered test descriptors:
//!
//! ```yaml
//! basePath: api
//! defaults:
//!   headers:
//!     Accept: application/json
//! fragments:
//!   auth:
//!     headers:
//!       Authorization: Bearer ${token}
//! tests:
//!   - title: login
//!     method: POST
//!     url: sessions
//!     variables: ["token"]
//!   - title: profile
//!     url: users/me
//!     extends: [auth]
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use sequent_application::{ApplicationError, TestRegistry};
use sequent_domain::{ContextStore, TestDescriptor};

/// Errors raised while loading a suite file.
#[derive(Debug, thiserror::Error)]
pub enum SuiteFileError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the suite file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The YAML document is malformed.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON document is malformed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A descriptor, fragment or default payload was rejected.
    #[error(transparent)]
    Registry(#[from] ApplicationError),
}

/// Serialization format of a suite document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteFormat {
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// JSON (everything else).
    Json,
}

impl SuiteFormat {
    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Raw suite document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteFile {
    /// Base path segment overriding the command line default.
    #[serde(default)]
    pub base_path: Option<String>,

    /// Default payload merged under every descriptor.
    #[serde(default)]
    pub defaults: Option<Value>,

    /// Named extension fragments.
    #[serde(default)]
    pub fragments: IndexMap<String, Value>,

    /// Values available to interpolation before the first test.
    #[serde(default)]
    pub context: IndexMap<String, Value>,

    /// Descriptors in execution order.
    #[serde(default)]
    pub tests: Vec<Value>,
}

/// A suite ready to run.
#[derive(Debug, Clone)]
pub struct LoadedSuite {
    /// Base path from the file, if any.
    pub base_path: Option<String>,
    /// Registered descriptors.
    pub descriptors: Vec<TestDescriptor>,
    /// Starting context.
    pub context: ContextStore,
}

impl SuiteFile {
    /// Parses a suite document.
    ///
    /// # Errors
    /// Returns a parse error for malformed input.
    pub fn parse(input: &str, format: SuiteFormat) -> Result<Self, SuiteFileError> {
        Ok(match format {
            SuiteFormat::Yaml => serde_yaml::from_str(input)?,
            SuiteFormat::Json => serde_json::from_str(input)?,
        })
    }

    /// Reads and registers a suite file.
    ///
    /// Relative upload paths are resolved against the suite file's directory.
    ///
    /// # Errors
    /// Returns a [`SuiteFileError`] if the file cannot be read, parsed or
    /// registered.
    pub async fn load(path: &Path) -> Result<LoadedSuite, SuiteFileError> {
        let input = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SuiteFileError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let suite = Self::parse(&input, SuiteFormat::from_path(path))?;
        let mut loaded = suite.into_suite()?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        for descriptor in &mut loaded.descriptors {
            if let Some(upload) = descriptor.file.as_mut()
                && let Some(file) = upload.path.as_mut()
            {
                *file = resolve_path(file, base_dir);
            }
        }

        debug!(path = %path.display(), tests = loaded.descriptors.len(), "suite loaded");
        Ok(loaded)
    }

    /// Registers defaults, fragments and tests.
    ///
    /// # Errors
    /// Returns [`SuiteFileError::Registry`] for the first rejected entry.
    pub fn into_suite(self) -> Result<LoadedSuite, SuiteFileError> {
        let mut registry = TestRegistry::new();

        if let Some(defaults) = self.defaults {
            registry.set_defaults(defaults)?;
        }
        for (name, fragment) in self.fragments {
            registry.define_fragment(name, fragment)?;
        }
        registry.register(self.tests)?;

        Ok(LoadedSuite {
            base_path: self.base_path,
            descriptors: registry.into_descriptors(),
            context: self.context.into_iter().collect(),
        })
    }
}

/// Resolves a path relative to the suite directory, or keeps it absolute.
fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sequent_domain::{DomainError, HttpMethod};
    use serde_json::json;

    const YAML: &str = r#"
basePath: v1
defaults:
  headers:
    Accept: application/json
fragments:
  auth:
    headers:
      Authorization: Bearer ${token}
context:
  tenant: acme
tests:
  - title: login
    method: POST
    url: sessions
    body:
      user: ada
    expect:
      statusCode: 201
      bodyType: object
      properties:
        token: string
    variables: ["token"]
  - title: profile
    url: users/me
    extends: [auth]
    break: true
"#;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SuiteFormat::from_path(Path::new("a.yaml")), SuiteFormat::Yaml);
        assert_eq!(SuiteFormat::from_path(Path::new("a.YML")), SuiteFormat::Yaml);
        assert_eq!(SuiteFormat::from_path(Path::new("a.json")), SuiteFormat::Json);
        assert_eq!(SuiteFormat::from_path(Path::new("suite")), SuiteFormat::Json);
    }

    #[test]
    fn test_yaml_suite() {
        let suite = SuiteFile::parse(YAML, SuiteFormat::Yaml)
            .unwrap()
            .into_suite()
            .unwrap();

        assert_eq!(suite.base_path.as_deref(), Some("v1"));
        assert_eq!(suite.context.get("tenant"), Some(&json!("acme")));
        assert_eq!(suite.descriptors.len(), 2);

        let login = &suite.descriptors[0];
        assert_eq!(login.method, HttpMethod::Post);
        assert_eq!(login.expect.status_code, 201);
        assert_eq!(login.headers.get("Accept"), Some(&json!("application/json")));

        let profile = &suite.descriptors[1];
        assert!(profile.breakpoint);
        assert_eq!(
            profile.headers.get("Authorization"),
            Some(&json!("Bearer ${token}"))
        );
        assert_eq!(profile.expect.status_code, 200);
    }

    #[test]
    fn test_json_suite() {
        let input = r#"{"tests": [{"title": "health", "url": "health", "skip": true}]}"#;
        let suite = SuiteFile::parse(input, SuiteFormat::Json)
            .unwrap()
            .into_suite()
            .unwrap();

        assert_eq!(suite.base_path, None);
        assert!(suite.descriptors[0].skip);
    }

    #[test]
    fn test_unknown_fragment() {
        let input = r#"{"tests": [{"url": "x", "extends": ["missing"]}]}"#;
        let result = SuiteFile::parse(input, SuiteFormat::Json)
            .unwrap()
            .into_suite();

        assert!(matches!(
            result,
            Err(SuiteFileError::Registry(ApplicationError::Configuration(
                DomainError::UnknownFragment(_)
            )))
        ));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(
            SuiteFile::parse("tests: [", SuiteFormat::Yaml),
            Err(SuiteFileError::Yaml(_))
        ));
        assert!(matches!(
            SuiteFile::parse("{", SuiteFormat::Json),
            Err(SuiteFileError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_load_resolves_upload_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.yml");
        std::fs::write(
            &path,
            "tests:\n  - url: files\n    file:\n      path: fixtures/a.png\n      form_name: avatar\n",
        )
        .unwrap();

        let suite = SuiteFile::load(&path).await.unwrap();

        let upload = suite.descriptors[0].file.as_ref().unwrap();
        assert_eq!(upload.path, Some(dir.path().join("fixtures/a.png")));
        assert_eq!(upload.form_name, "avatar");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = SuiteFile::load(Path::new("/no/such/suite.yml")).await;
        assert!(matches!(result, Err(SuiteFileError::Io { .. })));
    }
}
