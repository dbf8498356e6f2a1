//! Turns a descriptor into a [`PreparedRequest`].
//!
//! Interpolates every templated field against the context, composes the
//! request target and picks the payload encoding.

use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use sequent_domain::{
    ContextStore, DomainError, FileAttachment, PreparedRequest, RequestPayload, TestDescriptor,
};

use crate::interpolation::{interpolate, interpolate_map, interpolate_value, render_value};

/// Path segment inserted between the base URL and descriptor paths when
/// nothing else is configured.
pub const DEFAULT_BASE_PATH: &str = "api";

/// Where requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerSettings {
    /// Host base URL (`http://127.0.0.1:3000`). A trailing `/` is ignored.
    pub base_url: String,
    /// Segment after the base URL. Omitted from targets when empty.
    pub base_path: String,
}

impl RunnerSettings {
    /// Settings with the default base path.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }

    /// Overrides the base path (builder pattern).
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Composes `baseUrl/basePath[/model]/path`.
    #[must_use]
    pub fn target(&self, model: Option<&str>, path: &str) -> String {
        let mut target = self.base_url.trim_end_matches('/').to_string();

        for segment in [Some(self.base_path.as_str()), model]
            .into_iter()
            .flatten()
            .map(|s| s.trim_matches('/'))
            .filter(|s| !s.is_empty())
        {
            target.push('/');
            target.push_str(segment);
        }

        target.push('/');
        target.push_str(path.trim_start_matches('/'));
        target
    }
}

/// Resolves a descriptor against the context.
///
/// Payload priority: `formData` or `file` produce a multipart body, else
/// `form` a urlencoded one, else `body` a JSON one.
///
/// # Errors
/// Returns [`DomainError::InvalidUrl`] when no base URL is configured.
pub fn prepare_request(
    descriptor: &TestDescriptor,
    context: &ContextStore,
    settings: &RunnerSettings,
) -> Result<PreparedRequest, DomainError> {
    if settings.base_url.trim().is_empty() {
        return Err(DomainError::InvalidUrl("base URL is empty".to_string()));
    }

    let path = interpolate(&descriptor.url, context);
    let mut request = PreparedRequest::new(
        descriptor.method,
        settings.target(descriptor.model.as_deref(), &path),
    );

    request.headers = interpolate_map(&descriptor.headers, context)
        .iter()
        .map(|(name, value)| (name.clone(), render_value(value)))
        .collect::<IndexMap<_, _>>();

    if let Some(qs) = &descriptor.qs {
        request.query = to_pairs(&interpolate_map(qs, context));
    }

    request.payload = payload(descriptor, context);
    Ok(request)
}

fn payload(descriptor: &TestDescriptor, context: &ContextStore) -> RequestPayload {
    let file = descriptor.file.as_ref().and_then(|upload| {
        let path = upload.path.as_ref()?;
        Some(FileAttachment {
            field_name: upload.form_name.clone(),
            file_name: file_name(path),
            path: path.clone(),
        })
    });

    if descriptor.form_data.is_some() || file.is_some() {
        let mut fields = descriptor
            .form_data
            .as_ref()
            .map(|map| to_pairs(&interpolate_map(map, context)))
            .unwrap_or_default();

        if let Some(file) = &file
            && !fields.iter().any(|(name, _)| name == "name")
        {
            fields.push(("name".to_string(), file.file_name.clone()));
        }

        return RequestPayload::Multipart { fields, file };
    }

    if let Some(form) = &descriptor.form {
        return RequestPayload::Form {
            fields: to_pairs(&interpolate_map(form, context)),
        };
    }

    descriptor
        .body
        .as_ref()
        .map_or(RequestPayload::None, |body| RequestPayload::Json {
            content: interpolate_value(body, context),
        })
}

/// Flattens an object into string pairs. Array values repeat their key;
/// `null` values are dropped.
fn to_pairs(map: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => pairs.extend(
                items
                    .iter()
                    .filter(|item| !item.is_null())
                    .map(|item| (key.clone(), render_value(item))),
            ),
            other => pairs.push((key.clone(), render_value(other))),
        }
    }
    pairs
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
