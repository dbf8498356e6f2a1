//! HTTP request body builder.
//!
//! Turns a [`RequestPayload`] into something reqwest can send: JSON text,
//! urlencoded text, or a multipart form with an optional file part.

use reqwest::multipart::{Form, Part};
use sequent_domain::{FileAttachment, RequestPayload};

/// Error type for body building operations.
#[derive(Debug, thiserror::Error)]
pub enum BodyBuildError {
    /// The upload could not be read.
    #[error("failed to read {path}: {message}")]
    FileRead {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        message: String,
    },

    /// The guessed MIME type was rejected.
    #[error("invalid MIME type for {path}: {message}")]
    InvalidMime {
        /// Path of the file.
        path: String,
        /// Underlying error.
        message: String,
    },

    /// The payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result of building a body.
#[derive(Debug)]
pub enum BuiltBody {
    /// No body.
    None,
    /// Text body with content type.
    Text {
        /// Encoded body.
        content: String,
        /// `Content-Type` header value.
        content_type: &'static str,
    },
    /// Multipart form data.
    Multipart(Form),
}

impl BuiltBody {
    /// The `Content-Type` to send, if the body dictates one.
    ///
    /// Multipart bodies return `None`: reqwest sets the header with its
    /// boundary.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Text { content_type, .. } => Some(content_type),
            Self::None | Self::Multipart(_) => None,
        }
    }
}

/// Builds the HTTP body for a payload.
///
/// # Errors
/// Returns a [`BodyBuildError`] if the payload cannot be encoded or the
/// upload cannot be read.
pub async fn build_body(payload: &RequestPayload) -> Result<BuiltBody, BodyBuildError> {
    match payload {
        RequestPayload::None => Ok(BuiltBody::None),

        RequestPayload::Json { content } => {
            let content = serde_json::to_string(content)
                .map_err(|e| BodyBuildError::Serialization(e.to_string()))?;
            Ok(BuiltBody::Text {
                content,
                content_type: "application/json",
            })
        }

        RequestPayload::Form { fields } => {
            let content = serde_urlencoded::to_string(fields)
                .map_err(|e| BodyBuildError::Serialization(e.to_string()))?;
            Ok(BuiltBody::Text {
                content,
                content_type: "application/x-www-form-urlencoded",
            })
        }

        RequestPayload::Multipart { fields, file } => {
            let mut form = fields
                .iter()
                .fold(Form::new(), |form, (name, value)| {
                    form.text(name.clone(), value.clone())
                });

            if let Some(file) = file {
                form = form.part(file.field_name.clone(), file_part(file).await?);
            }

            Ok(BuiltBody::Multipart(form))
        }
    }
}

async fn file_part(file: &FileAttachment) -> Result<Part, BodyBuildError> {
    let path = file.path.display().to_string();

    let content = tokio::fs::read(&file.path)
        .await
        .map_err(|e| BodyBuildError::FileRead {
            path: path.clone(),
            message: e.to_string(),
        })?;

    Part::bytes(content)
        .file_name(file.file_name.clone())
        .mime_str(mime_type(file).as_ref())
        .map_err(|e| BodyBuildError::InvalidMime {
            path,
            message: e.to_string(),
        })
}

/// MIME type guessed from the file name, `application/octet-stream` when
/// unknown.
#[must_use]
pub fn mime_type(file: &FileAttachment) -> mime::Mime {
    mime_guess::from_path(&file.file_name).first_or_octet_stream()
}
