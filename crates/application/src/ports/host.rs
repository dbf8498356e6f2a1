//! Host application port
//!
//! The host is the server under test. The runner only needs to start it,
//! wait until it accepts requests and know where to send them. Hosts may
//! also hand out named data sources for setup/teardown hooks.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host could not be started.
    #[error("failed to start host: {0}")]
    Start(String),

    /// The host did not become ready.
    #[error("host not ready: {0}")]
    NotReady(String),
}

/// A named handle the host exposes to hooks (a database connector, a
/// fixture loader, ...).
pub trait DataSource: Send + Sync + fmt::Debug {
    /// Name the source is registered under.
    fn name(&self) -> &str;

    /// Access to the concrete type, for hooks that know what they expect.
    fn as_any(&self) -> &dyn Any;
}

/// Port for the application under test.
#[async_trait]
pub trait Host: Send + Sync {
    /// Triggers the host start.
    ///
    /// # Errors
    /// Returns [`HostError::Start`] if the host cannot be started.
    async fn start(&self) -> Result<(), HostError>;

    /// Resolves once the host accepts requests.
    ///
    /// # Errors
    /// Returns [`HostError::NotReady`] if it never does.
    async fn wait_ready(&self) -> Result<(), HostError>;

    /// Externally reachable base URL.
    fn base_url(&self) -> String;

    /// Looks up a named data source.
    fn data_source(&self, _name: &str) -> Option<Arc<dyn DataSource>> {
        None
    }
}

/// Error returned by a setup or teardown hook.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HookError(pub String);

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

/// Setup (`before`) or teardown (`after`) hook.
#[async_trait]
pub trait LifecycleHook: Send + Sync {
    /// Runs the hook with the configured data source, if any.
    ///
    /// # Errors
    /// A failing hook is reported but never fails the run.
    async fn call(&self, source: Option<Arc<dyn DataSource>>) -> Result<(), HookError>;
}
