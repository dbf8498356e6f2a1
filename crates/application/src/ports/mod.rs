//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the runner core and external systems:
//! the HTTP transport, the host under test, the operator and the console.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod clock;
mod host;
mod http_transport;
mod operator;
mod reporter;

pub use clock::Clock;
pub use host::{DataSource, HookError, Host, HostError, LifecycleHook};
pub use http_transport::{HttpTransport, TransportError};
pub use operator::{OperatorPrompt, PromptError};
pub use reporter::{Diagnostics, HookStage, Reporter, SilentReporter};
