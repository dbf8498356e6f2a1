//! Port adapters backed by external crates and the operating system.

mod remote_host;
mod reqwest_transport;
mod system_clock;

pub use remote_host::{ReadinessPolicy, RemoteHost};
pub use reqwest_transport::{ReqwestTransport, USER_AGENT};
pub use system_clock::SystemClock;
