//! Application use cases (business logic orchestration).

mod run_session;

pub use run_session::{RunSession, RunSessionInput};
