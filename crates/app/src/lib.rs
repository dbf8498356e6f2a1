//! Sequent command line front end.
//!
//! Wires the console reporter, the terminal prompt and the reqwest
//! transport into a [`RunSession`](sequent_application::RunSession) for a
//! suite file.

pub mod cli;

pub use cli::{Cli, CliError, Command, ListArgs, RunArgs, execute, list_suite, outcome_code, run_suite};
