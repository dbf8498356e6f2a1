//! Sequent - entry point.

use std::process::ExitCode;

use clap::Parser;
use sequent_infrastructure::init_logging;
use sequent_infrastructure::logging::default_directive;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = sequent::Cli::parse();
    init_logging(default_directive(cli.verbose));
    sequent::execute(cli).await
}
