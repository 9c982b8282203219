use clap::Parser;
use proxyaddr_core::cli::{self, Command};
use proxyaddr_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "proxyaddr",
    version,
    about = "proxyaddr: resolve the originating address of proxied HTTP requests"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();

    init_logging();

    if let Err(e) = cli::run(cli.command) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
