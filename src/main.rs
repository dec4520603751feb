use clap::Parser;
use slate::cli::commands::Cli;
use slate::cli::handlers;

fn main() {
    // RUST_LOG overrides; defaults to warnings only. The handle must stay
    // alive for the duration of the run.
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")
        .and_then(|l| l.start())
        .ok();

    let cli = Cli::parse();
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
