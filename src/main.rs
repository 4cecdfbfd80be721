mod config;
mod db;
mod import;
mod location;
mod models;
mod normalize;
mod run;
mod series;
mod ui;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().collect();
    let verbose = take_flag(&mut args, &["--verbose", "-v"]);
    init_logging(verbose);

    let config = config::Config::from_env()?;
    tracing::debug!(?config, "Resolved configuration");

    match args.len() {
        0 | 1 => {
            run::print_usage();
            Ok(())
        }
        _ => run::as_cli(&args, &config),
    }
}

/// RUST_LOG wins, then `--verbose`, else warnings only so command output
/// stays readable.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn take_flag(args: &mut Vec<String>, names: &[&str]) -> bool {
    let before = args.len();
    args.retain(|a| !names.contains(&a.as_str()));
    args.len() != before
}
