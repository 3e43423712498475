mod cli;
mod config;
mod destination;
mod error;
mod plan;
mod verbosity;

use crate::{
    config::Options,
    error::{AppResult, ArgumentError},
    plan::EnvironmentPlan,
    verbosity::Level,
};
use console::style;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        let code = if e.downcast_ref::<ArgumentError>().is_some() {
            2
        } else {
            1
        };
        std::process::exit(code);
    }
}

fn run() -> AppResult<()> {
    let matched = match cli::match_args(&Options::default(), std::env::args_os()) {
        Ok(matched) => matched,
        // Help, version and usage errors are rendered by clap itself.
        Err(ArgumentError::Usage(e)) => e.exit(),
        Err(e) => return Err(e.into()),
    };

    // Install logging before the destination walk so its checks are traced.
    init_tracing(verbosity::resolve(matched.options.verbosity_offset()));
    let options = matched.validate()?;

    let plan = EnvironmentPlan::from_options(&options)?;
    tracing::debug!(?plan, "Handing plan to the environment creator");

    println!("{}", plan.summary());
    println!(
        "\n{} Arguments validated; ready to create the environment.",
        style("🚀").green()
    );
    Ok(())
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the command line.
fn init_tracing(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.filter.into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(console::user_attended_stderr())
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(level = level.name, "Logging initialized");
}
