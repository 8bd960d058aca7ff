//! BiasLens CLI - fairness analysis for hiring-model predictions.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = cli.data_dir;
    let result = match cli.command {
        Commands::Serve { port, host } => commands::serve::run(data_dir, host, port),

        Commands::Upload { file } => commands::upload::run(data_dir, file),

        Commands::Datasets { json } => commands::datasets::run(data_dir, json),

        Commands::Analyze {
            dataset_id,
            feature,
        } => commands::analyze::run(data_dir, dataset_id, feature, cli.verbose),

        Commands::Suggest { analysis_id } => commands::suggest::run(data_dir, analysis_id),

        Commands::Apply { analysis_id } => commands::apply::run(data_dir, analysis_id),

        Commands::Report { analysis_id, json } => {
            commands::report::run(data_dir, analysis_id, json)
        }

        Commands::Status { analysis_id, json } => {
            commands::status::run(data_dir, analysis_id, json)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
