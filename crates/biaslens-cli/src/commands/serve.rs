//! Serve command - run the HTTP API.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;

use crate::server::{app, state::AppState};

pub fn run(data_dir: PathBuf, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let lens = super::open(data_dir.clone())?;
    let state = AppState::new(Arc::new(lens));

    println!();
    println!(
        "{} {}",
        "Starting BiasLens API at".cyan().bold(),
        format!("http://{}:{}", host, port).white().bold()
    );
    println!("  Data: {}", data_dir.display());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, &host, port))
}
