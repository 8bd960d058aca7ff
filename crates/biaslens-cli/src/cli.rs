//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BiasLens: fairness analysis for hiring-model predictions
#[derive(Parser)]
#[command(name = "biaslens")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding uploads, reports and the repository file
    #[arg(long, global = true, env = "BIASLENS_DATA_DIR", default_value = biaslens::DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port for the server
        #[arg(short, long, env = "BIASLENS_PORT", default_value = "8000")]
        port: u16,

        /// Address to bind
        #[arg(long, env = "BIASLENS_HOST", default_value = "127.0.0.1")]
        host: String,
    },

    /// Register a dataset file
    Upload {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List uploaded datasets
    Datasets {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute accuracy and the fairness gap for a dataset
    Analyze {
        /// Dataset id returned by `upload`
        #[arg(value_name = "DATASET_ID")]
        dataset_id: u64,

        /// Sensitive attribute column (e.g., "gender")
        #[arg(value_name = "FEATURE")]
        feature: String,
    },

    /// Show remediation suggestions for an analysis
    Suggest {
        /// Analysis id returned by `analyze`
        #[arg(value_name = "ANALYSIS_ID")]
        analysis_id: u64,
    },

    /// Mark every pending suggestion of an analysis as applied
    Apply {
        /// Analysis id
        #[arg(value_name = "ANALYSIS_ID")]
        analysis_id: u64,
    },

    /// Write the PDF report for an analysis
    Report {
        /// Analysis id
        #[arg(value_name = "ANALYSIS_ID")]
        analysis_id: u64,

        /// Print the report view as JSON instead of writing a PDF
        #[arg(long)]
        json: bool,
    },

    /// Show a stored analysis and its suggestions
    Status {
        /// Analysis id
        #[arg(value_name = "ANALYSIS_ID")]
        analysis_id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
