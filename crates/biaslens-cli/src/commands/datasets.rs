//! Datasets command - list uploaded datasets.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(data_dir: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let lens = super::open(data_dir)?;
    let datasets = lens.datasets()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&datasets)?);
        return Ok(());
    }

    if datasets.is_empty() {
        println!(
            "No datasets uploaded (run {})",
            "biaslens upload <FILE>".cyan()
        );
        return Ok(());
    }

    println!("{}", "Datasets".cyan().bold());
    println!();
    for dataset in &datasets {
        let state = if dataset.processed {
            "analyzed".green()
        } else {
            "pending".yellow()
        };
        println!(
            "  {:>4}  {}  {}  {}",
            dataset.id.to_string().white().bold(),
            dataset.uploaded_at.format("%Y-%m-%d %H:%M"),
            state,
            dataset.file_name
        );
    }

    Ok(())
}
