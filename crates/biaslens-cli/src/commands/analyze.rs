//! Analyze command - compute accuracy and the fairness gap for a dataset.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(
    data_dir: PathBuf,
    dataset_id: u64,
    feature: String,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let lens = super::open(data_dir)?;
    let dataset = lens.dataset(dataset_id)?;

    println!(
        "{} {} by {}",
        "Analyzing".cyan().bold(),
        dataset.file_name.white(),
        feature.white().bold()
    );

    let analysis = lens.analyze(dataset_id, &feature)?;

    if verbose {
        println!("  Dataset file: {}", dataset.file.display());
        println!("  Analyzed at:  {}", analysis.analyzed_at.to_rfc3339());
    }

    println!();
    println!("  Accuracy:   {}", format!("{:.2}%", analysis.accuracy).white().bold());
    println!("  Bias score: {}", format_bias(analysis.bias_score));
    println!();
    println!(
        "Saved analysis {}. Next: {}",
        analysis.id.to_string().white().bold(),
        format!("biaslens suggest {}", analysis.id).cyan()
    );

    Ok(())
}

/// Bias score colored by how far it is from parity.
pub(crate) fn format_bias(score: f64) -> colored::ColoredString {
    let text = format!("{:.4}", score);
    if score > 0.5 {
        text.red().bold()
    } else if score > 0.2 {
        text.yellow()
    } else {
        text.green()
    }
}
