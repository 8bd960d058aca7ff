//! Example: Analyze a hiring dataset with BiasLens.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path> <sensitive_feature>
//!
//! Example:
//!   cargo run --example analyze -- hiring.csv gender

use std::env;
use std::path::Path;

use biaslens::{BiasLens, BiasLensConfig};

fn main() -> biaslens::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --example analyze -- <file_path> <sensitive_feature>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example analyze -- hiring.csv gender");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let feature = &args[2];

    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("BiasLens Analysis: {} (by {})", path.display(), feature);
    println!("{}", separator);
    println!();

    // Records stay in memory; uploads and the PDF go to a scratch directory
    let data_dir = env::temp_dir().join("biaslens-example");
    let lens = BiasLens::in_memory(BiasLensConfig::new().with_data_dir(&data_dir));

    let dataset = lens.upload_path(path)?;
    let analysis = lens.analyze(dataset.id, feature)?;
    let report = lens.bias_report(analysis.id)?;

    println!("Accuracy:          {:.2}%", analysis.accuracy);
    println!("Bias score:        {:.4}", analysis.bias_score);
    println!("Male share:        {:.2}%", report.summary.male_percentage);
    println!("Female share:      {:.2}%", report.summary.female_percentage);
    println!();

    println!("BIAS LEVELS");
    println!("{}", "-".repeat(40));
    for level in &report.heatmap_data {
        println!("  {:15} {}", level.name, level.size);
    }
    println!();

    let outcome = lens.suggestions_for(analysis.id)?;
    println!("SUGGESTIONS ({})", outcome.suggestions.len());
    println!("{}", "-".repeat(40));
    for suggestion in &outcome.suggestions {
        println!("  [{}] {}", suggestion.category.label(), suggestion.text);
    }
    println!();

    lens.apply_fixes(analysis.id)?;
    let pdf = lens.render_report(analysis.id)?;
    println!("Report written to {}", pdf.display());

    Ok(())
}
