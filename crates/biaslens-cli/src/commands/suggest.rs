//! Suggest command - show remediation suggestions for an analysis.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(data_dir: PathBuf, analysis_id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let lens = super::open(data_dir)?;
    let outcome = lens.suggestions_for(analysis_id)?;
    let summary = &outcome.summary;

    println!(
        "{} {}",
        "Suggestions for analysis".cyan().bold(),
        analysis_id.to_string().white().bold()
    );
    println!();
    println!("  Accuracy:   {:.2}%", summary.accuracy);
    println!("  Bias score: {}", super::analyze::format_bias(summary.bias_score));
    println!(
        "  Groups:     male {:.2}%, female {:.2}%",
        summary.male_percentage, summary.female_percentage
    );
    println!();

    if outcome.suggestions.is_empty() {
        println!("{}", "No suggestions: no threshold was exceeded.".green());
        return Ok(());
    }

    for suggestion in &outcome.suggestions {
        let marker = if suggestion.applied {
            "applied".green()
        } else {
            "pending".yellow()
        };
        println!(
            "  [{}] {:10} {}",
            marker,
            suggestion.category.label(),
            suggestion.text
        );
    }

    if !outcome.created {
        println!();
        println!("{}", "(previously generated)".dimmed());
    }

    Ok(())
}
