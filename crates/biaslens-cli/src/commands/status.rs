//! Status command - show a stored analysis and its suggestions.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(
    data_dir: PathBuf,
    analysis_id: u64,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let lens = super::open(data_dir)?;
    let analysis = lens.analysis(analysis_id)?;
    let dataset = lens.dataset(analysis.dataset_id)?;
    let suggestions = lens.suggestions(analysis_id)?;

    let applied = suggestions.iter().filter(|s| s.applied).count();
    let pending = suggestions.len() - applied;
    let report_path = lens.report_path(analysis_id);

    if json_output {
        let status = serde_json::json!({
            "analysis": analysis,
            "dataset": {
                "id": dataset.id,
                "file_name": dataset.file_name,
                "processed": dataset.processed,
            },
            "suggestions": {
                "total": suggestions.len(),
                "pending": pending,
                "applied": applied,
            },
            "report": report_path.exists().then(|| report_path.display().to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Analysis".cyan().bold(),
        analysis.id.to_string().white().bold()
    );
    println!();
    println!("  Dataset:    {} ({})", dataset.id, dataset.file_name);
    println!("  Feature:    {}", analysis.sensitive_feature);
    println!("  Accuracy:   {:.2}%", analysis.accuracy);
    println!(
        "  Bias score: {}",
        super::analyze::format_bias(analysis.bias_score)
    );
    println!("  Analyzed:   {}", analysis.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!();

    println!("{}", "Suggestions:".yellow().bold());
    if suggestions.is_empty() {
        println!("  None generated yet");
    } else {
        println!("  Pending: {}", pending.to_string().yellow());
        println!("  Applied: {}", applied.to_string().green());
    }
    println!();

    if report_path.exists() {
        println!("Report: {}", report_path.display());
    } else {
        println!(
            "Report: {} (run {})",
            "not rendered".dimmed(),
            format!("biaslens report {}", analysis.id).cyan()
        );
    }

    Ok(())
}
