//! Report command - write the PDF report or print the report view.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(
    data_dir: PathBuf,
    analysis_id: u64,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let lens = super::open(data_dir)?;

    if json_output {
        let report = lens.bias_report(analysis_id)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let document = lens.report_document(analysis_id)?;
    let path = lens.render_report(analysis_id)?;

    print!("{}", document.to_text());
    println!();
    println!(
        "{} {}",
        "Wrote".green().bold(),
        path.display().to_string().white()
    );

    Ok(())
}
