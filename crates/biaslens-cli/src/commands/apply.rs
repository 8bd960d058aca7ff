//! Apply command - mark pending suggestions as applied.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(data_dir: PathBuf, analysis_id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let lens = super::open(data_dir)?;
    let applied = lens.apply_fixes(analysis_id)?;

    if applied == 0 {
        println!("{}", "No pending fixes to apply.".yellow());
    } else {
        println!(
            "{} {} fix(es) for analysis {}",
            "Applied".green().bold(),
            applied.to_string().white().bold(),
            analysis_id
        );
    }
    println!(
        "Next: {}",
        format!("biaslens report {}", analysis_id).cyan()
    );

    Ok(())
}
