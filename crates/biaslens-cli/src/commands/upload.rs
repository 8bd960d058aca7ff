//! Upload command - register a dataset file.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(data_dir: PathBuf, file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let lens = super::open(data_dir)?;
    let dataset = lens.upload_path(&file)?;

    println!(
        "{} {} as dataset {}",
        "Uploaded".green().bold(),
        dataset.file_name.white(),
        dataset.id.to_string().white().bold()
    );
    println!("  Stored at: {}", dataset.file.display());
    println!();
    println!(
        "Next: {}",
        format!("biaslens analyze {} <FEATURE>", dataset.id).cyan()
    );

    Ok(())
}
