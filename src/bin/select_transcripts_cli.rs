//! Select a subset of transcripts whose coding-exon counts match a target
//! distribution.
//!
//! ```bash
//! # Pull 500 transcripts using the built-in CDS-count profile
//! select-transcripts -i transcripts.tsv -o selected_ids.txt -c 500
//!
//! # Reproducible run with an exclusion list and a custom profile
//! select-transcripts -i transcripts.tsv.gz -o ids.txt -c 500 \
//!     -e already_used.txt -p profile.tsv --seed 7
//! ```
//!
//! The input is a tab-delimited transcript table (`id`, `gene id`,
//! `CDS count`, optional annotation columns), optionally gzipped. The output
//! is a newline-delimited list of the selected transcript ids.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use biocode_rs::error::Result;
use biocode_rs::select_transcripts;
use biocode_rs::transcripts::read_profile_table;
use biocode_rs::types::Profile;

#[derive(Parser)]
#[command(name = "select-transcripts", version)]
#[command(about = "Sample transcripts to match a CDS-count distribution profile")]
struct Cli {
    /// Path to a transcript table to be read (TSV; .gz supported)
    #[arg(short = 'i', long)]
    input_file: PathBuf,

    /// Output ID list file to create
    #[arg(short = 'o', long)]
    output_file: PathBuf,

    /// Count of transcripts to pull
    #[arg(short = 'c', long)]
    count: usize,

    /// List of IDs to exclude
    #[arg(short = 'e', long)]
    exclude: Option<PathBuf>,

    /// Profile table (cds_count<TAB>percentage) overriding the built-in one
    #[arg(short = 'p', long)]
    profile: Option<PathBuf>,

    /// Fix the random seed for a reproducible selection
    #[arg(long)]
    seed: Option<u64>,
}

/// CDS-count profile observed on assembly 99-880; used when no profile table
/// is given.
fn default_profile() -> Profile {
    Profile::from([
        (1, 19.7),
        (2, 17.9),
        (3, 20.6),
        (4, 15.6),
        (5, 10.1),
        (6, 6.62),
        (7, 4.14),
        (8, 1.58),
        (9, 2.07),
    ])
}

fn spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    spinner.set_message(msg.to_string());
    spinner
}

fn run(cli: &Cli) -> Result<()> {
    let profile = match &cli.profile {
        Some(path) => read_profile_table(path)?,
        None => default_profile(),
    };

    let bar = spinner("Selecting transcripts...");
    let results = select_transcripts(
        &cli.input_file,
        cli.exclude.as_deref(),
        &profile,
        cli.count,
        cli.seed,
    )?;
    bar.finish_with_message(format!("Selected {} transcript(s).", results.total_selected()));

    let bar = spinner("Writing ID list...");
    fs::write(&cli.output_file, results.get_id_list_text())?;
    bar.finish_with_message(format!("Wrote {}.", cli.output_file.display()));

    println!("INFO: selected CDS profile:");
    print!("{}", results.get_profile_report());
    println!(
        "Total selected according to profile: {}",
        results.profile_ids.len()
    );
    println!(
        "Total selected randomly afterwards: {}",
        results.reservoir_ids.len()
    );

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
