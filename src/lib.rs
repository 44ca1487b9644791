// src/lib.rs
pub mod annotation;
pub mod error;
pub mod sampler;
pub mod transcripts;
pub mod types;

use std::fmt::Write as FmtWrite;
use std::path::Path;

use ahash::AHashSet;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::Result;
use crate::sampler::sample_by_profile;
use crate::transcripts::{read_exclude_list, read_transcript_table};
use crate::types::{GroupReportRow, Profile};

/// A struct to hold selection results with minimal duplication.
/// Only structured data is stored; output text is generated on demand.
#[derive(Debug)]
pub struct SelectionResults {
    /// Ids drawn to meet the per-group quotas, in ascending CDS-count order.
    pub profile_ids: Vec<String>,

    /// Ids drawn at random from the reservoir to reach the requested count.
    pub reservoir_ids: Vec<String>,

    /// One report row per profile group.
    pub profile_rows: Vec<GroupReportRow>,
}

impl SelectionResults {
    pub fn total_selected(&self) -> usize {
        self.profile_ids.len() + self.reservoir_ids.len()
    }

    /// Generate the output id list text on demand: one id per line, quota
    /// selections first, reservoir fill after.
    pub fn get_id_list_text(&self) -> String {
        let mut output = String::new();
        for id in self.profile_ids.iter().chain(self.reservoir_ids.iter()) {
            writeln!(output, "{}", id).unwrap();
        }
        output
    }

    /// Generate the per-group selection report text on demand.
    pub fn get_profile_report(&self) -> String {
        let mut output = String::new();
        for row in &self.profile_rows {
            writeln!(
                output,
                "CDS_count:{}, target:{}, gathered:{}, target_frac:{:.4}, unselected:{}",
                row.cds_count, row.target, row.gathered, row.fraction_of_target, row.unselected
            )
            .unwrap();
        }
        output
    }
}

/// Unified entry point: read a transcript table (and optional exclusion
/// list), sample it against the profile, and return structured results.
///
/// Passing a `seed` makes the draw reproducible; otherwise the rng is seeded
/// from system entropy.
pub fn select_transcripts(
    input_path: &Path,
    exclude_path: Option<&Path>,
    profile: &Profile,
    count: usize,
    seed: Option<u64>,
) -> Result<SelectionResults> {
    // 1. Load input records
    let transcripts = read_transcript_table(input_path)?;

    // 2. Optional up-front exclusions
    let exclude = match exclude_path {
        Some(path) => read_exclude_list(path)?,
        None => AHashSet::new(),
    };

    // 3. Draw
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    sample_by_profile(&transcripts, profile, count, &exclude, &mut rng)
}
