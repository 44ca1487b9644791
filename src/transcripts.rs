use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashSet;
use flate2::read::MultiGzDecoder;

use crate::annotation::{EcAnnotation, FunctionalAnnotation, GoAnnotation};
use crate::error::Result;
use crate::types::{Profile, Transcript};

/// Opens a text file, transparently decompressing when the name ends in ".gz".
fn open_maybe_gz(path: &Path) -> std::io::Result<Box<dyn BufRead>> {
    let f = File::open(path)?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    Ok(if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    })
}

/// Reads a transcript table in the format:
/// ```text
/// <transcript_id>\t<gene_id>\t<cds_count>[\t<product_name>[\t<go_ids>[\t<ec_numbers>]]]
/// ```
/// The GO and EC columns are comma-separated lists; both are validated, and a
/// malformed identifier fails the whole read. Lines starting with '#', lines
/// with fewer than three fields, and lines with a non-numeric count are
/// skipped.
pub fn read_transcript_table<P: AsRef<Path>>(path: P) -> Result<Vec<Transcript>> {
    let reader = open_maybe_gz(path.as_ref())?;
    let mut transcripts = Vec::new();

    for line_result in reader.lines() {
        let line = line_result?;
        if line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 3 {
            continue;
        }

        let id = parts[0].trim();
        if id.is_empty() {
            continue;
        }
        let gene_id = parts[1].trim();
        let cds_count: u32 = match parts[2].trim().parse() {
            Ok(n) => n,
            Err(_) => continue,
        };

        let annotation = parse_annotation_columns(&parts[3..])?;

        transcripts.push(Transcript {
            id: id.to_string(),
            gene_id: gene_id.to_string(),
            cds_count,
            annotation,
        });
    }

    Ok(transcripts)
}

/// Builds a `FunctionalAnnotation` from the optional trailing columns of a
/// transcript table row: product name, GO id list, EC number list.
fn parse_annotation_columns(columns: &[&str]) -> Result<Option<FunctionalAnnotation>> {
    if columns.is_empty() {
        return Ok(None);
    }

    let product_name = columns
        .first()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let mut annotation = FunctionalAnnotation::new(product_name, None);

    if let Some(go_column) = columns.get(1) {
        for go_id in go_column.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            annotation.add_go_annotation(GoAnnotation::new(go_id, "", "")?);
        }
    }

    if let Some(ec_column) = columns.get(2) {
        for number in ec_column.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            annotation.add_ec_number(EcAnnotation::new(number)?);
        }
    }

    Ok(Some(annotation))
}

/// Reads a newline-delimited list of transcript ids to leave out of sampling.
pub fn read_exclude_list<P: AsRef<Path>>(path: P) -> Result<AHashSet<String>> {
    let reader = open_maybe_gz(path.as_ref())?;
    let mut ids = AHashSet::new();

    for line_result in reader.lines() {
        let line = line_result?;
        let id = line.trim();
        if !id.is_empty() {
            ids.insert(id.to_string());
        }
    }

    Ok(ids)
}

/// Reads a sampling profile table of `<cds_count>\t<percentage>` lines.
/// Malformed lines are skipped, like the transcript table.
pub fn read_profile_table<P: AsRef<Path>>(path: P) -> Result<Profile> {
    let reader = open_maybe_gz(path.as_ref())?;
    let mut profile = Profile::new();

    for line_result in reader.lines() {
        let line = line_result?;
        if line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 2 {
            continue;
        }

        let cds_count: u32 = match parts[0].trim().parse() {
            Ok(n) => n,
            Err(_) => continue,
        };
        let percentage: f64 = match parts[1].trim().parse() {
            Ok(p) => p,
            Err(_) => continue,
        };

        profile.insert(cds_count, percentage);
    }

    Ok(profile)
}
