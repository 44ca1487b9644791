//src/types.rs

use std::collections::BTreeMap;

use crate::annotation::FunctionalAnnotation;

/// Target percentage (0-100) per CDS count. A `BTreeMap` so that group
/// processing and reporting always run in ascending CDS-count order,
/// independent of how the profile was built.
pub type Profile = BTreeMap<u32, f64>;

/// A minimal representation of one mRNA transcript.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: String,
    /// Id of the parent gene.
    pub gene_id: String,
    /// Number of coding exons; the stratification key for sampling.
    pub cds_count: u32,
    /// Product-level annotation, when the input table carries one.
    pub annotation: Option<FunctionalAnnotation>,
}

/// A structured representation of one row in the per-group selection report.
#[derive(Debug, Clone)]
pub struct GroupReportRow {
    pub cds_count: u32,
    /// trunc(count * percentage / 100) for this group.
    pub target: usize,
    /// How many transcripts were actually drawn for this group.
    pub gathered: usize,
    /// gathered / target; below 1.0 when the bucket fell short. A zero
    /// target counts as met.
    pub fraction_of_target: f64,
    /// Bucket members passed on to the reservoir instead.
    pub unselected: usize,
}
