//src/sampler.rs

use ahash::{AHashMap, AHashSet};
use rand::seq::index;
use rand::Rng;

use crate::error::SelectError;
use crate::types::{GroupReportRow, Profile, Transcript};
use crate::SelectionResults;

/// Stratified sampling of transcripts by CDS count.
///
/// Each profile group gets a quota of `trunc(count * percentage / 100)`
/// transcripts drawn uniformly without replacement from its bucket. Bucket
/// members left over, plus every transcript whose CDS count has no profile
/// entry, form a reservoir from which the remaining deficit is drawn
/// uniformly, so the output size is exactly `count`.
///
/// A bucket smaller than its quota is taken whole with a warning. A
/// reservoir smaller than the deficit is a hard error: sampling without
/// replacement cannot satisfy the request.
pub fn sample_by_profile<R: Rng>(
    transcripts: &[Transcript],
    profile: &Profile,
    count: usize,
    exclude: &AHashSet<String>,
    rng: &mut R,
) -> Result<SelectionResults, SelectError> {
    // Bin every non-excluded transcript by CDS count; anything without a
    // profile entry feeds the reservoir directly.
    let mut buckets: AHashMap<u32, Vec<&Transcript>> = AHashMap::new();
    for &cds_count in profile.keys() {
        buckets.insert(cds_count, Vec::new());
    }

    let mut reservoir: Vec<&Transcript> = Vec::new();

    for transcript in transcripts {
        if exclude.contains(&transcript.id) {
            continue;
        }
        match buckets.get_mut(&transcript.cds_count) {
            Some(bucket) => bucket.push(transcript),
            None => reservoir.push(transcript),
        }
    }

    let mut profile_ids = Vec::new();
    let mut profile_rows = Vec::with_capacity(profile.len());

    for (&cds_count, &percentage) in profile {
        let bucket = &buckets[&cds_count];
        let target = (count as f64 * (percentage / 100.0)).trunc() as usize;

        let chosen: Vec<usize> = if target <= bucket.len() {
            index::sample(rng, bucket.len(), target).into_vec()
        } else {
            log::warn!(
                "not enough transcripts with {} CDS segments to meet profile request ({} of {})",
                cds_count,
                bucket.len(),
                target
            );
            (0..bucket.len()).collect()
        };

        let chosen_set: AHashSet<usize> = chosen.iter().copied().collect();
        for (i, &transcript) in bucket.iter().enumerate() {
            if !chosen_set.contains(&i) {
                reservoir.push(transcript);
            }
        }

        let gathered = chosen.len();
        profile_rows.push(GroupReportRow {
            cds_count,
            target,
            gathered,
            fraction_of_target: if target == 0 {
                1.0
            } else {
                gathered as f64 / target as f64
            },
            unselected: bucket.len() - gathered,
        });

        profile_ids.extend(chosen.into_iter().map(|i| bucket[i].id.clone()));
    }

    // Quota truncation leaves a deficit that the reservoir absorbs. Quotas
    // can also overshoot `count` when the percentages sum past 100; the
    // subtraction saturates and no reservoir draw happens in that case.
    let deficit = count.saturating_sub(profile_ids.len());
    if deficit > reservoir.len() {
        return Err(SelectError::InsufficientData {
            needed: deficit,
            available: reservoir.len(),
        });
    }

    let reservoir_ids = index::sample(rng, reservoir.len(), deficit)
        .into_iter()
        .map(|i| reservoir[i].id.clone())
        .collect();

    Ok(SelectionResults {
        profile_ids,
        reservoir_ids,
        profile_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_transcripts(cds_count: u32, n: usize) -> Vec<Transcript> {
        (0..n)
            .map(|i| Transcript {
                id: format!("mRNA.c{}.{}", cds_count, i),
                gene_id: format!("gene.c{}.{}", cds_count, i),
                cds_count,
                annotation: None,
            })
            .collect()
    }

    #[test]
    fn test_even_split_profile_needs_no_reservoir() {
        let mut transcripts = make_transcripts(1, 10);
        transcripts.extend(make_transcripts(2, 10));

        let profile = Profile::from([(1, 50.0), (2, 50.0)]);
        let exclude = AHashSet::new();
        let mut rng = StdRng::seed_from_u64(42);

        let results =
            sample_by_profile(&transcripts, &profile, 10, &exclude, &mut rng).unwrap();

        assert_eq!(results.total_selected(), 10);
        assert!(results.reservoir_ids.is_empty());

        for row in &results.profile_rows {
            assert_eq!(row.target, 5);
            assert_eq!(row.gathered, 5);
            assert_eq!(row.unselected, 5);
            assert_eq!(row.fraction_of_target, 1.0);
        }

        let from_group_1 = results
            .profile_ids
            .iter()
            .filter(|id| id.starts_with("mRNA.c1."))
            .count();
        assert_eq!(from_group_1, 5);
    }

    #[test]
    fn test_bucket_shortfall_falls_back_to_reservoir() {
        // Only 3 single-CDS transcripts against a 100% quota of 5
        let mut transcripts = make_transcripts(1, 3);
        transcripts.extend(make_transcripts(2, 4));

        let profile = Profile::from([(1, 100.0)]);
        let exclude = AHashSet::new();
        let mut rng = StdRng::seed_from_u64(7);

        let results =
            sample_by_profile(&transcripts, &profile, 5, &exclude, &mut rng).unwrap();

        assert_eq!(results.total_selected(), 5);
        assert_eq!(results.profile_ids.len(), 3);
        assert_eq!(results.reservoir_ids.len(), 2);

        let row = &results.profile_rows[0];
        assert_eq!(row.target, 5);
        assert_eq!(row.gathered, 3);
        assert_eq!(row.unselected, 0);
        assert!(row.fraction_of_target < 1.0);

        // The fill can only have come from the unprofiled group
        assert!(results
            .reservoir_ids
            .iter()
            .all(|id| id.starts_with("mRNA.c2.")));
    }

    #[test]
    fn test_reservoir_shortfall_is_fatal() {
        let mut transcripts = make_transcripts(1, 3);
        transcripts.extend(make_transcripts(2, 1));

        let profile = Profile::from([(1, 100.0)]);
        let exclude = AHashSet::new();
        let mut rng = StdRng::seed_from_u64(7);

        let err = sample_by_profile(&transcripts, &profile, 5, &exclude, &mut rng)
            .unwrap_err();

        match err {
            SelectError::InsufficientData { needed, available } => {
                assert_eq!(needed, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected InsufficientData, got {other}"),
        }
    }

    #[test]
    fn test_excluded_ids_never_selected() {
        let transcripts = make_transcripts(1, 10);

        let profile = Profile::from([(1, 100.0)]);
        let exclude: AHashSet<String> =
            ["mRNA.c1.0", "mRNA.c1.1", "mRNA.c1.2"].iter().map(|s| s.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(3);

        let results =
            sample_by_profile(&transcripts, &profile, 7, &exclude, &mut rng).unwrap();

        assert_eq!(results.total_selected(), 7);
        for id in results.profile_ids.iter().chain(results.reservoir_ids.iter()) {
            assert!(!exclude.contains(id), "excluded id {id} was selected");
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let mut transcripts = make_transcripts(1, 20);
        transcripts.extend(make_transcripts(2, 20));
        transcripts.extend(make_transcripts(7, 9));

        let profile = Profile::from([(1, 40.0), (2, 35.0)]);
        let exclude = AHashSet::new();

        let mut rng = StdRng::seed_from_u64(1234);
        let first =
            sample_by_profile(&transcripts, &profile, 30, &exclude, &mut rng).unwrap();

        let mut rng = StdRng::seed_from_u64(1234);
        let second =
            sample_by_profile(&transcripts, &profile, 30, &exclude, &mut rng).unwrap();

        assert_eq!(first.profile_ids, second.profile_ids);
        assert_eq!(first.reservoir_ids, second.reservoir_ids);
        assert_eq!(first.total_selected(), 30);
    }

    #[test]
    fn test_truncation_slack_is_filled_from_profiled_leftovers() {
        // 33.3% of 10 truncates to 3 per group, leaving a deficit of 1 even
        // though every transcript has a profile entry.
        let mut transcripts = make_transcripts(1, 10);
        transcripts.extend(make_transcripts(2, 10));
        transcripts.extend(make_transcripts(3, 10));

        let profile = Profile::from([(1, 33.3), (2, 33.3), (3, 33.3)]);
        let exclude = AHashSet::new();
        let mut rng = StdRng::seed_from_u64(99);

        let results =
            sample_by_profile(&transcripts, &profile, 10, &exclude, &mut rng).unwrap();

        assert_eq!(results.profile_ids.len(), 9);
        assert_eq!(results.reservoir_ids.len(), 1);
        assert_eq!(results.total_selected(), 10);
    }

    #[test]
    fn test_overfull_profile_skips_reservoir_draw() {
        let mut transcripts = make_transcripts(1, 10);
        transcripts.extend(make_transcripts(2, 10));

        // Quotas of 6 + 6 exceed the requested 10; no reservoir draw
        let profile = Profile::from([(1, 60.0), (2, 60.0)]);
        let exclude = AHashSet::new();
        let mut rng = StdRng::seed_from_u64(5);

        let results =
            sample_by_profile(&transcripts, &profile, 10, &exclude, &mut rng).unwrap();

        assert_eq!(results.profile_ids.len(), 12);
        assert!(results.reservoir_ids.is_empty());
    }
}
