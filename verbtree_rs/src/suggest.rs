//! "Did you mean" suggestions via Levenshtein distance.

use strsim::levenshtein;

/// Candidates within `max_distance` of `input` (case-insensitive), nearest
/// first, ties broken alphabetically, at most `limit` of them.
pub(crate) fn ranked<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    max_distance: usize,
    limit: usize,
) -> Vec<&'a str> {
    if max_distance == 0 || limit == 0 {
        return Vec::new();
    }

    let input_lower = input.to_lowercase();
    let mut matches: Vec<(usize, &str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = levenshtein(&input_lower, &candidate.to_lowercase());
            // Only suggest if distance is small
            (distance <= max_distance).then_some((distance, candidate))
        })
        .collect();
    matches.sort();
    matches.dedup();
    matches.into_iter().take(limit).map(|(_, c)| c).collect()
}

/// Single best candidate, if any is close enough.
pub(crate) fn closest<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    max_distance: usize,
) -> Option<&'a str> {
    ranked(input, candidates, max_distance, 1).into_iter().next()
}
