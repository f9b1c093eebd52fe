//! Ranking and non-minimum suppression post-filters.
//!
//! Both are explicit, optional steps on top of the raw scan so that the
//! exhaustive-scan contract of `match_all` stays simple.

use crate::matching::{pixel_cmp_asc, PixelDistance};

/// Sorts candidates by ascending score with deterministic tie-breaks.
pub fn sort_by_score(matches: &mut [PixelDistance]) {
    matches.sort_by(pixel_cmp_asc);
}

/// Collapses near-duplicate anchors using Chebyshev distance.
///
/// Candidates are sorted by ascending score and kept if they are farther
/// than `radius` from every previously kept candidate, so each cluster is
/// represented by its lowest-score member. A zero radius only sorts.
pub fn suppress_non_minima(matches: &mut [PixelDistance], radius: usize) -> Vec<PixelDistance> {
    sort_by_score(matches);
    if radius == 0 {
        return matches.to_owned();
    }

    let mut kept: Vec<PixelDistance> = Vec::new();
    'outer: for candidate in matches.iter().copied() {
        for kept_candidate in kept.iter() {
            let dx = candidate.x.abs_diff(kept_candidate.x);
            let dy = candidate.y.abs_diff(kept_candidate.y);
            if dx.max(dy) <= radius {
                continue 'outer;
            }
        }
        kept.push(candidate);
    }
    kept
}
