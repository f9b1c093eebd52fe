//! Distance matching of templates against a chamfer table.
//!
//! The matcher slides a template anchor over every position where the full
//! template extent stays in bounds and scores each placement from the
//! distance table alone. It is a pure function of its inputs: the table and
//! template are read-only and results carry no identity beyond their fields.

use crate::distance::DistanceTable;
use crate::template::{KeyPointKind, Template};
use crate::trace::{trace_event, trace_span};
use std::cmp::Ordering;
use std::ops::RangeInclusive;

pub mod nms;
#[cfg(feature = "rayon")]
mod par;

/// Reference depth, in pixel units, for background key points.
///
/// A background sample closer to foreground than this depth is penalized in
/// proportion to the shortfall; anything at or beyond it contributes nothing.
pub const BACKGROUND_REFERENCE_DEPTH: f32 = 1.5;

/// Scored candidate anchor location; lower scores are better fits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelDistance {
    /// Anchor column.
    pub x: usize,
    /// Anchor row.
    pub y: usize,
    /// Normalized weighted mean of key point penalties.
    pub score: f32,
}

/// Total order by ascending score with deterministic `(y, x)` tie-breaks.
pub(crate) fn pixel_cmp_asc(a: &PixelDistance, b: &PixelDistance) -> Ordering {
    a.score
        .total_cmp(&b.score)
        .then_with(|| a.y.cmp(&b.y))
        .then_with(|| a.x.cmp(&b.x))
}

/// Scans a distance table with key-point templates.
pub struct DistanceMatcher<'a> {
    distances: &'a DistanceTable,
}

impl<'a> DistanceMatcher<'a> {
    /// Creates a matcher over a computed distance table.
    pub fn new(distances: &'a DistanceTable) -> Self {
        Self { distances }
    }

    /// Returns the table this matcher scans.
    pub fn distances(&self) -> &'a DistanceTable {
        self.distances
    }

    /// Scores every valid anchor position and retains those at or below
    /// `max_score`.
    ///
    /// Anchors are visited in row-major order and results are returned in
    /// that order, unranked; use [`nms::sort_by_score`] or
    /// [`nms::suppress_non_minima`] to post-process. Passing `f32::MAX`
    /// retains every candidate. When the template does not fit the table,
    /// the result is empty.
    pub fn match_all(&self, template: &Template, max_score: f32) -> Vec<PixelDistance> {
        let Some((xs, ys)) = self.anchor_ranges(template) else {
            return Vec::new();
        };
        let _span = trace_span!(
            "match_all",
            width = self.distances.width(),
            height = self.distances.height()
        )
        .entered();

        let mut results = Vec::new();
        for y in ys {
            for x in xs.clone() {
                let score = self.score_unchecked(template, x, y);
                if score <= max_score {
                    results.push(PixelDistance { x, y, score });
                }
            }
        }
        trace_event!("match_all_done", retained = results.len());
        results
    }

    /// Scores one anchor position, or `None` when the template extent leaves
    /// the table.
    pub fn score_at(&self, template: &Template, x: usize, y: usize) -> Option<f32> {
        let (xs, ys) = self.anchor_ranges(template)?;
        if !xs.contains(&x) || !ys.contains(&y) {
            return None;
        }
        Some(self.score_unchecked(template, x, y))
    }

    /// Valid anchor ranges keeping the full template extent in bounds.
    fn anchor_ranges(
        &self,
        template: &Template,
    ) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        let width = self.distances.width();
        let height = self.distances.height();
        let hw = template.half_width();
        let hh = template.half_height();
        if width <= 2 * hw || height <= 2 * hh {
            return None;
        }
        Some((hw..=width - 1 - hw, hh..=height - 1 - hh))
    }

    /// Scores an anchor whose template extent is known to be in bounds.
    fn score_unchecked(&self, template: &Template, x: usize, y: usize) -> f32 {
        let norm = self.distances.normalizer() as f32;
        let mut total = 0.0f32;
        for kp in template.points() {
            let px = (x as i32 + kp.dx) as usize;
            let py = (y as i32 + kp.dy) as usize;
            let dist = self.distances.value(px, py) as f32 / norm;
            total += match kp.kind {
                KeyPointKind::Foreground => kp.weight * dist,
                KeyPointKind::Background => {
                    kp.weight * (BACKGROUND_REFERENCE_DEPTH - dist).max(0.0)
                }
            };
        }
        total / template.weight_sum()
    }
}
