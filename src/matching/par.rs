//! Rayon-parallel matching (feature-gated).
//!
//! The anchor scan is embarrassingly parallel: rows are scored on worker
//! threads against the shared read-only table and template, then concatenated
//! in row order, so the output is bit-identical to the sequential scan.

use crate::matching::{DistanceMatcher, PixelDistance};
use crate::template::Template;
use rayon::prelude::*;

impl DistanceMatcher<'_> {
    /// Row-parallel equivalent of [`match_all`](Self::match_all).
    ///
    /// Produces the same candidates in the same row-major order.
    pub fn match_all_par(&self, template: &Template, max_score: f32) -> Vec<PixelDistance> {
        let Some((xs, ys)) = self.anchor_ranges(template) else {
            return Vec::new();
        };

        let rows: Vec<Vec<PixelDistance>> = ys
            .into_par_iter()
            .map(|y| {
                let mut row = Vec::new();
                for x in xs.clone() {
                    let score = self.score_unchecked(template, x, y);
                    if score <= max_score {
                        row.push(PixelDistance { x, y, score });
                    }
                }
                row
            })
            .collect();

        rows.concat()
    }
}
