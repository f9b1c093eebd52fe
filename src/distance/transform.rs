//! Two-pass chamfer distance transform.
//!
//! The forward pass (top-left to bottom-right) relaxes each cell over its
//! west, north-west, north, and north-east neighbors; the backward pass
//! (bottom-right to top-left) relaxes over the mirrored set. Target cells
//! start at 0 and every other cell at the saturating sentinel, so two passes
//! propagate the minimum chamfer-weighted path cost to the nearest target.

use crate::distance::DistanceTable;
use crate::image::BinaryView;
use crate::trace::{trace_event, trace_span};
use crate::util::ChamferMatchResult;

/// Chamfer mask weights approximating Euclidean distance.
///
/// The orthogonal weight doubles as the table normalizer: raw table values
/// divided by `ortho` are comparable to pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChamferMetric {
    /// Cost of a horizontal or vertical step.
    pub ortho: u32,
    /// Cost of a diagonal step.
    pub diag: u32,
}

impl Default for ChamferMetric {
    fn default() -> Self {
        Self { ortho: 3, diag: 4 }
    }
}

/// Computes chamfer distance tables from binary images.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChamferTransform {
    metric: ChamferMetric,
}

impl ChamferTransform {
    /// Creates a transform with the standard 3-4 mask.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transform with custom mask weights.
    pub fn with_metric(metric: ChamferMetric) -> Self {
        Self { metric }
    }

    /// Returns the mask weights in use.
    pub fn metric(&self) -> ChamferMetric {
        self.metric
    }

    /// Computes the distance of every cell to the nearest foreground pixel.
    ///
    /// Foreground cells are exactly 0. Deterministic: identical inputs yield
    /// bit-identical tables.
    pub fn compute_to_foreground(&self, image: BinaryView<'_>) -> ChamferMatchResult<DistanceTable> {
        self.compute(image, true)
    }

    /// Computes the distance of every cell to the nearest background pixel.
    pub fn compute_to_background(&self, image: BinaryView<'_>) -> ChamferMatchResult<DistanceTable> {
        self.compute(image, false)
    }

    fn compute(&self, image: BinaryView<'_>, target: bool) -> ChamferMatchResult<DistanceTable> {
        let width = image.width();
        let height = image.height();
        let _span = trace_span!("chamfer_transform", width = width, height = height).entered();

        let ChamferMetric { ortho, diag } = self.metric;
        let mut table = DistanceTable::filled(width, height, DistanceTable::UNREACHABLE, ortho);
        let mut targets = 0usize;
        for y in 0..height {
            for x in 0..width {
                if image.is_foreground(x, y) == target {
                    table.set(x, y, 0);
                    targets += 1;
                }
            }
        }

        // Forward pass: relax over already-visited neighbors in scan order.
        for y in 0..height {
            for x in 0..width {
                let mut best = table.value(x, y);
                if best == 0 {
                    continue;
                }
                if x > 0 {
                    best = best.min(table.value(x - 1, y).saturating_add(ortho));
                }
                if y > 0 {
                    best = best.min(table.value(x, y - 1).saturating_add(ortho));
                    if x > 0 {
                        best = best.min(table.value(x - 1, y - 1).saturating_add(diag));
                    }
                    if x + 1 < width {
                        best = best.min(table.value(x + 1, y - 1).saturating_add(diag));
                    }
                }
                table.set(x, y, best);
            }
        }

        // Backward pass over the mirrored neighbor set.
        for y in (0..height).rev() {
            for x in (0..width).rev() {
                let mut best = table.value(x, y);
                if best == 0 {
                    continue;
                }
                if x + 1 < width {
                    best = best.min(table.value(x + 1, y).saturating_add(ortho));
                }
                if y + 1 < height {
                    best = best.min(table.value(x, y + 1).saturating_add(ortho));
                    if x + 1 < width {
                        best = best.min(table.value(x + 1, y + 1).saturating_add(diag));
                    }
                    if x > 0 {
                        best = best.min(table.value(x - 1, y + 1).saturating_add(diag));
                    }
                }
                table.set(x, y, best);
            }
        }

        trace_event!("chamfer_transform_done", targets = targets);
        Ok(table)
    }
}
