//! Weighted key-point templates.
//!
//! A template describes one shape at one interline as an ordered set of
//! weighted sample offsets around a central anchor, each expecting either
//! foreground or background under a good match. Templates are validated at
//! construction and immutable afterwards.

use crate::shape::Shape;
use crate::util::{ChamferMatchError, ChamferMatchResult};
use std::fmt::Write as _;

pub mod builder;
pub mod render;

pub use builder::TemplateBuilder;

/// What a key point expects to land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPointKind {
    /// The sample should sit on symbol ink.
    Foreground,
    /// The sample should sit clear of symbol ink.
    Background,
}

/// One weighted sample offset relative to the template anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyPoint {
    /// Horizontal offset from the anchor.
    pub dx: i32,
    /// Vertical offset from the anchor.
    pub dy: i32,
    /// Expected classification at the offset.
    pub kind: KeyPointKind,
    /// Positive reliability weight.
    pub weight: f32,
}

/// Immutable key-point descriptor of one shape at one interline.
pub struct Template {
    shape: Shape,
    interline: u32,
    points: Vec<KeyPoint>,
    half_width: usize,
    half_height: usize,
    weight_sum: f32,
}

impl Template {
    /// Builds a template from key points, validating its invariants.
    ///
    /// Fails with `DegenerateTemplate` when there are no key points, any
    /// weight is non-positive, or no foreground key point exists.
    pub fn new(
        shape: Shape,
        interline: u32,
        points: Vec<KeyPoint>,
    ) -> ChamferMatchResult<Self> {
        if points.is_empty() {
            return Err(ChamferMatchError::DegenerateTemplate {
                reason: "no key points",
            });
        }
        if points.iter().any(|kp| !(kp.weight > 0.0)) {
            return Err(ChamferMatchError::DegenerateTemplate {
                reason: "non-positive key point weight",
            });
        }
        if !points
            .iter()
            .any(|kp| kp.kind == KeyPointKind::Foreground)
        {
            return Err(ChamferMatchError::DegenerateTemplate {
                reason: "no foreground key point",
            });
        }

        let half_width = points
            .iter()
            .map(|kp| kp.dx.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        let half_height = points
            .iter()
            .map(|kp| kp.dy.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        let weight_sum = points.iter().map(|kp| kp.weight).sum();

        Ok(Self {
            shape,
            interline,
            points,
            half_width,
            half_height,
            weight_sum,
        })
    }

    /// Returns the shape this template describes.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the interline the template was built for.
    pub fn interline(&self) -> u32 {
        self.interline
    }

    /// Returns the key points in build order.
    pub fn points(&self) -> &[KeyPoint] {
        &self.points
    }

    /// Returns the maximal horizontal offset magnitude.
    pub fn half_width(&self) -> usize {
        self.half_width
    }

    /// Returns the maximal vertical offset magnitude.
    pub fn half_height(&self) -> usize {
        self.half_height
    }

    /// Returns the sum of key point weights (strictly positive).
    pub fn weight_sum(&self) -> f32 {
        self.weight_sum
    }

    /// Renders the key points as an ASCII grid for diagnostics.
    ///
    /// `F` marks foreground expectations, `B` background, `.` unsampled
    /// cells. Diagnostic only, no effect on matching.
    pub fn dump(&self) -> String {
        let width = 2 * self.half_width + 1;
        let height = 2 * self.half_height + 1;
        let mut grid = vec![b'.'; width * height];
        for kp in &self.points {
            let x = (kp.dx + self.half_width as i32) as usize;
            let y = (kp.dy + self.half_height as i32) as usize;
            grid[y * width + x] = match kp.kind {
                KeyPointKind::Foreground => b'F',
                KeyPointKind::Background => b'B',
            };
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} at interline {}: {} key points, half extent {}x{}",
            self.shape,
            self.interline,
            self.points.len(),
            self.half_width,
            self.half_height
        );
        for row in grid.chunks(width) {
            out.push_str(&String::from_utf8_lossy(row));
            out.push('\n');
        }
        out
    }
}
