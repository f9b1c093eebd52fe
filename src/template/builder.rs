//! Template construction from rendered reference bitmaps.
//!
//! Key points are sampled from the reference bitmap's geometry: every contour
//! pixel becomes a foreground key point, the background ring two pixel units
//! outside the contour becomes background key points, and for annular shapes
//! the hole interior contributes background key points as well. The sampling
//! depth comes from the bitmap's own distance-to-foreground table. Weights
//! are uniform.

use crate::distance::{ChamferTransform, DistanceTable};
use crate::image::Bitmap;
use crate::shape::Shape;
use crate::template::{KeyPoint, KeyPointKind, Template};
use crate::util::ChamferMatchResult;

/// Minimum depth, in pixel units, of background samples from the contour.
const BACKGROUND_RING_DEPTH: u32 = 2;

/// Builds templates from reference bitmaps.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateBuilder {
    transform: ChamferTransform,
}

impl TemplateBuilder {
    /// Creates a builder using the standard chamfer mask.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with a custom transform.
    pub fn with_transform(transform: ChamferTransform) -> Self {
        Self { transform }
    }

    /// Samples `reference` into a template for `shape` at `interline`.
    ///
    /// The anchor is the bitmap center; all offsets are relative to it.
    pub fn build(
        &self,
        shape: Shape,
        interline: u32,
        reference: &Bitmap,
    ) -> ChamferMatchResult<Template> {
        let view = reference.view();
        let width = reference.width();
        let height = reference.height();
        let fore = self.transform.compute_to_foreground(view)?;
        let norm = fore.normalizer();
        let exterior = exterior_mask(reference);

        let anchor_x = (width / 2) as i32;
        let anchor_y = (height / 2) as i32;
        let mut points = Vec::new();
        // Deepest hole pixel, kept as a fallback for shallow holes.
        let mut deepest_hole: Option<(usize, usize, u32)> = None;
        let mut hole_sampled = false;

        for y in 0..height {
            for x in 0..width {
                let offset = |kind| KeyPoint {
                    dx: x as i32 - anchor_x,
                    dy: y as i32 - anchor_y,
                    kind,
                    weight: 1.0,
                };
                if reference.is_foreground(x, y) {
                    if is_contour(reference, x, y) {
                        points.push(offset(KeyPointKind::Foreground));
                    }
                    continue;
                }

                let depth = fore.value(x, y) / norm;
                if exterior[y * width + x] {
                    if depth >= BACKGROUND_RING_DEPTH && touches_shallower(&fore, x, y, norm) {
                        points.push(offset(KeyPointKind::Background));
                    }
                } else {
                    let raw = fore.value(x, y);
                    if deepest_hole.map_or(true, |(_, _, best)| raw > best) {
                        deepest_hole = Some((x, y, raw));
                    }
                    if depth >= BACKGROUND_RING_DEPTH {
                        points.push(offset(KeyPointKind::Background));
                        hole_sampled = true;
                    }
                }
            }
        }

        if shape.has_hole() && !hole_sampled {
            if let Some((x, y, _)) = deepest_hole {
                points.push(KeyPoint {
                    dx: x as i32 - anchor_x,
                    dy: y as i32 - anchor_y,
                    kind: KeyPointKind::Background,
                    weight: 1.0,
                });
            }
        }

        Template::new(shape, interline, points)
    }
}

/// A foreground pixel lies on the contour when a 4-neighbor is background or
/// the pixel touches the bitmap border.
fn is_contour(bitmap: &Bitmap, x: usize, y: usize) -> bool {
    let width = bitmap.width();
    let height = bitmap.height();
    if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
        return true;
    }
    !bitmap.is_foreground(x - 1, y)
        || !bitmap.is_foreground(x + 1, y)
        || !bitmap.is_foreground(x, y - 1)
        || !bitmap.is_foreground(x, y + 1)
}

/// Whether some 8-neighbor sits strictly inside the background ring depth.
fn touches_shallower(fore: &DistanceTable, x: usize, y: usize, norm: u32) -> bool {
    let x = x as i64;
    let y = y as i64;
    for dy in -1..=1i64 {
        for dx in -1..=1i64 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 {
                continue;
            }
            if let Some(value) = fore.get(nx as usize, ny as usize) {
                if value / norm < BACKGROUND_RING_DEPTH {
                    return true;
                }
            }
        }
    }
    false
}

/// Flood-fills background from the border (4-connected) and returns the mask
/// of exterior background pixels; unreached background pixels are holes.
fn exterior_mask(bitmap: &Bitmap) -> Vec<bool> {
    let width = bitmap.width();
    let height = bitmap.height();
    let mut exterior = vec![false; width * height];
    let mut stack = Vec::new();

    let seed = |x: usize, y: usize, exterior: &mut Vec<bool>, stack: &mut Vec<(usize, usize)>| {
        if !bitmap.is_foreground(x, y) && !exterior[y * width + x] {
            exterior[y * width + x] = true;
            stack.push((x, y));
        }
    };
    for x in 0..width {
        seed(x, 0, &mut exterior, &mut stack);
        seed(x, height - 1, &mut exterior, &mut stack);
    }
    for y in 0..height {
        seed(0, y, &mut exterior, &mut stack);
        seed(width - 1, y, &mut exterior, &mut stack);
    }

    while let Some((x, y)) = stack.pop() {
        let visit = |nx: usize, ny: usize, exterior: &mut Vec<bool>, stack: &mut Vec<(usize, usize)>| {
            if !bitmap.is_foreground(nx, ny) && !exterior[ny * width + nx] {
                exterior[ny * width + nx] = true;
                stack.push((nx, ny));
            }
        };
        if x > 0 {
            visit(x - 1, y, &mut exterior, &mut stack);
        }
        if x + 1 < width {
            visit(x + 1, y, &mut exterior, &mut stack);
        }
        if y > 0 {
            visit(x, y - 1, &mut exterior, &mut stack);
        }
        if y + 1 < height {
            visit(x, y + 1, &mut exterior, &mut stack);
        }
    }
    exterior
}
