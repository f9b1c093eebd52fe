//! Reference-shape rendering.
//!
//! Rasterizing a symbolic shape at a given interline is an external
//! capability; [`ShapeRenderer`] is that seam, so callers can plug a music
//! font rasterizer. [`OvalRenderer`] is the built-in geometric stand-in:
//! axis-aligned filled or annular ellipses sized from the interline, enough
//! for catalogs to work out of the box.

use crate::image::Bitmap;
use crate::shape::Shape;
use crate::util::{ChamferMatchError, ChamferMatchResult};

/// Renders a shape's reference bitmap at a given interline.
pub trait ShapeRenderer {
    /// Returns a binary bitmap of `shape` sized for `interline`.
    fn render(&self, shape: Shape, interline: u32) -> ChamferMatchResult<Bitmap>;
}

/// Geometric renderer drawing heads as ellipses.
///
/// Plain heads are filled; holed heads subtract an inner ellipse. Cue-sized
/// variants use a 2/3 interline. Dimensions are forced odd so the anchor
/// falls on a pixel center.
#[derive(Clone, Copy, Debug, Default)]
pub struct OvalRenderer;

impl OvalRenderer {
    fn head_size(shape: Shape, interline: u32) -> (usize, usize) {
        let effective = if shape.is_small() {
            interline as f64 * 2.0 / 3.0
        } else {
            interline as f64
        };
        let width_ratio = match shape {
            Shape::WholeNote | Shape::WholeNoteSmall => 1.80,
            _ => 1.64,
        };
        let width = force_odd((effective * width_ratio).round() as usize);
        let height = force_odd((effective * 1.07).round() as usize);
        (width, height)
    }
}

impl ShapeRenderer for OvalRenderer {
    fn render(&self, shape: Shape, interline: u32) -> ChamferMatchResult<Bitmap> {
        if interline == 0 {
            return Err(ChamferMatchError::InvalidImage {
                width: 0,
                height: 0,
            });
        }

        let (width, height) = Self::head_size(shape, interline);
        let mut bitmap = Bitmap::new(width, height)?;

        let rx = width as f64 / 2.0;
        let ry = height as f64 / 2.0;
        let cx = (width - 1) as f64 / 2.0;
        let cy = (height - 1) as f64 / 2.0;
        let (hole_rx, hole_ry) = match shape {
            Shape::WholeNote | Shape::WholeNoteSmall => (rx * 0.62, ry * 0.38),
            _ => (rx * 0.55, ry * 0.45),
        };

        for y in 0..height {
            for x in 0..width {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                let outer = (dx / rx).powi(2) + (dy / ry).powi(2);
                if outer > 1.0 {
                    continue;
                }
                if shape.has_hole() {
                    let inner = (dx / hole_rx).powi(2) + (dy / hole_ry).powi(2);
                    if inner <= 1.0 {
                        continue;
                    }
                }
                bitmap.set(x, y, true);
            }
        }
        Ok(bitmap)
    }
}

fn force_odd(value: usize) -> usize {
    if value % 2 == 0 {
        value + 1
    } else {
        value
    }
}
