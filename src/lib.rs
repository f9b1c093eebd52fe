//! Chamfer-distance template matching for rasterized music symbols.
//!
//! The crate turns a binarized page image into a dense chamfer
//! distance-to-foreground table, builds weighted key-point templates of note
//! head shapes per interline (the nominal staff line spacing), and scans the
//! table for anchor positions where a template fits, producing scored
//! candidate locations. Ranking and non-minimum suppression are explicit
//! post-filters; optional parallelism via the `rayon` feature.

pub mod catalog;
pub mod distance;
pub mod image;
pub mod matching;
pub mod shape;
pub mod template;
pub mod util;

mod trace;

pub use catalog::{TemplateCatalog, TemplateFactory};
pub use distance::{ChamferMetric, ChamferTransform, DistanceTable};
pub use image::{BinaryView, Bitmap};
pub use matching::nms::{sort_by_score, suppress_non_minima};
pub use matching::{DistanceMatcher, PixelDistance, BACKGROUND_REFERENCE_DEPTH};
pub use shape::Shape;
pub use template::render::{OvalRenderer, ShapeRenderer};
pub use template::{KeyPoint, KeyPointKind, Template, TemplateBuilder};
pub use util::{ChamferMatchError, ChamferMatchResult};
