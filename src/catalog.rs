//! Per-interline template catalogs with lazy memoized construction.
//!
//! A catalog holds one template per shape for a single interline and is
//! immutable once published. The factory owns the renderer and the catalog
//! cache; it is an explicit object rather than process-global state, so each
//! processing session (or test) can hold an isolated instance.

use crate::shape::Shape;
use crate::template::render::{OvalRenderer, ShapeRenderer};
use crate::template::{Template, TemplateBuilder};
use crate::trace::{trace_event, trace_span};
use crate::util::{ChamferMatchError, ChamferMatchResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Immutable set of templates for one interline.
pub struct TemplateCatalog {
    interline: u32,
    templates: HashMap<Shape, Arc<Template>>,
}

impl TemplateCatalog {
    fn build(
        renderer: &(dyn ShapeRenderer + Send + Sync),
        builder: &TemplateBuilder,
        shapes: &[Shape],
        interline: u32,
    ) -> ChamferMatchResult<Self> {
        let _span = trace_span!("catalog_build", interline = interline).entered();
        let mut templates = HashMap::with_capacity(shapes.len());
        for &shape in shapes {
            let reference = renderer.render(shape, interline)?;
            let template = builder.build(shape, interline, &reference)?;
            templates.insert(shape, Arc::new(template));
        }
        trace_event!("catalog_built", shapes = templates.len());
        Ok(Self {
            interline,
            templates,
        })
    }

    /// Returns the interline this catalog was built for.
    pub fn interline(&self) -> u32 {
        self.interline
    }

    /// Returns the template for `shape`.
    ///
    /// A missing template is reported as `UnknownShape`, never a silent
    /// absence.
    pub fn lookup(&self, shape: Shape) -> ChamferMatchResult<&Arc<Template>> {
        self.templates
            .get(&shape)
            .ok_or(ChamferMatchError::UnknownShape {
                shape,
                interline: self.interline,
            })
    }

    /// Returns the shapes present in this catalog, in arbitrary order.
    pub fn shapes(&self) -> impl Iterator<Item = Shape> + '_ {
        self.templates.keys().copied()
    }
}

/// Owned registry of catalogs, built lazily once per interline.
pub struct TemplateFactory {
    renderer: Box<dyn ShapeRenderer + Send + Sync>,
    builder: TemplateBuilder,
    shapes: Vec<Shape>,
    catalogs: Mutex<HashMap<u32, Arc<TemplateCatalog>>>,
}

impl Default for TemplateFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateFactory {
    /// Creates a factory using the built-in renderer and every known shape.
    pub fn new() -> Self {
        Self::with_renderer(Box::new(OvalRenderer))
    }

    /// Creates a factory with a custom renderer.
    pub fn with_renderer(renderer: Box<dyn ShapeRenderer + Send + Sync>) -> Self {
        Self {
            renderer,
            builder: TemplateBuilder::new(),
            shapes: Shape::ALL.to_vec(),
            catalogs: Mutex::new(HashMap::new()),
        }
    }

    /// Restricts the factory to a subset of shapes.
    pub fn with_shapes(mut self, shapes: Vec<Shape>) -> Self {
        self.shapes = shapes;
        self
    }

    /// Returns the catalog for `interline`, building it on first request.
    ///
    /// The build happens under the factory lock: the first caller wins,
    /// concurrent callers block and then receive the published catalog. A
    /// failed build publishes nothing, so a later request retries.
    pub fn catalog(&self, interline: u32) -> ChamferMatchResult<Arc<TemplateCatalog>> {
        let mut catalogs = self
            .catalogs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(catalog) = catalogs.get(&interline) {
            return Ok(Arc::clone(catalog));
        }
        let built = Arc::new(TemplateCatalog::build(
            self.renderer.as_ref(),
            &self.builder,
            &self.shapes,
            interline,
        )?);
        catalogs.insert(interline, Arc::clone(&built));
        Ok(built)
    }
}
