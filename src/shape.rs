//! Note head shapes recognized by the template catalog.
//!
//! The set is a closed enumeration: adding a shape means extending the enum,
//! its sizing rule in the renderer, and nothing else.

use std::fmt;
use std::str::FromStr;

/// Head shapes a catalog can hold templates for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Filled oval head (quarter notes and shorter).
    NoteheadBlack,
    /// Cue-sized filled head.
    NoteheadBlackSmall,
    /// Hollow oval head (half notes).
    NoteheadVoid,
    /// Cue-sized hollow head.
    NoteheadVoidSmall,
    /// Whole-note head.
    WholeNote,
    /// Cue-sized whole-note head.
    WholeNoteSmall,
}

impl Shape {
    /// Every shape, in catalog build order.
    pub const ALL: [Shape; 6] = [
        Shape::NoteheadBlack,
        Shape::NoteheadBlackSmall,
        Shape::NoteheadVoid,
        Shape::NoteheadVoidSmall,
        Shape::WholeNote,
        Shape::WholeNoteSmall,
    ];

    /// Whether the rendered head encloses a background hole.
    pub fn has_hole(self) -> bool {
        !matches!(self, Shape::NoteheadBlack | Shape::NoteheadBlackSmall)
    }

    /// Whether this is a cue-sized variant.
    pub fn is_small(self) -> bool {
        matches!(
            self,
            Shape::NoteheadBlackSmall | Shape::NoteheadVoidSmall | Shape::WholeNoteSmall
        )
    }

    fn name(self) -> &'static str {
        match self {
            Shape::NoteheadBlack => "notehead-black",
            Shape::NoteheadBlackSmall => "notehead-black-small",
            Shape::NoteheadVoid => "notehead-void",
            Shape::NoteheadVoidSmall => "notehead-void-small",
            Shape::WholeNote => "whole-note",
            Shape::WholeNoteSmall => "whole-note-small",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| format!("unknown shape: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Shape;

    #[test]
    fn display_round_trips_through_from_str() {
        for shape in Shape::ALL {
            let parsed: Shape = shape.to_string().parse().unwrap();
            assert_eq!(parsed, shape);
        }
    }

    #[test]
    fn hole_classification_matches_head_kind() {
        assert!(!Shape::NoteheadBlack.has_hole());
        assert!(Shape::NoteheadVoid.has_hole());
        assert!(Shape::WholeNoteSmall.has_hole());
    }
}
