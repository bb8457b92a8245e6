use uuid::Uuid;

use crate::geometry;

/// Interaction thresholds and defaults, all in percentage-of-container units.
pub mod defaults {
    /// Minimum |width| and |height| for a committed rectangle or circle.
    pub const MIN_SHAPE_EXTENT: f64 = 1.0;
    /// Minimum euclidean length for a committed arrow.
    pub const MIN_ARROW_LENGTH: f64 = 5.0;
    /// Pointer moves closer than this to the last pencil point are dropped.
    pub const PENCIL_POINT_TOLERANCE: f64 = 0.1;
    /// Hit radius around a text anchor.
    pub const TEXT_HIT_RADIUS: f64 = 5.0;
    /// Hit radius around pencil path vertices.
    pub const PENCIL_HIT_RADIUS: f64 = 2.0;
    /// Maximum distance from an arrow segment that still counts as a hit.
    pub const ARROW_HIT_RADIUS: f64 = 3.0;
    /// Anchor radius used by the coarse nearby-erase fallback.
    pub const NEARBY_ERASE_RADIUS: f64 = 5.0;
    /// Default stroke/text color.
    pub const COLOR: &str = "#FF0000";
}

/// A point in percentage-of-container space (0 to 100 on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Annotation kind tag, matching the wire `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Rectangle,
    Circle,
    Pencil,
    Arrow,
    Text,
}

impl AnnotationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Pencil => "pencil",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "rectangle" => Some(Self::Rectangle),
            "circle" => Some(Self::Circle),
            "pencil" => Some(Self::Pencil),
            "arrow" => Some(Self::Arrow),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Shape payload of an annotation.
///
/// Rectangle/circle store signed width/height deltas from the anchor; the
/// absolute value is what gets rendered. Pencil paths are ordered vertex
/// sequences, arrows a start/end pair, text an anchor plus content.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Pencil {
        points: Vec<Point>,
    },
    Arrow {
        start: Point,
        end: Point,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
    },
}

impl Shape {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Rectangle { .. } => AnnotationKind::Rectangle,
            Self::Circle { .. } => AnnotationKind::Circle,
            Self::Pencil { .. } => AnnotationKind::Pencil,
            Self::Arrow { .. } => AnnotationKind::Arrow,
            Self::Text { .. } => AnnotationKind::Text,
        }
    }

    /// Primary anchor of the shape (used by the nearby-erase fallback).
    pub fn anchor(&self) -> Point {
        match self {
            Self::Rectangle { x, y, .. } | Self::Circle { x, y, .. } | Self::Text { x, y, .. } => {
                Point::new(*x, *y)
            }
            Self::Pencil { points } => points.first().copied().unwrap_or_default(),
            Self::Arrow { start, .. } => *start,
        }
    }

    /// Type-specific minimum-content predicate.
    ///
    /// Drafts that fail this at pointer-up (or text submit) are discarded
    /// instead of being committed to the collection.
    pub fn has_content(&self) -> bool {
        match self {
            Self::Rectangle { width, height, .. } | Self::Circle { width, height, .. } => {
                width.abs() > defaults::MIN_SHAPE_EXTENT && height.abs() > defaults::MIN_SHAPE_EXTENT
            }
            Self::Pencil { points } => points.len() >= 2,
            Self::Arrow { start, end } => {
                geometry::distance(*start, *end) > defaults::MIN_ARROW_LENGTH
            }
            Self::Text { text, .. } => !text.trim().is_empty(),
        }
    }
}

/// A single annotation tied to a video timestamp and owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Unique within a collection; generated at creation time.
    pub id: String,
    pub color: String,
    /// Seconds into the video; whole seconds at commit time.
    pub timestamp: f64,
    /// Owner reference, stamped by the host before persisting.
    pub user_id: Option<String>,
    pub shape: Shape,
}

impl Annotation {
    /// Create an annotation with a freshly generated id.
    pub fn new(shape: Shape, color: impl Into<String>, timestamp: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            color: color.into(),
            timestamp: timestamp.max(0.0),
            user_id: None,
            shape,
        }
    }

    pub fn kind(&self) -> AnnotationKind {
        self.shape.kind()
    }

    pub fn anchor(&self) -> Point {
        self.shape.anchor()
    }

    pub fn has_content(&self) -> bool {
        self.shape.has_content()
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn new_annotation_gets_id_and_clamps_timestamp() {
        let a = super::Annotation::new(
            super::Shape::Text {
                x: 10.0,
                y: 20.0,
                text: "note".to_string(),
            },
            "#00FF00",
            -3.0,
        );
        assert!(!a.id.is_empty());
        assert_eq!(a.timestamp, 0.0);
        assert_eq!(a.kind(), super::AnnotationKind::Text);
        assert_eq!(a.user_id, None);
    }

    #[test]
    fn ids_are_unique() {
        let shape = super::Shape::Rectangle {
            x: 0.0,
            y: 0.0,
            width: 5.0,
            height: 5.0,
        };
        let a = super::Annotation::new(shape.clone(), "red", 0.0);
        let b = super::Annotation::new(shape, "red", 0.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn kind_round_trips_through_tag() {
        for kind in [
            super::AnnotationKind::Rectangle,
            super::AnnotationKind::Circle,
            super::AnnotationKind::Pencil,
            super::AnnotationKind::Arrow,
            super::AnnotationKind::Text,
        ] {
            assert_eq!(super::AnnotationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(super::AnnotationKind::parse("ellipse"), None);
    }

    #[test]
    fn shape_content_predicates() {
        // Rectangles and circles need both extents above the minimum,
        // regardless of drag direction.
        let rect = super::Shape::Rectangle {
            x: 10.0,
            y: 10.0,
            width: -4.0,
            height: 2.5,
        };
        assert!(rect.has_content());
        let flat = super::Shape::Circle {
            x: 10.0,
            y: 10.0,
            width: 8.0,
            height: 0.5,
        };
        assert!(!flat.has_content());

        let short_path = super::Shape::Pencil {
            points: vec![super::Point::new(1.0, 1.0)],
        };
        assert!(!short_path.has_content());

        let arrow = super::Shape::Arrow {
            start: super::Point::new(0.0, 0.0),
            end: super::Point::new(3.0, 4.0),
        };
        // Length exactly 5 is not enough; the predicate is strict.
        assert!(!arrow.has_content());
        let longer = super::Shape::Arrow {
            start: super::Point::new(0.0, 0.0),
            end: super::Point::new(3.1, 4.0),
        };
        assert!(longer.has_content());

        let blank = super::Shape::Text {
            x: 0.0,
            y: 0.0,
            text: "   ".to_string(),
        };
        assert!(!blank.has_content());
    }

    #[test]
    fn anchors_per_shape() {
        let pencil = super::Shape::Pencil {
            points: vec![super::Point::new(7.0, 8.0), super::Point::new(9.0, 9.0)],
        };
        assert_eq!(pencil.anchor(), super::Point::new(7.0, 8.0));

        let arrow = super::Shape::Arrow {
            start: super::Point::new(1.0, 2.0),
            end: super::Point::new(50.0, 60.0),
        };
        assert_eq!(arrow.anchor(), super::Point::new(1.0, 2.0));

        let empty_pencil = super::Shape::Pencil { points: vec![] };
        assert_eq!(empty_pencil.anchor(), super::Point::default());
    }
}
