use tracing::warn;
use uuid::Uuid;
use va_annotations::{Annotation, AnnotationKind, Point, Shape, defaults};

use crate::records::{AnnotationRecord, PointRecord};

/// Placeholder content for text annotations that arrive without text.
pub const PLACEHOLDER_TEXT: &str = "Text annotation";

/// Convert a wire record into a domain annotation, repairing malformed
/// fields instead of rejecting them.
///
/// Returns `None` only for records whose `type` tag is unknown; those are
/// dropped (with a warning) since nothing sensible can be rendered for them.
pub fn record_to_annotation(record: AnnotationRecord) -> Option<Annotation> {
    let Some(kind) = AnnotationKind::parse(&record.kind) else {
        warn!(kind = %record.kind, "dropping annotation record with unknown type");
        return None;
    };

    let id = match record.id {
        Some(id) if !id.is_empty() => id,
        _ => {
            let id = Uuid::new_v4().to_string();
            warn!(%id, "annotation record missing id, generating one");
            id
        }
    };

    let shape = match kind {
        AnnotationKind::Rectangle => Shape::Rectangle {
            x: record.x,
            y: record.y,
            width: record.width,
            height: record.height,
        },
        AnnotationKind::Circle => Shape::Circle {
            x: record.x,
            y: record.y,
            width: record.width,
            height: record.height,
        },
        AnnotationKind::Pencil => Shape::Pencil {
            points: repaired_points(&id, record.x, record.y, record.points),
        },
        AnnotationKind::Arrow => Shape::Arrow {
            start: Point::new(
                record.start_x.unwrap_or(record.x),
                record.start_y.unwrap_or(record.y),
            ),
            end: Point::new(
                record.end_x.unwrap_or(record.x),
                record.end_y.unwrap_or(record.y),
            ),
        },
        AnnotationKind::Text => Shape::Text {
            x: record.x,
            y: record.y,
            text: repaired_text(&id, record.text),
        },
    };

    Some(Annotation {
        id,
        color: record
            .color
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| defaults::COLOR.to_string()),
        timestamp: record.timestamp.max(0.0),
        user_id: record.user_id,
        shape,
    })
}

/// Convert a domain annotation to its wire record, applying the same repair
/// rules on the way out so malformed data never reaches the service.
pub fn annotation_to_record(annotation: &Annotation) -> AnnotationRecord {
    let mut record = AnnotationRecord {
        id: Some(annotation.id.clone()),
        kind: annotation.kind().as_str().to_string(),
        color: Some(annotation.color.clone()),
        timestamp: annotation.timestamp,
        user_id: annotation.user_id.clone(),
        ..AnnotationRecord::default()
    };

    match &annotation.shape {
        Shape::Rectangle {
            x,
            y,
            width,
            height,
        }
        | Shape::Circle {
            x,
            y,
            width,
            height,
        } => {
            record.x = *x;
            record.y = *y;
            record.width = *width;
            record.height = *height;
        }
        Shape::Pencil { points } => {
            let anchor = annotation.anchor();
            record.x = anchor.x;
            record.y = anchor.y;
            let points = if points.is_empty() {
                warn!(id = %annotation.id, "pencil annotation lost its points, patching before save");
                vec![
                    PointRecord {
                        x: anchor.x,
                        y: anchor.y,
                    },
                    PointRecord {
                        x: anchor.x + 1.0,
                        y: anchor.y + 1.0,
                    },
                ]
            } else {
                points
                    .iter()
                    .map(|p| PointRecord { x: p.x, y: p.y })
                    .collect()
            };
            record.points = Some(points);
        }
        Shape::Arrow { start, end } => {
            record.x = start.x;
            record.y = start.y;
            record.start_x = Some(start.x);
            record.start_y = Some(start.y);
            record.end_x = Some(end.x);
            record.end_y = Some(end.y);
        }
        Shape::Text { x, y, text } => {
            record.x = *x;
            record.y = *y;
            record.text = Some(if text.trim().is_empty() {
                warn!(id = %annotation.id, "text annotation lost its content, patching before save");
                PLACEHOLDER_TEXT.to_string()
            } else {
                text.clone()
            });
        }
    }

    record
}

fn repaired_points(id: &str, x: f64, y: f64, points: Option<Vec<PointRecord>>) -> Vec<Point> {
    let points: Vec<Point> = points
        .unwrap_or_default()
        .into_iter()
        .map(|p| Point::new(p.x, p.y))
        .collect();

    if points.is_empty() {
        warn!(%id, "pencil annotation record missing points, patching from its anchor");
        vec![Point::new(x, y), Point::new(x + 1.0, y + 1.0)]
    } else {
        points
    }
}

fn repaired_text(id: &str, text: Option<String>) -> String {
    match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            warn!(%id, "text annotation record missing content, using placeholder");
            PLACEHOLDER_TEXT.to_string()
        }
    }
}
