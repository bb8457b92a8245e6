use crate::annotation::{Annotation, Point, Shape, defaults};
use crate::geometry;

/// Find the annotation under `point`, if any.
///
/// Checks run in priority order with the first match winning: bounding-box
/// shapes, then text anchors, then pencil vertices, then arrow segments.
/// Within one class the topmost (most recently added) annotation wins.
pub fn hit_test(point: Point, annotations: &[Annotation]) -> Option<&Annotation> {
    topmost(annotations, |a| hits_box(point, a))
        .or_else(|| topmost(annotations, |a| hits_text(point, a)))
        .or_else(|| topmost(annotations, |a| hits_pencil(point, a)))
        .or_else(|| topmost(annotations, |a| hits_arrow(point, a)))
}

/// Erase at `point`, returning the ids of removed annotations.
///
/// A precise hit removes exactly that annotation. With no precise hit, a
/// coarser fallback removes every annotation whose primary anchor lies
/// within [`defaults::NEARBY_ERASE_RADIUS`]. The fallback can remove several
/// unrelated annotations in one action; that is intentional behavior, not a
/// bug, and is covered by tests.
pub fn erase_at(point: Point, annotations: &mut Vec<Annotation>) -> Vec<String> {
    if let Some(hit) = hit_test(point, annotations) {
        let id = hit.id.clone();
        annotations.retain(|a| a.id != id);
        return vec![id];
    }

    let mut removed = Vec::new();
    annotations.retain(|a| {
        if geometry::distance(a.anchor(), point) <= defaults::NEARBY_ERASE_RADIUS {
            removed.push(a.id.clone());
            false
        } else {
            true
        }
    });
    removed
}

fn topmost(annotations: &[Annotation], pred: impl Fn(&Annotation) -> bool) -> Option<&Annotation> {
    annotations.iter().rev().find(|a| pred(a))
}

fn hits_box(point: Point, annotation: &Annotation) -> bool {
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
            point.x >= *x
                && point.x <= x + width.abs()
                && point.y >= *y
                && point.y <= y + height.abs()
        }
        _ => false,
    }
}

fn hits_text(point: Point, annotation: &Annotation) -> bool {
    match &annotation.shape {
        Shape::Text { x, y, .. } => {
            geometry::distance(Point::new(*x, *y), point) <= defaults::TEXT_HIT_RADIUS
        }
        _ => false,
    }
}

fn hits_pencil(point: Point, annotation: &Annotation) -> bool {
    match &annotation.shape {
        Shape::Pencil { points } => points
            .iter()
            .any(|p| geometry::distance(*p, point) <= defaults::PENCIL_HIT_RADIUS),
        _ => false,
    }
}

fn hits_arrow(point: Point, annotation: &Annotation) -> bool {
    match &annotation.shape {
        Shape::Arrow { start, end } => {
            geometry::point_to_segment_distance(point, *start, *end) <= defaults::ARROW_HIT_RADIUS
        }
        _ => false,
    }
}
