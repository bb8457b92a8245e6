use crate::annotation::{Annotation, Point};
use crate::hit;

/// Ordered annotation container scoped to one (video, user) pair.
///
/// Carries a maximum size so a runaway session cannot grow memory without
/// bound; when the cap is reached the oldest annotation is evicted.
#[derive(Debug)]
pub struct AnnotationCollection {
    annotations: Vec<Annotation>,
    max_annotations: usize,
}

impl Default for AnnotationCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationCollection {
    pub const DEFAULT_MAX_ANNOTATIONS: usize = 1000;

    pub fn new() -> Self {
        Self::with_max_annotations(Self::DEFAULT_MAX_ANNOTATIONS)
    }

    pub fn with_max_annotations(max_annotations: usize) -> Self {
        Self {
            annotations: Vec::new(),
            max_annotations: max_annotations.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.annotations.iter().any(|a| a.id == id)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn first_id(&self) -> Option<&str> {
        self.annotations.first().map(|a| a.id.as_str())
    }

    /// Append an annotation, evicting the oldest one at the cap.
    pub fn push(&mut self, annotation: Annotation) {
        if self.annotations.len() >= self.max_annotations {
            self.annotations.remove(0);
        }
        self.annotations.push(annotation);
    }

    pub fn remove_by_id(&mut self, id: &str) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        Some(self.annotations.remove(index))
    }

    /// Erase at a point; see [`hit::erase_at`] for the fallback semantics.
    pub fn erase_at(&mut self, point: Point) -> Vec<String> {
        hit::erase_at(point, &mut self.annotations)
    }

    pub fn hit_test(&self, point: Point) -> Option<&Annotation> {
        hit::hit_test(point, &self.annotations)
    }

    /// Deep copy of the current contents (history snapshot).
    pub fn snapshot(&self) -> Vec<Annotation> {
        self.annotations.clone()
    }

    /// Replace the contents wholesale (undo/redo restore, load).
    pub fn restore(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }

    pub fn clear(&mut self) {
        self.annotations.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::annotation::{Annotation, Point, Shape};

    fn rect_at(x: f64, y: f64) -> Annotation {
        Annotation::new(
            Shape::Rectangle {
                x,
                y,
                width: 10.0,
                height: 10.0,
            },
            "red",
            0.0,
        )
    }

    #[test]
    fn push_and_remove_by_id() {
        let mut collection = super::AnnotationCollection::new();
        let a = rect_at(10.0, 10.0);
        let id = a.id.clone();

        collection.push(a);
        assert_eq!(collection.len(), 1);
        assert!(collection.contains_id(&id));

        let removed = collection.remove_by_id(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(collection.is_empty());
        assert!(collection.remove_by_id(&id).is_none());
    }

    #[test]
    fn cap_evicts_oldest() {
        let mut collection = super::AnnotationCollection::with_max_annotations(3);
        let first = rect_at(0.0, 0.0);
        let first_id = first.id.clone();
        collection.push(first);
        for i in 1..4 {
            collection.push(rect_at(i as f64, 0.0));
        }

        assert_eq!(collection.len(), 3);
        assert!(!collection.contains_id(&first_id));
    }

    #[test]
    fn snapshot_is_independent_of_live_contents() {
        let mut collection = super::AnnotationCollection::new();
        collection.push(rect_at(5.0, 5.0));

        let snapshot = collection.snapshot();
        collection.clear();

        assert!(collection.is_empty());
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn erase_delegates_to_hit_testing() {
        let mut collection = super::AnnotationCollection::new();
        collection.push(rect_at(10.0, 10.0));

        let removed = collection.erase_at(Point::new(15.0, 15.0));
        assert_eq!(removed.len(), 1);
        assert!(collection.is_empty());
    }
}
