pub mod annotation;
pub mod collection;
pub mod geometry;
pub mod history;
pub mod hit;

// Re-export the types most callers need.
pub use annotation::{Annotation, AnnotationKind, Point, Shape, defaults};
pub use collection::AnnotationCollection;
pub use history::SnapshotHistory;
pub use hit::{erase_at, hit_test};
