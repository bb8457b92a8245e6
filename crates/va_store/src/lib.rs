pub mod client;
pub mod comments;
pub mod error;
pub mod records;
pub mod repair;

pub use client::{AnnotationSet, AnnotationStore, UserAnnotations};
pub use comments::{Comment, CommentThreads, format_video_time};
pub use error::StoreError;
pub use records::{AnnotationRecord, PointRecord};
pub use repair::{annotation_to_record, record_to_annotation};
