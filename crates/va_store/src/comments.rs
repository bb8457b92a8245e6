use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn generated_id() -> String {
    Uuid::new_v4().to_string()
}

/// A comment attached to an annotation.
///
/// The `annotation_id` is an explicit foreign key and the id is generated at
/// creation time, so the read path never has to reconcile missing keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default = "generated_id")]
    pub id: String,
    pub annotation_id: String,
    pub username: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub text: String,
    /// Video playback position when the comment was added (seconds).
    #[serde(default)]
    pub video_time: f64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        annotation_id: impl Into<String>,
        username: impl Into<String>,
        text: impl Into<String>,
        video_time: f64,
    ) -> Self {
        Self {
            id: generated_id(),
            annotation_id: annotation_id.into(),
            username: username.into(),
            user_id: None,
            text: text.into(),
            video_time: video_time.max(0.0),
            created_at: Utc::now(),
        }
    }
}

/// Comments keyed by annotation id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CommentThreads {
    threads: HashMap<String, Vec<Comment>>,
}

impl CommentThreads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, comment: Comment) {
        self.threads
            .entry(comment.annotation_id.clone())
            .or_default()
            .push(comment);
    }

    /// Comments for one annotation, oldest first.
    pub fn for_annotation(&self, annotation_id: &str) -> Vec<&Comment> {
        let mut comments: Vec<&Comment> = self
            .threads
            .get(annotation_id)
            .map(|thread| thread.iter().collect())
            .unwrap_or_default();
        comments.sort_by_key(|c| c.created_at);
        comments
    }

    /// Drop the thread of an erased annotation.
    pub fn remove_annotation(&mut self, annotation_id: &str) -> Option<Vec<Comment>> {
        self.threads.remove(annotation_id)
    }

    pub fn total_comments(&self) -> usize {
        self.threads.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.values().all(Vec::is_empty)
    }
}

/// Format a playback position as `MM:SS` for comment display.
pub fn format_video_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00".to_string();
    }
    let minutes = (seconds / 60.0).floor() as u64;
    let remaining = (seconds % 60.0).floor() as u64;
    format!("{minutes:02}:{remaining:02}")
}
