pub mod events;

pub use events::{InputEvent, KeyCode, Modifiers, MouseButton};

use va_app::Tool;

/// Messages sent into the overlay host by the embedding page.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayMessage {
    /// Select tool.
    SelectTool(Tool),
    /// Change the stroke/text color for new annotations.
    SetColor(String),
    /// Pointer pressed (container pixel coordinates).
    PointerDown(i32, i32),
    /// Pointer moved.
    PointerMove(i32, i32),
    /// Pointer released.
    PointerUp(i32, i32),
    /// Text entry confirmed.
    SubmitText(String),
    /// Text entry dismissed.
    CancelText,
    /// Undo.
    Undo,
    /// Redo.
    Redo,
    /// An annotation was clicked in the rendered overlay.
    SelectAnnotation(String),
    /// Playback clock tick from the player (seconds).
    SetPlaybackTime(f64),
    /// Toggle the "show all annotations" mode.
    SetShowAll(bool),
    /// Persist the current collection and comments.
    Save,
    /// Add a comment to an annotation.
    AddComment { annotation_id: String, text: String },
    /// Start viewing another user's annotations (read-only).
    ViewUserAnnotations { user_id: String, username: String },
    /// Return to the session owner's annotations.
    ReturnToOwnAnnotations,
}

/// Host command queue items, executed by the embedding page.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Request redraw of the overlay.
    RequestRedraw,
    /// Refresh toolbar state (tool highlight, undo/redo enablement).
    UpdateToolbar,
    /// A new annotation was committed.
    AnnotationCreated(String),
    /// Annotations were erased (the fallback erase may remove several).
    AnnotationErased(Vec<String>),
    /// An annotation became the selection target.
    AnnotationSelected(String),
    /// Focus the comment panel on an annotation.
    FocusCommentPanel(String),
    /// Persist the current collection and comments (fire-and-forget).
    SaveCollection,
    /// Fetch the session owner's collection for the current video.
    LoadCollection,
    /// Fetch another user's collection for read-only viewing.
    LoadUserCollection { user_id: String, username: String },
    /// Show an inline informational message.
    ShowMessage(String),
    /// Show an inline error message.
    ShowError(String),
    /// Show an inline warning message.
    ShowWarning(String),
    /// No-op.
    None,
}
