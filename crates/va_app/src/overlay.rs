use va_annotations::{Annotation, AnnotationCollection, Point, Shape, SnapshotHistory, defaults};

use crate::timeline;
use crate::tool::Tool;

/// In-progress annotation between pointer-down and pointer-up.
///
/// Drafts live outside the collection and carry no id; an [`Annotation`] is
/// only constructed if the draft passes its minimum-content predicate at
/// commit time.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    Rectangle { anchor: Point, width: f64, height: f64 },
    Circle { anchor: Point, width: f64, height: f64 },
    Pencil { points: Vec<Point> },
    Arrow { start: Point, end: Point },
}

impl Draft {
    /// Seed a draft for `tool` at the pointer-down anchor.
    fn start(tool: Tool, anchor: Point) -> Option<Self> {
        match tool {
            Tool::Rectangle => Some(Self::Rectangle {
                anchor,
                width: 0.0,
                height: 0.0,
            }),
            Tool::Circle => Some(Self::Circle {
                anchor,
                width: 0.0,
                height: 0.0,
            }),
            Tool::Pencil => Some(Self::Pencil {
                points: vec![anchor],
            }),
            Tool::Arrow => Some(Self::Arrow {
                start: anchor,
                end: anchor,
            }),
            _ => None,
        }
    }

    /// Apply a pointer-move to the draft.
    fn update(&mut self, point: Point) {
        match self {
            Self::Rectangle { anchor, width, height } | Self::Circle { anchor, width, height } => {
                *width = point.x - anchor.x;
                *height = point.y - anchor.y;
            }
            Self::Pencil { points } => {
                // Drop near-duplicate samples so jitter cannot grow the
                // path without bound.
                if let Some(last) = points.last() {
                    if (last.x - point.x).abs() < defaults::PENCIL_POINT_TOLERANCE
                        && (last.y - point.y).abs() < defaults::PENCIL_POINT_TOLERANCE
                    {
                        return;
                    }
                }
                points.push(point);
            }
            Self::Arrow { end, .. } => *end = point,
        }
    }

    fn into_shape(self) -> Shape {
        match self {
            Self::Rectangle { anchor, width, height } => Shape::Rectangle {
                x: anchor.x,
                y: anchor.y,
                width,
                height,
            },
            Self::Circle { anchor, width, height } => Shape::Circle {
                x: anchor.x,
                y: anchor.y,
                width,
                height,
            },
            Self::Pencil { points } => Shape::Pencil { points },
            Self::Arrow { start, end } => Shape::Arrow { start, end },
        }
    }
}

/// Overlay editing phase.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    /// A shape/pencil/arrow draft is in progress.
    Drawing { draft: Draft },
    /// The text tool recorded a click position and is waiting for input.
    TextEntry { anchor: Point },
}

/// Another user's collection is being viewed (read-only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignView {
    pub user_id: String,
    pub username: String,
}

/// Input actions (pure).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectTool(Tool),
    SetColor(String),
    /// Playback clock tick from the player.
    SetPlaybackTime(f64),
    /// Toggle the timestamp visibility filter off ("show all").
    SetShowAll(bool),
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// Text entry confirmed with the given content.
    SubmitText(String),
    /// Text entry dismissed (cancel button / escape).
    CancelText,
    /// An existing annotation was clicked in the rendered overlay.
    SelectAnnotation(String),
    Undo,
    Redo,
    /// Replace the collection with freshly loaded annotations.
    LoadCollection { annotations: Vec<Annotation> },
    /// Switch to another user's collection (read-only viewing).
    ViewForeignCollection {
        user_id: String,
        username: String,
        annotations: Vec<Annotation>,
    },
    /// Leave read-only viewing and restore the stashed own collection.
    ReturnToOwnCollection,
    /// Abort any in-progress draft or text entry.
    ResetToIdle,
}

/// Effects requested by the core (surfaced by the host).
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    AnnotationCreated { id: String },
    AnnotationErased { ids: Vec<String> },
    AnnotationSelected { id: String },
    /// The collection was replaced wholesale (undo/redo/load/switch).
    CollectionRestored,
    /// A mutation was attempted while viewing a foreign collection.
    ReadOnlyRejected,
}

/// Overlay state machine model.
///
/// One instance per overlay; all mutation is synchronous inside
/// [`Model::reduce`], so no locking is ever needed.
#[derive(Debug)]
pub struct Model {
    tool: Tool,
    phase: Phase,
    color: String,
    annotations: AnnotationCollection,
    history: SnapshotHistory,
    selected: Option<String>,
    user_id: Option<String>,
    current_time: f64,
    show_all: bool,
    time_window: f64,
    viewing: Option<ForeignView>,
    /// Own collection stashed while viewing someone else's.
    own_annotations: Option<Vec<Annotation>>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        Self::with_limits(SnapshotHistory::DEFAULT_MAX_DEPTH, timeline::DEFAULT_TIME_WINDOW)
    }

    pub fn with_limits(history_depth: usize, time_window: f64) -> Self {
        Self {
            tool: Tool::None,
            phase: Phase::Idle,
            color: defaults::COLOR.to_string(),
            annotations: AnnotationCollection::new(),
            history: SnapshotHistory::with_depth(history_depth),
            selected: None,
            user_id: None,
            current_time: 0.0,
            show_all: false,
            time_window,
            viewing: None,
            own_annotations: None,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn annotations(&self) -> &AnnotationCollection {
        &self.annotations
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn is_read_only(&self) -> bool {
        self.viewing.is_some()
    }

    pub fn viewing(&self) -> Option<&ForeignView> {
        self.viewing.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Identity stamped onto committed annotations.
    pub fn set_user_id(&mut self, user_id: Option<String>) {
        self.user_id = user_id;
    }

    /// Annotations visible at the current playback position.
    ///
    /// With "show all" on, the filter is bypassed entirely.
    pub fn visible_annotations(&self) -> Vec<&Annotation> {
        if self.show_all {
            return self.annotations.iter().collect();
        }
        self.annotations
            .iter()
            .filter(|a| timeline::is_visible_at(a.timestamp, self.current_time, self.time_window))
            .collect()
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::SelectTool(tool) => {
                if self.viewing.is_some() && tool.can_edit() {
                    return vec![Effect::ReadOnlyRejected];
                }
                // Changing tool abandons any in-progress draft or text entry.
                self.phase = Phase::Idle;
                self.tool = tool;
                Vec::new()
            }

            Action::SetColor(color) => {
                self.color = color;
                Vec::new()
            }

            Action::SetPlaybackTime(time) => {
                self.current_time = time.max(0.0);
                Vec::new()
            }

            Action::SetShowAll(show_all) => {
                self.show_all = show_all;
                Vec::new()
            }

            Action::PointerDown { x, y } => self.pointer_down(Point::new(x, y)),

            Action::PointerMove { x, y } => {
                if let Phase::Drawing { draft } = &mut self.phase {
                    draft.update(Point::new(x, y));
                }
                Vec::new()
            }

            Action::PointerUp { x, y } => self.pointer_up(Point::new(x, y)),

            Action::SubmitText(text) => self.submit_text(text),

            Action::CancelText => {
                if matches!(self.phase, Phase::TextEntry { .. }) {
                    self.phase = Phase::Idle;
                }
                Vec::new()
            }

            Action::SelectAnnotation(id) => {
                if self.annotations.contains_id(&id) {
                    self.selected = Some(id.clone());
                    vec![Effect::AnnotationSelected { id }]
                } else {
                    Vec::new()
                }
            }

            Action::Undo => {
                if self.viewing.is_some() {
                    return vec![Effect::ReadOnlyRejected];
                }
                let current = self.annotations.snapshot();
                match self.history.undo(&current) {
                    Some(previous) => {
                        self.annotations.restore(previous);
                        self.prune_selection();
                        vec![Effect::CollectionRestored]
                    }
                    None => Vec::new(),
                }
            }

            Action::Redo => {
                if self.viewing.is_some() {
                    return vec![Effect::ReadOnlyRejected];
                }
                let current = self.annotations.snapshot();
                match self.history.redo(&current) {
                    Some(next) => {
                        self.annotations.restore(next);
                        self.prune_selection();
                        vec![Effect::CollectionRestored]
                    }
                    None => Vec::new(),
                }
            }

            Action::LoadCollection { annotations } => {
                self.viewing = None;
                self.own_annotations = None;
                self.annotations.restore(annotations);
                self.history.clear();
                self.phase = Phase::Idle;
                self.selected = self.annotations.first_id().map(str::to_string);

                let mut effects = vec![Effect::CollectionRestored];
                if let Some(id) = self.selected.clone() {
                    effects.push(Effect::AnnotationSelected { id });
                }
                effects
            }

            Action::ViewForeignCollection {
                user_id,
                username,
                annotations,
            } => {
                // Stash the owner's collection on the first switch only, so
                // hopping between users does not lose it.
                if self.viewing.is_none() {
                    self.own_annotations = Some(self.annotations.snapshot());
                }
                self.annotations.restore(annotations);
                self.history.clear();
                self.phase = Phase::Idle;
                self.tool = Tool::None;
                self.selected = None;
                self.viewing = Some(ForeignView { user_id, username });
                vec![Effect::CollectionRestored]
            }

            Action::ReturnToOwnCollection => {
                if self.viewing.take().is_none() {
                    return Vec::new();
                }
                if let Some(own) = self.own_annotations.take() {
                    self.annotations.restore(own);
                }
                self.history.clear();
                self.phase = Phase::Idle;
                self.selected = self.annotations.first_id().map(str::to_string);

                let mut effects = vec![Effect::CollectionRestored];
                if let Some(id) = self.selected.clone() {
                    effects.push(Effect::AnnotationSelected { id });
                }
                effects
            }

            Action::ResetToIdle => {
                self.phase = Phase::Idle;
                Vec::new()
            }
        }
    }

    fn pointer_down(&mut self, point: Point) -> Vec<Effect> {
        // Pointer events are ignored while text entry is open; the entry is
        // resolved only by submit or cancel.
        if !matches!(self.phase, Phase::Idle) {
            return Vec::new();
        }

        if self.viewing.is_some() && self.tool.can_edit() {
            return vec![Effect::ReadOnlyRejected];
        }

        match self.tool {
            Tool::Eraser => self.erase(point),
            Tool::Text => {
                self.phase = Phase::TextEntry { anchor: point };
                Vec::new()
            }
            tool if tool.is_drawing() => {
                if let Some(draft) = Draft::start(tool, point) {
                    self.phase = Phase::Drawing { draft };
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn pointer_up(&mut self, point: Point) -> Vec<Effect> {
        let Phase::Drawing { mut draft } = std::mem::take(&mut self.phase) else {
            return Vec::new();
        };

        draft.update(point);
        let shape = draft.into_shape();
        if shape.has_content() {
            self.commit(shape)
        } else {
            Vec::new()
        }
    }

    fn submit_text(&mut self, text: String) -> Vec<Effect> {
        let Phase::TextEntry { anchor } = std::mem::take(&mut self.phase) else {
            return Vec::new();
        };

        if self.viewing.is_some() {
            return vec![Effect::ReadOnlyRejected];
        }

        if text.trim().is_empty() {
            return Vec::new();
        }

        self.commit(Shape::Text {
            x: anchor.x,
            y: anchor.y,
            text,
        })
    }

    /// Commit a finished shape: push the pre-commit collection onto the undo
    /// stack (clearing redo), append, and select the new annotation.
    fn commit(&mut self, shape: Shape) -> Vec<Effect> {
        let mut annotation = Annotation::new(shape, self.color.clone(), self.current_time.floor());
        annotation.user_id = self.user_id.clone();
        let id = annotation.id.clone();

        self.history.record(self.annotations.as_slice());
        self.annotations.push(annotation);
        self.selected = Some(id.clone());

        vec![
            Effect::AnnotationCreated { id: id.clone() },
            Effect::AnnotationSelected { id },
        ]
    }

    fn erase(&mut self, point: Point) -> Vec<Effect> {
        let pre = self.annotations.snapshot();
        let removed = self.annotations.erase_at(point);
        if removed.is_empty() {
            return Vec::new();
        }

        self.history.record(&pre);
        if let Some(selected) = &self.selected {
            if removed.contains(selected) {
                self.selected = None;
            }
        }
        vec![Effect::AnnotationErased { ids: removed }]
    }

    fn prune_selection(&mut self) {
        if let Some(selected) = &self.selected {
            if !self.annotations.contains_id(selected) {
                self.selected = None;
            }
        }
    }
}
