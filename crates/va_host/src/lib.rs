pub mod error;
pub mod executor;
pub mod input;
pub mod persist;
pub mod video;

pub use error::HostError;
pub use executor::{CommandExecutor, CommandQueue};
pub use input::{ContainerRect, MoveThrottle, PENCIL_SAMPLE_INTERVAL};
pub use persist::{HostEvent, StoreWorker};

use va_app::{Action, Draft, Effect, Model, Phase, Tool};
use va_protocol::{Command, InputEvent, KeyCode, Modifiers, MouseButton, OverlayMessage};
use va_settings::Settings;
use va_store::{Comment, CommentThreads};

/// Warning shown when a mutation targets a read-only collection.
pub const READ_ONLY_WARNING: &str =
    "You cannot edit another user's annotations. Switch back to your own annotations first.";

const READ_ONLY_COMMENT_WARNING: &str =
    "You cannot comment on another user's annotations. Switch back to your own annotations first.";

const SAVED_MESSAGE: &str = "Annotations and comments saved.";

/// Identity supplied by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: String,
    pub username: String,
}

/// Host-provided overlay configuration.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    pub default_color: String,
    pub time_window_seconds: f64,
    pub show_all_annotations: bool,
    pub autosave_on_comment: bool,
    pub history_depth: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl OverlayConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            default_color: settings.default_color.clone(),
            time_window_seconds: settings.time_window_seconds,
            show_all_annotations: settings.show_all_annotations,
            autosave_on_comment: settings.autosave_on_comment,
            history_depth: settings.history_depth,
        }
    }
}

/// The overlay host.
///
/// Owns the core model, converts container-pixel input into percentage
/// space, throttles pencil sampling, and turns core effects into host
/// commands for the embedding page. All methods run on the UI thread;
/// persistence results arrive later as [`HostEvent`]s.
pub struct OverlayHost {
    model: Model,
    config: OverlayConfig,
    container: ContainerRect,
    throttle: MoveThrottle,
    comments: CommentThreads,
    video_id: Option<String>,
    user: Option<UserIdentity>,
}

impl OverlayHost {
    pub fn new(config: OverlayConfig) -> Self {
        let mut model = Model::with_limits(config.history_depth, config.time_window_seconds);
        model.reduce(Action::SetColor(config.default_color.clone()));
        model.reduce(Action::SetShowAll(config.show_all_annotations));

        Self {
            model,
            config,
            container: ContainerRect::default(),
            throttle: MoveThrottle::new(PENCIL_SAMPLE_INTERVAL),
            comments: CommentThreads::new(),
            video_id: None,
            user: None,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn comments(&self) -> &CommentThreads {
        &self.comments
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    /// Update the overlay container geometry (mount, resize).
    pub fn set_container(&mut self, container: ContainerRect) {
        self.container = container;
    }

    /// Adopt the signed-in identity; new annotations are stamped with it.
    pub fn sign_in(&mut self, user: UserIdentity) {
        self.model.set_user_id(Some(user.user_id.clone()));
        self.user = Some(user);
    }

    /// Start an annotation session for a video URL.
    ///
    /// Returns the commands that kick off the initial collection load.
    pub fn begin_session(&mut self, video_url: &str) -> Result<Vec<Command>, HostError> {
        if self.user.is_none() {
            return Err(HostError::NotSignedIn);
        }
        let video_id = video::extract_video_id(video_url)
            .ok_or_else(|| HostError::InvalidVideoUrl(video_url.to_string()))?;

        self.video_id = Some(video_id);
        self.comments = CommentThreads::new();
        Ok(vec![Command::LoadCollection])
    }

    /// Route a raw input event into the overlay.
    pub fn handle_input(&mut self, event: InputEvent) -> Vec<Command> {
        match event {
            InputEvent::MouseDown {
                x,
                y,
                button: MouseButton::Left,
            } => {
                self.throttle.reset();
                self.handle_message(OverlayMessage::PointerDown(x, y))
            }
            InputEvent::MouseMove { x, y } => {
                // Rendering-rate control only; dropped samples never affect
                // correctness of the committed path.
                if self.is_drawing_pencil() && !self.throttle.allow() {
                    return Vec::new();
                }
                self.handle_message(OverlayMessage::PointerMove(x, y))
            }
            InputEvent::MouseUp {
                x,
                y,
                button: MouseButton::Left,
            } => self.handle_message(OverlayMessage::PointerUp(x, y)),
            InputEvent::KeyDown { key, modifiers } => self.handle_key(key, modifiers),
            _ => Vec::new(),
        }
    }

    /// Handle an overlay message from the embedding page.
    pub fn handle_message(&mut self, message: OverlayMessage) -> Vec<Command> {
        match message {
            OverlayMessage::SelectTool(tool) => {
                let mut commands = effects_to_commands(self.model.reduce(Action::SelectTool(tool)));
                commands.push(Command::UpdateToolbar);
                commands.push(Command::RequestRedraw);
                commands
            }

            OverlayMessage::SetColor(color) => {
                self.model.reduce(Action::SetColor(color));
                Vec::new()
            }

            OverlayMessage::PointerDown(x, y) => {
                let p = self.container.to_percent(x, y);
                let mut commands =
                    effects_to_commands(self.model.reduce(Action::PointerDown { x: p.x, y: p.y }));
                if !matches!(self.model.phase(), Phase::Idle) {
                    commands.push(Command::RequestRedraw);
                }
                commands
            }

            OverlayMessage::PointerMove(x, y) => {
                let p = self.container.to_percent(x, y);
                self.model.reduce(Action::PointerMove { x: p.x, y: p.y });
                if matches!(self.model.phase(), Phase::Drawing { .. }) {
                    vec![Command::RequestRedraw]
                } else {
                    Vec::new()
                }
            }

            OverlayMessage::PointerUp(x, y) => {
                let p = self.container.to_percent(x, y);
                effects_to_commands(self.model.reduce(Action::PointerUp { x: p.x, y: p.y }))
            }

            OverlayMessage::SubmitText(text) => {
                effects_to_commands(self.model.reduce(Action::SubmitText(text)))
            }

            OverlayMessage::CancelText => {
                self.model.reduce(Action::CancelText);
                vec![Command::RequestRedraw]
            }

            OverlayMessage::Undo => {
                let effects = self.model.reduce(Action::Undo);
                if effects.is_empty() {
                    // Nothing to undo; still refresh button enablement.
                    vec![Command::UpdateToolbar]
                } else {
                    effects_to_commands(effects)
                }
            }

            OverlayMessage::Redo => {
                let effects = self.model.reduce(Action::Redo);
                if effects.is_empty() {
                    vec![Command::UpdateToolbar]
                } else {
                    effects_to_commands(effects)
                }
            }

            OverlayMessage::SelectAnnotation(id) => {
                effects_to_commands(self.model.reduce(Action::SelectAnnotation(id)))
            }

            OverlayMessage::SetPlaybackTime(time) => {
                self.model.reduce(Action::SetPlaybackTime(time));
                vec![Command::RequestRedraw]
            }

            OverlayMessage::SetShowAll(show_all) => {
                self.model.reduce(Action::SetShowAll(show_all));
                vec![Command::RequestRedraw]
            }

            OverlayMessage::Save => self.save_commands(),

            OverlayMessage::AddComment {
                annotation_id,
                text,
            } => self.add_comment(annotation_id, text),

            OverlayMessage::ViewUserAnnotations { user_id, username } => {
                if self.video_id.is_none() {
                    return vec![Command::ShowError("No video loaded.".to_string())];
                }
                vec![Command::LoadUserCollection { user_id, username }]
            }

            OverlayMessage::ReturnToOwnAnnotations => {
                effects_to_commands(self.model.reduce(Action::ReturnToOwnCollection))
            }
        }
    }

    /// Hand persistence commands to the store worker.
    ///
    /// Returns true when the command was consumed here; everything else is
    /// left for the embedding page's executor.
    pub fn dispatch_persistence(&self, command: &Command, worker: &StoreWorker) -> bool {
        match command {
            Command::SaveCollection => {
                if let (Some(video_id), Some(user)) = (&self.video_id, &self.user) {
                    worker.request_save(
                        video_id.clone(),
                        user.user_id.clone(),
                        self.model.annotations().snapshot(),
                        self.comments.clone(),
                    );
                }
                true
            }
            Command::LoadCollection => {
                if let (Some(video_id), Some(user)) = (&self.video_id, &self.user) {
                    worker.request_load(video_id.clone(), user.user_id.clone());
                }
                true
            }
            Command::LoadUserCollection { user_id, username } => {
                if let Some(video_id) = &self.video_id {
                    worker.request_user_collection(
                        video_id.clone(),
                        user_id.clone(),
                        username.clone(),
                    );
                }
                true
            }
            _ => false,
        }
    }

    /// Fold a background persistence result back into the overlay.
    pub fn apply_event(&mut self, event: HostEvent) -> Vec<Command> {
        match event {
            HostEvent::CollectionLoaded(set) => {
                self.comments = set.comments;
                effects_to_commands(self.model.reduce(Action::LoadCollection {
                    annotations: set.annotations,
                }))
            }
            HostEvent::ForeignLoaded {
                user_id,
                username,
                annotations,
            } => effects_to_commands(self.model.reduce(Action::ViewForeignCollection {
                user_id,
                username,
                annotations,
            })),
            HostEvent::SaveCompleted => vec![Command::ShowMessage(SAVED_MESSAGE.to_string())],
            HostEvent::SaveFailed { message } => vec![Command::ShowError(format!(
                "Failed to save annotations: {message}"
            ))],
            HostEvent::LoadFailed { message } => vec![Command::ShowError(format!(
                "Failed to load annotations: {message}"
            ))],
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: Modifiers) -> Vec<Command> {
        if key == KeyCode::ESCAPE {
            return self.handle_message(OverlayMessage::CancelText);
        }

        if modifiers.ctrl && key == KeyCode::Z && !modifiers.shift {
            return self.handle_message(OverlayMessage::Undo);
        }

        let redo = (modifiers.ctrl && key == KeyCode::Y)
            || (modifiers.ctrl && modifiers.shift && key == KeyCode::Z);
        if redo {
            return self.handle_message(OverlayMessage::Redo);
        }

        Vec::new()
    }

    fn save_commands(&self) -> Vec<Command> {
        if self.model.is_read_only() {
            return vec![Command::ShowWarning(READ_ONLY_WARNING.to_string())];
        }
        if self.video_id.is_none() {
            return vec![Command::ShowError("No video loaded.".to_string())];
        }
        if self.user.is_none() {
            return vec![Command::ShowError("Not signed in.".to_string())];
        }
        vec![Command::SaveCollection]
    }

    fn add_comment(&mut self, annotation_id: String, text: String) -> Vec<Command> {
        if self.model.is_read_only() {
            return vec![Command::ShowWarning(READ_ONLY_COMMENT_WARNING.to_string())];
        }
        if text.trim().is_empty() {
            return Vec::new();
        }
        let Some(user) = &self.user else {
            return vec![Command::ShowError("Not signed in.".to_string())];
        };
        if !self.model.annotations().contains_id(&annotation_id) {
            return vec![Command::ShowError("Select an annotation first.".to_string())];
        }

        let mut comment = Comment::new(
            annotation_id.clone(),
            user.username.clone(),
            text,
            self.model.current_time(),
        );
        comment.user_id = Some(user.user_id.clone());
        self.comments.add(comment);

        let mut commands = vec![Command::FocusCommentPanel(annotation_id)];
        if self.config.autosave_on_comment && self.video_id.is_some() {
            commands.push(Command::SaveCollection);
        }
        commands
    }

    fn is_drawing_pencil(&self) -> bool {
        matches!(
            self.model.phase(),
            Phase::Drawing {
                draft: Draft::Pencil { .. }
            }
        ) && self.model.tool() == Tool::Pencil
    }
}

fn effects_to_commands(effects: Vec<Effect>) -> Vec<Command> {
    let mut commands = Vec::new();
    for effect in effects {
        match effect {
            Effect::AnnotationCreated { id } => {
                commands.push(Command::AnnotationCreated(id));
                commands.push(Command::UpdateToolbar);
                commands.push(Command::RequestRedraw);
            }
            Effect::AnnotationErased { ids } => {
                commands.push(Command::AnnotationErased(ids));
                commands.push(Command::UpdateToolbar);
                commands.push(Command::RequestRedraw);
            }
            Effect::AnnotationSelected { id } => {
                commands.push(Command::AnnotationSelected(id.clone()));
                commands.push(Command::FocusCommentPanel(id));
            }
            Effect::CollectionRestored => {
                commands.push(Command::UpdateToolbar);
                commands.push(Command::RequestRedraw);
            }
            Effect::ReadOnlyRejected => {
                commands.push(Command::ShowWarning(READ_ONLY_WARNING.to_string()));
            }
        }
    }
    commands
}

#[cfg(test)]
mod tests {
    use va_protocol::{Command, InputEvent, KeyCode, Modifiers};

    use super::{OverlayConfig, OverlayHost, UserIdentity};

    fn signed_in_host() -> OverlayHost {
        let mut host = OverlayHost::new(OverlayConfig::default());
        host.sign_in(UserIdentity {
            user_id: "u-1".to_string(),
            username: "alice".to_string(),
        });
        host
    }

    #[test]
    fn ctrl_z_maps_to_undo_and_ctrl_y_to_redo() {
        let mut host = signed_in_host();

        // Empty history: both are no-ops that still refresh the toolbar.
        let commands = host.handle_input(InputEvent::KeyDown {
            key: KeyCode::Z,
            modifiers: Modifiers::CTRL,
        });
        assert_eq!(commands, vec![Command::UpdateToolbar]);

        let commands = host.handle_input(InputEvent::KeyDown {
            key: KeyCode::Y,
            modifiers: Modifiers::CTRL,
        });
        assert_eq!(commands, vec![Command::UpdateToolbar]);
    }

    #[test]
    fn unmodified_keys_are_ignored() {
        let mut host = signed_in_host();
        let commands = host.handle_input(InputEvent::KeyDown {
            key: KeyCode::Z,
            modifiers: Modifiers::NONE,
        });
        assert!(commands.is_empty());
    }

    #[test]
    fn save_requires_a_video() {
        let mut host = signed_in_host();
        let commands = host.handle_message(va_protocol::OverlayMessage::Save);
        assert_eq!(
            commands,
            vec![Command::ShowError("No video loaded.".to_string())]
        );
    }

    #[test]
    fn begin_session_rejects_bad_urls_and_anonymous_users() {
        let mut host = OverlayHost::new(OverlayConfig::default());
        assert!(host.begin_session("https://youtu.be/dQw4w9WgXcQ").is_err());

        let mut host = signed_in_host();
        assert!(host.begin_session("not a url").is_err());

        let commands = host.begin_session("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(commands, vec![Command::LoadCollection]);
        assert_eq!(host.video_id(), Some("dQw4w9WgXcQ"));
    }
}
