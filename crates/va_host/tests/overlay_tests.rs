use va_annotations::Shape;
use va_app::Tool;
use va_host::{ContainerRect, HostEvent, OverlayConfig, OverlayHost, UserIdentity};
use va_protocol::{Command, InputEvent, MouseButton, OverlayMessage};
use va_store::{AnnotationSet, Comment, CommentThreads};

fn host_with_video() -> OverlayHost {
    let mut host = OverlayHost::new(OverlayConfig::default());
    host.sign_in(UserIdentity {
        user_id: "u-1".to_string(),
        username: "alice".to_string(),
    });
    host.set_container(ContainerRect::new(0, 0, 1000, 1000));
    host.begin_session("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        .unwrap();
    host
}

fn has_created(commands: &[Command]) -> bool {
    commands
        .iter()
        .any(|c| matches!(c, Command::AnnotationCreated(_)))
}

#[test]
fn mouse_drag_commits_a_rectangle_in_percent_space() {
    let mut host = host_with_video();
    host.handle_message(OverlayMessage::SelectTool(Tool::Rectangle));

    host.handle_input(InputEvent::MouseDown {
        x: 100,
        y: 100,
        button: MouseButton::Left,
    });
    host.handle_input(InputEvent::MouseMove { x: 300, y: 250 });
    let commands = host.handle_input(InputEvent::MouseUp {
        x: 300,
        y: 250,
        button: MouseButton::Left,
    });

    assert!(has_created(&commands));
    let annotation = &host.model().annotations().as_slice()[0];
    match &annotation.shape {
        Shape::Rectangle {
            x,
            y,
            width,
            height,
        } => {
            assert_eq!((*x, *y), (10.0, 10.0));
            assert_eq!((*width, *height), (20.0, 15.0));
        }
        other => panic!("unexpected shape {other:?}"),
    }
    assert_eq!(annotation.user_id.as_deref(), Some("u-1"));
}

#[test]
fn pencil_stroke_survives_the_sampling_throttle() {
    let mut host = host_with_video();
    host.handle_message(OverlayMessage::SelectTool(Tool::Pencil));

    host.handle_input(InputEvent::MouseDown {
        x: 100,
        y: 100,
        button: MouseButton::Left,
    });
    // Events in the same millisecond: only the first move sample survives,
    // which is still enough for a valid two-point path.
    for x in [150, 160, 170, 180] {
        host.handle_input(InputEvent::MouseMove { x, y: 100 });
    }
    let commands = host.handle_input(InputEvent::MouseUp {
        x: 200,
        y: 100,
        button: MouseButton::Left,
    });

    assert!(has_created(&commands));
    match &host.model().annotations().as_slice()[0].shape {
        Shape::Pencil { points } => assert!(points.len() >= 2),
        other => panic!("unexpected shape {other:?}"),
    }
}

#[test]
fn eraser_fallback_removes_nearby_annotations_in_one_click() {
    let mut host = host_with_video();

    // Two annotations anchored close together, one far away.
    host.handle_message(OverlayMessage::SelectTool(Tool::Rectangle));
    host.handle_message(OverlayMessage::PointerDown(100, 100));
    host.handle_message(OverlayMessage::PointerUp(150, 150));
    host.handle_message(OverlayMessage::PointerDown(120, 120));
    host.handle_message(OverlayMessage::PointerUp(170, 170));
    host.handle_message(OverlayMessage::PointerDown(800, 800));
    host.handle_message(OverlayMessage::PointerUp(900, 900));
    assert_eq!(host.model().annotations().len(), 3);

    // Click where nothing hits precisely but two anchors are within the
    // 5-unit fallback radius.
    host.handle_message(OverlayMessage::SelectTool(Tool::Eraser));
    let commands = host.handle_message(OverlayMessage::PointerDown(90, 90));

    let erased = commands
        .iter()
        .find_map(|c| match c {
            Command::AnnotationErased(ids) => Some(ids.clone()),
            _ => None,
        })
        .expect("expected an erase command");
    assert_eq!(erased.len(), 2);
    assert_eq!(host.model().annotations().len(), 1);

    // A single undo restores both.
    host.handle_message(OverlayMessage::Undo);
    assert_eq!(host.model().annotations().len(), 3);
}

#[test]
fn loaded_collections_replace_state_and_reset_history() {
    let mut host = host_with_video();
    host.handle_message(OverlayMessage::SelectTool(Tool::Rectangle));
    host.handle_message(OverlayMessage::PointerDown(100, 100));
    host.handle_message(OverlayMessage::PointerUp(300, 300));
    assert!(host.model().can_undo());

    let mut comments = CommentThreads::new();
    let loaded = va_annotations::Annotation::new(
        Shape::Text {
            x: 5.0,
            y: 5.0,
            text: "from the server".to_string(),
        },
        "red",
        2.0,
    );
    comments.add(Comment::new(loaded.id.clone(), "bob", "nice", 2.0));

    let commands = host.apply_event(HostEvent::CollectionLoaded(AnnotationSet {
        annotations: vec![loaded.clone()],
        comments,
    }));

    assert!(commands.contains(&Command::RequestRedraw));
    assert!(
        commands
            .iter()
            .any(|c| matches!(c, Command::AnnotationSelected(id) if id == &loaded.id))
    );
    assert_eq!(host.model().annotations().len(), 1);
    assert!(!host.model().can_undo());
    assert_eq!(host.comments().for_annotation(&loaded.id).len(), 1);
}

#[test]
fn viewing_another_users_annotations_is_read_only() {
    let mut host = host_with_video();

    let commands = host.handle_message(OverlayMessage::ViewUserAnnotations {
        user_id: "u-2".to_string(),
        username: "sam".to_string(),
    });
    assert_eq!(
        commands,
        vec![Command::LoadUserCollection {
            user_id: "u-2".to_string(),
            username: "sam".to_string()
        }]
    );

    host.apply_event(HostEvent::ForeignLoaded {
        user_id: "u-2".to_string(),
        username: "sam".to_string(),
        annotations: vec![va_annotations::Annotation::new(
            Shape::Rectangle {
                x: 10.0,
                y: 10.0,
                width: 20.0,
                height: 20.0,
            },
            "blue",
            0.0,
        )],
    });
    assert!(host.model().is_read_only());

    // Drawing, saving and commenting are all rejected with a warning.
    let commands = host.handle_message(OverlayMessage::SelectTool(Tool::Rectangle));
    assert!(
        commands
            .iter()
            .any(|c| matches!(c, Command::ShowWarning(_)))
    );

    let commands = host.handle_message(OverlayMessage::Save);
    assert!(matches!(commands.as_slice(), [Command::ShowWarning(_)]));

    let commands = host.handle_message(OverlayMessage::AddComment {
        annotation_id: "any".to_string(),
        text: "hi".to_string(),
    });
    assert!(matches!(commands.as_slice(), [Command::ShowWarning(_)]));

    // Returning restores the (empty) own collection and editing rights.
    host.handle_message(OverlayMessage::ReturnToOwnAnnotations);
    assert!(!host.model().is_read_only());
    assert!(host.model().annotations().is_empty());
}

#[test]
fn comments_focus_the_panel_and_trigger_autosave() {
    let mut host = host_with_video();
    host.handle_message(OverlayMessage::SelectTool(Tool::Rectangle));
    host.handle_message(OverlayMessage::PointerDown(100, 100));
    host.handle_message(OverlayMessage::PointerUp(300, 300));
    let id = host.model().selected().unwrap().to_string();

    let commands = host.handle_message(OverlayMessage::AddComment {
        annotation_id: id.clone(),
        text: "what a move".to_string(),
    });

    assert_eq!(
        commands,
        vec![
            Command::FocusCommentPanel(id.clone()),
            Command::SaveCollection
        ]
    );
    let thread = host.comments().for_annotation(&id);
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].username, "alice");
    assert_eq!(thread[0].user_id.as_deref(), Some("u-1"));
}

#[test]
fn comment_on_unknown_annotation_is_an_error() {
    let mut host = host_with_video();
    let commands = host.handle_message(OverlayMessage::AddComment {
        annotation_id: "missing".to_string(),
        text: "hello".to_string(),
    });
    assert!(matches!(commands.as_slice(), [Command::ShowError(_)]));
}

#[test]
fn failed_saves_surface_as_inline_errors() {
    let mut host = host_with_video();
    let commands = host.apply_event(HostEvent::SaveFailed {
        message: "server rejected request (500): boom".to_string(),
    });
    assert!(matches!(commands.as_slice(), [Command::ShowError(message)] if message.contains("boom")));
}

#[test]
fn playback_time_drives_the_visibility_window() {
    let mut host = host_with_video();
    host.handle_message(OverlayMessage::SetPlaybackTime(10.0));
    host.handle_message(OverlayMessage::SelectTool(Tool::Rectangle));
    host.handle_message(OverlayMessage::PointerDown(100, 100));
    host.handle_message(OverlayMessage::PointerUp(300, 300));

    host.handle_message(OverlayMessage::SetPlaybackTime(11.0));
    assert_eq!(host.model().visible_annotations().len(), 1);

    host.handle_message(OverlayMessage::SetPlaybackTime(14.0001));
    assert!(host.model().visible_annotations().is_empty());

    host.handle_message(OverlayMessage::SetShowAll(true));
    assert_eq!(host.model().visible_annotations().len(), 1);
}
