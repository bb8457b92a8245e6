use std::sync::Arc;
use std::sync::mpsc::Sender;

use tracing::warn;
use va_annotations::Annotation;
use va_store::{AnnotationSet, AnnotationStore, CommentThreads};

/// Results of background persistence work, drained on the UI thread.
#[derive(Debug)]
pub enum HostEvent {
    /// The owner's collection finished loading.
    CollectionLoaded(AnnotationSet),
    /// Another user's collection finished loading.
    ForeignLoaded {
        user_id: String,
        username: String,
        annotations: Vec<Annotation>,
    },
    SaveCompleted,
    SaveFailed { message: String },
    LoadFailed { message: String },
}

/// Fire-and-forget bridge between the single-threaded host and the async
/// store client.
///
/// Requests are spawned onto the runtime and their outcomes come back as
/// [`HostEvent`]s. There is no retry or queueing: a failed save is reported
/// and must be retried manually.
pub struct StoreWorker {
    store: Arc<AnnotationStore>,
    runtime: tokio::runtime::Handle,
    events: Sender<HostEvent>,
}

impl StoreWorker {
    pub fn new(
        store: AnnotationStore,
        runtime: tokio::runtime::Handle,
        events: Sender<HostEvent>,
    ) -> Self {
        Self {
            store: Arc::new(store),
            runtime,
            events,
        }
    }

    pub fn request_load(&self, video_id: String, user_id: String) {
        let store = Arc::clone(&self.store);
        let events = self.events.clone();
        self.runtime.spawn(async move {
            match store.load(&video_id, &user_id).await {
                Ok(set) => {
                    let _ = events.send(HostEvent::CollectionLoaded(set));
                }
                Err(error) => {
                    warn!(%video_id, %error, "failed to load annotations");
                    let _ = events.send(HostEvent::LoadFailed {
                        message: error.to_string(),
                    });
                }
            }
        });
    }

    pub fn request_save(
        &self,
        video_id: String,
        user_id: String,
        annotations: Vec<Annotation>,
        comments: CommentThreads,
    ) {
        let store = Arc::clone(&self.store);
        let events = self.events.clone();
        self.runtime.spawn(async move {
            match store
                .save(&video_id, &user_id, &annotations, &comments)
                .await
            {
                Ok(()) => {
                    let _ = events.send(HostEvent::SaveCompleted);
                }
                Err(error) => {
                    warn!(%video_id, %error, "failed to save annotations");
                    let _ = events.send(HostEvent::SaveFailed {
                        message: error.to_string(),
                    });
                }
            }
        });
    }

    /// Fetch one user's collection from the per-video user listing.
    pub fn request_user_collection(&self, video_id: String, user_id: String, username: String) {
        let store = Arc::clone(&self.store);
        let events = self.events.clone();
        self.runtime.spawn(async move {
            match store.users_for_video(&video_id).await {
                Ok(users) => {
                    match users.into_iter().find(|u| u.user_id == user_id) {
                        Some(user) => {
                            let _ = events.send(HostEvent::ForeignLoaded {
                                user_id: user.user_id,
                                username: user.username,
                                annotations: user.annotations,
                            });
                        }
                        None => {
                            let _ = events.send(HostEvent::LoadFailed {
                                message: format!("{username} has no annotations for this video"),
                            });
                        }
                    }
                }
                Err(error) => {
                    warn!(%video_id, %error, "failed to list users with annotations");
                    let _ = events.send(HostEvent::LoadFailed {
                        message: error.to_string(),
                    });
                }
            }
        });
    }
}
