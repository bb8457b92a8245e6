use tracing::debug;
use va_annotations::Annotation;

use crate::comments::CommentThreads;
use crate::error::StoreError;
use crate::records::{ApiMessage, LoadResponse, SaveRequest, UserAnnotationsRecord};
use crate::repair::{annotation_to_record, record_to_annotation};

/// A loaded (video, user) annotation set.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSet {
    pub annotations: Vec<Annotation>,
    pub comments: CommentThreads,
}

impl AnnotationSet {
    fn from_response(response: LoadResponse) -> Self {
        let total = response.annotations.len();
        let annotations: Vec<Annotation> = response
            .annotations
            .into_iter()
            .filter_map(record_to_annotation)
            .collect();
        debug!(
            loaded = annotations.len(),
            dropped = total - annotations.len(),
            "converted annotation records"
        );
        Self {
            annotations,
            comments: response.comments,
        }
    }
}

/// Another user's collection for the shared-annotations panel.
#[derive(Debug, Clone)]
pub struct UserAnnotations {
    pub user_id: String,
    pub username: String,
    pub annotations: Vec<Annotation>,
}

/// REST client for the annotation persistence service.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    http: reqwest::Client,
    base_url: String,
}

impl AnnotationStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch the annotation set for a (video, user) pair.
    pub async fn load(&self, video_id: &str, user_id: &str) -> Result<AnnotationSet, StoreError> {
        let url = format!("{}/annotations/{}", self.base_url, video_id);
        let response = self
            .http
            .get(&url)
            .query(&[("userId", user_id)])
            .send()
            .await?;
        let response = Self::checked(response).await?;
        let payload: LoadResponse = response.json().await?;
        Ok(AnnotationSet::from_response(payload))
    }

    /// Persist a collection and its comments.
    ///
    /// Annotations are stamped with the saving user's id and run through the
    /// write-path repair before leaving the process.
    pub async fn save(
        &self,
        video_id: &str,
        user_id: &str,
        annotations: &[Annotation],
        comments: &CommentThreads,
    ) -> Result<(), StoreError> {
        let records = annotations
            .iter()
            .map(|annotation| {
                let mut record = annotation_to_record(annotation);
                if record.user_id.is_none() {
                    record.user_id = Some(user_id.to_string());
                }
                record
            })
            .collect();

        let request = SaveRequest {
            video_id: video_id.to_string(),
            user_id: user_id.to_string(),
            annotations: records,
            comments: comments.clone(),
        };

        let url = format!("{}/annotations", self.base_url);
        let response = self.http.post(&url).json(&request).send().await?;
        Self::checked(response).await?;
        debug!(video_id, user_id, count = annotations.len(), "saved annotation set");
        Ok(())
    }

    /// List users who have annotated a video, with their collections.
    pub async fn users_for_video(
        &self,
        video_id: &str,
    ) -> Result<Vec<UserAnnotations>, StoreError> {
        let url = format!("{}/annotations/{}/users", self.base_url, video_id);
        let response = self.http.get(&url).send().await?;
        let response = Self::checked(response).await?;
        let records: Vec<UserAnnotationsRecord> = response.json().await?;

        Ok(records
            .into_iter()
            .map(|record| UserAnnotations {
                user_id: record.user_id,
                username: record.username,
                annotations: record
                    .annotations
                    .into_iter()
                    .filter_map(record_to_annotation)
                    .collect(),
            })
            .collect())
    }

    /// Map non-2xx responses to [`StoreError::Api`], keeping the server's
    /// message when it sends one.
    async fn checked(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ApiMessage>()
            .await
            .map(|m| m.message)
            .unwrap_or_else(|_| status.to_string());
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn base_url_is_normalized() {
        let store = super::AnnotationStore::new("http://localhost:5000/api/");
        assert_eq!(store.base_url, "http://localhost:5000/api");
    }
}
