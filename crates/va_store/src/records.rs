use serde::{Deserialize, Serialize};

use crate::comments::CommentThreads;

/// Flat wire form of an annotation, mirroring the backend document schema.
///
/// Every field except the `type` tag is optional or defaulted: upstream data
/// may be malformed, and the read path repairs rather than rejects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotationRecord {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Option<String>,
    pub text: Option<String>,
    pub timestamp: f64,
    pub user_id: Option<String>,
    pub points: Option<Vec<PointRecord>>,
    pub start_x: Option<f64>,
    pub start_y: Option<f64>,
    pub end_x: Option<f64>,
    pub end_y: Option<f64>,
}

/// Wire form of a pencil path vertex.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

/// `GET /annotations/{videoId}` response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoadResponse {
    pub annotations: Vec<AnnotationRecord>,
    pub comments: CommentThreads,
}

/// `POST /annotations` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub video_id: String,
    pub user_id: String,
    pub annotations: Vec<AnnotationRecord>,
    pub comments: CommentThreads,
}

/// One entry of the `GET /annotations/{videoId}/users` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAnnotationsRecord {
    pub user_id: String,
    pub username: String,
    pub annotations: Vec<AnnotationRecord>,
}

/// Error payload the service sends with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    #[test]
    fn record_parses_flat_camel_case_json() {
        let json = r##"{
            "id": "1700000000000",
            "type": "arrow",
            "x": 10.0, "y": 20.0,
            "color": "#FF0000",
            "timestamp": 42,
            "userId": "u-1",
            "startX": 10.0, "startY": 20.0, "endX": 40.0, "endY": 20.0
        }"##;

        let record: super::AnnotationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, "arrow");
        assert_eq!(record.user_id.as_deref(), Some("u-1"));
        assert_eq!(record.start_x, Some(10.0));
        assert_eq!(record.end_x, Some(40.0));
        assert_eq!(record.timestamp, 42.0);
        // Fields absent from the payload default instead of failing.
        assert_eq!(record.width, 0.0);
        assert!(record.points.is_none());
    }

    #[test]
    fn malformed_record_still_parses() {
        // A pencil record with no points and no id, as seen in legacy data.
        let json = r#"{ "type": "pencil", "x": 5, "y": 6 }"#;
        let record: super::AnnotationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, "pencil");
        assert!(record.id.is_none());
        assert!(record.points.is_none());
    }

    #[test]
    fn load_response_tolerates_missing_sections() {
        let response: super::LoadResponse = serde_json::from_str("{}").unwrap();
        assert!(response.annotations.is_empty());
        assert!(response.comments.is_empty());
    }
}
