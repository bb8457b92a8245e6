/// Length of a YouTube video id.
const VIDEO_ID_LEN: usize = 11;

/// Extract the video id from a YouTube URL.
///
/// Accepts `watch?v=`, `youtu.be/`, `embed/` and `shorts/` forms, plus a
/// bare 11-character id.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();

    if is_video_id(url) {
        return Some(url.to_string());
    }

    for marker in ["?v=", "&v=", "youtu.be/", "embed/", "shorts/"] {
        if let Some(pos) = url.find(marker) {
            let candidate: String = url[pos + marker.len()..]
                .chars()
                .take(VIDEO_ID_LEN)
                .collect();
            if is_video_id(&candidate) {
                return Some(candidate);
            }
        }
    }

    None
}

fn is_video_id(candidate: &str) -> bool {
    candidate.len() == VIDEO_ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
