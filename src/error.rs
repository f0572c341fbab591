use actix_web::HttpResponse;
use std::fmt;

/// Failure taxonomy for a lookup. Every variant maps to exactly one HTTP
/// status at the handler boundary; nothing propagates past it.
#[derive(Debug, Clone)]
pub enum LookupError {
    /// Client adapter has not finished (or failed) its one-time init.
    NotReady,

    /// Missing or malformed video id. Carries the user-facing message.
    InvalidId(&'static str),

    /// Upstream reports the video gone, private, or deleted.
    NotFound(String),

    /// Upstream call exceeded the request deadline.
    Timeout(String),

    /// Any other upstream failure (network, decode, response-shape drift).
    Upstream(String),

    /// A successful upstream result could not be reshaped.
    Projection(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "YouTube client is not ready"),
            Self::InvalidId(msg) => write!(f, "{}", msg),
            Self::NotFound(msg) => write!(f, "Video not found: {}", msg),
            Self::Timeout(msg) => write!(f, "Upstream timeout: {}", msg),
            Self::Upstream(msg) => write!(f, "Upstream error: {}", msg),
            Self::Projection(msg) => write!(f, "Projection error: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Upstream(format!("Failed to decode upstream response: {}", err))
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

impl LookupError {
    /// Classify an upstream playability status + reason. `ERROR` always
    /// means the video is gone or inaccessible (deleted, nonexistent,
    /// terminated account); other statuses fall back to sniffing the reason
    /// text, the only other signal InnerTube gives.
    pub fn from_playability(status: &str, reason: &str) -> Self {
        if status == "ERROR" || status == "LOGIN_REQUIRED" {
            return Self::NotFound(format!("{}: {}", status, reason));
        }

        let lower = reason.to_lowercase();
        if lower.contains("private")
            || lower.contains("available")
            || lower.contains("removed")
            || lower.contains("deleted")
            || lower.contains("not exist")
        {
            Self::NotFound(format!("{}: {}", status, reason))
        } else {
            Self::Upstream(format!("{}: {}", status, reason))
        }
    }

    /// Render the JSON error envelope. The raw upstream message is passed
    /// through in `details` because the upstream dependency is unofficial
    /// and breaks without notice.
    pub fn to_response(&self) -> HttpResponse {
        match self {
            Self::NotReady => HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": "Server not ready. YouTube client is still initializing."
            })),
            Self::InvalidId(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": msg
            })),
            Self::NotFound(_) => HttpResponse::NotFound().json(serde_json::json!({
                "error": "Video not found or is private/deleted"
            })),
            Self::Timeout(msg) => HttpResponse::GatewayTimeout().json(serde_json::json!({
                "error": "Upstream request timed out",
                "details": msg
            })),
            Self::Upstream(msg) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch video details",
                "details": msg
            })),
            Self::Projection(msg) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch video details",
                "details": msg
            })),
        }
    }
}

/// Validate the caller-supplied video id before any upstream call is made.
/// YouTube video ids are 11-character tokens over [A-Za-z0-9_-].
pub fn validate_video_id(raw: &str) -> Result<&str, LookupError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(LookupError::InvalidId("Video ID is required"));
    }
    if id.len() != 11 || !id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
        return Err(LookupError::InvalidId("Invalid Video ID format"));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_ids_are_required_errors() {
        for raw in ["", "   ", "\t\n"] {
            match validate_video_id(raw) {
                Err(LookupError::InvalidId(msg)) => assert_eq!(msg, "Video ID is required"),
                other => panic!("expected InvalidId, got {:?}", other),
            }
        }
    }

    #[test]
    fn malformed_ids_are_format_errors() {
        for raw in ["short", "way-too-long-for-an-id", "dQw4w9WgXc!", "dQw4w9WgXc "] {
            match validate_video_id(raw) {
                Err(LookupError::InvalidId(msg)) => assert_eq!(msg, "Invalid Video ID format"),
                other => panic!("expected InvalidId for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn canonical_ids_pass_with_surrounding_whitespace_trimmed() {
        assert_eq!(validate_video_id("dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
        assert_eq!(validate_video_id(" dQw4w9WgXcQ ").unwrap(), "dQw4w9WgXcQ");
        assert_eq!(validate_video_id("a_b-c_d-e_f").unwrap(), "a_b-c_d-e_f");
    }

    #[test]
    fn playability_reasons_classify_not_found() {
        let err = LookupError::from_playability("ERROR", "This video is unavailable");
        assert!(matches!(err, LookupError::NotFound(_)));

        let err = LookupError::from_playability("LOGIN_REQUIRED", "Sign in to confirm your age");
        assert!(matches!(err, LookupError::NotFound(_)));

        let err = LookupError::from_playability("UNPLAYABLE", "Playback on other websites disabled");
        assert!(matches!(err, LookupError::Upstream(_)));
    }

    #[test]
    fn error_status_classifies_not_found_whatever_the_reason() {
        // Deleted/nonexistent videos phrase the reason without "unavailable".
        let err = LookupError::from_playability("ERROR", "This video isn't available anymore");
        assert!(matches!(err, LookupError::NotFound(_)));

        let err = LookupError::from_playability("ERROR", "Video unavailable");
        assert!(matches!(err, LookupError::NotFound(_)));
    }

    #[test]
    fn unplayable_reasons_mentioning_availability_classify_not_found() {
        let err = LookupError::from_playability(
            "UNPLAYABLE",
            "This video is not available in your country",
        );
        assert!(matches!(err, LookupError::NotFound(_)));
    }
}
