//! # The notification request and its tolerant wire form.
//!
//! [`NotifyBody`] is what `POST /notify` deserializes: every field optional.
//! [`NotificationRequest`] is what crosses the queue: every field present.
//! The step between them is default substitution against the [`Config`],
//! done field by field so that a partially-filled body never produces a
//! client error.
//!
//! Absent and JSON-`null` fields take the configured default; an explicitly
//! empty string is kept as-is. A body whose fields have the wrong type fails
//! deserialization as a whole and is handled upstream by falling back to an
//! empty [`NotifyBody`] (all defaults).

use serde::Deserialize;

use crate::config::Config;

/// Best-effort wire form of a notification request.
///
/// Accepts `app_id` in either snake or camel case.
#[derive(Debug, Default, Deserialize)]
pub struct NotifyBody {
    /// Optional toast title.
    pub title: Option<String>,
    /// Optional toast message.
    pub message: Option<String>,
    /// Optional application identifier override.
    #[serde(alias = "appId")]
    pub app_id: Option<String>,
}

/// One notification in transit: a fully-defaulted title/message pair plus
/// the app identifier the backend should display under.
///
/// Immutable after construction; the queue hands ownership from the ingress
/// side to the dispatch loop, which consumes it exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Toast title (never absent; may be empty if the caller sent `""`).
    pub title: String,
    /// Toast message (same policy as `title`).
    pub message: String,
    /// Application identifier for the notification center.
    pub app_id: String,
}

impl NotificationRequest {
    /// Builds a request from a parsed body, substituting configured defaults
    /// for absent fields.
    pub fn from_body(body: NotifyBody, cfg: &Config) -> Self {
        Self {
            title: body.title.unwrap_or_else(|| cfg.default_title.clone()),
            message: body
                .message
                .unwrap_or_else(|| cfg.default_message.clone()),
            app_id: body.app_id.unwrap_or_else(|| cfg.app_id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let cfg = Config::default();
        let req = NotificationRequest::from_body(NotifyBody::default(), &cfg);
        assert_eq!(req.title, cfg.default_title);
        assert_eq!(req.message, cfg.default_message);
        assert_eq!(req.app_id, cfg.app_id);
    }

    #[test]
    fn test_present_fields_win_over_defaults() {
        let cfg = Config::default();
        let body: NotifyBody =
            serde_json::from_str(r#"{"title":"Build","message":"Done"}"#).unwrap();
        let req = NotificationRequest::from_body(body, &cfg);
        assert_eq!(req.title, "Build");
        assert_eq!(req.message, "Done");
        assert_eq!(req.app_id, cfg.app_id);
    }

    #[test]
    fn test_empty_string_is_kept_not_defaulted() {
        let cfg = Config::default();
        let body: NotifyBody = serde_json::from_str(r#"{"title":""}"#).unwrap();
        let req = NotificationRequest::from_body(body, &cfg);
        assert_eq!(req.title, "");
        assert_eq!(req.message, cfg.default_message);
    }

    #[test]
    fn test_null_field_behaves_like_absent() {
        let cfg = Config::default();
        let body: NotifyBody = serde_json::from_str(r#"{"title":null}"#).unwrap();
        let req = NotificationRequest::from_body(body, &cfg);
        assert_eq!(req.title, cfg.default_title);
    }

    #[test]
    fn test_app_id_accepts_camel_case() {
        let cfg = Config::default();
        let body: NotifyBody = serde_json::from_str(r#"{"appId":"my.app"}"#).unwrap();
        let req = NotificationRequest::from_body(body, &cfg);
        assert_eq!(req.app_id, "my.app");
    }

    #[test]
    fn test_wrong_typed_field_fails_whole_body() {
        assert!(serde_json::from_str::<NotifyBody>(r#"{"title":42}"#).is_err());
    }
}
