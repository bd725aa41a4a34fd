//! Request-side protocol state.

use axum::http::{HeaderMap, HeaderName};

use crate::htmx::headers::{
    HX_BOOSTED, HX_CURRENT_URL, HX_HISTORY_RESTORE_REQUEST, HX_PROMPT, HX_REQUEST, HX_TARGET,
    HX_TRIGGER, HX_TRIGGER_NAME,
};

/// Snapshot of the HX request headers, parsed once per request.
///
/// When [`participating`](Self::participating) is `false` every other field
/// holds its default: the remaining headers only mean something on requests
/// issued by the client runtime, so they are not read at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HxState {
    /// `HX-Request` is exactly `true`.
    pub participating: bool,

    /// The request came from an element using `hx-boost`.
    pub boosted: bool,

    /// The request restores history after a local cache miss.
    pub history_restore_request: bool,

    /// URL currently shown in the browser.
    pub current_url: Option<String>,

    /// User response to an `hx-prompt`.
    pub prompt: Option<String>,

    /// `id` of the target element.
    pub target_id: Option<String>,

    /// `id` of the element that triggered the request.
    pub trigger_id: Option<String>,

    /// `name` of the element that triggered the request.
    pub trigger_name: Option<String>,
}

impl HxState {
    /// Parse the protocol state from request headers.
    ///
    /// Never fails: missing or non-UTF-8 header values count as absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        if !is_true(headers, &HX_REQUEST) {
            return Self::default();
        }

        Self {
            participating: true,
            boosted: is_true(headers, &HX_BOOSTED),
            history_restore_request: is_true(headers, &HX_HISTORY_RESTORE_REQUEST),
            current_url: text(headers, &HX_CURRENT_URL),
            prompt: text(headers, &HX_PROMPT),
            target_id: text(headers, &HX_TARGET),
            trigger_id: text(headers, &HX_TRIGGER),
            trigger_name: text(headers, &HX_TRIGGER_NAME),
        }
    }
}

fn is_true(headers: &HeaderMap, name: &HeaderName) -> bool {
    headers.get(name).is_some_and(|v| v.as_bytes() == b"true")
}

fn text(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_missing_marker_is_not_participating() {
        let state = HxState::from_headers(&HeaderMap::new());
        assert_eq!(state, HxState::default());
        assert!(!state.participating);
    }

    #[test]
    fn test_marker_must_be_exactly_true() {
        for value in ["TRUE", "True", "1", "false", "", " true"] {
            let mut map = HeaderMap::new();
            map.insert("hx-request", HeaderValue::from_str(value).unwrap());
            assert!(
                !HxState::from_headers(&map).participating,
                "{value:?} should not participate"
            );
        }
    }

    #[test]
    fn test_other_headers_ignored_without_marker() {
        let state = HxState::from_headers(&headers(&[
            ("hx-boosted", "true"),
            ("hx-prompt", "yes"),
            ("hx-target", "content"),
        ]));
        assert_eq!(state, HxState::default());
    }

    #[test]
    fn test_marker_only() {
        let state = HxState::from_headers(&headers(&[("HX-Request", "true")]));
        assert!(state.participating);
        assert!(!state.boosted);
        assert!(!state.history_restore_request);
        assert_eq!(state.current_url, None);
        assert_eq!(state.prompt, None);
        assert_eq!(state.target_id, None);
        assert_eq!(state.trigger_id, None);
        assert_eq!(state.trigger_name, None);
    }

    #[test]
    fn test_all_fields_populated() {
        let state = HxState::from_headers(&headers(&[
            ("HX-Request", "true"),
            ("HX-Boosted", "true"),
            ("HX-History-Restore-Request", "true"),
            ("HX-Current-URL", "http://example.com/test"),
            ("HX-Prompt", "test"),
            ("HX-Target", "main"),
            ("HX-Trigger", "save-button"),
            ("HX-Trigger-Name", "save"),
        ]));
        assert_eq!(
            state,
            HxState {
                participating: true,
                boosted: true,
                history_restore_request: true,
                current_url: Some("http://example.com/test".into()),
                prompt: Some("test".into()),
                target_id: Some("main".into()),
                trigger_id: Some("save-button".into()),
                trigger_name: Some("save".into()),
            }
        );
    }

    #[test]
    fn test_boolean_fields_require_literal_true() {
        let state = HxState::from_headers(&headers(&[
            ("HX-Request", "true"),
            ("HX-Boosted", "false"),
            ("HX-History-Restore-Request", "yes"),
        ]));
        assert!(!state.boosted);
        assert!(!state.history_restore_request);
    }

    #[test]
    fn test_empty_value_is_present() {
        let state = HxState::from_headers(&headers(&[("HX-Request", "true"), ("HX-Prompt", "")]));
        assert_eq!(state.prompt.as_deref(), Some(""));
    }
}
