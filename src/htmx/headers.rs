//! Header names of the HX convention.
//!
//! Names are stored lowercase; HTTP header names are case-insensitive on the
//! wire, so `HX-Request` and `hx-request` are the same header.

use axum::http::HeaderName;

// Request headers sent by the enhanced client.

/// Present with value `true` on every request issued by the client runtime.
pub const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");
pub const HX_BOOSTED: HeaderName = HeaderName::from_static("hx-boosted");
pub const HX_HISTORY_RESTORE_REQUEST: HeaderName =
    HeaderName::from_static("hx-history-restore-request");
pub const HX_CURRENT_URL: HeaderName = HeaderName::from_static("hx-current-url");
pub const HX_PROMPT: HeaderName = HeaderName::from_static("hx-prompt");
pub const HX_TARGET: HeaderName = HeaderName::from_static("hx-target");
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");
pub const HX_TRIGGER_NAME: HeaderName = HeaderName::from_static("hx-trigger-name");

// Response headers understood by the client runtime.

pub const HX_LOCATION: HeaderName = HeaderName::from_static("hx-location");
pub const HX_PUSH_URL: HeaderName = HeaderName::from_static("hx-push-url");
pub const HX_REPLACE_URL: HeaderName = HeaderName::from_static("hx-replace-url");
pub const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");
pub const HX_REFRESH: HeaderName = HeaderName::from_static("hx-refresh");
pub const HX_RESWAP: HeaderName = HeaderName::from_static("hx-reswap");
pub const HX_RETARGET: HeaderName = HeaderName::from_static("hx-retarget");
/// Response-side `HX-Trigger`; shares its name with the request header.
pub const HX_TRIGGER_RESPONSE: HeaderName = HX_TRIGGER;
pub const HX_TRIGGER_AFTER_SETTLE: HeaderName =
    HeaderName::from_static("hx-trigger-after-settle");
pub const HX_TRIGGER_AFTER_SWAP: HeaderName = HeaderName::from_static("hx-trigger-after-swap");
