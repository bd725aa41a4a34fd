//! Client event triggering.

use axum::http::HeaderName;

use crate::htmx::headers::{HX_TRIGGER_AFTER_SETTLE, HX_TRIGGER_AFTER_SWAP, HX_TRIGGER_RESPONSE};

/// When the client fires the triggered events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriggerTiming {
    /// As soon as the response is received.
    #[default]
    Immediate,
    AfterSettle,
    AfterSwap,
}

impl TriggerTiming {
    /// Map a textual mode, ignoring case. Unknown modes fall back to
    /// [`TriggerTiming::Immediate`].
    pub fn from_mode(mode: &str) -> Self {
        match mode.to_ascii_lowercase().as_str() {
            "aftersettle" | "after-settle" => TriggerTiming::AfterSettle,
            "afterswap" | "after-swap" => TriggerTiming::AfterSwap,
            _ => TriggerTiming::Immediate,
        }
    }

    pub fn header_name(&self) -> HeaderName {
        match self {
            TriggerTiming::Immediate => HX_TRIGGER_RESPONSE,
            TriggerTiming::AfterSettle => HX_TRIGGER_AFTER_SETTLE,
            TriggerTiming::AfterSwap => HX_TRIGGER_AFTER_SWAP,
        }
    }
}

impl From<&str> for TriggerTiming {
    fn from(mode: &str) -> Self {
        TriggerTiming::from_mode(mode)
    }
}

impl From<Option<&str>> for TriggerTiming {
    fn from(mode: Option<&str>) -> Self {
        mode.map(TriggerTiming::from_mode).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mode() {
        assert_eq!(TriggerTiming::from_mode("aftersettle"), TriggerTiming::AfterSettle);
        assert_eq!(TriggerTiming::from_mode("after-settle"), TriggerTiming::AfterSettle);
        assert_eq!(TriggerTiming::from_mode("AfterSwap"), TriggerTiming::AfterSwap);
        assert_eq!(TriggerTiming::from_mode("after-swap"), TriggerTiming::AfterSwap);
        assert_eq!(TriggerTiming::from_mode("later"), TriggerTiming::Immediate);
        assert_eq!(TriggerTiming::from(None), TriggerTiming::Immediate);
    }

    #[test]
    fn test_header_names() {
        assert_eq!(TriggerTiming::Immediate.header_name().as_str(), "hx-trigger");
        assert_eq!(
            TriggerTiming::AfterSettle.header_name().as_str(),
            "hx-trigger-after-settle"
        );
        assert_eq!(
            TriggerTiming::AfterSwap.header_name().as_str(),
            "hx-trigger-after-swap"
        );
    }
}
