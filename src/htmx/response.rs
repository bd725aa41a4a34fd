//! Response mutator handle.
//!
//! # Design Decisions
//! - The handle records directives into a per-request [`Directives`] record
//!   shared with the middleware; the middleware copies them onto the response
//!   once the handler chain returns
//! - Every mutator except `redirect` is a no-op on non-participating requests
//! - Repeated calls overwrite: last write wins per header

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Response, StatusCode};
use serde::Serialize;

use crate::htmx::error::{HtmxError, HtmxResult};
use crate::htmx::headers::{
    HX_LOCATION, HX_PUSH_URL, HX_REDIRECT, HX_REFRESH, HX_REPLACE_URL, HX_RESWAP, HX_RETARGET,
};
use crate::htmx::location::{HistoryUpdate, LocationTarget};
use crate::htmx::state::HxState;
use crate::htmx::swap::{join_modifiers, SwapModifier};
use crate::htmx::trigger::TriggerTiming;

/// Headers and status recorded for the outgoing response.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Directives {
    pub headers: HeaderMap,
    pub status: Option<StatusCode>,
}

impl Directives {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.status.is_none()
    }

    /// Copy the recorded headers and status override onto response parts.
    pub fn apply_to(&self, headers: &mut HeaderMap, status: &mut StatusCode) {
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
        if let Some(code) = self.status {
            *status = code;
        }
    }
}

/// Per-request handle to the HX state and response mutators.
///
/// Cheap to clone; all clones share the same pending [`Directives`].
#[derive(Debug, Clone)]
pub struct Htmx {
    state: Arc<HxState>,
    directives: Arc<Mutex<Directives>>,
    redirect_status: StatusCode,
}

impl Htmx {
    /// Create a handle for one request.
    ///
    /// `redirect_status` is used by [`redirect`](Self::redirect) on
    /// non-participating requests.
    pub fn new(state: HxState, redirect_status: StatusCode) -> Self {
        Self {
            state: Arc::new(state),
            directives: Arc::new(Mutex::new(Directives::default())),
            redirect_status,
        }
    }

    pub fn state(&self) -> &HxState {
        &self.state
    }

    pub fn is_htmx(&self) -> bool {
        self.state.participating
    }

    /// Snapshot of the directives recorded so far.
    pub fn directives(&self) -> Directives {
        self.lock().clone()
    }

    /// Client-side navigation without a full page reload (`HX-Location`).
    ///
    /// A structured location with only `path` set is sent as the bare path.
    pub fn location(&self, target: impl Into<LocationTarget>) -> HtmxResult<()> {
        if !self.is_htmx() {
            return Ok(());
        }
        let value = target.into().to_header_value()?;
        self.set(HX_LOCATION, &value)
    }

    /// [`location`](Self::location) for untyped JSON input.
    ///
    /// Objects without a `path` field fail with
    /// [`HtmxError::InvalidArgument`] and leave the response untouched.
    pub fn location_json(&self, target: serde_json::Value) -> HtmxResult<()> {
        if !self.is_htmx() {
            return Ok(());
        }
        self.location(LocationTarget::try_from(target)?)
    }

    /// Push a URL into the browser history (`HX-Push-Url`).
    pub fn push_url(&self, url: impl Into<HistoryUpdate>) -> HtmxResult<()> {
        if !self.is_htmx() {
            return Ok(());
        }
        self.set(HX_PUSH_URL, url.into().as_str())
    }

    /// Replace the current URL in the browser history (`HX-Replace-Url`).
    pub fn replace_url(&self, url: impl Into<HistoryUpdate>) -> HtmxResult<()> {
        if !self.is_htmx() {
            return Ok(());
        }
        self.set(HX_REPLACE_URL, url.into().as_str())
    }

    /// Redirect the client.
    ///
    /// Participating requests get `204 No Content` with `HX-Redirect`, the
    /// client runtime performs the navigation. Other requests get a standard
    /// 3xx with `Location`.
    pub fn redirect(&self, url: &str) -> HtmxResult<()> {
        if self.is_htmx() {
            self.set_with_status(HX_REDIRECT, url, StatusCode::NO_CONTENT)
        } else {
            self.set_with_status(header::LOCATION, url, self.redirect_status)
        }
    }

    /// Ask the client for a full page refresh (`HX-Refresh`).
    pub fn refresh(&self) {
        if !self.is_htmx() {
            return;
        }
        let mut directives = self.lock();
        directives
            .headers
            .insert(HX_REFRESH, HeaderValue::from_static("true"));
        directives.status = Some(StatusCode::NO_CONTENT);
        tracing::trace!(header = %HX_REFRESH, "HX directive recorded");
    }

    /// Override how the response is swapped (`HX-Reswap`).
    pub fn reswap<I, M>(&self, modifiers: I) -> HtmxResult<()>
    where
        I: IntoIterator<Item = M>,
        M: Into<SwapModifier>,
    {
        if !self.is_htmx() {
            return Ok(());
        }
        self.set(HX_RESWAP, &join_modifiers(modifiers))
    }

    /// Swap into a different element, given as a CSS selector (`HX-Retarget`).
    pub fn retarget(&self, selector: &str) -> HtmxResult<()> {
        if !self.is_htmx() {
            return Ok(());
        }
        self.set(HX_RETARGET, selector)
    }

    /// Trigger client-side events.
    ///
    /// `events` should serialize to a JSON object mapping event names to
    /// payloads. The header depends on `timing`.
    pub fn trigger<E>(&self, events: &E, timing: TriggerTiming) -> HtmxResult<()>
    where
        E: Serialize + ?Sized,
    {
        if !self.is_htmx() {
            return Ok(());
        }
        let json = serde_json::to_string(events)?;
        self.set(timing.header_name(), &json)
    }

    /// Copy the recorded directives onto a response.
    ///
    /// Used by the middleware; also usable directly when the handle was
    /// built by hand.
    pub fn apply<B>(&self, response: &mut Response<B>) {
        let directives = self.lock();
        let mut status = response.status();
        directives.apply_to(response.headers_mut(), &mut status);
        *response.status_mut() = status;
    }

    fn set(&self, name: HeaderName, value: &str) -> HtmxResult<()> {
        let value = header_value(&name, value)?;
        tracing::trace!(header = %name, value = ?value, "HX directive recorded");
        self.lock().headers.insert(name, value);
        Ok(())
    }

    fn set_with_status(&self, name: HeaderName, value: &str, status: StatusCode) -> HtmxResult<()> {
        let value = header_value(&name, value)?;
        tracing::trace!(header = %name, value = ?value, status = %status, "HX directive recorded");
        let mut directives = self.lock();
        directives.headers.insert(name, value);
        directives.status = Some(status);
        Ok(())
    }

    // The record is a plain header map; a panic elsewhere cannot leave it
    // half-written, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Directives> {
        self.directives
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn header_value(name: &HeaderName, value: &str) -> HtmxResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|source| {
        tracing::warn!(header = %name, "Rejected HX directive with invalid header value");
        HtmxError::InvalidHeaderValue {
            header: name.clone(),
            source,
        }
    })
}
