//! Axum extractors for the values attached by the HX middleware.
//!
//! Extracting on a route that is not wrapped by the middleware is a server
//! misconfiguration and rejects with `500 Internal Server Error`.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};

use crate::htmx::{Htmx, HtmxResult, HxState};

/// Participation flag: `HX-Request: true` was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsHtmx(pub bool);

/// Redirect function bound to the current request.
///
/// Dispatches to [`Htmx::redirect`]: `HX-Redirect` for participating
/// requests, a standard 3xx otherwise.
#[derive(Debug, Clone)]
pub struct HxRedirect(Htmx);

impl HxRedirect {
    pub(crate) fn new(htmx: Htmx) -> Self {
        Self(htmx)
    }

    pub fn to(&self, url: &str) -> HtmxResult<()> {
        self.0.redirect(url)
    }
}

/// Rejection for the HX extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingHtmxLayer;

impl IntoResponse for MissingHtmxLayer {
    fn into_response(self) -> Response {
        tracing::error!("HX extractor used on a route without the HX middleware");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "HX middleware is not installed on this route",
        )
            .into_response()
    }
}

fn from_extensions<T: Clone + Send + Sync + 'static>(parts: &Parts) -> Result<T, MissingHtmxLayer> {
    parts
        .extensions
        .get::<T>()
        .cloned()
        .ok_or(MissingHtmxLayer)
}

impl<S: Send + Sync> FromRequestParts<S> for IsHtmx {
    type Rejection = MissingHtmxLayer;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        from_extensions(parts)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Htmx {
    type Rejection = MissingHtmxLayer;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        from_extensions(parts)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for HxRedirect {
    type Rejection = MissingHtmxLayer;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        from_extensions(parts)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for HxState {
    type Rejection = MissingHtmxLayer;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let htmx: Htmx = from_extensions(parts)?;
        Ok(htmx.state().clone())
    }
}
