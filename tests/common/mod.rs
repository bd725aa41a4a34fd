//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use hx_state::{HtmxConfig, HtmxLayer};
use tower::ServiceExt;

/// Wrap `router` in the HX middleware with default settings.
pub fn with_htmx(router: Router) -> Router {
    router.layer(HtmxLayer::new(HtmxConfig::default()))
}

/// GET `uri` with the given headers.
pub fn get(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

/// GET `uri` as the client runtime would.
pub fn hx_get(uri: &str) -> Request<Body> {
    get(uri, &[("HX-Request", "true")])
}

/// Drive one request through `app`.
pub async fn send(app: Router, req: Request<Body>) -> Response<Body> {
    app.oneshot(req).await.unwrap()
}

/// Header value as text, if present.
pub fn header<'a>(res: &'a Response<Body>, name: &str) -> Option<&'a str> {
    res.headers().get(name).map(|v| v.to_str().unwrap())
}

/// Collect the response body as a string.
pub async fn body_text(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
