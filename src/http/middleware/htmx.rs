//! HX middleware.
//! Parses the HX request headers once and attaches the per-request handle.
//!
//! Two equivalent entry points:
//! - [`HtmxLayer`], a tower layer usable on any router or service
//! - [`htmx_middleware`], for `axum::middleware::from_fn_with_state`

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request, Response},
    middleware::Next,
};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::config::HtmxConfig;
use crate::htmx::{Htmx, HxState};
use crate::http::extract::{HxRedirect, IsHtmx};
use crate::observability::metrics;

/// Parse the request, record metrics and attach [`IsHtmx`], [`Htmx`] and
/// [`HxRedirect`] to the request extensions.
fn attach<B>(req: &mut Request<B>, config: &HtmxConfig) -> Htmx {
    let state = HxState::from_headers(req.headers());
    metrics::record_request(state.participating);

    if state.participating && config.log_requests {
        tracing::debug!(
            method = %req.method(),
            path = %req.uri().path(),
            boosted = state.boosted,
            history_restore = state.history_restore_request,
            hx_target = ?state.target_id,
            hx_trigger = ?state.trigger_id,
            "HX request"
        );
    }

    let htmx = Htmx::new(state, config.redirect_status_code());
    let extensions = req.extensions_mut();
    extensions.insert(IsHtmx(htmx.is_htmx()));
    extensions.insert(HxRedirect::new(htmx.clone()));
    extensions.insert(htmx.clone());
    htmx
}

/// Apply recorded directives to the produced response.
///
/// Error responses (4xx/5xx) are left as produced: directives recorded
/// before the failure must not turn them into a success.
fn finish<B>(htmx: &Htmx, response: &mut Response<B>, config: &HtmxConfig) {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        if !htmx.directives().is_empty() {
            tracing::debug!(status = %status, "Discarding HX directives on error response");
        }
    } else {
        htmx.apply(response);
    }
    if config.auto_vary {
        add_vary(response.headers_mut());
    }
}

fn add_vary(headers: &mut HeaderMap) {
    let present = headers
        .get_all(header::VARY)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|v| {
            let v = v.trim();
            v == "*" || v.eq_ignore_ascii_case("hx-request")
        });
    if !present {
        headers.append(header::VARY, HeaderValue::from_static("HX-Request"));
    }
}

/// Function middleware form, for use with `from_fn_with_state`.
pub async fn htmx_middleware(
    State(config): State<Arc<HtmxConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Response<Body> {
    let htmx = attach(&mut req, &config);
    let mut response = next.run(req).await;
    finish(&htmx, &mut response, &config);
    response
}

/// Tower layer installing the HX middleware.
#[derive(Debug, Clone, Default)]
pub struct HtmxLayer {
    config: Arc<HtmxConfig>,
}

impl HtmxLayer {
    pub fn new(config: HtmxConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for HtmxLayer {
    type Service = HtmxService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        HtmxService {
            inner,
            config: self.config.clone(),
        }
    }
}

/// Service produced by [`HtmxLayer`].
#[derive(Debug, Clone)]
pub struct HtmxService<S> {
    inner: S,
    config: Arc<HtmxConfig>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for HtmxService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let htmx = attach(&mut req, &self.config);
        let config = self.config.clone();

        // Call the instance that was driven to readiness.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            finish(&htmx, &mut response, &config);
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vary_added_once() {
        let mut headers = HeaderMap::new();
        add_vary(&mut headers);
        add_vary(&mut headers);
        assert_eq!(headers.get_all(header::VARY).iter().count(), 1);
        assert_eq!(headers[header::VARY], "HX-Request");
    }

    #[test]
    fn test_vary_appends_to_existing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::VARY, HeaderValue::from_static("Accept-Encoding"));
        add_vary(&mut headers);
        let values: Vec<_> = headers
            .get_all(header::VARY)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values, ["Accept-Encoding", "HX-Request"]);
    }

    #[test]
    fn test_vary_respects_existing_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::VARY,
            HeaderValue::from_static("accept-encoding, hx-request"),
        );
        add_vary(&mut headers);
        assert_eq!(headers.get_all(header::VARY).iter().count(), 1);

        let mut headers = HeaderMap::new();
        headers.insert(header::VARY, HeaderValue::from_static("*"));
        add_vary(&mut headers);
        assert_eq!(headers.get_all(header::VARY).iter().count(), 1);
    }

    #[test]
    fn test_finish_skips_error_responses() {
        let htmx = Htmx::new(
            HxState {
                participating: true,
                ..HxState::default()
            },
            axum::http::StatusCode::FOUND,
        );
        htmx.refresh();

        let mut res = Response::new(());
        *res.status_mut() = axum::http::StatusCode::BAD_REQUEST;
        finish(&htmx, &mut res, &HtmxConfig::default());

        assert_eq!(res.status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(res.headers().get("hx-refresh").is_none());
        assert_eq!(res.headers()[header::VARY], "HX-Request");
    }

    #[test]
    fn test_attach_populates_extensions() {
        let mut req = Request::builder()
            .header("HX-Request", "true")
            .header("HX-Target", "main")
            .body(())
            .unwrap();
        let htmx = attach(&mut req, &HtmxConfig::default());

        assert!(htmx.is_htmx());
        assert_eq!(req.extensions().get::<IsHtmx>(), Some(&IsHtmx(true)));
        let stored = req.extensions().get::<Htmx>().unwrap();
        assert_eq!(stored.state().target_id.as_deref(), Some("main"));
        assert!(req.extensions().get::<HxRedirect>().is_some());
    }
}
