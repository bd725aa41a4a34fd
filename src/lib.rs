//! HX header convention support for axum.
//!
//! The middleware ([`HtmxLayer`] or [`htmx_middleware`]) parses the HX
//! request headers once per request and attaches an [`Htmx`] handle that
//! handlers use to read the request state and emit response directives.
//!
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use hx_state::{Htmx, HtmxLayer, HtmxResult, HtmxConfig};
//!
//! async fn save(htmx: Htmx) -> HtmxResult<&'static str> {
//!     htmx.retarget("#status")?;
//!     Ok("saved")
//! }
//!
//! let app: Router = Router::new()
//!     .route("/save", get(save))
//!     .layer(HtmxLayer::new(HtmxConfig::default()));
//! ```

pub mod config;
pub mod htmx;
pub mod http;
pub mod observability;

pub use config::{AppConfig, HtmxConfig};
pub use htmx::{
    HistoryUpdate, Htmx, HtmxError, HtmxResult, HxLocation, HxState, LocationTarget,
    SwapModifier, SwapStyle, TriggerTiming,
};
pub use http::{htmx_middleware, HtmxLayer, HttpServer, HxRedirect, IsHtmx};
