//! HTTP middleware.

pub mod htmx;

pub use htmx::{htmx_middleware, HtmxLayer, HtmxService};
