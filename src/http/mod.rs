//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! request
//!     → middleware/htmx.rs (parse HX headers, attach handle)
//!     → extract.rs (IsHtmx / Htmx / HxRedirect / HxState in handlers)
//!     → handler records directives
//!     → middleware/htmx.rs (apply directives, Vary)
//!     → response
//! ```

pub mod extract;
pub mod middleware;
pub mod server;

pub use extract::{HxRedirect, IsHtmx, MissingHtmxLayer};
pub use middleware::{htmx_middleware, HtmxLayer, HtmxService};
pub use server::HttpServer;
