//! HX protocol subsystem.
//!
//! # Data Flow
//! ```text
//! request headers
//!     → state.rs (HxState, parsed once)
//!     → Htmx handle (response.rs) stored in request extensions
//!     → handler calls location / push_url / redirect / reswap / trigger ...
//!     → Directives recorded (headers + status override)
//!     → middleware applies Directives to the response
//! ```
//!
//! Argument types for the mutators live in `location.rs`, `swap.rs` and
//! `trigger.rs`; header names in `headers.rs`.

pub mod error;
pub mod headers;
pub mod location;
pub mod response;
pub mod state;
pub mod swap;
pub mod trigger;

pub use error::{HtmxError, HtmxResult};
pub use location::{HistoryUpdate, HxLocation, LocationTarget};
pub use response::{Directives, Htmx};
pub use state::HxState;
pub use swap::{Delay, SwapModifier, SwapPhase, SwapStyle};
pub use trigger::TriggerTiming;
