//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such
//! as tracing and access logging.

pub mod trace;

pub use trace::{Trace, with_trace};
