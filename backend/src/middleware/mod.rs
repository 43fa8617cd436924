//! Request middleware.
//!
//! Request lifecycle concerns that wrap every page, such as trace
//! propagation and access logging.

pub mod trace;

pub use trace::Trace;
