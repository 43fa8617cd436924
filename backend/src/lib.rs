//! Cafe directory backend.
//!
//! Records and validation live in [`domain`], page handlers in [`inbound`],
//! and storage adapters in [`outbound`].

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
