//! Lookup Module
//!
//! Cache-aside lookup service and per-key single-flight coordination.

mod service;
mod single_flight;

#[cfg(test)]
pub(crate) mod fakes;

#[cfg(test)]
mod property_tests;

pub use service::{LookupService, DEFAULT_PROVIDER_TIMEOUT};
