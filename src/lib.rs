//! Movie Cache - A read-through cache for movie metadata
//!
//! Serves movie records from a key-value store, falling back to the OMDb API
//! on a miss and populating the store for later requests.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod provider;

pub use api::AppState;
pub use config::Config;
pub use lookup::LookupService;
