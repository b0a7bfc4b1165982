//! API Module
//!
//! HTTP handlers and routing for the movie cache REST API.
//!
//! # Endpoints
//! - `GET /getMovie?name=..&year=..` - Look up a movie, through the cache
//! - `GET /all` - List every cached movie
//! - `GET /stats` - Get lookup statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
