//! API Module
//!
//! HTTP handlers and routing for the cache inspection API.
//!
//! # Endpoints
//! - `PUT /entries` - Store a JSON value
//! - `DELETE /entries` - Clear the cache
//! - `GET /entries/:key` - Retrieve a value by key
//! - `DELETE /entries/:key` - Delete a key
//! - `POST /invalidate` - Delete keys matching a pattern
//! - `GET /stats` - Cache statistics
//! - `GET /debug` - Statistics plus per-entry detail
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
