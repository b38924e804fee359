//! API Module
//!
//! HTTP handlers and routing exposing the gated cache over REST.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by text key
//! - `POST /get` - Retrieve a value by typed JSON key
//! - `GET /stats` - Gate and filter statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
