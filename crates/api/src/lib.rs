//! Trener API server library.
//!
//! Exposes config, state, error handling, the coach and the routes so
//! integration tests and the binary entrypoint can both access them.

pub mod coach;
pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
