//! Request handlers, one submodule per resource.
//!
//! Handlers load what they need through the repositories in `trener_db`,
//! compute with `trener_core` and map failures via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod active_workout;
pub mod bot;
pub mod chat;
pub mod equipment;
pub mod gamification;
pub mod metrics;
pub mod notifications;
pub mod progress;
pub mod routines;
pub mod stats;
pub mod weights;
pub mod workouts;
