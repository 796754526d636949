//! Outbound chat-room notifications.

pub mod matrix;

pub use matrix::{MatrixConfig, MatrixNotifier, NotifyError};
