//! Everything the handlers share around training history and the model:
//! history loading, profile evaluation, routine generation and the
//! tool-calling conversation.

pub mod conversation;
pub mod history;
pub mod routines;
pub mod tools;

use trener_core::types::TrainingDate;

/// The calendar date used for streaks and weekly windows.
pub fn today() -> TrainingDate {
    chrono::Utc::now().date_naive()
}
