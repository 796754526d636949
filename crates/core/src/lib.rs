//! Domain types and pure logic of the training tracker. No I/O.

pub mod active;
pub mod coach;
pub mod equipment;
pub mod error;
pub mod gamification;
pub mod intent;
pub mod messages;
pub mod reply;
pub mod routine;
pub mod set_parser;
pub mod stats;
pub mod streak;
pub mod types;
pub mod weights;
pub mod workout;
