//! Database rows and the shapes returned to callers.
//!
//! Document tables keep the serialized document in a `doc` JSON column next
//! to a few extracted columns. Each submodule contains:
//! - A `FromRow` row struct
//! - A `Serialize` stored form with the database id flattened in

pub mod active_workout;
pub mod chat_workout;
pub mod equipment;
pub mod profile;
pub mod workout;
