//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` as the first argument.

pub mod active_workout_repo;
pub mod chat_workout_repo;
pub mod equipment_repo;
pub mod profile_repo;
pub mod workout_repo;

pub use active_workout_repo::ActiveWorkoutRepo;
pub use chat_workout_repo::ChatWorkoutRepo;
pub use equipment_repo::EquipmentRepo;
pub use profile_repo::ProfileRepo;
pub use workout_repo::WorkoutRepo;
