//! Durable storage layer.

pub mod repository;
pub mod storage;

pub use repository::WorkoutRepository;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

/// Storage key names as constants.
pub mod keys {
    /// The whole workout collection, as one JSON array.
    pub const WORKOUTS: &str = "workouts";
}
