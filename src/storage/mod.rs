pub mod analytics;
pub mod progress;
pub mod saved;
pub mod stats;
pub mod store;

pub use analytics::{Analytics, AttemptRecord, Tally};
pub use progress::UserProgress;
pub use stats::{Rank, UserStats};
