//! Subtopic completion progress. A subtopic counts once no matter how many
//! times it is re-practiced.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::store;

pub const PROGRESS_FILE: &str = "user_progress.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProgress {
    pub completed_subtopics: BTreeSet<String>,
    pub total_subtopics_practiced: usize,
}

impl UserProgress {
    /// Mark a subtopic complete. Idempotent; returns whether this was the
    /// first completion.
    pub fn complete_subtopic(&mut self, subtopic: &str) -> bool {
        let first_time = self.completed_subtopics.insert(subtopic.to_string());
        self.total_subtopics_practiced = self.completed_subtopics.len();
        first_time
    }

    pub fn is_completed(&self, subtopic: &str) -> bool {
        self.completed_subtopics.contains(subtopic)
    }
}

pub fn load_progress() -> Result<UserProgress> {
    store::load_or_default(PROGRESS_FILE)
}

pub fn save_progress(progress: &UserProgress) -> Result<()> {
    store::save(PROGRESS_FILE, progress)
}

/// Record a finished subtopic session and persist.
pub fn update_progress(subtopic: &str) -> Result<UserProgress> {
    let mut progress = load_progress()?;
    if progress.complete_subtopic(subtopic) {
        save_progress(&progress)?;
    }
    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_is_idempotent() {
        let mut progress = UserProgress::default();
        assert!(progress.complete_subtopic("Thermodynamics"));
        assert_eq!(progress.total_subtopics_practiced, 1);

        assert!(!progress.complete_subtopic("Thermodynamics"));
        assert_eq!(progress.total_subtopics_practiced, 1);
    }

    #[test]
    fn total_tracks_set_cardinality() {
        let mut progress = UserProgress::default();
        for name in ["A", "B", "C", "B", "A"] {
            progress.complete_subtopic(name);
        }
        assert_eq!(progress.total_subtopics_practiced, 3);
        assert!(progress.is_completed("B"));
        assert!(!progress.is_completed("D"));
    }
}
