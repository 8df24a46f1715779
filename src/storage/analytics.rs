//! Performance analytics: an append-only attempt history plus incremental
//! per-subtopic, per-chapter and per-subject tallies. The tallies are
//! derived data and stay consistent with the history by construction: every
//! append bumps all three dimensions exactly once.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::store;

pub const ANALYTICS_FILE: &str = "performance_analytics.json";

/// Chapters with at least this many attempts qualify for weak-area analysis.
const WEAK_AREA_MIN_ATTEMPTS: u32 = 3;
const WEAK_AREA_ACCURACY_CUTOFF: f64 = 70.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub timestamp: DateTime<Utc>,
    pub subtopic: String,
    pub chapter: String,
    pub subject: String,
    #[serde(rename = "class")]
    pub class_level: String,
    pub correct: bool,
    pub difficulty: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: u32,
    pub total: u32,
}

impl Tally {
    fn bump(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Accuracy in percent; an empty tally reads as 0.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total) * 100.0
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Analytics {
    pub question_history: Vec<AttemptRecord>,
    pub subtopic_stats: BTreeMap<String, Tally>,
    pub chapter_stats: BTreeMap<String, Tally>,
    pub subject_stats: BTreeMap<String, Tally>,
}

impl Analytics {
    /// Append one attempt and bump every aggregate dimension.
    pub fn record_attempt(&mut self, attempt: AttemptRecord) {
        self.subtopic_stats
            .entry(attempt.subtopic.clone())
            .or_default()
            .bump(attempt.correct);
        self.chapter_stats
            .entry(attempt.chapter.clone())
            .or_default()
            .bump(attempt.correct);
        self.subject_stats
            .entry(format!("{}_{}", attempt.class_level, attempt.subject))
            .or_default()
            .bump(attempt.correct);

        self.question_history.push(attempt);
    }

    /// Overall correct/total across the full history.
    pub fn overall(&self) -> Tally {
        Tally {
            correct: self.question_history.iter().filter(|a| a.correct).count() as u32,
            total: self.question_history.len() as u32,
        }
    }

    /// Chapters with enough attempts and sub-cutoff accuracy, worst first.
    pub fn weak_chapters(&self) -> Vec<(&str, Tally)> {
        let mut weak: Vec<(&str, Tally)> = self
            .chapter_stats
            .iter()
            .filter(|(_, tally)| {
                tally.total >= WEAK_AREA_MIN_ATTEMPTS
                    && tally.accuracy() < WEAK_AREA_ACCURACY_CUTOFF
            })
            .map(|(name, tally)| (name.as_str(), *tally))
            .collect();

        weak.sort_by(|a, b| a.1.accuracy().total_cmp(&b.1.accuracy()));
        weak
    }

    /// Subject tallies, best accuracy first.
    pub fn subjects_ranked(&self) -> Vec<(&str, Tally)> {
        let mut subjects: Vec<(&str, Tally)> = self
            .subject_stats
            .iter()
            .filter(|(_, tally)| tally.total > 0)
            .map(|(key, tally)| (key.as_str(), *tally))
            .collect();

        subjects.sort_by(|a, b| b.1.accuracy().total_cmp(&a.1.accuracy()));
        subjects
    }

    /// The most recent `n` attempts, newest first.
    pub fn recent(&self, n: usize) -> Vec<&AttemptRecord> {
        self.question_history.iter().rev().take(n).collect()
    }
}

pub fn load_analytics() -> Result<Analytics> {
    store::load_or_default(ANALYTICS_FILE)
}

pub fn save_analytics(analytics: &Analytics) -> Result<()> {
    store::save(ANALYTICS_FILE, analytics)
}

/// Track one graded question attempt and persist. Callers are responsible
/// for de-duplicating by a stable per-question key so revisiting a graded
/// question does not double count.
pub fn track_question_attempt(
    subtopic: &str,
    chapter: &str,
    subject: &str,
    class_level: &str,
    is_correct: bool,
    difficulty: &str,
) -> Result<()> {
    let mut analytics = load_analytics()?;
    analytics.record_attempt(AttemptRecord {
        timestamp: Utc::now(),
        subtopic: subtopic.to_string(),
        chapter: chapter.to_string(),
        subject: subject.to_string(),
        class_level: class_level.to_string(),
        correct: is_correct,
        difficulty: difficulty.to_string(),
    });
    save_analytics(&analytics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(subtopic: &str, chapter: &str, subject: &str, correct: bool) -> AttemptRecord {
        AttemptRecord {
            timestamp: Utc::now(),
            subtopic: subtopic.to_string(),
            chapter: chapter.to_string(),
            subject: subject.to_string(),
            class_level: "11th".to_string(),
            correct,
            difficulty: "Medium".to_string(),
        }
    }

    #[test]
    fn aggregates_stay_consistent_with_history() {
        let mut analytics = Analytics::default();
        let cases = [
            ("Vectors", "Kinematics", "Physics", true),
            ("Vectors", "Kinematics", "Physics", false),
            ("Moles", "Stoichiometry", "Chemistry", true),
            ("Limits", "Calculus", "Maths", false),
            ("Projectiles", "Kinematics", "Physics", true),
        ];
        for (subtopic, chapter, subject, correct) in cases {
            analytics.record_attempt(attempt(subtopic, chapter, subject, correct));
        }

        let n = analytics.question_history.len() as u32;
        for dim in [
            &analytics.subtopic_stats,
            &analytics.chapter_stats,
            &analytics.subject_stats,
        ] {
            let total: u32 = dim.values().map(|t| t.total).sum();
            assert_eq!(total, n);
        }

        assert_eq!(analytics.overall().total, 5);
        assert_eq!(analytics.overall().correct, 3);
        assert_eq!(analytics.chapter_stats["Kinematics"].total, 3);
        assert_eq!(analytics.subject_stats["11th_Physics"].total, 3);
    }

    #[test]
    fn weak_chapters_need_three_attempts_and_low_accuracy() {
        let mut analytics = Analytics::default();
        // Two misses only: not enough volume to call it weak.
        analytics.record_attempt(attempt("a", "Sparse", "Physics", false));
        analytics.record_attempt(attempt("a", "Sparse", "Physics", false));
        // 1/3 correct: weak.
        analytics.record_attempt(attempt("b", "Shaky", "Physics", true));
        analytics.record_attempt(attempt("b", "Shaky", "Physics", false));
        analytics.record_attempt(attempt("b", "Shaky", "Physics", false));
        // 3/3 correct: strong.
        analytics.record_attempt(attempt("c", "Solid", "Physics", true));
        analytics.record_attempt(attempt("c", "Solid", "Physics", true));
        analytics.record_attempt(attempt("c", "Solid", "Physics", true));

        let weak = analytics.weak_chapters();
        assert_eq!(weak.len(), 1);
        assert_eq!(weak[0].0, "Shaky");
    }

    #[test]
    fn weak_chapters_sorted_worst_first() {
        let mut analytics = Analytics::default();
        for _ in 0..3 {
            analytics.record_attempt(attempt("a", "Bad", "Physics", false));
        }
        analytics.record_attempt(attempt("b", "Meh", "Physics", true));
        analytics.record_attempt(attempt("b", "Meh", "Physics", false));
        analytics.record_attempt(attempt("b", "Meh", "Physics", false));

        let weak = analytics.weak_chapters();
        assert_eq!(weak[0].0, "Bad");
        assert_eq!(weak[1].0, "Meh");
    }

    #[test]
    fn subjects_ranked_best_first() {
        let mut analytics = Analytics::default();
        analytics.record_attempt(attempt("a", "c1", "Physics", false));
        analytics.record_attempt(attempt("b", "c2", "Maths", true));

        let ranked = analytics.subjects_ranked();
        assert_eq!(ranked[0].0, "11th_Maths");
        assert_eq!(ranked[1].0, "11th_Physics");
    }

    #[test]
    fn recent_is_reverse_chronological_and_capped() {
        let mut analytics = Analytics::default();
        for i in 0..12 {
            analytics.record_attempt(attempt(&format!("s{}", i), "c", "Physics", true));
        }

        let recent = analytics.recent(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].subtopic, "s11");
        assert_eq!(recent[9].subtopic, "s2");
    }

    #[test]
    fn empty_tally_accuracy_is_zero() {
        assert_eq!(Tally::default().accuracy(), 0.0);
    }
}
