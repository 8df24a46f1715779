//! The syllabus hierarchy: class -> subject -> chapter -> subtopic.
//!
//! Loaded from `syllabus.json` in the data directory when the user has
//! supplied one, otherwise a built-in JEE-style default is used. The flat
//! subtopic listing drives topic selection in practice mode and random
//! sampling in challenge mode.

use anyhow::Result;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::storage::store;

pub const SYLLABUS_FILE: &str = "syllabus.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Syllabus {
    pub syllabus: BTreeMap<String, BTreeMap<String, SubjectData>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectData {
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter_name: String,
    pub subtopics: Vec<String>,
}

/// One subtopic with its position in the hierarchy, in display form
/// (class "11th", subject "Physics").
#[derive(Debug, Clone)]
pub struct SubtopicRef {
    pub subtopic: String,
    pub chapter: String,
    pub subject: String,
    pub class_level: String,
}

/// "class_11" -> "11th"
fn class_label(key: &str) -> String {
    format!("{}th", key.trim_start_matches("class_"))
}

/// "11th" -> "class_11"
fn class_key(label: &str) -> String {
    format!("class_{}", label.trim_end_matches("th"))
}

fn subject_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl Syllabus {
    /// Load the user's syllabus, or the built-in default when absent or
    /// unreadable.
    pub fn load() -> Result<Self> {
        let path = store::record_path(SYLLABUS_FILE)?;
        if path.exists() {
            let loaded: Syllabus = store::load_from_path(&path);
            if !loaded.syllabus.is_empty() {
                return Ok(loaded);
            }
        }
        Ok(Self::builtin())
    }

    pub fn builtin() -> Self {
        serde_json::from_str(DEFAULT_SYLLABUS).unwrap_or_default()
    }

    /// Class labels in display form ("11th", "12th").
    pub fn classes(&self) -> Vec<String> {
        self.syllabus.keys().map(|k| class_label(k)).collect()
    }

    pub fn subjects(&self, class: &str) -> Vec<String> {
        self.syllabus
            .get(&class_key(class))
            .map(|subjects| subjects.keys().map(|k| subject_label(k)).collect())
            .unwrap_or_default()
    }

    pub fn chapters(&self, class: &str, subject: &str) -> &[Chapter] {
        self.syllabus
            .get(&class_key(class))
            .and_then(|subjects| subjects.get(&subject.to_lowercase()))
            .map(|data| data.chapters.as_slice())
            .unwrap_or_default()
    }

    /// Total leaf count across the whole syllabus.
    pub fn total_subtopics(&self) -> usize {
        self.flatten(None, None).len()
    }

    /// Flat subtopic listing, optionally filtered by class and/or subject
    /// display labels.
    pub fn flatten(&self, class: Option<&str>, subject: Option<&str>) -> Vec<SubtopicRef> {
        let mut refs = Vec::new();

        for (class_k, subjects) in &self.syllabus {
            let label = class_label(class_k);
            if class.is_some_and(|c| c != label) {
                continue;
            }
            for (subject_k, data) in subjects {
                let subject_display = subject_label(subject_k);
                if subject.is_some_and(|s| !s.eq_ignore_ascii_case(subject_k)) {
                    continue;
                }
                for chapter in &data.chapters {
                    for subtopic in &chapter.subtopics {
                        refs.push(SubtopicRef {
                            subtopic: subtopic.clone(),
                            chapter: chapter.chapter_name.clone(),
                            subject: subject_display.clone(),
                            class_level: label.clone(),
                        });
                    }
                }
            }
        }

        refs
    }

    /// Sample `count` subtopics for a challenge. When the filtered pool is
    /// smaller than the request, entries repeat rather than shortening the
    /// challenge; an empty pool yields an empty vec.
    pub fn sample_subtopics<R: Rng>(
        &self,
        class: Option<&str>,
        subject: Option<&str>,
        count: usize,
        rng: &mut R,
    ) -> Vec<SubtopicRef> {
        let pool = self.flatten(class, subject);
        if pool.is_empty() {
            return Vec::new();
        }

        if pool.len() >= count {
            let mut picked: Vec<SubtopicRef> =
                pool.choose_multiple(rng, count).cloned().collect();
            picked.shuffle(rng);
            picked
        } else {
            (0..count)
                .map(|i| pool[i % pool.len()].clone())
                .collect()
        }
    }
}

const DEFAULT_SYLLABUS: &str = r#"{
  "syllabus": {
    "class_11": {
      "physics": {
        "chapters": [
          {
            "chapter_name": "Kinematics",
            "subtopics": ["Motion in a Straight Line", "Projectile Motion", "Relative Velocity"]
          },
          {
            "chapter_name": "Laws of Motion",
            "subtopics": ["Newton's Laws", "Friction", "Circular Motion Dynamics"]
          }
        ]
      },
      "chemistry": {
        "chapters": [
          {
            "chapter_name": "Atomic Structure",
            "subtopics": ["Bohr Model", "Quantum Numbers", "Electronic Configuration"]
          },
          {
            "chapter_name": "Chemical Bonding",
            "subtopics": ["Ionic Bonding", "VSEPR Theory", "Hybridisation"]
          }
        ]
      },
      "maths": {
        "chapters": [
          {
            "chapter_name": "Quadratic Equations",
            "subtopics": ["Nature of Roots", "Sum and Product of Roots", "Quadratic Inequalities"]
          },
          {
            "chapter_name": "Trigonometry",
            "subtopics": ["Trigonometric Identities", "Trigonometric Equations", "Heights and Distances"]
          }
        ]
      }
    },
    "class_12": {
      "physics": {
        "chapters": [
          {
            "chapter_name": "Electrostatics",
            "subtopics": ["Coulomb's Law", "Electric Field and Potential", "Capacitors"]
          },
          {
            "chapter_name": "Optics",
            "subtopics": ["Reflection and Refraction", "Lenses and Mirrors", "Wave Optics"]
          }
        ]
      },
      "chemistry": {
        "chapters": [
          {
            "chapter_name": "Electrochemistry",
            "subtopics": ["Electrochemical Cells", "Nernst Equation", "Electrolysis"]
          },
          {
            "chapter_name": "Organic Chemistry",
            "subtopics": ["Alcohols and Phenols", "Aldehydes and Ketones", "Amines"]
          }
        ]
      },
      "maths": {
        "chapters": [
          {
            "chapter_name": "Calculus",
            "subtopics": ["Limits and Continuity", "Differentiation", "Definite Integration"]
          },
          {
            "chapter_name": "Vectors and 3D",
            "subtopics": ["Vector Algebra", "Dot and Cross Product", "Lines and Planes"]
          }
        ]
      }
    }
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn builtin_syllabus_parses() {
        let syllabus = Syllabus::builtin();
        assert_eq!(syllabus.classes(), vec!["11th", "12th"]);
        assert_eq!(
            syllabus.subjects("11th"),
            vec!["Chemistry", "Maths", "Physics"]
        );
        assert!(syllabus.total_subtopics() > 0);
    }

    #[test]
    fn total_counts_every_leaf() {
        let syllabus = Syllabus::builtin();
        let by_hand: usize = syllabus
            .syllabus
            .values()
            .flat_map(|subjects| subjects.values())
            .flat_map(|data| &data.chapters)
            .map(|c| c.subtopics.len())
            .sum();
        assert_eq!(syllabus.total_subtopics(), by_hand);
    }

    #[test]
    fn flatten_respects_filters() {
        let syllabus = Syllabus::builtin();
        let physics_11 = syllabus.flatten(Some("11th"), Some("Physics"));
        assert!(!physics_11.is_empty());
        assert!(
            physics_11
                .iter()
                .all(|r| r.class_level == "11th" && r.subject == "Physics")
        );
    }

    #[test]
    fn sampling_fills_requested_count_from_small_pool() {
        let syllabus = Syllabus::builtin();
        let mut rng = StdRng::seed_from_u64(7);

        let pool = syllabus.flatten(Some("11th"), Some("Physics"));
        let want = pool.len() + 4;
        let picked = syllabus.sample_subtopics(Some("11th"), Some("Physics"), want, &mut rng);
        assert_eq!(picked.len(), want);
    }

    #[test]
    fn sampling_without_pool_is_empty() {
        let syllabus = Syllabus::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(syllabus.sample_subtopics(None, None, 5, &mut rng).is_empty());
    }

    #[test]
    fn class_labels_round_trip() {
        assert_eq!(class_label("class_11"), "11th");
        assert_eq!(class_key("12th"), "class_12");
    }
}
