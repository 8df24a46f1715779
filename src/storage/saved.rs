//! Saved-question list: questions the user bookmarked from the forge.

use anyhow::Result;

use super::store;
use crate::question::Question;

pub const SAVED_FILE: &str = "saved_questions.json";

pub fn load_saved_questions() -> Result<Vec<Question>> {
    store::load_or_default(SAVED_FILE)
}

pub fn save_saved_questions(questions: &[Question]) -> Result<()> {
    store::save(SAVED_FILE, &questions)
}

/// Append one question; returns the new list length.
pub fn append_saved_question(question: &Question) -> Result<usize> {
    let mut questions = load_saved_questions()?;
    questions.push(question.clone());
    save_saved_questions(&questions)?;
    Ok(questions.len())
}

/// Remove by position; out-of-range indices are a no-op.
pub fn remove_saved_question(index: usize) -> Result<Vec<Question>> {
    let mut questions = load_saved_questions()?;
    if index < questions.len() {
        questions.remove(index);
        save_saved_questions(&questions)?;
    }
    Ok(questions)
}
