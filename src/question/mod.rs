pub mod answer;
pub mod parser;

use serde::{Deserialize, Serialize};

use crate::llm::{GeminiClient, GenerationError};

/// A multiple-choice question ready to be shown to the user.
///
/// `correct_answer` is kept in the raw form the generator produced (a bare
/// letter, a prefixed option, or full option text); it is only interpreted
/// through [`answer::resolve_answer`] at grading time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
    pub subtopic: String,
}

/// Outcome of the generation pipeline. Generation and parse failures degrade
/// to the fallback question so a bad API day never blocks practice.
pub enum Generated {
    Fresh(Question),
    Fallback { question: Question, reason: String },
}

/// Generate a question for a subtopic: one call for the question itself, a
/// second independent call for the explanation. An explanation failure only
/// degrades the explanation text, never the question.
pub async fn generate_for_subtopic(client: &GeminiClient, subtopic: &str) -> Generated {
    let raw = match client.generate_question(subtopic).await {
        Ok(raw) => raw,
        Err(e) => {
            return Generated::Fallback {
                question: fallback_question(subtopic),
                reason: format!("generation failed: {}", e),
            };
        }
    };

    let Some(mut question) = parser::parse_generated_question(&raw, subtopic) else {
        return Generated::Fallback {
            question: fallback_question(subtopic),
            reason: "could not parse generated question".to_string(),
        };
    };

    question.explanation = match client
        .generate_explanation(
            subtopic,
            &question.question_text,
            &question.options,
            &question.correct_answer,
        )
        .await
    {
        Ok(text) => text,
        Err(GenerationError::EmptyResponse) => "No explanation available.".to_string(),
        Err(e) => format!("Could not generate explanation: {}", e),
    };

    Generated::Fresh(question)
}

/// Deterministic stand-in used whenever generation or parsing fails.
pub fn fallback_question(subtopic: &str) -> Question {
    Question {
        question_text: format!(
            "Sample question for {}: What is the fundamental concept underlying this topic?",
            subtopic
        ),
        options: vec![
            "Option 1 - Basic principle".to_string(),
            "Option 2 - Advanced concept".to_string(),
            "Option 3 - Related theory".to_string(),
            "Option 4 - Alternative approach".to_string(),
        ],
        correct_answer: "A".to_string(),
        explanation: format!(
            "This is a sample question for {}. In a real scenario, this would contain \
             a detailed step-by-step explanation of the concept, common mistakes \
             students make, and how to avoid them.",
            subtopic
        ),
        subtopic: subtopic.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_question_is_well_formed() {
        let q = fallback_question("Rotational Motion");
        assert_eq!(q.options.len(), 4);
        assert_eq!(answer::resolve_answer(&q.options, &q.correct_answer), Some(0));
        assert!(q.question_text.contains("Rotational Motion"));
    }
}
