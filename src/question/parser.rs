//! Line-oriented parser for generated question text.
//!
//! The generator is asked for a fixed layout (Question / A-D options /
//! Correct Answer / optional Explanation) but real output drifts, so parsing
//! is a forgiving state machine: marker lines switch sections, continuation
//! lines extend the current free-text section, anything else is ignored.

use super::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Question,
    Options,
    Answer,
    Explanation,
}

const QUESTION_MARKERS: &[&str] = &["Question:", "Q:"];
const ANSWER_MARKERS: &[&str] = &["Correct Answer:", "Answer:", "Correct:"];
const EXPLANATION_MARKERS: &[&str] = &["Explanation:", "Solution:"];

/// Parse raw generated text into a [`Question`], or `None` when the text
/// does not yield a non-empty question, exactly 4 options, and a correct
/// answer token. Callers substitute the fallback question on `None`.
pub fn parse_generated_question(text: &str, subtopic: &str) -> Option<Question> {
    let mut question_text = String::new();
    let mut options: Vec<&str> = Vec::new();
    let mut correct_answer = String::new();
    let mut explanation = String::new();
    let mut section = Section::None;

    for line in text.lines() {
        let line = line.trim();

        if let Some(rest) = strip_marker(line, QUESTION_MARKERS) {
            section = Section::Question;
            question_text = rest.to_string();
        } else if is_option_line(line) {
            section = Section::Options;
            options.push(line);
        } else if let Some(rest) = strip_marker(line, ANSWER_MARKERS) {
            section = Section::Answer;
            if let Some(letter) = find_answer_letter(rest) {
                correct_answer = letter.to_string();
            }
        } else if let Some(rest) = strip_marker(line, EXPLANATION_MARKERS) {
            section = Section::Explanation;
            explanation = rest.to_string();
        } else if !line.is_empty() {
            // Continuation lines only extend the free-text sections.
            match section {
                Section::Question => push_joined(&mut question_text, line),
                Section::Explanation => push_joined(&mut explanation, line),
                Section::None | Section::Options | Section::Answer => {}
            }
        }
    }

    if question_text.is_empty() || options.len() != 4 || correct_answer.is_empty() {
        return None;
    }

    Some(Question {
        question_text,
        options: options.iter().map(|opt| strip_option_prefix(opt)).collect(),
        correct_answer,
        explanation,
        subtopic: subtopic.to_string(),
    })
}

fn strip_marker<'a>(line: &'a str, markers: &[&str]) -> Option<&'a str> {
    markers
        .iter()
        .find_map(|m| line.strip_prefix(m))
        .map(str::trim)
}

/// An option line starts with an uppercase letter A-D followed by one of
/// `.`, `)` or `:`.
fn is_option_line(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(chars.next(), Some('A'..='D')) && matches!(chars.next(), Some('.' | ')' | ':'))
}

/// First A-D (case-insensitive) in the answer payload becomes the raw token.
fn find_answer_letter(payload: &str) -> Option<char> {
    payload
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .find(|c| ('A'..='D').contains(c))
}

/// Drop the leading letter designator ("B) " etc.) from a verbatim option
/// line. Only called on lines that passed [`is_option_line`].
fn strip_option_prefix(line: &str) -> String {
    line.get(2..).unwrap_or("").trim().to_string()
}

fn push_joined(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::answer::resolve_answer;

    const WELL_FORMED: &str = "\
Question: What is the SI unit of force?
A. Joule
B. Newton
C. Pascal
D. Watt
Correct Answer: B
Explanation: Force is mass times acceleration, measured in newtons.";

    #[test]
    fn parses_well_formed_block() {
        let q = parse_generated_question(WELL_FORMED, "Laws of Motion").unwrap();
        assert_eq!(q.question_text, "What is the SI unit of force?");
        assert_eq!(q.options, vec!["Joule", "Newton", "Pascal", "Watt"]);
        assert_eq!(q.correct_answer, "B");
        assert_eq!(q.subtopic, "Laws of Motion");
        assert!(q.explanation.starts_with("Force is mass"));
    }

    #[test]
    fn parsed_answer_resolves_against_options() {
        let q = parse_generated_question(WELL_FORMED, "Laws of Motion").unwrap();
        assert_eq!(resolve_answer(&q.options, &q.correct_answer), Some(1));
    }

    #[test]
    fn missing_option_fails_validation() {
        let text = "\
Question: Pick one.
A. First
B. Second
C. Third
Correct Answer: A";
        assert!(parse_generated_question(text, "t").is_none());
    }

    #[test]
    fn missing_answer_fails_validation() {
        let text = "\
Question: Pick one.
A. First
B. Second
C. Third
D. Fourth";
        assert!(parse_generated_question(text, "t").is_none());
    }

    #[test]
    fn multiline_question_text_is_space_joined() {
        let text = "\
Question: A block of mass 2 kg rests
on a frictionless incline of 30 degrees.
What is the acceleration?
A) 2.5 m/s^2
B) 4.9 m/s^2
C) 9.8 m/s^2
D) 1.2 m/s^2
Answer: b";
        let q = parse_generated_question(text, "Inclined Planes").unwrap();
        assert_eq!(
            q.question_text,
            "A block of mass 2 kg rests on a frictionless incline of 30 degrees. \
             What is the acceleration?"
        );
        // Lowercase answer letter is uppercased.
        assert_eq!(q.correct_answer, "B");
    }

    #[test]
    fn accepts_alternate_option_and_answer_markers() {
        let text = "\
Q: Which is a noble gas?
A: Argon
B: Oxygen
C: Nitrogen
D: Hydrogen
Correct: A
Solution: Argon sits in group 18.";
        let q = parse_generated_question(text, "Periodic Table").unwrap();
        assert_eq!(q.options[0], "Argon");
        assert_eq!(q.correct_answer, "A");
        assert_eq!(q.explanation, "Argon sits in group 18.");
    }

    #[test]
    fn preamble_and_blank_lines_are_ignored() {
        let text = format!("Here is your question!\n\n{}\n", WELL_FORMED);
        let q = parse_generated_question(&text, "t").unwrap();
        assert_eq!(q.options.len(), 4);
    }

    #[test]
    fn answer_letter_extracted_from_decorated_payload() {
        let text = "\
Question: Pick one.
A. First
B. Second
C. Third
D. Fourth
Correct Answer: (c)";
        let q = parse_generated_question(text, "t").unwrap();
        assert_eq!(q.correct_answer, "C");
    }

    #[test]
    fn empty_input_fails() {
        assert!(parse_generated_question("", "t").is_none());
    }
}
