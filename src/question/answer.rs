//! Answer reconciliation.
//!
//! Generators are inconsistent about how they state the correct answer: a
//! bare letter ("C"), a prefixed option ("C. Paris"), or the full option
//! text. This module maps that raw token onto one of the literal options
//! shown to the user, in a single place, so no caller has to special-case
//! the encoding.

/// Resolve a raw correct-answer token to an index into `options`.
///
/// Priority order:
/// 1. exact match against an option;
/// 2. letter-prefix match (options pre-labeled "C. ..." win over position);
/// 3. positional mapping `A`=0, `B`=1, ...;
/// 4. `None` — the token is irresolvable and the caller must show the raw
///    token instead of highlighting an option.
pub fn resolve_answer(options: &[String], raw_answer: &str) -> Option<usize> {
    if let Some(idx) = options.iter().position(|opt| opt == raw_answer) {
        return Some(idx);
    }

    let letter = raw_answer
        .chars()
        .find(|c| c.is_ascii_alphabetic())?
        .to_ascii_uppercase();

    if let Some(idx) = options
        .iter()
        .position(|opt| opt.trim_start().to_uppercase().starts_with(letter))
    {
        return Some(idx);
    }

    let idx = (letter as u8 - b'A') as usize;
    (idx < options.len()).then_some(idx)
}

/// How a single option should be annotated after grading. Exactly one label
/// applies to each option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionLabel {
    SelectedCorrect,
    SelectedIncorrect,
    CorrectUnselected,
    Plain,
}

/// Pure labeling of one option given the user's selection and the resolved
/// correct index (either may be absent).
pub fn format_option_label(
    option_index: usize,
    selected_index: Option<usize>,
    correct_index: Option<usize>,
) -> OptionLabel {
    let selected = selected_index == Some(option_index);
    let correct = correct_index == Some(option_index);

    match (selected, correct) {
        (true, true) => OptionLabel::SelectedCorrect,
        (true, false) => OptionLabel::SelectedIncorrect,
        (false, true) => OptionLabel::CorrectUnselected,
        (false, false) => OptionLabel::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_option_text_wins() {
        let options = opts(&["Paris", "London", "Berlin", "Madrid"]);
        for opt in &options {
            assert_eq!(resolve_answer(&options, opt), options.iter().position(|o| o == opt));
        }
    }

    #[test]
    fn bare_letter_maps_positionally() {
        // No option text begins with A-D, so the positional rule applies.
        let options = opts(&["Paris", "London", "Rome", "Madrid"]);
        assert_eq!(resolve_answer(&options, "A"), Some(0));
        assert_eq!(resolve_answer(&options, "b"), Some(1));
        assert_eq!(resolve_answer(&options, "C"), Some(2));
        assert_eq!(resolve_answer(&options, "D."), Some(3));
    }

    #[test]
    fn prefix_match_beats_position() {
        // Options carry their own letter labels in shuffled order; "C" must
        // match the option whose text starts with C, not options[2].
        let options = opts(&["C. Paris", "A. London", "B. Rome", "D. Madrid"]);
        assert_eq!(resolve_answer(&options, "C"), Some(0));
        assert_eq!(resolve_answer(&options, "A"), Some(1));
    }

    #[test]
    fn plain_option_starting_with_the_letter_wins_over_position() {
        // The prefix rule is literal: "B" matches "Berlin" before options[1].
        let options = opts(&["Paris", "London", "Berlin", "Madrid"]);
        assert_eq!(resolve_answer(&options, "B"), Some(2));
    }

    #[test]
    fn prefixed_answer_token_resolves() {
        let options = opts(&["Paris", "London", "Rome", "Madrid"]);
        // First alphabetic char is the designator even with noise around it.
        assert_eq!(resolve_answer(&options, "(b)"), Some(1));
        assert_eq!(resolve_answer(&options, "c) Rome"), Some(2));
    }

    #[test]
    fn out_of_range_letter_is_irresolvable() {
        let options = opts(&["Paris", "London", "Rome", "Madrid"]);
        assert_eq!(resolve_answer(&options, "Z"), None);
        assert_eq!(resolve_answer(&options, "E"), None);
    }

    #[test]
    fn token_without_letters_is_irresolvable() {
        let options = opts(&["1", "2", "3", "4"]);
        assert_eq!(resolve_answer(&options, "42"), None);
        assert_eq!(resolve_answer(&options, ""), None);
    }

    #[test]
    fn labels_are_mutually_exclusive() {
        assert_eq!(format_option_label(1, Some(1), Some(1)), OptionLabel::SelectedCorrect);
        assert_eq!(format_option_label(1, Some(1), Some(2)), OptionLabel::SelectedIncorrect);
        assert_eq!(format_option_label(2, Some(1), Some(2)), OptionLabel::CorrectUnselected);
        assert_eq!(format_option_label(0, Some(1), Some(2)), OptionLabel::Plain);
    }

    #[test]
    fn unresolved_correct_index_never_marks_an_option_correct() {
        for idx in 0..4 {
            let label = format_option_label(idx, Some(1), None);
            assert!(matches!(
                label,
                OptionLabel::Plain | OptionLabel::SelectedIncorrect
            ));
        }
    }
}
