pub mod analytics;
pub mod challenge;
pub mod config;
pub mod dashboard;
pub mod practice;
pub mod saved;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::question::Question;
use crate::question::answer::{OptionLabel, format_option_label};

/// Create a spinner for indeterminate progress
pub(crate) fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Print every option with its post-grading annotation. When the correct
/// answer could not be resolved (`correct` is `None`), no option is marked
/// correct; callers print the raw token separately.
pub(crate) fn print_graded_options(
    question: &Question,
    selected: Option<usize>,
    correct: Option<usize>,
) {
    for (i, option) in question.options.iter().enumerate() {
        match format_option_label(i, selected, correct) {
            OptionLabel::SelectedCorrect => {
                println!(
                    "    {}",
                    format!("✅ {} (Your Answer - Correct)", option).green()
                );
            }
            OptionLabel::SelectedIncorrect => {
                println!("    {}", format!("❌ {} (Your Answer)", option).red());
            }
            OptionLabel::CorrectUnselected => {
                println!("    {}", format!("✅ {} (Correct Answer)", option).green());
            }
            OptionLabel::Plain => {
                println!("       {}", option);
            }
        }
    }
}

/// A simple text progress bar: `████████░░░░░░░░░░░░`
pub(crate) fn text_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
