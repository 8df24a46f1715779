use anyhow::Result;
use colored::Colorize;
use inquire::Select;

use crate::question::answer::resolve_answer;
use crate::render;
use crate::storage::saved::{load_saved_questions, remove_saved_question};

pub async fn run() -> Result<()> {
    loop {
        let questions = load_saved_questions()?;

        if questions.is_empty() {
            println!(
                "\n  {}",
                "No saved questions yet. Save interesting questions from the Forge!".dimmed()
            );
            return Ok(());
        }

        println!(
            "\n  {} {}",
            "📚 Saved questions:".bold(),
            questions.len().to_string().cyan()
        );

        let mut entries: Vec<String> = questions
            .iter()
            .enumerate()
            .map(|(i, q)| format!("{}. {}", i + 1, preview(&q.question_text)))
            .collect();
        entries.push("←   Back".to_string());

        let choice = match Select::new("View a question:", entries).raw_prompt() {
            Ok(choice) => choice,
            Err(inquire::InquireError::OperationCanceled)
            | Err(inquire::InquireError::OperationInterrupted) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if choice.index >= questions.len() {
            return Ok(());
        }

        show_question(choice.index, &questions[choice.index])?;
    }
}

fn preview(text: &str) -> String {
    let mut p: String = text.chars().take(60).collect();
    if p.len() < text.len() {
        p.push('…');
    }
    p
}

fn show_question(index: usize, question: &crate::question::Question) -> Result<()> {
    println!("\n  {}", question.question_text.bold());
    println!();

    // Same normalizer as grading: no per-caller answer decoding.
    let correct_index = resolve_answer(&question.options, &question.correct_answer);

    for (i, option) in question.options.iter().enumerate() {
        if correct_index == Some(i) {
            println!("    {}", format!("✅ {} (Correct Answer)", option).green());
        } else {
            println!("    •  {}", option);
        }
    }

    if correct_index.is_none() {
        println!(
            "\n  {} Stated correct answer {} matches no option.",
            "⚠".yellow(),
            question.correct_answer.bold()
        );
    }

    if !question.explanation.is_empty() {
        println!("\n  {}", "Explanation".bold().underline());
        render::render_markdown(&question.explanation);
    }

    let actions = vec!["←   Back to list", "🗑   Remove this question"];
    match Select::new("Action:", actions).prompt() {
        Ok(choice) if choice.contains("Remove") => {
            remove_saved_question(index)?;
            println!("  {} Question removed.", "✓".green());
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(inquire::InquireError::OperationCanceled)
        | Err(inquire::InquireError::OperationInterrupted) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
