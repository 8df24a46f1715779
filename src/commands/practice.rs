use anyhow::Result;
use colored::Colorize;
use inquire::Select;
use std::collections::HashSet;

use crate::commands::{create_spinner, print_graded_options};
use crate::config::Config;
use crate::llm::GeminiClient;
use crate::question::{self, Generated};
use crate::question::answer::resolve_answer;
use crate::render;
use crate::storage::{analytics, progress, saved, stats};
use crate::syllabus::{SubtopicRef, Syllabus};

const QUESTIONS_PER_SESSION: usize = 3;

pub async fn run(subtopic_arg: Option<String>) -> Result<()> {
    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".magenta()
    );
    println!(
        "    {}         {}         {}",
        "│".magenta(),
        "⚔️  THE FORGE - BATTLE ARENA ⚔️".bold().white(),
        "│".magenta()
    );
    println!(
        "    {}      {}      {}",
        "│".magenta(),
        "Three questions stand between you and glory".dimmed(),
        "│".magenta()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".magenta()
    );
    println!();

    let config = Config::load()?;
    let Some(api_key) = config.get_api_key() else {
        println!(
            "{} No API key configured. Run {} to set up.",
            "Error:".red().bold(),
            "leetdojo config".cyan()
        );
        return Ok(());
    };

    let client = GeminiClient::new(api_key, config.default_model.clone())?;
    let syllabus = Syllabus::load()?;

    let target = match subtopic_arg {
        Some(name) => {
            let Some(found) = syllabus
                .flatten(None, None)
                .into_iter()
                .find(|r| r.subtopic.eq_ignore_ascii_case(&name))
            else {
                println!(
                    "{} Subtopic {} is not in the syllabus.",
                    "Error:".red().bold(),
                    name.cyan()
                );
                return Ok(());
            };
            found
        }
        None => match select_subtopic(&syllabus)? {
            Some(target) => target,
            None => return Ok(()),
        },
    };

    println!(
        "\nReady to practice: {}\n",
        target.subtopic.bold().cyan()
    );

    // De-dup map: a question instance updates stats/analytics at most once.
    let mut tracked: HashSet<String> = HashSet::new();
    let mut correct = 0;

    for index in 0..QUESTIONS_PER_SESSION {
        println!(
            "\n{} [{}/{}]  {}",
            "Question".bold().cyan(),
            index + 1,
            QUESTIONS_PER_SESSION,
            format!("({})", target.subtopic).dimmed()
        );

        let is_correct = ask_and_grade(&client, &target, index, &mut tracked, true).await?;
        if is_correct {
            correct += 1;
        }

        println!("{}", "─".repeat(50).dimmed());
    }

    // Completing the session completes the subtopic (idempotently) and may
    // earn a promotion.
    progress::update_progress(&target.subtopic)?;
    if let Some(new_rank) = stats::check_for_rank_up()? {
        println!(
            "\n{} You've been promoted to {}!",
            "🎊 RANK UP!".bold().yellow(),
            new_rank.to_string().bold().cyan()
        );
    }

    print_session_summary(correct, QUESTIONS_PER_SESSION, &target.subtopic);

    Ok(())
}

/// Walk class -> subject -> chapter -> subtopic. Returns `None` when the
/// user backs out.
fn select_subtopic(syllabus: &Syllabus) -> Result<Option<SubtopicRef>> {
    let user_progress = progress::load_progress()?;

    let class = match prompt_select("Select class:", syllabus.classes())? {
        Some(c) => c,
        None => return Ok(None),
    };

    let subject = match prompt_select("Select subject:", syllabus.subjects(&class))? {
        Some(s) => s,
        None => return Ok(None),
    };

    let chapters = syllabus.chapters(&class, &subject);
    let chapter_names: Vec<String> = chapters.iter().map(|c| c.chapter_name.clone()).collect();
    let chapter_name = match prompt_select("Select chapter:", chapter_names)? {
        Some(c) => c,
        None => return Ok(None),
    };

    let Some(chapter) = chapters.iter().find(|c| c.chapter_name == chapter_name) else {
        return Ok(None);
    };

    // Completed subtopics get a check-mark in the menu.
    let subtopic_options: Vec<String> = chapter
        .subtopics
        .iter()
        .map(|s| {
            if user_progress.is_completed(s) {
                format!("✅ {}", s)
            } else {
                s.clone()
            }
        })
        .collect();

    let picked = match prompt_select("Select subtopic:", subtopic_options)? {
        Some(s) => s.trim_start_matches("✅ ").to_string(),
        None => return Ok(None),
    };

    Ok(Some(SubtopicRef {
        subtopic: picked,
        chapter: chapter.chapter_name.clone(),
        subject,
        class_level: class,
    }))
}

fn prompt_select(message: &str, options: Vec<String>) -> Result<Option<String>> {
    if options.is_empty() {
        return Ok(None);
    }
    match Select::new(message, options).prompt() {
        Ok(choice) => Ok(Some(choice)),
        Err(inquire::InquireError::OperationCanceled)
        | Err(inquire::InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Generate, present and grade one question. Shared with challenge mode,
/// which suppresses feedback until the run is over.
pub(crate) async fn ask_and_grade(
    client: &GeminiClient,
    target: &SubtopicRef,
    index: usize,
    tracked: &mut HashSet<String>,
    with_feedback: bool,
) -> Result<bool> {
    let spinner = create_spinner("Get ready, next problem incoming...");
    let generated = question::generate_for_subtopic(client, &target.subtopic).await;
    spinner.finish_and_clear();

    let current = match generated {
        Generated::Fresh(q) => q,
        Generated::Fallback { question, reason } => {
            println!(
                "  {} {}",
                "Note:".yellow(),
                format!("using a fallback question ({})", reason).dimmed()
            );
            question
        }
    };

    println!("\n  {}\n", current.question_text);

    let selection = Select::new("Select your answer:", current.options.clone()).raw_prompt()?;
    let selected_index = selection.index;

    let correct_index = resolve_answer(&current.options, &current.correct_answer);
    let is_correct = correct_index == Some(selected_index);

    if with_feedback {
        println!();
        print_graded_options(&current, Some(selected_index), correct_index);
        println!();

        if is_correct {
            println!("  {} Correct! Well done, warrior!", "🎉".green());
        } else {
            println!(
                "  {} Incorrect! But every mistake is a lesson learned.",
                "❌".red()
            );
        }

        // AnswerResolutionFailure is non-fatal: show the raw token instead
        // of pretending an option was correct.
        if correct_index.is_none() {
            println!(
                "  {} The stated correct answer {} could not be matched to any option.",
                "⚠".yellow(),
                current.correct_answer.bold()
            );
        }

        if !current.explanation.is_empty() {
            println!("\n  {}", "Detailed Explanation".bold().underline());
            render::render_markdown(&current.explanation);
        }
    }

    let question_key = format!("{}_{}", target.subtopic, index);
    if tracked.insert(question_key) {
        stats::update_stats(is_correct)?;
        analytics::track_question_attempt(
            &target.subtopic,
            &target.chapter,
            &target.subject,
            &target.class_level,
            is_correct,
            "Medium",
        )?;
    }

    if with_feedback {
        offer_save(&current)?;
    }

    Ok(is_correct)
}

fn offer_save(current: &crate::question::Question) -> Result<()> {
    let options = vec!["➡️   Continue", "💾  Save this question for later"];
    match Select::new("Next move:", options).prompt() {
        Ok(choice) if choice.contains("Save") => {
            let total = saved::append_saved_question(current)?;
            println!(
                "  {} Question saved! ({} in your collection)",
                "✓".green(),
                total
            );
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(inquire::InquireError::OperationCanceled)
        | Err(inquire::InquireError::OperationInterrupted) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn print_session_summary(correct: usize, total: usize, subtopic: &str) {
    let pct = if total > 0 {
        (correct as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".green()
    );
    println!(
        "    {}            {}            {}",
        "│".green(),
        "🏆 FORGING COMPLETE 🏆".bold().white(),
        "│".green()
    );
    println!(
        "    {}  Score: {}/{} ({:.0}%)                                  {}",
        "│".green(),
        correct.to_string().cyan(),
        total,
        pct,
        "│".green()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".green()
    );
    println!(
        "  {} {} marked as practiced. Returning to the Dojo...",
        "🎯".green(),
        subtopic.bold()
    );
    println!();
}
