use anyhow::Result;
use colored::Colorize;
use inquire::Select;
use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::commands::practice::ask_and_grade;
use crate::config::Config;
use crate::llm::GeminiClient;
use crate::syllabus::Syllabus;

const QUESTION_COUNTS: [usize; 5] = [5, 10, 15, 20, 25];
const TIME_LIMITS: [(&str, u64); 5] = [
    ("3 minutes", 180),
    ("5 minutes", 300),
    ("10 minutes", 600),
    ("15 minutes", 900),
    ("20 minutes", 1200),
];

pub async fn run() -> Result<()> {
    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".yellow()
    );
    println!(
        "    {}       {}       {}",
        "│".yellow(),
        "⏱️  TIMED CHALLENGE - EXAM SIMULATION ⏱️".bold().white(),
        "│".yellow()
    );
    println!(
        "    {}   {}   {}",
        "│".yellow(),
        "Random questions, a countdown, and no hints".dimmed(),
        "│".yellow()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".yellow()
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

    let Some(setup) = configure_challenge()? else {
        return Ok(());
    };

    let syllabus = Syllabus::load()?;
    let subtopics = syllabus.sample_subtopics(
        setup.class.as_deref(),
        setup.subject.as_deref(),
        setup.num_questions,
        &mut rand::thread_rng(),
    );

    if subtopics.is_empty() {
        println!(
            "{} No subtopics available for the selected filters. Adjust your challenge settings.",
            "Error:".red().bold()
        );
        return Ok(());
    }

    let deadline = Instant::now() + Duration::from_secs(setup.time_limit_secs);
    let started = Instant::now();

    let mut tracked: HashSet<String> = HashSet::new();
    let mut answered = 0;
    let mut correct = 0;
    let mut timed_out = false;

    for (index, target) in subtopics.iter().enumerate() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            timed_out = true;
            break;
        }

        print_timer(remaining);
        println!(
            "{} [{}/{}]  {}",
            "Question".bold().cyan(),
            index + 1,
            subtopics.len(),
            format!("({} · {})", target.subtopic, target.subject).dimmed()
        );

        // No explanations or per-question feedback until the run is over.
        let is_correct = ask_and_grade(&client, target, index, &mut tracked, false).await?;
        answered += 1;
        if is_correct {
            correct += 1;
        }

        println!("{}", "─".repeat(50).dimmed());
    }

    if timed_out {
        println!("\n{} Time's up! Challenge complete!", "⏰".red().bold());
    }

    print_challenge_summary(correct, answered, subtopics.len(), started.elapsed());

    Ok(())
}

struct ChallengeSetup {
    num_questions: usize,
    time_limit_secs: u64,
    subject: Option<String>,
    class: Option<String>,
}

/// Prompt for question count, time limit and filters. `None` on cancel.
fn configure_challenge() -> Result<Option<ChallengeSetup>> {
    let counts: Vec<String> = QUESTION_COUNTS.iter().map(|n| n.to_string()).collect();
    let num_questions = match select("Number of questions:", counts)? {
        Some(choice) => choice.index,
        None => return Ok(None),
    };

    let limits: Vec<String> = TIME_LIMITS.iter().map(|(label, _)| label.to_string()).collect();
    let time_limit = match select("Time limit:", limits)? {
        Some(choice) => choice.index,
        None => return Ok(None),
    };

    let subjects = vec![
        "All Subjects".to_string(),
        "Physics".to_string(),
        "Chemistry".to_string(),
        "Maths".to_string(),
    ];
    let subject = match select("Subject:", subjects)? {
        Some(choice) if choice.index == 0 => None,
        Some(choice) => Some(choice.value),
        None => return Ok(None),
    };

    let classes = vec![
        "Both Classes".to_string(),
        "11th".to_string(),
        "12th".to_string(),
    ];
    let class = match select("Class:", classes)? {
        Some(choice) if choice.index == 0 => None,
        Some(choice) => Some(choice.value),
        None => return Ok(None),
    };

    Ok(Some(ChallengeSetup {
        num_questions: QUESTION_COUNTS[num_questions],
        time_limit_secs: TIME_LIMITS[time_limit].1,
        subject,
        class,
    }))
}

fn select(message: &str, options: Vec<String>) -> Result<Option<inquire::list_option::ListOption<String>>> {
    match Select::new(message, options).raw_prompt() {
        Ok(choice) => Ok(Some(choice)),
        Err(inquire::InquireError::OperationCanceled)
        | Err(inquire::InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn print_timer(remaining: Duration) {
    let secs = remaining.as_secs();
    let display = format!("{:02}:{:02}", secs / 60, secs % 60);
    let styled = if secs < 60 {
        display.red().bold()
    } else if secs < 180 {
        display.yellow().bold()
    } else {
        display.green().bold()
    };
    println!("\n  {} {}", "Time remaining:".dimmed(), styled);
}

fn print_challenge_summary(correct: usize, answered: usize, total: usize, elapsed: Duration) {
    let pct = if answered > 0 {
        (correct as f64 / answered as f64) * 100.0
    } else {
        0.0
    };

    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".green()
    );
    println!(
        "    {}           {}           {}",
        "│".green(),
        "🎊 CHALLENGE COMPLETE 🎊".bold().white(),
        "│".green()
    );
    println!(
        "    {}  Answered: {}/{} │ Correct: {} │ Score: {:.0}%         {}",
        "│".green(),
        answered.to_string().cyan(),
        total,
        correct.to_string().green(),
        pct,
        "│".green()
    );
    println!(
        "    {}  Time used: {:02}:{:02}                                    {}",
        "│".green(),
        elapsed.as_secs() / 60,
        elapsed.as_secs() % 60,
        "│".green()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".green()
    );
    println!();
}
