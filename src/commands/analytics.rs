use anyhow::Result;
use chrono::Local;
use colored::Colorize;

use crate::commands::text_bar;
use crate::storage::analytics::load_analytics;

pub async fn run() -> Result<()> {
    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".blue()
    );
    println!(
        "    {}          {}          {}",
        "│".blue(),
        "📊 PERFORMANCE ANALYTICS 📊".bold().white(),
        "│".blue()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".blue()
    );
    println!();

    let analytics = load_analytics()?;

    if analytics.question_history.is_empty() {
        println!(
            "  {}",
            "No data yet. Start practicing to see your performance analytics!".dimmed()
        );
        return Ok(());
    }

    let overall = analytics.overall();
    println!("  {}", "Overall".bold().underline());
    println!(
        "  Attempted: {} │ Correct: {} │ Accuracy: {}",
        overall.total.to_string().cyan(),
        overall.correct.to_string().green(),
        format!("{:.1}%", overall.accuracy()).bold()
    );

    println!("\n  {}", "Weak areas (chapters below 70%)".bold().underline());
    let weak = analytics.weak_chapters();
    if weak.is_empty() {
        println!(
            "  {}",
            "Great job! No weak areas identified. Keep up the good work!".green()
        );
    } else {
        for (i, (chapter, tally)) in weak.iter().take(10).enumerate() {
            let accuracy = format!("{:.1}%", tally.accuracy());
            let styled = if tally.accuracy() < 50.0 {
                accuracy.red()
            } else {
                accuracy.yellow()
            };
            println!(
                "  {}. {} {}  {}",
                i + 1,
                chapter.bold(),
                format!("({}/{})", tally.correct, tally.total).dimmed(),
                styled
            );
        }
    }

    println!("\n  {}", "Subject-wise performance".bold().underline());
    for (key, tally) in analytics.subjects_ranked() {
        // Stored as "{class}_{subject}"; show as "11th - Physics".
        let display = key.replacen('_', " - ", 1);
        println!(
            "  {} {}  {} {}",
            text_bar(tally.accuracy() / 100.0, 20).cyan(),
            format!("{:.1}%", tally.accuracy()).bold(),
            display,
            format!("({}/{})", tally.correct, tally.total).dimmed()
        );
    }

    println!("\n  {}", "Recent activity".bold().underline());
    for attempt in analytics.recent(10) {
        let icon = if attempt.correct { "✅" } else { "❌" };
        let when = attempt
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M");
        println!(
            "  {} {}  {}",
            icon,
            attempt.subtopic.bold(),
            format!("{} · {} · {}", attempt.subject, attempt.chapter, when).dimmed()
        );
    }

    println!();
    Ok(())
}
