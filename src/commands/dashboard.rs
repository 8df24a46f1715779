use anyhow::Result;
use chrono::{Datelike, Duration, Local, NaiveDate};
use colored::Colorize;

use crate::commands::text_bar;
use crate::config::Config;
use crate::storage::{UserStats, progress, stats};
use crate::syllabus::Syllabus;

/// Weeks of history shown in the terminal heatmap.
const HEATMAP_WEEKS: i64 = 12;

pub async fn run() -> Result<()> {
    let config = Config::load()?;
    let user_stats = stats::load_stats()?;
    let user_progress = progress::load_progress()?;
    let syllabus = Syllabus::load()?;

    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".cyan()
    );
    println!(
        "    {}        {}        {}",
        "│".cyan(),
        "⚔️  LEETDOJO - THE ENGINEER'S RPG ⚔️".bold().white(),
        "│".cyan()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".cyan()
    );
    println!();

    print_status("Warrior", &config.display_name(), "🥷");
    print_status("Rank", &user_stats.rank.to_string(), "🏅");
    print_status("Total XP", &user_stats.xp.to_string(), "⚡");
    print_status(
        "Streak",
        &format!("{} days", user_stats.daily_streak),
        "🔥",
    );
    print_status(
        "Subtopics completed",
        &user_progress.total_subtopics_practiced.to_string(),
        "📚",
    );

    let total = syllabus.total_subtopics();
    let fraction = if total > 0 {
        user_progress.total_subtopics_practiced as f64 / total as f64
    } else {
        0.0
    };
    println!(
        "\n  {} {} {:.1}%",
        "Overall progress:".dimmed(),
        text_bar(fraction, 24).green(),
        fraction * 100.0
    );

    println!("\n  {}", "Activity (last 12 weeks)".bold());
    print_heatmap(&user_stats, Local::now().date_naive());
    println!();

    Ok(())
}

fn print_status(label: &str, value: &str, icon: &str) {
    println!(
        "  {} {} {}",
        icon,
        format!("{}:", label).dimmed(),
        value.cyan()
    );
}

/// A calendar grid of the last [`HEATMAP_WEEKS`]: columns are weeks, rows
/// Monday through Sunday, cell intensity scales with questions answered.
fn print_heatmap(user_stats: &UserStats, today: NaiveDate) {
    let offset = today.weekday().num_days_from_monday() as i64;
    let start = today - Duration::days(offset + 7 * (HEATMAP_WEEKS - 1));

    for day in 0..7 {
        let label = match day {
            0 => "Mon",
            2 => "Wed",
            4 => "Fri",
            _ => "   ",
        };
        print!("  {} ", label.dimmed());

        for week in 0..HEATMAP_WEEKS {
            let date = start + Duration::days(7 * week + day);
            if date > today {
                print!("  ");
                continue;
            }
            let count = user_stats.heatmap_data.get(&date).copied().unwrap_or(0);
            print!("{} ", heat_cell(count));
        }
        println!();
    }

    println!(
        "      {} {} {} {} {} {}",
        "less".dimmed(),
        heat_cell(0),
        heat_cell(1),
        heat_cell(3),
        heat_cell(6),
        "more".dimmed()
    );
}

fn heat_cell(count: u32) -> colored::ColoredString {
    match count {
        0 => "·".bright_black(),
        1..=2 => "■".green(),
        3..=5 => "■".bright_green(),
        _ => "■".bright_green().bold(),
    }
}
