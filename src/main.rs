use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::Colorize;
use inquire::Select;
use std::io;

mod commands;
mod config;
mod llm;
mod question;
mod render;
mod storage;
mod syllabus;

/// ASCII art banner for the application
const BANNER: &str = r#"
  _              _   ____        _
 | |    ___  ___| |_|  _ \  ___ (_) ___
 | |   / _ \/ _ \ __| | | |/ _ \| |/ _ \
 | |__|  __/  __/ |_| |_| | (_) | | (_) |
 |_____\___|\___|\__|____/ \___// |\___/
                              |__/
"#;

/// Print the application banner
fn print_banner() {
    println!("{}", BANNER.cyan().bold());
}

#[derive(Parser)]
#[command(name = "leetdojo")]
#[command(about = "Gamified exam prep: AI-generated questions, streaks, ranks and analytics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Practice a subtopic (3 questions, counts toward completion)
    Practice {
        /// Subtopic name (skips the interactive picker if provided)
        subtopic: Option<String>,
    },
    /// Timed challenge with random questions (exam simulation)
    Challenge,
    /// Show the dashboard (XP, rank, streak, activity heatmap)
    Stats,
    /// Performance analytics: weak areas, subject-wise accuracy, recent activity
    Analytics,
    /// Browse saved questions
    Saved,
    /// Configure settings (API key, model, username)
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Every view the interactive menu can be in. Transitions are explicit:
/// each arm runs its view and names the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Dashboard,
    Dojo,
    Challenge,
    Analytics,
    SavedQuestions,
    Settings,
    Exit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Practice { subtopic }) => {
            commands::practice::run(subtopic).await?;
        }
        Some(Commands::Challenge) => {
            commands::challenge::run().await?;
        }
        Some(Commands::Stats) => {
            commands::dashboard::run().await?;
        }
        Some(Commands::Analytics) => {
            commands::analytics::run().await?;
        }
        Some(Commands::Saved) => {
            commands::saved::run().await?;
        }
        Some(Commands::Config) => {
            commands::config::run().await?;
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
        None => {
            // No subcommand - interactive mode
            run_interactive().await?;
        }
    }

    Ok(())
}

async fn run_interactive() -> Result<()> {
    print_banner();
    println!(
        "  {} {}",
        "Version:".dimmed(),
        env!("CARGO_PKG_VERSION").cyan()
    );
    println!(
        "  {} {}\n",
        "Powered by:".dimmed(),
        "Gemini + sheer determination".green()
    );

    let mut view = View::Dashboard;
    loop {
        view = match view {
            View::Dashboard => dashboard_menu().await?,
            View::Dojo => {
                commands::practice::run(None).await?;
                View::Dashboard
            }
            View::Challenge => {
                commands::challenge::run().await?;
                View::Dashboard
            }
            View::Analytics => {
                commands::analytics::run().await?;
                View::Dashboard
            }
            View::SavedQuestions => {
                commands::saved::run().await?;
                View::Dashboard
            }
            View::Settings => {
                commands::config::run().await?;
                View::Dashboard
            }
            View::Exit => {
                println!("{}", "👋 Train hard, warrior. See you tomorrow!".cyan());
                break;
            }
        };
    }

    Ok(())
}

/// Render the dashboard and ask where to go next.
async fn dashboard_menu() -> Result<View> {
    commands::dashboard::run().await?;

    let options = vec![
        "🥋  Enter the Dojo      │ Practice a subtopic",
        "⏱️   Timed Challenge     │ Exam simulation",
        "📊  Analytics           │ Weak areas & accuracy",
        "📚  Saved Questions     │ Review your collection",
        "⚙️   Settings            │ API key, model, username",
        "🚪  Exit",
    ];

    let selection = Select::new("What would you like to do?", options)
        .with_help_message("Use arrow keys to navigate, Enter to select")
        .prompt();

    let selection = match selection {
        Ok(s) => s,
        Err(inquire::InquireError::OperationCanceled)
        | Err(inquire::InquireError::OperationInterrupted) => return Ok(View::Exit),
        Err(e) => return Err(e.into()),
    };

    Ok(match selection {
        s if s.contains("Dojo") => View::Dojo,
        s if s.contains("Challenge") => View::Challenge,
        s if s.contains("Analytics") => View::Analytics,
        s if s.contains("Saved") => View::SavedQuestions,
        s if s.contains("Settings") => View::Settings,
        _ => View::Exit,
    })
}
