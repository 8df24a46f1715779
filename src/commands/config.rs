use anyhow::Result;
use colored::Colorize;
use inquire::{Password, Select, Text};

use crate::config::Config;
use crate::llm::GeminiClient;

pub async fn run() -> Result<()> {
    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".bright_black()
    );
    println!(
        "    {}            {}            {}",
        "│".bright_black(),
        "⚙️  SETTINGS ⚙️".bold().white(),
        "│".bright_black()
    );
    println!(
        "    {}          {}          {}",
        "│".bright_black(),
        "Configure LeetDojo to your liking".dimmed(),
        "│".bright_black()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".bright_black()
    );
    println!();

    let mut config = Config::load()?;

    let options = vec![
        "🔑  Set API Key        │ Configure Gemini API access",
        "🤖  Select Model       │ Choose default Gemini model",
        "🥷  Set Username       │ Name shown on the dashboard",
        "📋  View Settings      │ See current configuration",
        "←   Back",
    ];

    loop {
        let selection = Select::new("What would you like to configure?", options.clone()).prompt();

        let selection = match selection {
            Ok(s) => s,
            Err(inquire::InquireError::OperationCanceled)
            | Err(inquire::InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match selection {
            s if s.contains("Set API Key") => {
                if let Err(e) = set_api_key(&mut config) {
                    eprintln!("{} {}", "Error:".red(), e);
                }
            }
            s if s.contains("Select Model") => {
                if let Err(e) = select_model(&mut config) {
                    eprintln!("{} {}", "Error:".red(), e);
                }
            }
            s if s.contains("Set Username") => {
                if let Err(e) = set_username(&mut config) {
                    eprintln!("{} {}", "Error:".red(), e);
                }
            }
            s if s.contains("View Settings") => {
                view_config(&config);
            }
            s if s.contains("Back") => break,
            _ => {}
        }

        println!();
    }

    Ok(())
}

fn set_api_key(config: &mut Config) -> Result<()> {
    println!(
        "  {}",
        "Get a free API key at https://aistudio.google.com/apikey".dimmed()
    );

    let key = match Password::new("Gemini API key:")
        .without_confirmation()
        .prompt()
    {
        Ok(k) => k,
        Err(inquire::InquireError::OperationCanceled)
        | Err(inquire::InquireError::OperationInterrupted) => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    if key.trim().is_empty() {
        println!("  {} Key unchanged.", "·".dimmed());
        return Ok(());
    }

    config.gemini_api_key = Some(key.trim().to_string());
    config.save()?;
    println!("  {} API key saved.", "✓".green());
    Ok(())
}

fn select_model(config: &mut Config) -> Result<()> {
    let options: Vec<String> = GeminiClient::MODELS
        .iter()
        .map(|(id, desc)| format!("{} │ {}", id, desc))
        .collect();

    let choice = match Select::new("Default model:", options).raw_prompt() {
        Ok(c) => c,
        Err(inquire::InquireError::OperationCanceled)
        | Err(inquire::InquireError::OperationInterrupted) => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    let (id, _) = GeminiClient::MODELS[choice.index];
    config.default_model = Some(id.to_string());
    config.save()?;
    println!("  {} Default model set to {}.", "✓".green(), id.cyan());
    Ok(())
}

fn set_username(config: &mut Config) -> Result<()> {
    let name = match Text::new("Username:")
        .with_default(&config.display_name())
        .prompt()
    {
        Ok(n) => n,
        Err(inquire::InquireError::OperationCanceled)
        | Err(inquire::InquireError::OperationInterrupted) => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    if !name.trim().is_empty() {
        config.username = Some(name.trim().to_string());
        config.save()?;
        println!("  {} Username saved.", "✓".green());
    }
    Ok(())
}

fn view_config(config: &Config) {
    let key_status = if config.has_api_key() {
        "Configured".green().to_string()
    } else {
        "Not set".red().to_string()
    };
    let model = config
        .default_model
        .clone()
        .unwrap_or_else(|| "gemini-2.0-flash (default)".to_string());

    println!("  {} {}", "API key:".dimmed(), key_status);
    println!("  {} {}", "Model:".dimmed(), model.cyan());
    println!("  {} {}", "Username:".dimmed(), config.display_name().cyan());
    if let Ok(path) = Config::config_path() {
        println!("  {} {:?}", "Config file:".dimmed(), path);
    }
    if let Ok(dir) = Config::data_dir() {
        println!("  {} {:?}", "Data dir:".dimmed(), dir);
    }
}
