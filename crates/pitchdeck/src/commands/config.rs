use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::engine::Timings;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    println!("{}", "defaults".cyan().bold());
    print_entry("windowed", config.windowed().to_string());
    print_entry(
        "start_slide",
        config
            .start_slide()
            .map_or_else(|| "1".to_string(), |n| n.to_string()),
    );
    print_entry("show_hint", config.show_hint().to_string());
    println!();

    let timings = config.timings();
    let defaults = Timings::default();
    println!("{}", "timings".cyan().bold());
    print_timing("exit_ms", timings.exit, defaults.exit);
    print_timing("settle_ms", timings.settle, defaults.settle);
    print_timing("idle_hide_ms", timings.idle_hide, defaults.idle_hide);
    print_timing("entrance_ms", timings.entrance, defaults.entrance);
    Ok(())
}

fn print_entry(key: &str, value: String) {
    println!("  {:<14} {}", key, value);
}

fn print_timing(key: &str, value: std::time::Duration, default: std::time::Duration) {
    let ms = value.as_millis().to_string();
    if value == default {
        println!("  {:<14} {}", key, ms);
    } else {
        println!("  {:<14} {} {}", key, ms.yellow(), "(custom)".dimmed());
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {} = {}",
        "Saved".green().bold(),
        key,
        value.bold()
    );
    println!("{}", path.display().to_string().dimmed());
    Ok(())
}
