use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = if path.exists() {
        println!("{} {}", "Config:".bold(), path.display());
        Config::load_from(&path)?
    } else {
        println!(
            "{} {} {}",
            "Config:".bold(),
            path.display(),
            "(not found, showing defaults)".dimmed()
        );
        Config::default()
    };
    println!();
    print!("{}", config.effective().to_yaml()?);
    Ok(())
}
