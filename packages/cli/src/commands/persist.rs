use super::{gateway, open_session};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct PersistArgs {
    /// Page file
    pub file: String,
}

/// Save a page through the configured gateway
pub fn save(args: PersistArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let gateway = gateway(&config, cwd)?;
    let mut session = open_session(&config, cwd, &args.file)?;

    println!("{} Saving {}...", "💾".bright_blue(), args.file);
    let receipt = session.save(gateway.as_ref())?;

    match receipt.location {
        Some(location) => println!("  {} Saved to {}", "✓".green(), location),
        None => println!("  {} Saved", "✓".green()),
    }
    Ok(())
}

/// Publish a page through the configured gateway
pub fn publish(args: PersistArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let gateway = gateway(&config, cwd)?;
    let mut session = open_session(&config, cwd, &args.file)?;

    println!("{} Publishing {}...", "🚀".bright_blue(), args.file);
    let receipt = session.publish(gateway.as_ref())?;

    println!("{}", "✅ Page published!".green().bold());
    if let Some(url) = receipt.url {
        println!("   URL: {}", url.bright_white());
    }
    Ok(())
}
