use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_document::{page_themes, store_themes, Registry};

#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Catalog to list (defaults to the configured one)
    #[arg(short, long)]
    pub catalog: Option<String>,

    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn types(args: TypesArgs, cwd: &str) -> Result<()> {
    let registry = match &args.catalog {
        Some(name) => Registry::by_name(name).ok_or_else(|| anyhow!("Unknown catalog '{}'", name))?,
        None => Config::load(cwd)?.registry()?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(registry.entries())?);
        return Ok(());
    }

    println!("{}", format!("📦 {} elements", registry.name()).bright_blue().bold());
    for category in registry.categories() {
        println!();
        println!("{}", category.bold());
        for entry in registry.by_category(category) {
            let marker = if entry.allow_children { "▣" } else { "▢" };
            println!("  {} {:<12} {}", marker, entry.id.bright_white(), entry.description);
        }
    }

    let themes = if registry.name() == "store" { store_themes() } else { page_themes() };
    println!();
    println!("{}", "Themes".bold());
    for theme in themes {
        println!("  {:<20} {}", theme.id.bright_white(), theme.name);
    }

    Ok(())
}
