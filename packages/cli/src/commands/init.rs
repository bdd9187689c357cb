use crate::config::{Config, GatewayKind, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_document::{Document, IdGenerator, Registry};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Element catalog (page, store)
    #[arg(short, long, default_value = "page")]
    pub catalog: String,

    /// Persistence backend (file, http)
    #[arg(short, long, default_value = "file")]
    pub gateway: String,

    /// Directory for page files
    #[arg(short, long, default_value = "pages")]
    pub pages_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), DEFAULT_CONFIG_NAME.bright_white());
        println!("Use --force to overwrite");
        return Ok(());
    }

    let gateway = match args.gateway.as_str() {
        "file" => GatewayKind::File,
        "http" => GatewayKind::Http,
        other => return Err(anyhow!("Unknown gateway '{}'. Use: file or http", other)),
    };

    let config = Config {
        catalog: args.catalog.clone(),
        gateway,
        ..Config::default()
    };
    let registry = config.registry()?;

    println!("{}", "📝 Initializing Pagecraft project...".bright_blue().bold());

    // Create pages directory if it doesn't exist
    let pages_dir = PathBuf::from(cwd).join(&args.pages_dir);
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir)?;
        println!("  {} Created {}/", "✓".green(), args.pages_dir);
    }

    // Create starter page
    let page_file = pages_dir.join("home.json");
    if !page_file.exists() {
        let page = starter_page(registry)?;
        fs::write(&page_file, page.to_json_pretty()?)?;
        println!("  {} Created home.json", "✓".green());
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft tree {}/home.json", args.pages_dir);
    println!("  2. Run: pagecraft add {}/home.json <type>", args.pages_dir);
    println!("  3. Run: pagecraft save {}/home.json", args.pages_dir);

    Ok(())
}

/// Home page with a couple of elements from the catalog
fn starter_page(registry: &Registry) -> Result<Document> {
    let mut page = Document::named("Home", "home");
    let mut ids = IdGenerator::new();

    let starters: &[&str] = if registry.name() == "store" {
        &["hero", "products"]
    } else {
        &["heading", "paragraph", "button"]
    };

    for element_type in starters {
        let entry = registry
            .lookup(element_type)
            .ok_or_else(|| anyhow!("Catalog has no '{}' element", element_type))?;
        page.add_element(entry, None, &mut ids)?;
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(catalog: &str) -> InitArgs {
        InitArgs {
            catalog: catalog.to_string(),
            gateway: "file".to_string(),
            pages_dir: "pages".to_string(),
            force: false,
        }
    }

    #[test]
    fn test_init_writes_config_and_valid_page() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();

        init(args("store"), cwd).unwrap();

        let config = Config::load(cwd).unwrap();
        assert_eq!(config.catalog, "store");

        let source = fs::read_to_string(dir.path().join("pages/home.json")).unwrap();
        let page = Document::from_json_str(&source).unwrap();
        assert_eq!(page.elements().len(), 2);
        assert!(page.validate(Registry::store()).is_ok());
    }

    #[test]
    fn test_init_rejects_unknown_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let result = init(args("blog"), dir.path().to_str().unwrap());

        assert!(result.is_err());
        assert!(!dir.path().join(DEFAULT_CONFIG_NAME).exists());
    }
}
