use super::page_path;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_document::Document;
use std::fs;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Page file
    pub file: String,
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = config.registry()?;

    let source = fs::read_to_string(page_path(cwd, &args.file))?;
    let doc = Document::from_json_str(&source)?;

    match doc.validate(registry) {
        Ok(()) => {
            println!(
                "{} {} is valid ({} elements, {} catalog)",
                "✅".green(),
                args.file,
                doc.node_count(),
                registry.name()
            );
            Ok(())
        }
        Err(violations) => {
            for violation in &violations {
                eprintln!("  {} {}", "✗".red(), violation);
            }
            Err(anyhow!("{} has {} problem(s)", args.file, violations.len()))
        }
    }
}
