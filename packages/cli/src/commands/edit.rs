//! Single-mutation commands. Each loads a page file, applies one edit and
//! writes the file back when the document changed.

use super::{commit, open_session};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_document::{ElementPatch, Payload};
use pagecraft_editor::{EditSession, Mutation, MutationResult};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Page file
    pub file: String,

    /// Element type from the catalog (see `pagecraft types`)
    pub element_type: String,

    /// Container to add into (top level when omitted)
    #[arg(short, long)]
    pub parent: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub file: String,

    /// Element id
    pub id: String,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// Replacement content object (JSON)
    #[arg(long)]
    pub content: Option<String>,

    /// Replacement styles object (JSON)
    #[arg(long)]
    pub styles: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub file: String,

    /// Element id (its children are removed too)
    pub id: String,
}

#[derive(Debug, Args)]
pub struct DuplicateArgs {
    pub file: String,

    /// Element id
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ReorderArgs {
    pub file: String,

    /// Current index
    pub from: usize,

    /// Target index
    pub to: usize,

    /// Container whose children are reordered (top level when omitted)
    #[arg(short, long)]
    pub container: Option<String>,
}

#[derive(Debug, Args)]
pub struct ThemeArgs {
    pub file: String,

    /// Theme id
    pub theme: String,
}

pub fn add(args: AddArgs, cwd: &str) -> Result<()> {
    run(
        &args.file,
        cwd,
        Mutation::AddElement {
            element_type: args.element_type,
            parent_id: args.parent,
        },
    )
}

pub fn update(args: UpdateArgs, cwd: &str) -> Result<()> {
    let mut patch = ElementPatch::default();
    if let Some(name) = args.name {
        patch = patch.with_name(name);
    }
    if let Some(content) = &args.content {
        patch = patch.with_content(parse_object("--content", content)?);
    }
    if let Some(styles) = &args.styles {
        patch = patch.with_styles(parse_object("--styles", styles)?);
    }

    if patch.is_empty() {
        return Err(anyhow!("Nothing to update. Pass --name, --content or --styles"));
    }

    run(
        &args.file,
        cwd,
        Mutation::UpdateElement {
            node_id: args.id,
            patch,
        },
    )
}

pub fn delete(args: DeleteArgs, cwd: &str) -> Result<()> {
    run(&args.file, cwd, Mutation::DeleteElement { node_id: args.id })
}

pub fn duplicate(args: DuplicateArgs, cwd: &str) -> Result<()> {
    run(&args.file, cwd, Mutation::DuplicateElement { node_id: args.id })
}

pub fn reorder(args: ReorderArgs, cwd: &str) -> Result<()> {
    run(
        &args.file,
        cwd,
        Mutation::Reorder {
            container_id: args.container,
            from_index: args.from,
            to_index: args.to,
        },
    )
}

pub fn theme(args: ThemeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, &args.file)?;

    session.apply_theme(&args.theme)?;
    commit(session)?;

    println!("  {} Applied theme {}", "✓".green(), args.theme.bright_white());
    Ok(())
}

fn run(file: &str, cwd: &str, mutation: Mutation) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, file)?;

    let name = mutation.name();
    let result = session.apply(mutation)?;
    report(&session, name, &result);

    if commit(session)? {
        println!("  {} Wrote {}", "✓".green(), file);
    }
    Ok(())
}

fn report(session: &EditSession, name: &str, result: &MutationResult) {
    match result {
        MutationResult::Applied { created: Some(id), .. } => {
            let element_type = session
                .document()
                .find(id)
                .map(|node| node.element_type().to_string())
                .unwrap_or_default();
            println!("  {} {} {} ({})", "✓".green(), name, id.bright_white(), element_type);
        }
        MutationResult::Applied { .. } => println!("  {} {}", "✓".green(), name),
        MutationResult::Noop { reason } => println!("  {} {}: {}", "⚠️".yellow(), name, reason),
    }
}

fn parse_object(flag: &str, json: &str) -> Result<Payload> {
    match serde_json::from_str(json) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err(anyhow!("{} must be a JSON object", flag)),
        Err(err) => Err(anyhow!("{} is not valid JSON: {}", flag, err)),
    }
}
