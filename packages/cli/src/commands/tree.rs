use super::page_path;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_document::{Document, Node};
use std::fs;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Page file
    pub file: String,

    /// Print the raw JSON instead of the outline
    #[arg(long)]
    pub json: bool,
}

pub fn tree(args: TreeArgs, cwd: &str) -> Result<()> {
    let source = fs::read_to_string(page_path(cwd, &args.file))?;
    let doc = Document::from_json_str(&source)?;

    if args.json {
        println!("{}", doc.to_json_pretty()?);
        return Ok(());
    }

    println!("{} {} ({})", "📄".bright_blue(), doc.name.bold(), doc.slug);
    println!("   theme: {}  elements: {}", doc.theme, doc.node_count());
    println!();

    for line in outline(&doc) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per node, indented by depth
pub fn outline(doc: &Document) -> Vec<String> {
    let mut lines = Vec::new();
    for node in doc.elements() {
        push_node(node, 0, &mut lines);
    }
    lines
}

fn push_node(node: &Node, depth: usize, lines: &mut Vec<String>) {
    lines.push(format!(
        "{}{} {} [{}]",
        "  ".repeat(depth),
        node.element_type(),
        node.name(),
        node.id()
    ));

    for child in node.children().unwrap_or_default() {
        push_node(child, depth + 1, lines);
    }
}
