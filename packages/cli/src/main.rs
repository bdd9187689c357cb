mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, delete, duplicate, init, publish, reorder, save, theme, tree, types, update, validate, AddArgs, DeleteArgs,
    DuplicateArgs, InitArgs, PersistArgs, ReorderArgs, ThemeArgs, TreeArgs, TypesArgs, UpdateArgs, ValidateArgs,
};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - Build pages and storefronts from a block catalog
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagecraft project
    Init(InitArgs),

    /// List element types and themes of a catalog
    Types(TypesArgs),

    /// Print the element tree of a page
    Tree(TreeArgs),

    /// Add an element
    Add(AddArgs),

    /// Change an element's name, content or styles
    Update(UpdateArgs),

    /// Delete an element and its children
    Delete(DeleteArgs),

    /// Copy an element next to itself
    Duplicate(DuplicateArgs),

    /// Move an element within its container
    Reorder(ReorderArgs),

    /// Switch the page theme
    Theme(ThemeArgs),

    /// Check a page against the catalog
    Validate(ValidateArgs),

    /// Save a page through the configured gateway
    Save(PersistArgs),

    /// Publish a page through the configured gateway
    Publish(PersistArgs),
}

fn init_logging(cwd: &str) {
    let default_level = Config::load(cwd)
        .map(|config| config.log_level)
        .unwrap_or_else(|_| "info".to_string());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();
    init_logging(&cwd);

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Types(args) => types(args, &cwd),
        Command::Tree(args) => tree(args, &cwd),
        Command::Add(args) => add(args, &cwd),
        Command::Update(args) => update(args, &cwd),
        Command::Delete(args) => delete(args, &cwd),
        Command::Duplicate(args) => duplicate(args, &cwd),
        Command::Reorder(args) => reorder(args, &cwd),
        Command::Theme(args) => theme(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
        Command::Save(args) => save(args, &cwd),
        Command::Publish(args) => publish(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
