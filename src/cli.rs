use std::path::PathBuf;

use clap::Parser;

/// checktree - apply checkbox-tree gestures to a JSON tree and print it
#[derive(Parser, Debug)]
#[command(name = "checktree")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Gestures run in order: --expand, --activate, --isolate, --search.")]
pub struct Cli {
    /// Tree to load (a JSON node seed)
    #[arg(long, value_name = "FILE")]
    pub tree: PathBuf,

    /// View options (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Toggle expansion of the node with this key (repeatable)
    #[arg(long, value_name = "KEY")]
    pub expand: Vec<String>,

    /// Toggle selection of the node with this key (repeatable)
    #[arg(long, value_name = "KEY")]
    pub activate: Vec<String>,

    /// Make the node with this key the only selection
    #[arg(long, value_name = "KEY")]
    pub isolate: Option<String>,

    /// Filter the tree by name
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Print the JSON export instead of rows
    #[arg(long)]
    pub json: bool,

    /// Use ASCII icons even on a terminal
    #[arg(long)]
    pub ascii: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
