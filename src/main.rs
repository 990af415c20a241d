//! checktree CLI - drive a checkbox tree from the command line
//!
//! Usage: checktree --tree <FILE> [--config <FILE>] [--expand KEY]...
//!        [--activate KEY]... [--isolate KEY] [--search QUERY] [--json]

use std::fs;
use std::io;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use futures::executor::block_on;
use is_terminal::IsTerminal;
use log::LevelFilter;

use checktree::{NodeId, NodeKey, NodeSeed, Tree, TreeConfig, ViewOptions};

mod cli;
mod render;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let content = fs::read_to_string(&cli.tree)
        .with_context(|| format!("failed to read {}", cli.tree.display()))?;
    let seed = NodeSeed::from_json(&content)
        .with_context(|| format!("failed to parse {}", cli.tree.display()))?;
    let options = ViewOptions::load_or_default(cli.config.as_deref());
    let config = TreeConfig::new(options);
    let mut tree = Tree::from_seed(seed);

    for key in &cli.expand {
        let id = lookup(&tree, key)?;
        let changed = block_on(tree.expand_and_load(id, &config, |affected| {
            log::debug!("load under {id} settled, {} nodes to refresh", affected.len());
        }))?;
        log::info!("expand {key}: {} nodes changed", changed.len());
    }
    for key in &cli.activate {
        let id = lookup(&tree, key)?;
        let outcome = tree.handle_activate(id, &config, false)?;
        log::info!("activate {key}: {} nodes changed", outcome.changed.len());
    }
    if let Some(key) = &cli.isolate {
        let id = lookup(&tree, key)?;
        let outcome = tree.handle_activate(id, &config, true)?;
        log::info!("isolate {key}: {} nodes changed", outcome.changed.len());
    }
    if let Some(query) = &cli.search {
        let root = tree.root();
        let changed = block_on(tree.handle_search(root, query, &config))?;
        log::info!("search '{query}': {} nodes changed", changed.len());
    }

    if cli.json {
        println!("{}", tree.to_json(tree.root(), &config)?);
        return Ok(());
    }

    let supports_unicode = !cli.ascii && io::stdout().is_terminal();
    let rows = tree.rows(&config);
    if !rows.is_empty() {
        println!("{}", render::render_rows(&rows, supports_unicode));
        println!();
    }
    println!(
        "{}",
        render::render_status_bar(
            tree.selected_nodes(tree.root()).len(),
            tree.len(),
            supports_unicode
        )
    );
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn lookup(tree: &Tree, raw: &str) -> Result<NodeId> {
    // "7" may also be a string key.
    tree.find(&NodeKey::parse(raw))
        .or_else(|| tree.find(&NodeKey::Str(raw.to_string())))
        .ok_or_else(|| anyhow!("no node with key '{raw}'"))
}
