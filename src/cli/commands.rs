use std::cmp::Reverse;
use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::arena::TreeArena;
use crate::builder::{load_dataset, CategoryTreeBuilder, FsTreeBuilder};
use crate::cli::args::{Cli, Commands};
use crate::cli::output;
use crate::config::TmapConfig;
use crate::geometry::{Pos, Rect};
use crate::util::path::PathExt;

pub fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Tree { path, top }) => _tree(path, *top),
        Some(Commands::Map {
            path,
            width,
            height,
            expand_all,
        }) => _map(path, *width, *height, *expand_all),
        Some(Commands::At {
            path,
            x,
            y,
            width,
            height,
            expand_all,
        }) => _at(path, *x, *y, *width, *height, *expand_all),
        Some(Commands::Papers {
            dataset,
            flat,
            width,
            height,
            expand_all,
        }) => _papers(dataset.as_deref(), *flat, *width, *height, *expand_all),
        Some(Commands::Config) => _config(),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

#[instrument]
fn _tree(path: &str, top: Option<usize>) -> Result<()> {
    let tree = build_fs_tree(path)?;
    let Some(root) = tree.root() else {
        output::info("(empty tree)");
        return Ok(());
    };
    println!("{}", to_display_tree(&tree, root));

    if let Some(n) = top {
        output::header(&format!("Largest {} files", n));
        let largest = tree
            .leaf_nodes()
            .into_iter()
            .filter_map(|idx| tree.get_node(idx).map(|node| (idx, node.size)))
            .sorted_by_key(|&(_, size)| Reverse(size))
            .take(n);
        for (idx, size) in largest {
            output::detail(&format!("{:>12}  {}", size, tree.path_string(idx)));
        }
    }
    Ok(())
}

#[instrument]
fn _map(path: &str, width: Option<i32>, height: Option<i32>, expand_all: bool) -> Result<()> {
    let mut tree = build_fs_tree(path)?;
    let canvas = canvas_rect(width, height)?;
    prepare_view(&mut tree, expand_all);
    tree.update_rectangles(canvas);
    print_rectangles(&tree, canvas);
    Ok(())
}

#[instrument]
fn _at(
    path: &str,
    x: i32,
    y: i32,
    width: Option<i32>,
    height: Option<i32>,
    expand_all: bool,
) -> Result<()> {
    let mut tree = build_fs_tree(path)?;
    let canvas = canvas_rect(width, height)?;
    prepare_view(&mut tree, expand_all);
    tree.update_rectangles(canvas);

    let pos = Pos::new(x, y);
    match tree.node_at(pos) {
        Some(idx) => {
            let node = tree
                .get_node(idx)
                .ok_or_else(|| anyhow!("dangling node index"))?;
            output::info(&tree.path_string(idx));
            output::detail(&format!("size: {}", node.size));
            output::detail(&format!(
                "rect: ({}, {}) {}x{}",
                node.rect.x, node.rect.y, node.rect.width, node.rect.height
            ));
        }
        None => output::info(&format!("no visible leaf at ({}, {})", x, y)),
    }
    Ok(())
}

#[instrument]
fn _papers(
    dataset: Option<&str>,
    flat: bool,
    width: Option<i32>,
    height: Option<i32>,
    expand_all: bool,
) -> Result<()> {
    let config = TmapConfig::load().context("Cannot load configuration")?;
    let dataset_path = match dataset {
        Some(arg) => expand_path(arg),
        None => config
            .papers
            .dataset
            .clone()
            .ok_or_else(|| anyhow!("no dataset given and none configured"))?,
    };
    let by_year = !flat && config.papers.by_year;
    debug!("dataset: {:?}, by_year: {}", dataset_path, by_year);

    let map = load_dataset(&dataset_path, by_year)?;
    let root_name = dataset_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "papers".to_string());
    let mut tree = CategoryTreeBuilder::build(&root_name, &map);

    let canvas = canvas_rect(width, height)?;
    prepare_view(&mut tree, expand_all);
    tree.update_rectangles(canvas);
    print_rectangles(&tree, canvas);
    Ok(())
}

#[instrument]
fn _config() -> Result<()> {
    let config = TmapConfig::load().context("Cannot load configuration")?;
    output::header("Effective configuration");
    print!("{}", config.to_toml());
    if let Some(path) = TmapConfig::global_config_path() {
        output::detail(&format!("global config: {}", path.display()));
    }
    Ok(())
}

fn _completion(shell: clap_complete::Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

/// Expand `~` and resolve the given user path.
fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = expand_path(path);
    Ok(expanded.as_path().to_canonical()?)
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

fn build_fs_tree(path: &str) -> Result<TreeArena> {
    let resolved = resolve_path(path)?;
    let mut builder = FsTreeBuilder::new();
    Ok(builder.build_from_path(&resolved)?)
}

fn canvas_rect(width: Option<i32>, height: Option<i32>) -> Result<Rect> {
    let config = TmapConfig::load().context("Cannot load configuration")?;
    Ok(Rect::new(
        0,
        0,
        width.unwrap_or(config.canvas.width),
        height.unwrap_or(config.canvas.height),
    ))
}

fn prepare_view(tree: &mut TreeArena, expand_all: bool) {
    if expand_all {
        if let Some(root) = tree.root() {
            tree.expand_all(root);
        }
    }
}

fn print_rectangles(tree: &TreeArena, canvas: Rect) {
    let rects = tree.rectangles();
    for (i, (rect, color)) in rects.iter().enumerate() {
        output::info(&format!(
            "{:>4}  {}  ({:>5}, {:>5}) {:>5}x{:<5}",
            i,
            output::swatch(*color),
            rect.x,
            rect.y,
            rect.width,
            rect.height
        ));
    }
    let covered: i64 = rects.iter().map(|(rect, _)| rect.area()).sum();
    output::detail(&format!(
        "{} rectangles, area {} of {}",
        rects.len(),
        covered,
        canvas.area()
    ));
}

/// Render the tree for terminal display, sizes included.
fn to_display_tree(tree: &TreeArena, idx: generational_arena::Index) -> termtree::Tree<String> {
    let label = tree
        .get_node(idx)
        .map(|node| format!("{} ({})", node.name, node.size))
        .unwrap_or_default();
    let mut display = termtree::Tree::new(label);
    if let Some(node) = tree.get_node(idx) {
        for &child in &node.children {
            display.push(to_display_tree(tree, child));
        }
    }
    display
}
