//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Interactive treemap core: hierarchical size aggregation, strip
/// layout, expand/collapse view state
#[derive(Parser, Debug)]
#[command(name = "tmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging. Repeat (-d -d) to increase verbosity.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a directory tree with aggregate sizes
    Tree {
        /// Directory (or single file) to mirror
        #[arg(value_hint = ValueHint::AnyPath)]
        path: String,

        /// Also list the N largest files
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },

    /// Lay out a directory tree and print the visible rectangles
    Map {
        /// Directory (or single file) to mirror
        #[arg(value_hint = ValueHint::AnyPath)]
        path: String,

        /// Canvas width (default from config)
        #[arg(long)]
        width: Option<i32>,

        /// Canvas height (default from config)
        #[arg(long)]
        height: Option<i32>,

        /// Expand every internal node before the layout
        #[arg(long)]
        expand_all: bool,
    },

    /// Locate the visible leaf at a canvas position
    At {
        /// Directory (or single file) to mirror
        #[arg(value_hint = ValueHint::AnyPath)]
        path: String,

        /// Horizontal canvas coordinate
        #[arg(short, long)]
        x: i32,

        /// Vertical canvas coordinate
        #[arg(short, long)]
        y: i32,

        /// Canvas width (default from config)
        #[arg(long)]
        width: Option<i32>,

        /// Canvas height (default from config)
        #[arg(long)]
        height: Option<i32>,

        /// Expand every internal node before the layout
        #[arg(long)]
        expand_all: bool,
    },

    /// Lay out the papers dataset as a category tree
    Papers {
        /// Dataset file (default from config)
        #[arg(value_hint = ValueHint::FilePath)]
        dataset: Option<String>,

        /// Ignore the publication-year level
        #[arg(long)]
        flat: bool,

        /// Canvas width (default from config)
        #[arg(long)]
        width: Option<i32>,

        /// Canvas height (default from config)
        #[arg(long)]
        height: Option<i32>,

        /// Expand every internal node before the layout
        #[arg(long)]
        expand_all: bool,
    },

    /// Show effective configuration
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
