//! CLI argument definitions for gemorder.
//!
//! Uses `clap` derive macros. Each command corresponds to a handler in
//! the [`super::commands`] module. Gems are given as `NAME` or
//! `NAME@REQS` where REQS is a comma-separated requirement list, e.g.
//! `rails@>=6.0,<8.0`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "gemorder",
    version,
    about = "Resolve RubyGems dependency closures and order them for installation",
    long_about = "gemorder resolves the transitive dependency graph of a set of gems \
                  through the local `gem` tool and prints the result in an order where \
                  every gem follows the gems it depends on, ready for a packaging pipeline."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the gem executable
    #[arg(long, global = true, env = "GEMORDER_GEM_BIN")]
    pub gem_bin: Option<String>,

    /// Directory for probe cache artifacts
    #[arg(long, global = true)]
    pub probe_cache_dir: Option<PathBuf>,

    /// Follow development dependencies as well as runtime ones
    #[arg(long, global = true)]
    pub include_development: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the transitive dependency graph of the given gems
    Resolve {
        /// Gems as NAME or NAME@REQS
        #[arg(required = true)]
        gems: Vec<String>,
        /// Print the graph as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a dependency-respecting install order for the given gems
    Order {
        /// Gems as NAME or NAME@REQS
        #[arg(required = true)]
        gems: Vec<String>,
    },

    /// Print the exact version each given gem resolves to
    Versions {
        /// Gems as NAME or NAME@REQS
        #[arg(required = true)]
        gems: Vec<String>,
    },

    /// Check whether a name refers to a fetchable gem
    Probe {
        /// Gem name
        name: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
