//! CLI argument definitions for Ripple.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ripple",
    version,
    about = "Build order and dependency updates across a family of solutions",
    long_about = "Ripple reads the solutions declared in ripple.toml, works out the order \
                  they must be built in from their project references, and checks their \
                  pinned package dependencies against the configured feeds."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print solutions in build order
    Order {
        /// Emit JSON with each solution's packages and dependencies
        #[arg(long)]
        json: bool,
    },

    /// Print the solution dependency graph
    Graph {
        /// Show one solution's direct dependencies and dependents
        #[arg(short, long)]
        solution: Option<String>,
    },

    /// Show a published package and the solution that owns it
    Package {
        /// Package name
        name: String,
    },

    /// Show pinned dependencies with newer versions on a feed
    Outdated {
        /// Only check this solution
        #[arg(short, long)]
        solution: Option<String>,
    },

    /// Check that every pinned version is available on a feed
    Verify {
        /// Only check this solution
        #[arg(short, long)]
        solution: Option<String>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
