use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(name = "techhub")]
#[command(version, about = "Route task descriptions to skills and roles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (layered over ~/.techhub/techhub.toml and ./techhub.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog file (yaml, json or toml); overrides catalog.path
    #[arg(long, global = true, value_name = "PATH", env = "TECHHUB_CATALOG")]
    pub catalog: Option<PathBuf>,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Route a task description to an ordered skill plan
    Route {
        /// Task description (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Keep at most N keyword matches before adding collaborators (0 = all)
        #[arg(long, value_name = "N")]
        max_matches: Option<usize>,

        /// Leave role dependencies out of the plan
        #[arg(long)]
        no_dependencies: bool,
    },

    /// List roles and their skills
    Skills {
        /// Only this role
        #[arg(long)]
        role: Option<String>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show one skill
    Show {
        skill_id: String,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Load and validate a catalog file
    Validate {
        /// Catalog to check (default: the configured catalog)
        path: Option<PathBuf>,
    },

    /// Write the default config and catalog to ~/.techhub/
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Text joined from the route arguments
    pub fn route_text(text: &[String]) -> String {
        text.join(" ")
    }
}
