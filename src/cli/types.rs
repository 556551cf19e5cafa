use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(
    name = "gallery",
    version,
    about = "Browse, search and annotate an AI-described image gallery"
)]
pub(super) struct Cli {
    /// YAML or JSON settings file.
    #[arg(long, global = true)]
    pub(super) config: Option<PathBuf>,
    #[arg(long, global = true, env = "GALLERY_BASE_URL")]
    pub(super) base_url: Option<String>,
    #[command(subcommand)]
    pub(super) command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Fetches the gallery and prints the images a search would show.
    List {
        #[arg(long, default_value = "")]
        query: String,
        /// Number of pages to reveal, as if scrolled to the bottom `pages - 1` times.
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Regenerates title, description and tags of one image.
    Refresh {
        name: String,
    },
    /// Prints the search value of the given text.
    Normalize {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Prints the effective settings, or writes them to a file.
    Config {
        #[arg(long)]
        write: Option<PathBuf>,
    },
    /// Launches the native gallery window.
    View,
}

#[derive(Debug, Serialize)]
pub(super) struct ListedImage {
    pub(super) name: String,
    pub(super) url: String,
    pub(super) title: String,
    pub(super) tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ListSummary {
    pub(super) query: String,
    pub(super) tokens: Vec<String>,
    pub(super) total: usize,
    pub(super) found: usize,
    pub(super) visible: usize,
    pub(super) has_more: bool,
    pub(super) images: Vec<ListedImage>,
}
