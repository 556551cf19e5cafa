pub mod api;
pub mod cli;
pub mod config;
pub mod gallery;
pub mod model;
pub mod runtime;
pub mod ui;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
