use std::path::Path;

use clap::Parser;
use serde_json::json;

use crate::config::{GalleryConfig, load_config, save_config};
use crate::model::to_search_value;
use crate::runtime::AppContext;

use super::types::{Cli, Commands, ListSummary, ListedImage};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.base_url)?;

    match cli.command.unwrap_or(Commands::View) {
        Commands::List { query, pages } => {
            let app = AppContext::new(config).map_err(|error| error.to_string())?;
            let images = app
                .gallery_service()
                .load_images()
                .map_err(|error| error.to_string())?;
            let mut state = app.new_state();
            state.replace_images(images);
            state.set_query(query);
            for _ in 1..pages {
                if !state.load_more() {
                    break;
                }
            }
            let summary = ListSummary {
                query: state.query().to_string(),
                tokens: state.tokens().to_vec(),
                total: state.images().len(),
                found: state.filtered_len(),
                visible: state.visible_len(),
                has_more: state.has_more(),
                images: state
                    .visible()
                    .map(|image| {
                        let api_image = image.api_image();
                        ListedImage {
                            name: api_image.name.clone(),
                            url: api_image.url.clone(),
                            title: api_image.display_title().to_string(),
                            tags: api_image.card_tags(),
                        }
                    })
                    .collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).map_err(|error| error.to_string())?
            );
        }
        Commands::Refresh { name } => {
            let app = AppContext::new(config).map_err(|error| error.to_string())?;
            let info = app
                .gallery_service()
                .refresh_metadata(&name)
                .map_err(|error| format!("Could not update meta: {error}"))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({"name": name, "info": info}))
                    .map_err(|error| error.to_string())?
            );
        }
        Commands::Normalize { text } => {
            println!("{}", to_search_value(&text.join(" ")));
        }
        Commands::Config { write } => match write {
            Some(path) => {
                save_config(&path, &config).map_err(|error| error.to_string())?;
                println!("{}", json!({"status": "ok", "output": path}));
            }
            None => println!(
                "{}",
                serde_json::to_string_pretty(&config).map_err(|error| error.to_string())?
            ),
        },
        Commands::View => {
            let app = AppContext::new(config).map_err(|error| error.to_string())?;
            crate::ui::run(app)?;
        }
    }

    Ok(())
}

fn resolve_config(path: Option<&Path>, base_url: Option<String>) -> Result<GalleryConfig, String> {
    let config = match path {
        Some(path) => load_config(path).map_err(|error| error.to_string())?,
        None => GalleryConfig::default(),
    };
    let config = config.with_base_url(base_url);
    config.validate().map_err(|error| error.to_string())?;
    log::debug!("using gallery backend {}", config.base_url);
    Ok(config)
}
