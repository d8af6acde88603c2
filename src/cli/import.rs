use anyhow::Result;
use mealbook_recipe::import::ImportOptions;
use std::time::Duration;

use crate::config::Config;

pub struct ImportArgs {
    pub source: String,
    pub folder: Option<String>,
    pub create_missing: bool,
    pub threshold: Option<f64>,
}

#[tracing::instrument(skip(config, args), fields(source = %args.source))]
pub async fn import(config: &Config, args: ImportArgs) -> Result<()> {
    let timeout = Duration::from_secs(config.import.fetch_timeout_secs);
    let html = crate::fetch::read_source(&args.source, timeout).await?;

    let state = super::open_state(config).await?;
    let outcome = mealbook_recipe::import::Command::new(state)
        .import(
            &html,
            ImportOptions {
                folder_id: args.folder,
                create_missing: args.create_missing,
                threshold: Some(args.threshold.unwrap_or(config.import.match_threshold)),
            },
        )
        .await?;

    println!("Imported recipe {}", outcome.recipe_id);
    println!("  matched: {}", outcome.matched);

    if !outcome.created.is_empty() {
        println!("  added to the catalog: {}", outcome.created.join(", "));
    }

    for line in outcome.skipped.iter() {
        println!("  skipped: {line}");
    }

    Ok(())
}
