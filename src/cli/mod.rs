use anyhow::Result;
use clap::{Parser, Subcommand};

mod import;
mod migrate;
mod server;
mod shopping;

pub use shopping::render_list;

/// mealbook - recipes, meal plans and shopping lists
#[derive(Parser)]
#[command(name = "mealbook")]
#[command(about = "Recipes, meal planning and shopping lists on SQLite", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Import a recipe from an HTML file or a URL
    Import {
        /// Local path or http(s) URL
        source: String,

        /// Folder receiving the recipe
        #[arg(long)]
        folder: Option<String>,

        /// Skip unmatched ingredient lines instead of adding them to the catalog
        #[arg(long)]
        no_create_missing: bool,

        /// Match threshold (overrides config file)
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Print a shopping list
    Shopping {
        list_id: String,

        /// Move checked lines to the end
        #[arg(long)]
        checked_last: bool,
    },
}

pub async fn run(cli: Cli, config: crate::config::Config) -> Result<()> {
    match cli.command {
        Commands::Serve { host, port } => server::serve(config, host, port).await,
        Commands::Migrate => migrate::migrate(&config).await,
        Commands::Reset => migrate::reset(&config).await,
        Commands::Import {
            source,
            folder,
            no_create_missing,
            threshold,
        } => {
            import::import(
                &config,
                import::ImportArgs {
                    source,
                    folder,
                    create_missing: !no_create_missing,
                    threshold,
                },
            )
            .await
        }
        Commands::Shopping {
            list_id,
            checked_last,
        } => shopping::print(&config, &list_id, checked_last).await,
    }
}

/// Single-pool state for one-shot commands.
async fn open_state(config: &crate::config::Config) -> Result<mealbook_shared::State> {
    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    crate::db::migrate(&pool).await?;

    Ok(mealbook_shared::State::single(pool))
}
