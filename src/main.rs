use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use table_etl::{
    cli::{run_aggregate, run_join},
    config::{Overrides, PipelineConfig},
    frame::GroupOrder,
};

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Table ETL: join and summarise CSV tables from an object store or local disk
#[derive(Parser)]
#[command(name = "tabetl", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source settings and credentials from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Directory for local inputs and outputs (overrides DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Object store bucket (overrides OBJECT_STORE_BUCKET)
    #[arg(long, global = true)]
    bucket: Option<String>,

    /// Skip the object store and use local files only
    #[arg(long, global = true)]
    offline: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inner, left and right join of employees with departments
    Join,

    /// Summarise financial records by region and by year
    Aggregate {
        /// Order of the summary rows
        #[arg(long, value_enum, default_value_t = GroupOrder::Sorted)]
        group_order: GroupOrder,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // A missing dotenv file is fine; every setting has a default or is optional
    let dotenv = dotenvy::from_filename(&cli.env);

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    if let Err(e) = dotenv {
        log::debug!("No settings loaded from {}: {}", cli.env.bright_black(), e);
    }

    let group_order = match &cli.command {
        Commands::Aggregate { group_order } => Some(*group_order),
        Commands::Join => None,
    };
    let config = PipelineConfig::load(Overrides {
        bucket: cli.bucket,
        data_dir: cli.data_dir,
        offline: cli.offline,
        group_order,
    })?;

    match cli.command {
        Commands::Join => {
            log::info!("Running join job");
            run_join(&config).await?;
        }
        Commands::Aggregate { .. } => {
            log::info!("Running aggregate job");
            run_aggregate(&config).await?;
        }
    }

    Ok(())
}
