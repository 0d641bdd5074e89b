//! pnlweb main entry point

use anyhow::Context;
use clap::Parser;
use pnlweb_api::{start_server, AppState};
use pnlweb_config::Config;
use pnlweb_core::{
    copy_assets, AssetSource, CoreError, FixtureDataSource, FsStorageReader, ReportDeps, StorageService,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "pnlweb")]
#[command(version)]
#[command(about = "Financial report views served over HTTP", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Copy the report assets and exit
    #[arg(long)]
    copy_assets_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, config_found) = if args.config.exists() {
        let config = Config::load(&args.config)
            .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
        (config, true)
    } else {
        (Config::default(), false)
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level)).init();

    if config_found {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file not found: {}, using defaults", args.config.display());
    }

    if let Some(target_dir) = &config.assets.target_dir {
        let source = match &config.assets.source_dir {
            Some(dir) => AssetSource::Directory(dir.clone()),
            None => AssetSource::Embedded,
        };
        copy_assets(&source, target_dir, &config.assets.namespace)
            .map_err(|e| {
                let e = CoreError::from(e);
                e.log_details();
                e
            })
            .context("Failed to copy report assets")?;
    }
    if args.copy_assets_only {
        return Ok(());
    }

    let routes = config.load_routes().context("Failed to load route overlay")?;
    let labels = config.load_labels().context("Failed to load labels")?;

    let data_source = match &config.data.fixtures {
        Some(path) => FixtureDataSource::load(path)
            .await
            .map_err(|e| {
                e.log_details();
                e
            })
            .with_context(|| format!("Failed to load fixtures from {}", path.display()))?,
        None => {
            log::warn!("No data.fixtures configured, reports will be empty");
            FixtureDataSource::default()
        }
    };

    let deps = ReportDeps {
        data_source: Arc::new(data_source),
        labels: Arc::new(labels),
        routes: Arc::new(routes),
    };
    let storage = StorageService::new(
        Arc::new(FsStorageReader::new(config.storage.root.clone())),
        &config.storage.container,
        &config.storage.route_prefix,
    );

    start_server(AppState::new(config, deps, storage))
        .await
        .context("Server error")?;
    Ok(())
}
