use clap::Parser;
use tracing::info;

use backend::config::{AppConfig, DIRECTORY_ENV_VARS};
use backend::db::connect_db;
use backend::directory::RpcDirectoryClient;
use backend::error::AppError;
use backend::services::sync::synchronize;
use migration::{Migrator, MigratorTrait};

#[derive(Parser)]
#[command(name = "sync-cli")]
#[command(about = "Synchronize the contact mirror from the remote directory")]
struct Args {
    /// Apply pending schema migrations before synchronizing
    #[arg(long)]
    apply_migrations: bool,
}

// Single-writer batch: schedule through a single-instance cron or an
// external lock; two concurrent passes racing on the same ids would
// produce undefined delete/update ordering.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("info,sqlx=warn,sea_orm=warn")
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("❌ Synchronization failed: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let directory_config = config
        .directory
        .as_ref()
        .ok_or_else(|| AppError::missing_config(&DIRECTORY_ENV_VARS))?;

    let db = connect_db(&config).await?;

    if args.apply_migrations {
        info!("applying pending migrations");
        Migrator::up(&db, None)
            .await
            .map_err(|e| AppError::db(format!("migration failed: {e}")))?;
    }

    info!("connecting to the remote directory");
    let client = RpcDirectoryClient::connect(directory_config).await?;

    let report = synchronize(&client, &db).await?;

    info!(
        inserted = report.inserted,
        updated = report.updated,
        deleted = report.deleted,
        total = report.total,
        "synchronization complete"
    );

    Ok(())
}
