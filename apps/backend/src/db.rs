use sea_orm::{Database, DatabaseConnection};

use crate::config::AppConfig;
use crate::error::AppError;

/// Connect to the mirror database. Does NOT run any migrations; the schema
/// is managed by the migration crate via the sync binary.
pub async fn connect_db(config: &AppConfig) -> Result<DatabaseConnection, AppError> {
    let conn = Database::connect(&config.database_url).await?;
    Ok(conn)
}
