use sea_orm::{Database, DatabaseConnection};

use crate::config::Config;
use crate::error::AppResult;

pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    Ok(Database::connect(&config.database_url).await?)
}
