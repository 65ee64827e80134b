use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("no buses with available seats")]
    NoInventory,

    #[error("no seats available on bus {0}")]
    NoSeat(i32),
}

pub type AppResult<T> = Result<T, AppError>;
