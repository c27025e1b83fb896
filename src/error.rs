use std::path::PathBuf;

/// Error taxonomy for the directory. Lookups that find no row report
/// `NotFound`; bad input is rejected as `Validation` before anything touches
/// the database; everything that goes wrong during a query or a mutation's
/// commit collapses into `Database`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("config file location could not be determined")]
    ConfigLocation,
    #[error("invalid log filter: {0}")]
    LogFilter(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

// Transaction closures return our own error type; flatten the wrapper so
// callers only ever see `Error`.
impl From<sea_orm::TransactionError<Error>> for Error {
    fn from(err: sea_orm::TransactionError<Error>) -> Self {
        match err {
            sea_orm::TransactionError::Connection(e) => Error::Database(e),
            sea_orm::TransactionError::Transaction(e) => e,
        }
    }
}
