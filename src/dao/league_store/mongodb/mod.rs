mod config;
mod error;
mod models;
mod store;

pub use config::{ConnectRetry, MongoConfig};
pub use error::{MongoDaoError, MongoResult};
pub use store::MongoLeagueStore;

use crate::dao::storage::StorageError;

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        if matches!(err, MongoDaoError::CorruptedDocument { .. }) {
            return StorageError::Corrupted {
                message: err.to_string(),
            };
        }
        StorageError::unavailable(err.to_string(), err)
    }
}
