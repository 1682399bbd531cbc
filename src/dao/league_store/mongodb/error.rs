use mongodb::error::Error as MongoError;
use thiserror::Error;
use uuid::Uuid;

pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

#[derive(Debug, Error)]
pub enum MongoDaoError {
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        uri: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        attempts: u32,
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        collection: &'static str,
        index: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("failed to save league `{id}`")]
    SaveLeague {
        id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("failed to load league `{id}`")]
    LoadLeague {
        id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("failed to list leagues of owner `{owner_id}`")]
    ListLeagues {
        owner_id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("failed to delete league `{id}`")]
    DeleteLeague {
        id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("league document `{id}` holds an invalid identifier")]
    CorruptedDocument {
        id: String,
        #[source]
        source: uuid::Error,
    },
}
