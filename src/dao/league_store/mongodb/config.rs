use std::time::Duration;

use mongodb::options::ClientOptions;
use tracing::warn;

use super::error::{MongoDaoError, MongoResult};

const DEFAULT_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DB: &str = "league_fixtures";
const CONNECT_ATTEMPTS_ENV: &str = "MONGO_CONNECT_ATTEMPTS";

/// How hard [`super::MongoLeagueStore::connect`] tries before giving up on the first ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectRetry {
    pub attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ConnectRetry {
    fn default() -> Self {
        Self {
            attempts: 10,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl ConnectRetry {
    /// Pause before each retry: doubling from `initial_delay`, capped at `max_delay`.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let max_delay = self.max_delay;
        std::iter::successors(Some(self.initial_delay.min(max_delay)), move |delay| {
            Some((*delay * 2).min(max_delay))
        })
        .take(self.attempts.saturating_sub(1) as usize)
    }
}

/// Connection settings for the MongoDB league store.
#[derive(Clone)]
pub struct MongoConfig {
    pub options: ClientOptions,
    pub database_name: String,
    pub retry: ConnectRetry,
}

impl MongoConfig {
    pub async fn from_uri(uri: &str, db_name: Option<&str>) -> MongoResult<Self> {
        let database_name = db_name.unwrap_or(DEFAULT_DB).to_owned();
        let options =
            ClientOptions::parse(uri)
                .await
                .map_err(|source| MongoDaoError::InvalidUri {
                    uri: uri.to_owned(),
                    source,
                })?;

        Ok(Self {
            options,
            database_name,
            retry: ConnectRetry::default(),
        })
    }

    /// Read `MONGO_URI`, `MONGO_DB` and `MONGO_CONNECT_ATTEMPTS`, defaulting to a local server.
    pub async fn from_env() -> MongoResult<Self> {
        let uri = std::env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_URI.into());
        let db = std::env::var("MONGO_DB").ok();
        let mut config = Self::from_uri(&uri, db.as_deref()).await?;

        if let Ok(raw) = std::env::var(CONNECT_ATTEMPTS_ENV) {
            match raw.parse::<u32>() {
                Ok(attempts) if attempts > 0 => config.retry.attempts = attempts,
                _ => warn!(value = %raw, "ignoring {CONNECT_ATTEMPTS_ENV}"),
            }
        }

        Ok(config)
    }
}
