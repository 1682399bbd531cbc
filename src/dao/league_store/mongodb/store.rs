use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{Client, Collection, Database, bson::doc, options::IndexOptions};
use tokio::{sync::RwLock, time::sleep};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{
    config::MongoConfig,
    error::{MongoDaoError, MongoResult},
    models::{MongoLeagueDocument, doc_id, owned_by, owned_league},
};
use crate::dao::{league_store::LeagueStore, models::LeagueEntity, storage::StorageResult};

const LEAGUE_COLLECTION_NAME: &str = "leagues";

/// MongoDB-backed [`LeagueStore`].
#[derive(Clone)]
pub struct MongoLeagueStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    // Kept so the connection pool lives as long as the database handle.
    #[allow(dead_code)]
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) = open_database(&self.config).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

/// Build a client for the league database and wait for its first ping, retrying
/// as configured in [`MongoConfig::retry`].
async fn open_database(config: &MongoConfig) -> MongoResult<(Client, Database)> {
    let client = Client::with_options(config.options.clone())
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(&config.database_name);

    let mut delays = config.retry.delays();
    let mut attempts = 0;
    loop {
        attempts += 1;
        let err = match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => {
                debug!(database = %config.database_name, attempts, "league database reachable");
                return Ok((client, database));
            }
            Err(err) => err,
        };

        let Some(delay) = delays.next() else {
            return Err(MongoDaoError::InitialPing {
                attempts,
                source: err,
            });
        };
        warn!(attempts, ?delay, error = %err, "league database ping failed; retrying");
        sleep(delay).await;
    }
}

impl MongoLeagueStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) = open_database(&config).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let collection = self.collection().await;
        let index = mongodb::IndexModel::builder()
            .keys(doc! {"owner_id": 1, "created_at": -1})
            .options(
                IndexOptions::builder()
                    .name(Some("league_owner_created_idx".to_owned()))
                    .build(),
            )
            .build();

        collection
            .create_index(index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: LEAGUE_COLLECTION_NAME,
                index: "owner_id,created_at",
                source,
            })?;

        Ok(())
    }

    async fn collection(&self) -> Collection<MongoLeagueDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoLeagueDocument>(LEAGUE_COLLECTION_NAME)
    }

    async fn save_league(&self, league: LeagueEntity) -> MongoResult<()> {
        let id = league.id;
        let document: MongoLeagueDocument = league.into();
        let collection = self.collection().await;
        collection
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveLeague { id, source })?;

        Ok(())
    }

    async fn find_league(&self, owner_id: Uuid, id: Uuid) -> MongoResult<Option<LeagueEntity>> {
        let collection = self.collection().await;

        let document = collection
            .find_one(owned_league(owner_id, id))
            .await
            .map_err(|source| MongoDaoError::LoadLeague { id, source })?;

        document.map(LeagueEntity::try_from).transpose()
    }

    async fn list_leagues(&self, owner_id: Uuid) -> MongoResult<Vec<LeagueEntity>> {
        let collection = self.collection().await;

        let documents: Vec<MongoLeagueDocument> = collection
            .find(owned_by(owner_id))
            .sort(doc! {"created_at": -1})
            .await
            .map_err(|source| MongoDaoError::ListLeagues { owner_id, source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListLeagues { owner_id, source })?;

        documents.into_iter().map(LeagueEntity::try_from).collect()
    }

    async fn delete_league(&self, owner_id: Uuid, id: Uuid) -> MongoResult<bool> {
        let collection = self.collection().await;
        let result = collection
            .delete_one(owned_league(owner_id, id))
            .await
            .map_err(|source| MongoDaoError::DeleteLeague { id, source })?;
        Ok(result.deleted_count > 0)
    }
}

impl LeagueStore for MongoLeagueStore {
    fn save_league(&self, league: LeagueEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_league(league).await.map_err(Into::into) })
    }

    fn find_league(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<LeagueEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_league(owner_id, id).await.map_err(Into::into) })
    }

    fn list_leagues(&self, owner_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<LeagueEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_leagues(owner_id).await.map_err(Into::into) })
    }

    fn delete_league(&self, owner_id: Uuid, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_league(owner_id, id).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
