pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::LeagueEntity;
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Abstraction over the persistence layer for leagues.
///
/// Every lookup is scoped to an owner: a league belonging to someone else behaves
/// exactly like a missing one.
pub trait LeagueStore: Send + Sync {
    /// Insert or replace the whole league record.
    fn save_league(&self, league: LeagueEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_league(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<LeagueEntity>>>;
    /// Leagues of `owner_id`, newest first.
    fn list_leagues(&self, owner_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<LeagueEntity>>>;
    /// Returns whether a league was removed.
    fn delete_league(&self, owner_id: Uuid, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
