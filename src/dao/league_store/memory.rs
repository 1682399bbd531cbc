use std::{cmp::Reverse, sync::Arc};

use dashmap::DashMap;
use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::{league_store::LeagueStore, models::LeagueEntity, storage::StorageResult};

/// Process-local [`LeagueStore`]. Always healthy; contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryLeagueStore {
    leagues: Arc<DashMap<Uuid, LeagueEntity>>,
}

impl MemoryLeagueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, owner_id: Uuid, id: Uuid) -> Option<LeagueEntity> {
        self.leagues
            .get(&id)
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
    }

    fn list(&self, owner_id: Uuid) -> Vec<LeagueEntity> {
        let mut leagues = self
            .leagues
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect::<Vec<_>>();
        leagues.sort_by_key(|league| Reverse(league.created_at));
        leagues
    }

    fn delete(&self, owner_id: Uuid, id: Uuid) -> bool {
        self.leagues
            .remove_if(&id, |_, league| league.owner_id == owner_id)
            .is_some()
    }
}

impl LeagueStore for MemoryLeagueStore {
    fn save_league(&self, league: LeagueEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.leagues.insert(league.id, league);
        Box::pin(async { Ok(()) })
    }

    fn find_league(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<LeagueEntity>>> {
        let found = self.find(owner_id, id);
        Box::pin(async move { Ok(found) })
    }

    fn list_leagues(&self, owner_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<LeagueEntity>>> {
        let leagues = self.list(owner_id);
        Box::pin(async move { Ok(leagues) })
    }

    fn delete_league(&self, owner_id: Uuid, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let removed = self.delete(owner_id, id);
        Box::pin(async move { Ok(removed) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
