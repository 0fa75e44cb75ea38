//! Tournament manager for spawning and managing multiple tournament actors.

use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::RwLock;

use super::{
    actor::{TournamentActor, TournamentHandle},
    controller::Tournament,
    errors::{TournamentError, TournamentResult},
    models::{TournamentConfig, TournamentId, TournamentInfo},
    observer::TournamentObserver,
};
use crate::table::TableFactory;

/// Tournament manager for managing multiple tournament instances
#[derive(Clone, Default)]
pub struct TournamentManager {
    /// Active tournament handles
    tournaments: Arc<RwLock<HashMap<TournamentId, TournamentHandle>>>,
}

impl TournamentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and spawn a new tournament
    ///
    /// # Arguments
    ///
    /// * `config` - Tournament configuration; its serial must be unused
    /// * `factory` - Source of the tournament's tables
    /// * `observer` - Receives the tournament's events
    pub async fn spawn(
        &self,
        config: TournamentConfig,
        factory: Box<dyn TableFactory>,
        observer: Box<dyn TournamentObserver>,
    ) -> TournamentResult<TournamentHandle> {
        let id = config.serial;

        let mut tournaments = self.tournaments.write().await;
        if tournaments.contains_key(&id) {
            return Err(TournamentError::DuplicateTournament(id));
        }

        let tournament = Tournament::new(config, factory, observer, Utc::now())?;
        let (actor, handle) = TournamentActor::new(tournament);
        tournaments.insert(id, handle.clone());
        drop(tournaments);

        tokio::spawn(async move {
            actor.run().await;
        });

        log::info!("Spawned tournament {}", id);
        Ok(handle)
    }

    pub async fn get(&self, id: TournamentId) -> Option<TournamentHandle> {
        self.tournaments.read().await.get(&id).cloned()
    }

    /// Information on every live tournament, ordered by id
    pub async fn list(&self) -> Vec<TournamentInfo> {
        let handles: Vec<TournamentHandle> =
            self.tournaments.read().await.values().cloned().collect();

        let mut infos = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.info().await {
                Ok(info) => infos.push(info),
                Err(e) => log::warn!(
                    "Tournament {} did not answer: {}",
                    handle.tournament_id(),
                    e
                ),
            }
        }
        infos.sort_by_key(|info| info.id);
        infos
    }

    /// Stop a tournament and forget it
    pub async fn close(&self, id: TournamentId) -> TournamentResult<TournamentInfo> {
        let handle = self
            .tournaments
            .write()
            .await
            .remove(&id)
            .ok_or(TournamentError::NotFound(id))?;
        handle.close().await
    }

    /// Stop every tournament, returning how many were closed
    pub async fn close_all(&self) -> usize {
        let handles: Vec<TournamentHandle> = self
            .tournaments
            .write()
            .await
            .drain()
            .map(|(_, handle)| handle)
            .collect();

        let mut closed = 0;
        for handle in handles {
            if handle.close().await.is_ok() {
                closed += 1;
            }
        }
        closed
    }
}
