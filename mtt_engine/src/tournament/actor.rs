//! Tournament actor implementation with async message handling.

use chrono::Utc;
use tokio::{
    sync::{mpsc, oneshot},
    time::{Duration, interval},
};

use super::{
    controller::Tournament,
    errors::{TournamentError, TournamentResult},
    messages::{TableOperation, TournamentMessage},
    models::{TournamentId, TournamentInfo, TurnOutcome},
};
use crate::{
    Chips,
    table::{PlayerId, PokerTable, TableId, TableResult},
};

/// Tournament actor handle for sending messages
#[derive(Clone)]
pub struct TournamentHandle {
    sender: mpsc::Sender<TournamentMessage>,
    tournament_id: TournamentId,
}

impl TournamentHandle {
    /// Create a new tournament handle
    pub fn new(sender: mpsc::Sender<TournamentMessage>, tournament_id: TournamentId) -> Self {
        Self {
            sender,
            tournament_id,
        }
    }

    pub fn tournament_id(&self) -> TournamentId {
        self.tournament_id
    }

    /// Send a message to the tournament
    pub async fn send(&self, message: TournamentMessage) -> TournamentResult<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| TournamentError::Closed)
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> TournamentMessage,
    ) -> TournamentResult<T> {
        let (response, receiver) = oneshot::channel();
        self.send(message(response)).await?;
        receiver.await.map_err(|_| TournamentError::Closed)
    }

    pub async fn register(&self, player: PlayerId) -> TournamentResult<()> {
        self.request(|response| TournamentMessage::Register { player, response })
            .await?
    }

    pub async fn unregister(&self, player: PlayerId) -> TournamentResult<()> {
        self.request(|response| TournamentMessage::Unregister { player, response })
            .await?
    }

    /// Report that a hand ended at `table_id`
    pub async fn end_turn(&self, table_id: TableId) -> TournamentResult<TurnOutcome> {
        self.request(|response| TournamentMessage::EndTurn { table_id, response })
            .await?
    }

    /// Run `operation` against a table owned by the tournament
    pub async fn with_table<F>(&self, table_id: TableId, operation: F) -> TournamentResult<()>
    where
        F: FnOnce(&mut dyn PokerTable) -> TableResult<()> + Send + 'static,
    {
        let operation: TableOperation = Box::new(operation);
        self.request(|response| TournamentMessage::WithTable {
            table_id,
            operation,
            response,
        })
        .await?
    }

    pub async fn info(&self) -> TournamentResult<TournamentInfo> {
        self.request(|response| TournamentMessage::GetInfo { response })
            .await
    }

    pub async fn prizes(&self) -> TournamentResult<Option<Vec<Chips>>> {
        self.request(|response| TournamentMessage::GetPrizes { response })
            .await
    }

    pub async fn rank(&self, player: PlayerId) -> TournamentResult<Option<usize>> {
        self.request(|response| TournamentMessage::GetRank { player, response })
            .await
    }

    /// Open tables, in creation order
    pub async fn table_ids(&self) -> TournamentResult<Vec<TableId>> {
        Ok(self.info().await?.table_ids)
    }

    /// Check timers now instead of waiting for the next tick
    pub async fn tick(&self) -> TournamentResult<()> {
        self.send(TournamentMessage::Tick).await
    }

    /// Stop the actor and return the final information
    pub async fn close(&self) -> TournamentResult<TournamentInfo> {
        self.request(|response| TournamentMessage::Close { response })
            .await
    }
}

/// Tournament actor owning a single tournament and its tables
pub struct TournamentActor {
    tournament: Tournament,

    /// Message inbox
    inbox: mpsc::Receiver<TournamentMessage>,

    /// Is the actor closed
    is_closed: bool,
}

impl TournamentActor {
    /// Create a new tournament actor
    ///
    /// # Returns
    ///
    /// * `(TournamentActor, TournamentHandle)` - Actor and handle for sending messages
    pub fn new(tournament: Tournament) -> (Self, TournamentHandle) {
        let (sender, inbox) = mpsc::channel(100);
        let handle = TournamentHandle::new(sender, tournament.id());

        let actor = Self {
            tournament,
            inbox,
            is_closed: false,
        };

        (actor, handle)
    }

    /// Run the tournament actor event loop
    pub async fn run(mut self) {
        let id = self.tournament.id();
        log::info!(
            "Tournament {} '{}' starting",
            id,
            self.tournament.config().name
        );

        let mut tick_interval = interval(Duration::from_secs(1));

        loop {
            tokio::select! {
                message = self.inbox.recv() => {
                    let Some(message) = message else {
                        // Every handle is gone.
                        break;
                    };
                    self.handle_message(message);

                    if self.is_closed {
                        break;
                    }
                }

                _ = tick_interval.tick() => {
                    self.tick();
                }
            }
        }

        log::info!(
            "Tournament {} '{}' closed",
            id,
            self.tournament.config().name
        );
    }

    fn handle_message(&mut self, message: TournamentMessage) {
        match message {
            TournamentMessage::Register { player, response } => {
                let result = self.tournament.register(player, Utc::now());
                if let Err(e) = &result {
                    log::debug!(
                        "Tournament {}: registration of {} refused: {}",
                        self.tournament.id(),
                        player,
                        e
                    );
                }
                let _ = response.send(result);
            }

            TournamentMessage::Unregister { player, response } => {
                let _ = response.send(self.tournament.unregister(player));
            }

            TournamentMessage::EndTurn { table_id, response } => {
                let result = self.tournament.end_turn(table_id, Utc::now());
                if let Err(e) = &result {
                    log::error!(
                        "Tournament {}: end of turn at table {} failed: {}",
                        self.tournament.id(),
                        table_id,
                        e
                    );
                }
                let _ = response.send(result);
            }

            TournamentMessage::WithTable {
                table_id,
                operation,
                response,
            } => {
                let result = match self.tournament.table_mut(table_id) {
                    Some(table) => operation(table).map_err(TournamentError::from),
                    None => Err(TournamentError::TableNotFound(table_id)),
                };
                let _ = response.send(result);
            }

            TournamentMessage::GetInfo { response } => {
                let _ = response.send(self.tournament.info());
            }

            TournamentMessage::GetPrizes { response } => {
                let _ = response.send(self.tournament.prizes());
            }

            TournamentMessage::GetRank { player, response } => {
                let _ = response.send(self.tournament.rank(player));
            }

            TournamentMessage::Tick => self.tick(),

            TournamentMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(self.tournament.info());
            }
        }
    }

    fn tick(&mut self) {
        let now = Utc::now();
        self.tournament.update_registering(now);
        if let Err(e) = self.tournament.start_if_due(now) {
            log::error!(
                "Tournament {}: failed to start: {}",
                self.tournament.id(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        table::MemoryTableFactory,
        tournament::{TournamentConfig, TournamentState, observer::NoopObserver},
    };

    fn spawn(config: TournamentConfig) -> TournamentHandle {
        let tournament = Tournament::new(
            config,
            Box::new(MemoryTableFactory::seeded(3)),
            Box::new(NoopObserver),
            Utc::now(),
        )
        .unwrap();
        let (actor, handle) = TournamentActor::new(tournament);
        tokio::spawn(actor.run());
        handle
    }

    #[tokio::test]
    async fn test_register_through_handle() {
        let handle = spawn(TournamentConfig::sit_and_go("SNG", 3, 3));
        handle.register(1).await.unwrap();
        handle.register(2).await.unwrap();
        assert!(matches!(
            handle.register(2).await,
            Err(TournamentError::AlreadyRegistered(2))
        ));

        handle.register(3).await.unwrap();
        let info = handle.info().await.unwrap();
        assert_eq!(info.state, TournamentState::Running);
        assert_eq!(info.table_ids, vec![1]);
        assert_eq!(info.seated_count, 3);
    }

    #[tokio::test]
    async fn test_with_table_unknown_table() {
        let handle = spawn(TournamentConfig::sit_and_go("SNG", 2, 2));
        let result = handle.with_table(5, |_| Ok(())).await;
        assert!(matches!(result, Err(TournamentError::TableNotFound(5))));
    }

    #[tokio::test]
    async fn test_close_stops_actor() {
        let handle = spawn(TournamentConfig::sit_and_go("SNG", 2, 2));
        let info = handle.close().await.unwrap();
        assert_eq!(info.state, TournamentState::Registering);
        assert!(matches!(handle.info().await, Err(TournamentError::Closed)));
    }
}
