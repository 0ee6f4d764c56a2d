//! One task per table.
//!
//! A [`TableHandle`] is a cheap, cloneable sender. Every command travels over
//! the table's mailbox and is applied to the engine by the single task that
//! owns it, so commands for one table are processed strictly in arrival
//! order and no lock is ever held across an await.

use crate::cards::Card;
use crate::engine::{TableEngine, TableSnapshot};
use crate::error::GameError;
use crate::game::{Action, Payout, Turn};
use crate::player::PlayerId;
use crate::store::{PlayerRecord, PlayerStore};
use tokio::sync::{mpsc, oneshot};

const MAILBOX: usize = 64;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error("table task has stopped")]
    Closed,
    #[error("table has no player store")]
    NoStore,
    #[error(transparent)]
    Game(#[from] GameError),
}

type Reply<T> = oneshot::Sender<T>;

enum Command {
    Seat { id: PlayerId, stack: u64, reply: Reply<Result<(), GameError>> },
    Join { id: PlayerId, reply: Reply<Result<(), TableError>> },
    Leave { id: PlayerId, reply: Reply<Result<PlayerRecord, GameError>> },
    StartRound { reply: Reply<Result<(), GameError>> },
    Act { id: PlayerId, action: Action, reply: Reply<Result<(), GameError>> },
    Discard { id: PlayerId, indices: Vec<usize>, reply: Reply<Result<(), GameError>> },
    AdvanceTurn { reply: Reply<Result<Turn, GameError>> },
    IsRoundOver { reply: Reply<bool> },
    Showdown { reply: Reply<Result<Vec<Payout>, GameError>> },
    HoleCards { id: PlayerId, reply: Reply<Result<Vec<Card>, GameError>> },
    Snapshot { reply: Reply<TableSnapshot> },
}

#[derive(Debug, Clone)]
pub struct TableHandle {
    name: String,
    tx: mpsc::Sender<Command>,
}

impl TableHandle {
    /// Move `engine` onto its own task. Must be called inside a tokio runtime.
    pub fn spawn<E>(name: impl Into<String>, engine: E) -> Self
    where
        E: TableEngine + Send + 'static,
    {
        Self::start(name.into(), engine, None)
    }

    /// Like [`TableHandle::spawn`], with `store` behind [`TableHandle::join`].
    /// Seated players are written back after each settled showdown and when
    /// they leave.
    pub fn spawn_with_store<E, S>(name: impl Into<String>, engine: E, store: S) -> Self
    where
        E: TableEngine + Send + 'static,
        S: PlayerStore + Send + 'static,
    {
        Self::start(name.into(), engine, Some(Box::new(store)))
    }

    fn start<E>(name: String, engine: E, store: Option<Box<dyn PlayerStore + Send>>) -> Self
    where
        E: TableEngine + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(MAILBOX);
        tokio::spawn(run(name.clone(), engine, store, rx));
        Self { name, tx }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    async fn request<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> Result<T, TableError> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(make(reply)).await.map_err(|_| TableError::Closed)?;
        rx.await.map_err(|_| TableError::Closed)
    }

    pub async fn seat(&self, id: impl Into<PlayerId>, stack: u64) -> Result<(), TableError> {
        let id = id.into();
        Ok(self.request(|reply| Command::Seat { id, stack, reply }).await??)
    }

    /// Seat `id` with whatever the table's store holds for it, creating the
    /// record on first sight.
    pub async fn join(&self, id: impl Into<PlayerId>) -> Result<(), TableError> {
        let id = id.into();
        self.request(|reply| Command::Join { id, reply }).await?
    }

    /// Stand up between rounds; returns the record the player leaves with.
    pub async fn leave(&self, id: impl Into<PlayerId>) -> Result<PlayerRecord, TableError> {
        let id = id.into();
        Ok(self.request(|reply| Command::Leave { id, reply }).await??)
    }

    pub async fn start_round(&self) -> Result<(), TableError> {
        Ok(self.request(|reply| Command::StartRound { reply }).await??)
    }

    pub async fn act(&self, id: impl Into<PlayerId>, action: Action) -> Result<(), TableError> {
        let id = id.into();
        Ok(self.request(|reply| Command::Act { id, action, reply }).await??)
    }

    pub async fn discard_and_draw(
        &self,
        id: impl Into<PlayerId>,
        indices: Vec<usize>,
    ) -> Result<(), TableError> {
        let id = id.into();
        Ok(self.request(|reply| Command::Discard { id, indices, reply }).await??)
    }

    pub async fn advance_turn(&self) -> Result<Turn, TableError> {
        Ok(self.request(|reply| Command::AdvanceTurn { reply }).await??)
    }

    pub async fn is_round_over(&self) -> Result<bool, TableError> {
        self.request(|reply| Command::IsRoundOver { reply }).await
    }

    pub async fn evaluate_showdown(&self) -> Result<Vec<Payout>, TableError> {
        Ok(self.request(|reply| Command::Showdown { reply }).await??)
    }

    pub async fn hole_cards(&self, id: impl Into<PlayerId>) -> Result<Vec<Card>, TableError> {
        let id = id.into();
        Ok(self.request(|reply| Command::HoleCards { id, reply }).await??)
    }

    pub async fn snapshot(&self) -> Result<TableSnapshot, TableError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }
}

async fn run<E>(
    name: String,
    mut engine: E,
    mut store: Option<Box<dyn PlayerStore + Send>>,
    mut rx: mpsc::Receiver<Command>,
) where
    E: TableEngine + Send + 'static,
{
    log::debug!("[table {name}] open");
    while let Some(cmd) = rx.recv().await {
        match cmd {
            Command::Seat { id, stack, reply } => {
                let _ = reply.send(logged(&name, engine.seat(id, stack)));
            }
            Command::Join { id, reply } => {
                let result = match store.as_deref_mut() {
                    Some(store) => {
                        logged(&name, engine.seat_from_store(store, id)).map_err(TableError::from)
                    }
                    None => Err(TableError::NoStore),
                };
                let _ = reply.send(result);
            }
            Command::Leave { id, reply } => {
                let result = engine.unseat(&id);
                if let (Ok(record), Some(store)) = (&result, store.as_deref_mut()) {
                    if let Err(e) = store.save(&id, *record) {
                        log::error!("[table {name}] failed to save {id}: {e}");
                    }
                }
                let _ = reply.send(logged(&name, result));
            }
            Command::StartRound { reply } => {
                let _ = reply.send(logged(&name, engine.start_round()));
            }
            Command::Act { id, action, reply } => {
                let _ = reply.send(logged(&name, engine.act(&id, action)));
            }
            Command::Discard { id, indices, reply } => {
                let _ = reply.send(logged(&name, engine.discard_and_draw(&id, &indices)));
            }
            Command::AdvanceTurn { reply } => {
                let _ = reply.send(logged(&name, engine.advance_turn()));
            }
            Command::IsRoundOver { reply } => {
                let _ = reply.send(engine.is_round_over());
            }
            Command::Showdown { reply } => {
                let result = engine.evaluate_showdown();
                if result.is_ok() {
                    if let Some(store) = store.as_deref_mut() {
                        if let Err(e) = engine.persist(store) {
                            log::error!("[table {name}] failed to persist players: {e}");
                        }
                    }
                }
                let _ = reply.send(logged(&name, result));
            }
            Command::HoleCards { id, reply } => {
                let _ = reply.send(engine.hole_cards(&id));
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(engine.snapshot());
            }
        }
    }
    log::debug!("[table {name}] closed");
}

fn logged<T>(name: &str, result: Result<T, GameError>) -> Result<T, GameError> {
    if let Err(e) = &result {
        log::warn!("[table {name}] rejected: {e}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::game::{Game, Stage};
    use crate::store::MemoryStore;
    use crate::variants::Variant;

    fn game() -> Game {
        Game::new(Variant::Holdem, TableConfig { seed: Some(3), ..TableConfig::default() })
    }

    #[tokio::test]
    async fn commands_apply_in_order() {
        let table = TableHandle::spawn("t1", game());
        table.seat("ann", 100).await.unwrap();
        table.seat("bob", 100).await.unwrap();
        table.start_round().await.unwrap();
        table.act("ann", Action::Call).await.unwrap();
        assert_eq!(table.advance_turn().await.unwrap(), Turn::Next(PlayerId::from("bob")));
        table.act("bob", Action::Check).await.unwrap();
        assert_eq!(table.advance_turn().await.unwrap(), Turn::Next(PlayerId::from("bob")));

        let snap = table.snapshot().await.unwrap();
        assert_eq!(snap.pot, 20);
        assert_eq!(snap.community.len(), 3);
        assert_eq!(table.hole_cards("ann").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn rejections_come_back_as_game_errors() {
        let table = TableHandle::spawn("t2", game());
        table.seat("ann", 100).await.unwrap();
        let err = table.seat("ann", 100).await.unwrap_err();
        assert_eq!(err, TableError::Game(GameError::AlreadySeated(PlayerId::from("ann"))));
        let err = table.start_round().await.unwrap_err();
        assert_eq!(err, TableError::Game(GameError::InvalidPlayerCount(1)));
    }

    #[tokio::test]
    async fn settled_rounds_are_written_to_the_store() {
        let store = MemoryStore::for_table(&TableConfig::default());
        let table = TableHandle::spawn_with_store("t3", game(), store);
        table.join("ann").await.unwrap();
        table.join("bob").await.unwrap();
        table.start_round().await.unwrap();
        table.act("ann", Action::Fold).await.unwrap();
        assert!(table.is_round_over().await.unwrap());
        let payouts = table.evaluate_showdown().await.unwrap();
        assert_eq!(payouts[0].amount, 15);
        assert_eq!(table.snapshot().await.unwrap().stage, Stage::Settled);

        // both leave, then come back and find their persisted records
        let bob = table.leave("bob").await.unwrap();
        assert_eq!(bob, PlayerRecord { stack: 1005, hands_won: 1 });
        table.leave("ann").await.unwrap();
        assert!(table.snapshot().await.unwrap().seats.is_empty());
        table.join("ann").await.unwrap();
        table.join("bob").await.unwrap();
        table.join("cat").await.unwrap();
        let seats: Vec<(String, u64, u32)> = table
            .snapshot()
            .await
            .unwrap()
            .seats
            .into_iter()
            .map(|s| (s.id.to_string(), s.stack, s.hands_won))
            .collect();
        assert_eq!(
            seats,
            vec![
                ("ann".to_string(), 995, 0),
                ("bob".to_string(), 1005, 1),
                ("cat".to_string(), 1000, 0),
            ]
        );
    }

    #[tokio::test]
    async fn joining_needs_a_store() {
        let table = TableHandle::spawn("t5", game());
        assert_eq!(table.join("ann").await.unwrap_err(), TableError::NoStore);
        table.seat("ann", 100).await.unwrap();
        let err = table.join("ann").await.unwrap_err();
        assert_eq!(err, TableError::NoStore);
        assert_eq!(table.leave("ann").await.unwrap().stack, 100);
        let err = table.leave("ann").await.unwrap_err();
        assert_eq!(err, TableError::Game(GameError::NotAPlayer(PlayerId::from("ann"))));
    }

    #[tokio::test]
    async fn concurrent_handles_share_one_table() {
        let table = TableHandle::spawn("t4", game());
        let seats: Vec<_> = (0..4)
            .map(|i| {
                let t = table.clone();
                tokio::spawn(async move { t.seat(format!("p{i}"), 50).await })
            })
            .collect();
        for s in seats {
            s.await.unwrap().unwrap();
        }
        assert_eq!(table.snapshot().await.unwrap().seats.len(), 4);
    }
}
