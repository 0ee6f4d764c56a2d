// Engine API boundary. Front ends (a chat bot, a web socket, the table actor)
// drive a round through this trait by player id without reaching into `Game`
// internals. It is implemented for the core `Game` type.

use crate::cards::Card;
use crate::error::GameError;
use crate::game::{Action, Game, Payout, Stage, Turn};
use crate::player::{PlayerId, PlayerStatus};
use crate::pot::SidePot;
use crate::store::{PlayerRecord, PlayerStore};
use crate::variants::Variant;
use serde::Serialize;

/// One seat as a front end may render it. Hole cards are left out; ask the
/// engine for them explicitly when they may be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub id: PlayerId,
    pub stack: u64,
    pub street_bet: u64,
    pub status: PlayerStatus,
    pub hands_won: u32,
}

/// Read-only copy of the public table state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub variant: Variant,
    pub stage: Stage,
    pub pot: u64,
    pub current_bet: u64,
    pub button: usize,
    pub to_act: Option<PlayerId>,
    pub community: Vec<Card>,
    pub seats: Vec<SeatView>,
    /// Tiers the pot would split into right now, main pot first.
    pub pots: Vec<SidePot>,
}

pub trait TableEngine {
    // Seating
    fn seat(&mut self, id: PlayerId, stack: u64) -> Result<(), GameError>;
    fn seat_from_store(
        &mut self,
        store: &mut dyn PlayerStore,
        id: PlayerId,
    ) -> Result<(), GameError>;
    /// Take a player off the table between rounds; returns what they leave with.
    fn unseat(&mut self, id: &PlayerId) -> Result<PlayerRecord, GameError>;
    fn persist(&self, store: &mut dyn PlayerStore) -> Result<(), GameError>;

    // Round lifecycle
    fn start_round(&mut self) -> Result<(), GameError>;
    fn advance_turn(&mut self) -> Result<Turn, GameError>;
    fn is_round_over(&self) -> bool;
    fn evaluate_showdown(&mut self) -> Result<Vec<Payout>, GameError>;

    // Player actions
    fn act(&mut self, id: &PlayerId, action: Action) -> Result<(), GameError>;
    fn discard_and_draw(&mut self, id: &PlayerId, indices: &[usize]) -> Result<(), GameError>;

    // Queries
    fn hole_cards(&self, id: &PlayerId) -> Result<Vec<Card>, GameError>;
    fn snapshot(&self) -> TableSnapshot;
}

impl TableEngine for Game {
    fn seat(&mut self, id: PlayerId, stack: u64) -> Result<(), GameError> {
        Game::seat(self, id, stack)
    }
    fn seat_from_store(
        &mut self,
        store: &mut dyn PlayerStore,
        id: PlayerId,
    ) -> Result<(), GameError> {
        Game::seat_from_store(self, store, id)
    }
    fn unseat(&mut self, id: &PlayerId) -> Result<PlayerRecord, GameError> {
        let p = Game::unseat(self, id)?;
        Ok(PlayerRecord { stack: p.stack(), hands_won: p.hands_won() })
    }
    fn persist(&self, store: &mut dyn PlayerStore) -> Result<(), GameError> {
        Game::persist(self, store)
    }

    fn start_round(&mut self) -> Result<(), GameError> {
        Game::start_round(self)
    }
    fn advance_turn(&mut self) -> Result<Turn, GameError> {
        Game::advance_turn(self)
    }
    fn is_round_over(&self) -> bool {
        Game::is_round_over(self)
    }
    fn evaluate_showdown(&mut self) -> Result<Vec<Payout>, GameError> {
        Game::evaluate_showdown(self)
    }

    fn act(&mut self, id: &PlayerId, action: Action) -> Result<(), GameError> {
        Game::act(self, id, action)
    }
    fn discard_and_draw(&mut self, id: &PlayerId, indices: &[usize]) -> Result<(), GameError> {
        Game::discard_and_draw(self, id, indices)
    }

    fn hole_cards(&self, id: &PlayerId) -> Result<Vec<Card>, GameError> {
        self.player(id).map(|p| p.hand().to_vec()).ok_or_else(|| GameError::NotAPlayer(id.clone()))
    }
    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            variant: self.variant(),
            stage: self.stage(),
            pot: self.pot(),
            current_bet: self.current_bet(),
            button: self.button(),
            to_act: self.current_player().cloned(),
            community: self.community().to_vec(),
            seats: self
                .players()
                .iter()
                .map(|p| SeatView {
                    id: p.id().clone(),
                    stack: p.stack(),
                    street_bet: p.street_bet(),
                    status: p.status(),
                    hands_won: p.hands_won(),
                })
                .collect(),
            pots: self.pot_breakdown(),
        }
    }
}
