use crate::cards::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, caller-supplied identity of a seated player (a nick, an account
/// id, ...). The engine only compares it for equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerStatus {
    /// Seated with no chips; not dealt in this round.
    SittingOut,
    Active,
    Folded,
    AllIn,
}

/// A seated player. Money fields only change through `Game` actions.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) stack: u64,
    pub(crate) hand: Vec<Card>,
    pub(crate) street_bet: u64,
    pub(crate) contributed: u64,
    pub(crate) status: PlayerStatus,
    pub(crate) hands_won: u32,
    #[serde(skip)]
    pub(crate) acted: bool,
    #[serde(skip)]
    pub(crate) drawn: bool,
}

impl Player {
    pub(crate) fn new(id: PlayerId, stack: u64, hands_won: u32) -> Self {
        Self {
            id,
            stack,
            hand: Vec::new(),
            street_bet: 0,
            contributed: 0,
            status: PlayerStatus::Active,
            hands_won,
            acted: false,
            drawn: false,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Chips behind, not yet in the pot.
    pub fn stack(&self) -> u64 {
        self.stack
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Chips put in during the current street.
    pub fn street_bet(&self) -> u64 {
        self.street_bet
    }

    /// Chips put in during the whole round.
    pub fn contributed(&self) -> u64 {
        self.contributed
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn hands_won(&self) -> u32 {
        self.hands_won
    }

    /// Folded or sitting out: no claim on any pot.
    pub fn is_folded(&self) -> bool {
        matches!(self.status, PlayerStatus::Folded | PlayerStatus::SittingOut)
    }

    /// Still able to bet on this street.
    pub fn can_act(&self) -> bool {
        matches!(self.status, PlayerStatus::Active)
    }

    pub(crate) fn reset_for_round(&mut self) {
        self.hand.clear();
        self.street_bet = 0;
        self.contributed = 0;
        self.acted = false;
        self.drawn = false;
        self.status =
            if self.stack == 0 { PlayerStatus::SittingOut } else { PlayerStatus::Active };
    }

    /// Move up to `amount` chips from the stack into the pot; returns what was paid.
    pub(crate) fn commit(&mut self, amount: u64) -> u64 {
        let pay = self.stack.min(amount);
        self.stack -= pay;
        self.street_bet += pay;
        self.contributed += pay;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        pay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_caps_at_stack_and_marks_all_in() {
        let mut p = Player::new("ann".into(), 30, 0);
        assert_eq!(p.commit(50), 30);
        assert_eq!(p.stack(), 0);
        assert_eq!(p.street_bet(), 30);
        assert_eq!(p.contributed(), 30);
        assert_eq!(p.status(), PlayerStatus::AllIn);
    }

    #[test]
    fn broke_players_sit_out_next_round() {
        let mut p = Player::new("bob".into(), 0, 3);
        p.reset_for_round();
        assert_eq!(p.status(), PlayerStatus::SittingOut);
        assert!(p.is_folded());
        assert!(!p.can_act());
        assert_eq!(p.hands_won(), 3);
    }
}
