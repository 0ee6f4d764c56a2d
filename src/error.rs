use crate::game::Stage;
use crate::player::PlayerId;

/// Every way an engine operation can be rejected.
///
/// Rejections are values, never panics, and a rejected action leaves the
/// round exactly as it was.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("insufficient funds: stack {stack}, requested {requested}")]
    InsufficientFunds { stack: u64, requested: u64 },
    #[error("bet below current bet: must put in at least {owed}, got {got}")]
    BelowCurrentBet { owed: u64, got: u64 },
    #[error("cannot check, must call {owed} or raise")]
    MustActOnBet { owed: u64 },
    #[error("{0} is not seated at this table")]
    NotAPlayer(PlayerId),
    #[error("not {got}'s turn (waiting on {expected})")]
    OutOfTurn { expected: PlayerId, got: PlayerId },
    #[error("{0} already acted on this turn")]
    AlreadyActed(PlayerId),
    #[error("{action} is not allowed during {stage:?}")]
    InvalidStageAction { stage: Stage, action: &'static str },
    #[error("not enough cards to evaluate: need 5, got {0}")]
    InsufficientCards(usize),
    #[error("too many cards to evaluate: at most 7, got {0}")]
    TooManyCards(usize),
    #[error("duplicate card {0}")]
    DuplicateCard(crate::cards::Card),
    #[error("invalid player count: {0}")]
    InvalidPlayerCount(usize),
    #[error("invalid discard index {index} for a hand of {hand_len}")]
    InvalidDiscard { index: usize, hand_len: usize },
    #[error("deck exhausted: needed {needed}, {available} left")]
    DeckExhausted { needed: usize, available: usize },
    #[error("table is full ({max} seats)")]
    TableFull { max: usize },
    #[error("{0} is already seated")]
    AlreadySeated(PlayerId),
    #[error("invalid game state: {0}")]
    InvalidState(String),
    #[error("player store: {0}")]
    Store(String),
}
