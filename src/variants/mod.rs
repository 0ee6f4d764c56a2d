//! Rule sets for the supported games.
//!
//! A [`Variant`] is plain data consumed by the shared round state machine in
//! [`crate::game`]: how many hole cards to deal, which forced bets to collect,
//! which betting streets exist and how a showdown hand is composed.

pub mod draw;
pub mod omaha;

use crate::cards::Card;
use crate::config::TableConfig;
use crate::error::GameError;
use crate::evaluator::{evaluate, HandRank};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Variant {
    Holdem,
    Omaha,
    FiveCardDraw,
}

/// One betting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    PreDraw,
    PostDraw,
}

impl Street {
    /// Community cards revealed when the street opens.
    pub const fn reveals(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::PreDraw | Street::PostDraw => 0,
        }
    }
}

/// Chips collected before any voluntary action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForcedBets {
    /// Posted by the two seats clockwise of the button; they count as street bets.
    Blinds { small: u64, big: u64 },
    /// Paid by every dealt-in player straight into the pot.
    Ante(u64),
}

/// Which cards may form the showdown hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandComposition {
    /// Best five of hole + community cards.
    AnyFive,
    /// Exactly two hole cards with exactly three community cards.
    TwoHoleThreeBoard,
}

const HOLDEM_STREETS: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];
const DRAW_STREETS: [Street; 2] = [Street::PreDraw, Street::PostDraw];

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Holdem, Variant::Omaha, Variant::FiveCardDraw];

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Holdem => "holdem",
            Variant::Omaha => "omaha",
            Variant::FiveCardDraw => "five card draw",
        }
    }

    pub const fn hole_cards(self) -> usize {
        match self {
            Variant::Holdem => 2,
            Variant::Omaha => 4,
            Variant::FiveCardDraw => 5,
        }
    }

    pub fn forced_bets(self, cfg: &TableConfig) -> ForcedBets {
        match self {
            Variant::Holdem | Variant::Omaha => {
                ForcedBets::Blinds { small: cfg.small_blind, big: cfg.big_blind }
            }
            Variant::FiveCardDraw => ForcedBets::Ante(cfg.ante),
        }
    }

    /// Betting streets in play order.
    pub fn streets(self) -> &'static [Street] {
        match self {
            Variant::Holdem | Variant::Omaha => &HOLDEM_STREETS,
            Variant::FiveCardDraw => &DRAW_STREETS,
        }
    }

    pub fn first_street(self) -> Street {
        self.streets()[0]
    }

    pub fn final_street(self) -> Street {
        let streets = self.streets();
        streets[streets.len() - 1]
    }

    pub fn next_street(self, street: Street) -> Option<Street> {
        let streets = self.streets();
        let pos = streets.iter().position(|&s| s == street)?;
        streets.get(pos + 1).copied()
    }

    /// True when a discard-and-draw stage sits between `street` and the next one.
    pub fn draws_after(self, street: Street) -> bool {
        matches!((self, street), (Variant::FiveCardDraw, Street::PreDraw))
    }

    pub const fn composition(self) -> HandComposition {
        match self {
            Variant::Omaha => HandComposition::TwoHoleThreeBoard,
            Variant::Holdem | Variant::FiveCardDraw => HandComposition::AnyFive,
        }
    }

    /// Best showdown hand for this variant.
    pub fn best_hand(self, hole: &[Card], community: &[Card]) -> Result<HandRank, GameError> {
        match self.composition() {
            HandComposition::AnyFive => {
                let cards: Vec<Card> = hole.iter().chain(community).copied().collect();
                evaluate(&cards)
            }
            HandComposition::TwoHoleThreeBoard => omaha::best_omaha_hand(hole, community),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VariantParseError {
    #[error("unknown game type '{0}' (supported: holdem, omaha, five card draw)")]
    Unknown(String),
}

impl FromStr for Variant {
    type Err = VariantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String =
            s.trim().to_ascii_lowercase().chars().filter(|c| !c.is_whitespace()).collect();
        match normalized.as_str() {
            "holdem" | "hold'em" | "texasholdem" => Ok(Variant::Holdem),
            "omaha" => Ok(Variant::Omaha),
            "fivecarddraw" | "draw" => Ok(Variant::FiveCardDraw),
            _ => Err(VariantParseError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::evaluator::Category;

    #[test]
    fn hole_card_counts() {
        assert_eq!(Variant::Holdem.hole_cards(), 2);
        assert_eq!(Variant::Omaha.hole_cards(), 4);
        assert_eq!(Variant::FiveCardDraw.hole_cards(), 5);
    }

    #[test]
    fn street_schedules() {
        assert_eq!(Variant::Holdem.next_street(Street::Preflop), Some(Street::Flop));
        assert_eq!(Variant::Omaha.next_street(Street::River), None);
        assert_eq!(Variant::FiveCardDraw.next_street(Street::PreDraw), Some(Street::PostDraw));
        assert_eq!(Variant::FiveCardDraw.final_street(), Street::PostDraw);
        assert!(Variant::FiveCardDraw.draws_after(Street::PreDraw));
        assert!(!Variant::Holdem.draws_after(Street::Preflop));
        let revealed: usize = Variant::Holdem.streets().iter().map(|s| s.reveals()).sum();
        assert_eq!(revealed, 5);
    }

    #[test]
    fn forced_bets_follow_config() {
        let cfg = TableConfig { ante: 7, ..TableConfig::default() };
        assert_eq!(Variant::FiveCardDraw.forced_bets(&cfg), ForcedBets::Ante(7));
        assert_eq!(
            Variant::Omaha.forced_bets(&cfg),
            ForcedBets::Blinds { small: 5, big: 10 }
        );
    }

    #[test]
    fn parses_game_types() {
        assert_eq!("Holdem".parse::<Variant>().unwrap(), Variant::Holdem);
        assert_eq!("five card draw".parse::<Variant>().unwrap(), Variant::FiveCardDraw);
        assert_eq!("fivecarddraw".parse::<Variant>().unwrap(), Variant::FiveCardDraw);
        assert!("stud".parse::<Variant>().is_err());
    }

    #[test]
    fn holdem_may_play_the_board() {
        let hole = parse_cards("2c 3d").unwrap();
        let board = parse_cards("As Ks Qs Js Ts").unwrap();
        let r = Variant::Holdem.best_hand(&hole, &board).unwrap();
        assert_eq!(r.category, Category::RoyalFlush);
    }

    #[test]
    fn omaha_may_not_play_the_board() {
        let hole = parse_cards("2c 3d 4h 8c").unwrap();
        let board = parse_cards("As Ks Qs Js Ts").unwrap();
        let r = Variant::Omaha.best_hand(&hole, &board).unwrap();
        assert_ne!(r.category, Category::RoyalFlush);
    }
}
