//! poker-table: a multi-variant poker round engine
//!
//! Goals:
//! - One round state machine for Texas Hold'em, Omaha and five-card draw
//! - Exact chip accounting, including side pots for every all-in level
//! - No panics for invalid input; every rejected action is a [`GameError`]
//!   and leaves the table untouched
//!
//! ## Quick start: play a hand of Hold'em
//! ```
//! use poker_table::config::TableConfig;
//! use poker_table::game::{Game, Stage, Turn};
//! use poker_table::player::PlayerId;
//! use poker_table::variants::Variant;
//!
//! let mut game = Game::new(Variant::Holdem, TableConfig::default());
//! game.seat("ann", 1000).unwrap();
//! game.seat("bob", 1000).unwrap();
//! game.start_round().unwrap();
//! assert_eq!(game.pot(), 15);
//!
//! // heads-up, the button posts the small blind and acts first
//! let ann = PlayerId::from("ann");
//! game.fold(&ann).unwrap();
//! assert_eq!(game.advance_turn().unwrap(), Turn::RoundEnded);
//!
//! let payouts = game.evaluate_showdown().unwrap();
//! assert_eq!(payouts[0].player, PlayerId::from("bob"));
//! assert_eq!(payouts[0].amount, 15);
//! assert_eq!(game.stage(), Stage::Settled);
//! ```
//!
//! ## Evaluate a hand
//! ```
//! use poker_table::cards::parse_cards;
//! use poker_table::evaluator::{evaluate, Category};
//!
//! let cards = parse_cards("As Ah Kc Qd Jh 3s 2c").unwrap();
//! assert_eq!(evaluate(&cards).unwrap().category, Category::Pair);
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod player;
pub mod pot;
pub mod store;
pub mod table;
pub mod variants;

pub use error::GameError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
