use crate::cards::Card;
use crate::error::GameError;
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Poker hand category from weakest to strongest. The discriminant is the
/// category value (1 = high card .. 10 = royal flush).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 1,
    Pair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Comparable hand strength. Ordering is by category, then tiebreaker rank
/// values element-wise, most significant first. Equal values are an exact tie.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    pub tiebreakers: Vec<u8>,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreakers)
    }
}

/// Rank counts and bitmasks for one set of cards. Bit `v` of a mask is set
/// when a card of rank value `v` is present.
struct Tally {
    counts: [u8; 15],
    by_suit: [u16; 4],
    mask: u16,
    values_desc: Vec<u8>,
}

impl Tally {
    fn new(cards: &[Card]) -> Self {
        let mut counts = [0u8; 15];
        let mut by_suit = [0u16; 4];
        let mut mask = 0u16;
        for c in cards {
            let v = c.rank().value();
            counts[v as usize] += 1;
            by_suit[c.suit() as usize] |= 1 << v;
            mask |= 1 << v;
        }
        let mut values_desc: Vec<u8> = cards.iter().map(|c| c.rank().value()).collect();
        values_desc.sort_unstable_by(|a, b| b.cmp(a));
        Self { counts, by_suit, mask, values_desc }
    }

    /// Highest rank value with at least `n` copies, skipping `except`.
    fn highest_with(&self, n: u8, except: &[u8]) -> Option<u8> {
        (2..=14u8).rev().find(|&v| self.counts[v as usize] >= n && !except.contains(&v))
    }

    /// Best `n` card values not in `exclude`, descending.
    fn kickers(&self, exclude: &[u8], n: usize) -> Vec<u8> {
        self.values_desc.iter().copied().filter(|v| !exclude.contains(v)).take(n).collect()
    }
}

/// Top card of the highest 5-rank run in `mask`. The Ace also counts as 1,
/// so A-2-3-4-5 is reported as a 5-high straight.
fn straight_top(mask: u16) -> Option<u8> {
    let mask = if mask & (1 << 14) != 0 { mask | (1 << 1) } else { mask };
    (5..=14u8).rev().find(|&top| {
        let window = 0b1_1111u16 << (top - 4);
        mask & window == window
    })
}

fn straight_flush_top(t: &Tally) -> Option<u8> {
    t.by_suit.iter().filter_map(|&m| straight_top(m)).max()
}

fn royal_flush(t: &Tally) -> Option<Vec<u8>> {
    straight_flush_top(t).filter(|&top| top == 14).map(|top| vec![top])
}

fn straight_flush(t: &Tally) -> Option<Vec<u8>> {
    straight_flush_top(t).map(|top| vec![top])
}

fn four_of_a_kind(t: &Tally) -> Option<Vec<u8>> {
    let quad = t.highest_with(4, &[])?;
    let mut out = vec![quad];
    out.extend(t.kickers(&[quad], 1));
    Some(out)
}

fn full_house(t: &Tally) -> Option<Vec<u8>> {
    let trips = t.highest_with(3, &[])?;
    let pair = t.highest_with(2, &[trips])?;
    Some(vec![trips, pair])
}

fn flush(t: &Tally) -> Option<Vec<u8>> {
    t.by_suit
        .iter()
        .filter(|m| m.count_ones() >= 5)
        .map(|&m| (2..=14u8).rev().filter(|&v| m & (1 << v) != 0).take(5).collect::<Vec<u8>>())
        .max()
}

fn straight(t: &Tally) -> Option<Vec<u8>> {
    straight_top(t.mask).map(|top| vec![top])
}

fn three_of_a_kind(t: &Tally) -> Option<Vec<u8>> {
    let trips = t.highest_with(3, &[])?;
    let mut out = vec![trips];
    out.extend(t.kickers(&[trips], 2));
    Some(out)
}

fn two_pair(t: &Tally) -> Option<Vec<u8>> {
    let high = t.highest_with(2, &[])?;
    let low = t.highest_with(2, &[high])?;
    let mut out = vec![high, low];
    out.extend(t.kickers(&[high, low], 1));
    Some(out)
}

fn one_pair(t: &Tally) -> Option<Vec<u8>> {
    let pair = t.highest_with(2, &[])?;
    let mut out = vec![pair];
    out.extend(t.kickers(&[pair], 3));
    Some(out)
}

fn high_card(t: &Tally) -> Option<Vec<u8>> {
    Some(t.kickers(&[], 5))
}

type CategoryTest = fn(&Tally) -> Option<Vec<u8>>;

/// Category tests in strictly descending strength; the first match wins.
const CATEGORY_TESTS: [(Category, CategoryTest); 10] = [
    (Category::RoyalFlush, royal_flush),
    (Category::StraightFlush, straight_flush),
    (Category::FourOfAKind, four_of_a_kind),
    (Category::FullHouse, full_house),
    (Category::Flush, flush),
    (Category::Straight, straight),
    (Category::ThreeOfAKind, three_of_a_kind),
    (Category::TwoPair, two_pair),
    (Category::Pair, one_pair),
    (Category::HighCard, high_card),
];

/// Evaluate the best five-card hand contained in 5 to 7 distinct cards.
///
/// ```
/// use poker_table::cards::parse_cards;
/// use poker_table::evaluator::{evaluate, Category};
///
/// let cards = parse_cards("As Ah Qc Jd 9h 3s 2c").unwrap();
/// let rank = evaluate(&cards).unwrap();
/// assert_eq!(rank.category, Category::Pair);
/// assert_eq!(rank.tiebreakers, vec![14, 12, 11, 9]);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandRank, GameError> {
    if cards.len() < 5 {
        return Err(GameError::InsufficientCards(cards.len()));
    }
    if cards.len() > 7 {
        return Err(GameError::TooManyCards(cards.len()));
    }
    for (i, c) in cards.iter().enumerate() {
        if cards[..i].contains(c) {
            return Err(GameError::DuplicateCard(*c));
        }
    }
    let tally = Tally::new(cards);
    CATEGORY_TESTS
        .iter()
        .find_map(|(category, test)| {
            test(&tally).map(|tiebreakers| HandRank { category: *category, tiebreakers })
        })
        .ok_or_else(|| GameError::InvalidState("no hand category matched".into()))
}

/// Compare two card sets by their best hand.
pub fn compare(a: &[Card], b: &[Card]) -> Result<Ordering, GameError> {
    Ok(evaluate(a)?.cmp(&evaluate(b)?))
}
