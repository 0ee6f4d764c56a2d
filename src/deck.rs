use crate::cards::{Card, Rank, Suit};
use crate::error::GameError;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashSet, VecDeque};

/// A standard 52-card deck held as an owning queue.
///
/// Cards are drawn from the front. Discards go to the back and sit behind the
/// undealt cards; they are never handed out again during the same round, so
/// `remaining()` only counts the undealt part.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
    undealt: usize,
}

impl Deck {
    /// ```
    /// use poker_table::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.remaining(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards: VecDeque<Card> = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
            .collect();
        let undealt = cards.len();
        Self { cards, undealt }
    }

    /// A full deck with `top` on top in the given order, followed by the rest
    /// of the 52 cards in standard order. Used to replay a known deal.
    pub fn stacked(top: &[Card]) -> Result<Self, GameError> {
        let mut seen = HashSet::with_capacity(top.len());
        for &c in top {
            if !seen.insert(c) {
                return Err(GameError::DuplicateCard(c));
            }
        }
        let rest = Self::standard().cards.into_iter().filter(|c| !seen.contains(c));
        let cards: VecDeque<Card> = top.iter().copied().chain(rest).collect();
        let undealt = cards.len();
        Ok(Self { cards, undealt })
    }

    /// Cards still available to deal.
    pub fn remaining(&self) -> usize {
        self.undealt
    }

    /// Cards physically held, including recycled discards at the bottom.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    /// Shuffle using the provided RNG implementing Rng. Resets the discard boundary.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
        self.undealt = self.cards.len();
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        if self.undealt == 0 {
            return None;
        }
        self.undealt -= 1;
        self.cards.pop_front()
    }

    /// Draw exactly `n` cards from the top, or nothing at all.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n > self.undealt {
            return Err(GameError::DeckExhausted { needed: n, available: self.undealt });
        }
        Ok((0..n).filter_map(|_| self.draw()).collect())
    }

    /// Return a discarded card to the bottom of the deck.
    pub fn put_bottom(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
