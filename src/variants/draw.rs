use crate::cards::Card;
use crate::deck::Deck;
use crate::error::GameError;

/// Check a discard request against a hand: every index in range, none repeated.
pub fn validate_discards(indices: &[usize], hand_len: usize) -> Result<(), GameError> {
    for (i, &index) in indices.iter().enumerate() {
        if index >= hand_len || indices[..i].contains(&index) {
            return Err(GameError::InvalidDiscard { index, hand_len });
        }
    }
    Ok(())
}

/// Replace the cards at `indices` with fresh cards from the top of the deck.
///
/// Replacements are drawn before the discards go to the bottom, so a player
/// can never be dealt back a card thrown away this round. On error neither
/// the hand nor the deck is touched. Returns the discarded cards.
pub fn exchange(
    hand: &mut [Card],
    deck: &mut Deck,
    indices: &[usize],
) -> Result<Vec<Card>, GameError> {
    validate_discards(indices, hand.len())?;
    let replacements = deck.draw_n(indices.len())?;
    let mut discarded = Vec::with_capacity(indices.len());
    for (&index, card) in indices.iter().zip(replacements) {
        discarded.push(std::mem::replace(&mut hand[index], card));
    }
    for &card in &discarded {
        deck.put_bottom(card);
    }
    Ok(discarded)
}
