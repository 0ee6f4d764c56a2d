use crate::cards::Card;
use crate::error::GameError;
use crate::evaluator::{evaluate, HandRank};

/// Evaluate an Omaha hand with the rule "use exactly 2 hole + 3 board cards".
///
/// Every pair of hole cards is tried against every triple of board cards and
/// the strongest five-card hand is kept.
///
/// ```
/// use poker_table::cards::parse_cards;
/// use poker_table::evaluator::Category;
/// use poker_table::variants::omaha::best_omaha_hand;
///
/// let hole = parse_cards("As Ks Qh Jh").unwrap();
/// let board = parse_cards("Tc 9d 3h 2s 4c").unwrap();
/// let rank = best_omaha_hand(&hole, &board).unwrap();
/// assert_eq!(rank.category, Category::HighCard);
/// ```
pub fn best_omaha_hand(hole: &[Card], board: &[Card]) -> Result<HandRank, GameError> {
    if hole.len() < 2 || board.len() < 3 {
        return Err(GameError::InsufficientCards(hole.len().min(2) + board.len().min(3)));
    }

    let mut best: Option<HandRank> = None;
    for i in 0..hole.len() - 1 {
        for j in (i + 1)..hole.len() {
            for a in 0..board.len() - 2 {
                for b in (a + 1)..board.len() - 1 {
                    for c in (b + 1)..board.len() {
                        let hand = [hole[i], hole[j], board[a], board[b], board[c]];
                        let rank = evaluate(&hand)?;
                        if best.as_ref().map_or(true, |cur| rank > *cur) {
                            best = Some(rank);
                        }
                    }
                }
            }
        }
    }
    best.ok_or_else(|| GameError::InvalidState("no omaha combination evaluated".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::evaluator::Category;

    #[test]
    fn must_use_two_hole_cards() {
        // board trips of kings plus a pair of deuces would be a full house in hold'em
        let board = parse_cards("Kc Kd Kh 2c 2d").unwrap();
        let a = parse_cards("As Qs 3c 4d").unwrap();
        let b = parse_cards("2h 2s Ac 9d").unwrap();

        let ra = best_omaha_hand(&a, &board).unwrap();
        let rb = best_omaha_hand(&b, &board).unwrap();
        assert_eq!(ra.category, Category::ThreeOfAKind);
        assert_eq!(rb.category, Category::FourOfAKind);
        assert!(rb > ra);
    }

    #[test]
    fn single_suited_hole_card_makes_no_flush() {
        let board = parse_cards("Ah 9h 6h 3h Kc").unwrap();
        let hole = parse_cards("Qh 8s 7d 2c").unwrap();
        let r = best_omaha_hand(&hole, &board).unwrap();
        assert_ne!(r.category, Category::Flush);
    }

    #[test]
    fn short_board_is_rejected() {
        let hole = parse_cards("As Ks Qh Jh").unwrap();
        let board = parse_cards("Tc 9d").unwrap();
        assert_eq!(best_omaha_hand(&hole, &board).unwrap_err(), GameError::InsufficientCards(4));
    }
}
