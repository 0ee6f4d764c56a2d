//! Pot tiers and chip splitting.
//!
//! The running pot is a single number on the table; tiers are derived from
//! what each seat put in over the whole round only when it is time to pay.

use serde::{Deserialize, Serialize};

/// One seat's claim on the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stake {
    pub contributed: u64,
    /// Still holding cards (not folded, not sitting out).
    pub live: bool,
}

/// A slice of the pot and the seats that may win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePot {
    pub amount: u64,
    /// Seat indices, ascending.
    pub eligible: Vec<usize>,
}

/// Split the chips in `stakes` (indexed by seat) into tiers.
///
/// Tier ceilings are the distinct contributions of live seats, ascending.
/// Each tier collects `min(c, ceiling) - min(c, previous)` from every seat,
/// folded or not, and only live seats that reached the ceiling may win it.
/// Folded chips above the highest live ceiling land in the top tier. The
/// first entry is the main pot.
///
/// ```
/// use poker_table::pot::{side_pots, Stake};
///
/// let stakes = [
///     Stake { contributed: 50, live: true },
///     Stake { contributed: 100, live: true },
///     Stake { contributed: 100, live: true },
/// ];
/// let pots = side_pots(&stakes);
/// assert_eq!(pots[0].amount, 150);
/// assert_eq!(pots[0].eligible, vec![0, 1, 2]);
/// assert_eq!(pots[1].amount, 100);
/// assert_eq!(pots[1].eligible, vec![1, 2]);
/// ```
pub fn side_pots(stakes: &[Stake]) -> Vec<SidePot> {
    let mut levels: Vec<u64> =
        stakes.iter().filter(|s| s.live && s.contributed > 0).map(|s| s.contributed).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<SidePot> = Vec::with_capacity(levels.len());
    let mut prev = 0u64;
    for lvl in levels {
        let amount: u64 =
            stakes.iter().map(|s| s.contributed.min(lvl) - s.contributed.min(prev)).sum();
        let eligible: Vec<usize> = stakes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.live && s.contributed >= lvl)
            .map(|(i, _)| i)
            .collect();
        if amount > 0 {
            pots.push(SidePot { amount, eligible });
        }
        prev = lvl;
    }

    let total: u64 = stakes.iter().map(|s| s.contributed).sum();
    let tiered: u64 = pots.iter().map(|p| p.amount).sum();
    let leftover = total - tiered;
    if leftover > 0 {
        match pots.last_mut() {
            Some(top) => top.amount += leftover,
            None => pots.push(SidePot {
                amount: leftover,
                eligible: stakes
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.live)
                    .map(|(i, _)| i)
                    .collect(),
            }),
        }
    }
    pots
}

/// The part of the biggest live contribution nobody else matched, as
/// `(seat, chips)`. Those chips go straight back to the seat that put them in
/// and are not part of any tier.
///
/// ```
/// use poker_table::pot::{uncalled, Stake};
///
/// let stakes = [
///     Stake { contributed: 500, live: true },
///     Stake { contributed: 50, live: true },
/// ];
/// assert_eq!(uncalled(&stakes), Some((0, 450)));
/// ```
pub fn uncalled(stakes: &[Stake]) -> Option<(usize, u64)> {
    let (top, stake) = stakes.iter().enumerate().max_by_key(|(_, s)| s.contributed)?;
    let matched = stakes
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != top)
        .map(|(_, s)| s.contributed)
        .max()
        .unwrap_or(0);
    if !stake.live || stake.contributed <= matched {
        return None;
    }
    Some((top, stake.contributed - matched))
}

/// Divide `amount` evenly among `winners`, which must already be in payout
/// priority order; the odd chips go one each to the first winners.
pub fn split(amount: u64, winners: &[usize]) -> Vec<(usize, u64)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u64;
    let per = amount / n;
    let rem = (amount % n) as usize;
    winners.iter().enumerate().map(|(k, &seat)| (seat, per + u64::from(k < rem))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(c: u64) -> Stake {
        Stake { contributed: c, live: true }
    }

    fn folded(c: u64) -> Stake {
        Stake { contributed: c, live: false }
    }

    #[test]
    fn equal_contributions_make_one_pot() {
        let pots = side_pots(&[live(100), live(100), folded(40)]);
        assert_eq!(pots, vec![SidePot { amount: 240, eligible: vec![0, 1] }]);
    }

    #[test]
    fn three_levels_of_all_in() {
        let pots = side_pots(&[live(100), live(50), live(200)]);
        assert_eq!(pots.len(), 3);
        assert_eq!(pots[0], SidePot { amount: 150, eligible: vec![0, 1, 2] });
        assert_eq!(pots[1], SidePot { amount: 100, eligible: vec![0, 2] });
        assert_eq!(pots[2], SidePot { amount: 100, eligible: vec![2] });
    }

    #[test]
    fn folded_chips_feed_tiers_they_reached() {
        // folded seat put in 80: 30 into the main tier, 50 into the side tier
        let pots = side_pots(&[live(30), live(100), folded(80), live(100)]);
        assert_eq!(pots[0], SidePot { amount: 120, eligible: vec![0, 1, 3] });
        assert_eq!(pots[1], SidePot { amount: 190, eligible: vec![1, 3] });
    }

    #[test]
    fn folded_excess_goes_to_top_tier() {
        let pots = side_pots(&[live(30), folded(100)]);
        assert_eq!(pots, vec![SidePot { amount: 130, eligible: vec![0] }]);
    }

    #[test]
    fn tiers_conserve_chips() {
        let stakes = [live(7), folded(13), live(29), live(29), folded(2), live(1)];
        let total: u64 = stakes.iter().map(|s| s.contributed).sum();
        let pots = side_pots(&stakes);
        assert_eq!(pots.iter().map(|p| p.amount).sum::<u64>(), total);
    }

    #[test]
    fn unmatched_excess_is_uncalled() {
        assert_eq!(uncalled(&[live(500), live(50)]), Some((0, 450)));
        assert_eq!(uncalled(&[folded(5), live(10), folded(0)]), Some((1, 5)));
        // a folded raiser's excess stays in the pot
        assert_eq!(uncalled(&[live(30), folded(100)]), None);
        assert_eq!(uncalled(&[live(100), live(100), live(50)]), None);
        assert_eq!(uncalled(&[]), None);
    }

    #[test]
    fn split_gives_odd_chips_to_first_winners() {
        assert_eq!(split(10, &[2, 0, 1]), vec![(2, 4), (0, 3), (1, 3)]);
        assert_eq!(split(9, &[4, 1]), vec![(4, 5), (1, 4)]);
        assert!(split(5, &[]).is_empty());
    }
}
