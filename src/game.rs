//! The round state machine shared by every variant.
//!
//! A [`Game`] owns the seats, the deck, the pot and the betting cursor. Money
//! only moves through its actions, and a rejected action leaves the round
//! exactly as it was. Actions never move the cursor: once the current player
//! has acted, the caller asks for the next one with [`Game::advance_turn`].

use crate::cards::Card;
use crate::config::{TableConfig, MAX_SEATS};
use crate::deck::Deck;
use crate::error::GameError;
use crate::evaluator::HandRank;
use crate::player::{Player, PlayerId, PlayerStatus};
use crate::pot::{self, SidePot, Stake};
use crate::store::{PlayerRecord, PlayerStore};
use crate::variants::{draw, ForcedBets, Street, Variant};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// No round has been started at this table yet.
    AwaitingPlayers,
    /// Hole cards going out and forced bets being collected.
    Dealt,
    Betting(Street),
    /// Discard-and-draw between the two draw-poker betting streets.
    Draw,
    /// Round over, pot not yet paid.
    Showdown,
    /// Pot paid; a new round may start.
    Settled,
}

/// Where the betting cursor landed after [`Game::advance_turn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Next(PlayerId),
    RoundEnded,
}

/// A betting decision, for callers that dispatch on a parsed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Put exactly this many chips in.
    Bet(u64),
    Call,
    /// Call, then put this many more chips in.
    Raise(u64),
    Check,
    Fold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum HandHistoryVerb {
    Ante,
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
    Draw,
    Win,
    Split,
    /// Uncalled chips handed back at showdown.
    Returned,
}

impl HandHistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HandHistoryVerb::Ante => "Ante",
            HandHistoryVerb::SmallBlind => "SB",
            HandHistoryVerb::BigBlind => "BB",
            HandHistoryVerb::Fold => "Fold",
            HandHistoryVerb::Check => "Check",
            HandHistoryVerb::Call => "Call",
            HandHistoryVerb::Bet => "Bet",
            HandHistoryVerb::Raise => "Raise",
            HandHistoryVerb::AllIn => "All-in",
            HandHistoryVerb::Draw => "Draw",
            HandHistoryVerb::Win => "Win",
            HandHistoryVerb::Split => "Split",
            HandHistoryVerb::Returned => "Returned",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct HandHistoryEntry {
    pub player: PlayerId,
    pub verb: HandHistoryVerb,
    /// Chips moved, or cards exchanged for [`HandHistoryVerb::Draw`].
    pub amount: Option<u64>,
    pub stage: Stage,
}

/// Chips awarded to one player at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payout {
    pub player: PlayerId,
    pub amount: u64,
    /// `None` when everyone else folded and no hand was shown, or when the
    /// player won nothing and only gets uncalled chips back.
    pub hand: Option<HandRank>,
}

/// Seats clockwise after `from`, ending with `from` itself.
fn clockwise(from: usize, n: usize) -> impl Iterator<Item = usize> {
    (1..=n).map(move |k| (from + k) % n)
}

/// Still has a decision to make on this street.
fn owes_action(p: &Player, current_bet: u64) -> bool {
    p.can_act() && (!p.acted || p.street_bet < current_bet)
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Game {
    pub(crate) variant: Variant,
    pub(crate) config: TableConfig,
    pub(crate) rng: ChaCha8Rng,

    pub(crate) deck: Deck,
    pub(crate) players: Vec<Player>,
    pub(crate) community: Vec<Card>,
    pub(crate) pot: u64,
    pub(crate) current_bet: u64,
    pub(crate) turn: usize,
    pub(crate) stage: Stage,
    pub(crate) button: usize,
    pub(crate) rounds_started: u64,
    /// Tiers paid at the last showdown.
    pub(crate) side_pots: Vec<SidePot>,
    history: Vec<HandHistoryEntry>,
}

impl Game {
    pub fn new(variant: Variant, config: TableConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            variant,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            deck: Deck::standard(),
            players: Vec::new(),
            community: Vec::new(),
            pot: 0,
            current_bet: 0,
            turn: 0,
            stage: Stage::AwaitingPlayers,
            button: 0,
            rounds_started: 0,
            side_pots: Vec::new(),
            history: Vec::new(),
        }
    }

    // ---- seating -------------------------------------------------------

    pub fn seat(&mut self, id: impl Into<PlayerId>, stack: u64) -> Result<(), GameError> {
        let id = id.into();
        self.ensure_can_seat(&id)?;
        self.seat_player(Player::new(id, stack, 0));
        Ok(())
    }

    /// Seat an identity with the stack and win count the store has for it.
    /// Nothing is loaded when the seat would be refused.
    pub fn seat_from_store<S>(
        &mut self,
        store: &mut S,
        id: impl Into<PlayerId>,
    ) -> Result<(), GameError>
    where
        S: PlayerStore + ?Sized,
    {
        let id = id.into();
        self.ensure_can_seat(&id)?;
        let record = store.load_or_create(&id)?;
        self.seat_player(Player::new(id, record.stack, record.hands_won));
        Ok(())
    }

    fn ensure_can_seat(&self, id: &PlayerId) -> Result<(), GameError> {
        self.ensure_between_rounds("seat")?;
        if self.players.iter().any(|p| &p.id == id) {
            return Err(GameError::AlreadySeated(id.clone()));
        }
        let max = self.config.max_seats.min(MAX_SEATS);
        if self.players.len() >= max {
            return Err(GameError::TableFull { max });
        }
        Ok(())
    }

    fn seat_player(&mut self, player: Player) {
        log::info!("{} sits down with {}", player.id, player.stack);
        self.players.push(player);
    }

    pub fn unseat(&mut self, id: &PlayerId) -> Result<Player, GameError> {
        self.ensure_between_rounds("unseat")?;
        let seat = self.seat_of(id)?;
        let player = self.players.remove(seat);
        // keep the button on the seat before the gap so it advances onto the next player
        if seat < self.button || (seat == self.button && self.rounds_started > 0) {
            self.button =
                self.button.checked_sub(1).unwrap_or(self.players.len().saturating_sub(1));
        }
        if self.button >= self.players.len() {
            self.button = 0;
        }
        self.turn = self.button;
        log::info!("{} leaves with {}", player.id, player.stack);
        Ok(player)
    }

    /// Write every seated player's stack and win count back to the store.
    pub fn persist<S>(&self, store: &mut S) -> Result<(), GameError>
    where
        S: PlayerStore + ?Sized,
    {
        self.ensure_between_rounds("persist")?;
        for p in &self.players {
            store.save(&p.id, PlayerRecord { stack: p.stack, hands_won: p.hands_won })?;
        }
        Ok(())
    }

    // ---- round setup ---------------------------------------------------

    /// Shuffle a fresh deck, move the button, deal and collect forced bets.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        let funded = self.ensure_can_start()?;
        let mut deck = Deck::standard();
        deck.shuffle_with(&mut self.rng);
        self.begin_round(deck, funded)
    }

    /// Like [`Game::start_round`] but deals from `deck` as given.
    pub fn start_round_with_deck(&mut self, deck: Deck) -> Result<(), GameError> {
        let funded = self.ensure_can_start()?;
        self.begin_round(deck, funded)
    }

    fn ensure_can_start(&self) -> Result<usize, GameError> {
        self.ensure_between_rounds("start round")?;
        let funded = self.players.iter().filter(|p| p.stack > 0).count();
        if funded < 2 {
            return Err(GameError::InvalidPlayerCount(funded));
        }
        Ok(funded)
    }

    fn begin_round(&mut self, deck: Deck, funded: usize) -> Result<(), GameError> {
        let needed = funded * self.variant.hole_cards();
        if deck.remaining() < needed {
            return Err(GameError::DeckExhausted { needed, available: deck.remaining() });
        }

        for p in &mut self.players {
            p.reset_for_round();
        }
        let button = if self.rounds_started == 0 {
            let n = self.players.len();
            let from = (self.button + n - 1) % n;
            self.next_seat_after(from, Player::can_act)
        } else {
            self.next_seat_after(self.button, Player::can_act)
        };
        self.button =
            button.ok_or_else(|| GameError::InvalidState("no funded seat for the button".into()))?;
        self.rounds_started += 1;

        self.deck = deck;
        self.community.clear();
        self.pot = 0;
        self.current_bet = 0;
        self.side_pots.clear();
        self.history.clear();
        self.stage = Stage::Dealt;

        self.deal_hole_cards()?;
        self.post_forced_bets()?;
        self.stage = Stage::Betting(self.variant.first_street());
        log::info!(
            "round {} of {}: {} dealt in, button {}, pot {}",
            self.rounds_started,
            self.variant,
            funded,
            self.players[self.button].id,
            self.pot
        );

        if self.street_complete() {
            self.close_street()?;
        }
        Ok(())
    }

    fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        let order: Vec<usize> = clockwise(self.button, self.players.len())
            .filter(|&i| self.players[i].can_act())
            .collect();
        for _ in 0..self.variant.hole_cards() {
            for &i in &order {
                let card = self
                    .deck
                    .draw()
                    .ok_or(GameError::DeckExhausted { needed: 1, available: 0 })?;
                self.players[i].hand.push(card);
            }
        }
        Ok(())
    }

    fn post_forced_bets(&mut self) -> Result<(), GameError> {
        match self.variant.forced_bets(&self.config) {
            ForcedBets::Blinds { small, big } => {
                let dealt = self.players.iter().filter(|p| p.can_act()).count();
                let sb = if dealt == 2 { Some(self.button) } else { self.next_active(self.button) };
                let sb = sb.ok_or_else(|| GameError::InvalidState("no small blind".into()))?;
                let bb = self
                    .next_active(sb)
                    .ok_or_else(|| GameError::InvalidState("no big blind".into()))?;
                self.post(sb, small, HandHistoryVerb::SmallBlind);
                self.post(bb, big, HandHistoryVerb::BigBlind);
                self.current_bet = self.players[sb].street_bet.max(self.players[bb].street_bet);
                self.turn = self.next_to_act(bb).unwrap_or(bb);
            }
            ForcedBets::Ante(ante) => {
                for i in clockwise(self.button, self.players.len()) {
                    if self.players[i].can_act() {
                        let paid = self.post(i, ante, HandHistoryVerb::Ante);
                        // antes go straight to the pot, not to the street
                        self.players[i].street_bet -= paid;
                    }
                }
                self.current_bet = 0;
                self.turn = self.next_to_act(self.button).unwrap_or(self.button);
            }
        }
        Ok(())
    }

    // ---- betting -------------------------------------------------------

    pub fn act(&mut self, id: &PlayerId, action: Action) -> Result<(), GameError> {
        match action {
            Action::Bet(amount) => self.bet(id, amount),
            Action::Call => self.call(id),
            Action::Raise(increment) => self.raise(id, increment),
            Action::Check => self.check(id),
            Action::Fold => self.fold(id),
        }
    }

    /// Put exactly `amount` chips in. Short of the amount owed is only
    /// allowed when it is the whole stack.
    pub fn bet(&mut self, id: &PlayerId, amount: u64) -> Result<(), GameError> {
        let seat = self.turn_seat(id, "bet", false)?;
        self.wager(seat, amount)
    }

    /// Match the current bet, or go all-in for less.
    pub fn call(&mut self, id: &PlayerId) -> Result<(), GameError> {
        let seat = self.turn_seat(id, "call", false)?;
        let amount = self.owed(seat).min(self.players[seat].stack);
        self.wager(seat, amount)
    }

    /// Match the current bet and put `increment` more on top.
    pub fn raise(&mut self, id: &PlayerId, increment: u64) -> Result<(), GameError> {
        let seat = self.turn_seat(id, "raise", false)?;
        let stack = self.players[seat].stack;
        let amount = self
            .owed(seat)
            .checked_add(increment)
            .ok_or(GameError::InsufficientFunds { stack, requested: u64::MAX })?;
        self.wager(seat, amount)
    }

    pub fn check(&mut self, id: &PlayerId) -> Result<(), GameError> {
        let seat = self.turn_seat(id, "check", false)?;
        let owed = self.owed(seat);
        if owed > 0 {
            return Err(GameError::MustActOnBet { owed });
        }
        self.players[seat].acted = true;
        self.record(seat, HandHistoryVerb::Check, None);
        log::debug!("{id} checks");
        Ok(())
    }

    /// Give up the hand. Chips already committed stay in the pot. Also
    /// accepted during the draw stage.
    pub fn fold(&mut self, id: &PlayerId) -> Result<(), GameError> {
        let seat = self.turn_seat(id, "fold", true)?;
        let p = &mut self.players[seat];
        p.status = PlayerStatus::Folded;
        p.acted = true;
        p.drawn = true;
        self.record(seat, HandHistoryVerb::Fold, None);
        log::debug!("{id} folds");
        Ok(())
    }

    fn wager(&mut self, seat: usize, amount: u64) -> Result<(), GameError> {
        let owed = self.owed(seat);
        let stack = self.players[seat].stack;
        if amount > stack {
            return Err(GameError::InsufficientFunds { stack, requested: amount });
        }
        if amount < owed && amount < stack {
            return Err(GameError::BelowCurrentBet { owed, got: amount });
        }

        let verb = if amount == 0 {
            HandHistoryVerb::Check
        } else if amount == stack {
            HandHistoryVerb::AllIn
        } else if amount == owed {
            HandHistoryVerb::Call
        } else if self.current_bet == 0 {
            HandHistoryVerb::Bet
        } else {
            HandHistoryVerb::Raise
        };
        let paid = self.post(seat, amount, verb);
        self.players[seat].acted = true;

        let street_bet = self.players[seat].street_bet;
        if street_bet > self.current_bet {
            self.current_bet = street_bet;
            // a raise reopens the action for everyone who can still bet
            for (i, p) in self.players.iter_mut().enumerate() {
                if i != seat && p.can_act() {
                    p.acted = false;
                }
            }
        }
        log::debug!(
            "{} {} {} (street bet {}, pot {})",
            self.players[seat].id,
            verb.label(),
            paid,
            street_bet,
            self.pot
        );
        Ok(())
    }

    /// Move chips from a seat into the pot and log it; returns what was paid.
    fn post(&mut self, seat: usize, amount: u64, verb: HandHistoryVerb) -> u64 {
        let paid = self.players[seat].commit(amount);
        self.pot += paid;
        self.record(seat, verb, Some(paid));
        paid
    }

    // ---- draw ----------------------------------------------------------

    /// Exchange the cards at `indices` for fresh ones; an empty slice stands pat.
    pub fn discard_and_draw(&mut self, id: &PlayerId, indices: &[usize]) -> Result<(), GameError> {
        if self.stage != Stage::Draw {
            self.seat_of(id)?;
            return Err(GameError::InvalidStageAction { stage: self.stage, action: "discard" });
        }
        let seat = self.turn_seat(id, "discard", true)?;
        let thrown = draw::exchange(&mut self.players[seat].hand, &mut self.deck, indices)?;
        self.players[seat].drawn = true;
        self.record(seat, HandHistoryVerb::Draw, Some(thrown.len() as u64));
        log::debug!("{id} draws {}", thrown.len());
        Ok(())
    }

    // ---- turn and street flow ------------------------------------------

    /// Move the cursor to the next player who owes a decision, closing the
    /// street (and revealing cards, or opening the draw) when nobody does.
    pub fn advance_turn(&mut self) -> Result<Turn, GameError> {
        match self.stage {
            Stage::Betting(_) | Stage::Draw => {}
            Stage::Showdown => return Ok(Turn::RoundEnded),
            stage => return Err(GameError::InvalidStageAction { stage, action: "advance turn" }),
        }
        if self.turn >= self.players.len() {
            return Err(self.bad_turn());
        }
        if self.live_count() <= 1 {
            self.stage = Stage::Showdown;
            log::debug!("everyone else folded");
            return Ok(Turn::RoundEnded);
        }

        if self.stage == Stage::Draw {
            match self.next_seat_after(self.turn, |p| !p.is_folded() && !p.drawn) {
                Some(seat) => self.turn = seat,
                None => self.close_draw()?,
            }
        } else if self.street_complete() {
            self.close_street()?;
        } else {
            let bet = self.current_bet;
            self.turn = self
                .next_seat_after(self.turn, |p| owes_action(p, bet))
                .ok_or_else(|| self.bad_turn())?;
        }

        Ok(match self.stage {
            Stage::Showdown => Turn::RoundEnded,
            _ => Turn::Next(self.players[self.turn].id.clone()),
        })
    }

    /// Nobody left who owes a decision on this street.
    fn street_complete(&self) -> bool {
        let mut actionable = self.players.iter().filter(|p| p.can_act());
        match (actionable.next(), actionable.next()) {
            (None, _) => true,
            // everyone else is all-in: nothing left to bet against
            (Some(last), None) => last.street_bet >= self.current_bet,
            _ => !self.players.iter().any(|p| owes_action(p, self.current_bet)),
        }
    }

    /// Close the current street and open whatever follows, running straight
    /// through streets where nobody can bet.
    fn close_street(&mut self) -> Result<(), GameError> {
        while let Stage::Betting(street) = self.stage {
            if self.variant.draws_after(street) {
                self.open_draw();
                break;
            }
            match self.variant.next_street(street) {
                Some(next) => {
                    self.open_street(next)?;
                    if !self.street_complete() {
                        break;
                    }
                }
                None => {
                    self.stage = Stage::Showdown;
                    log::debug!("betting closed, showdown");
                }
            }
        }
        Ok(())
    }

    fn open_street(&mut self, street: Street) -> Result<(), GameError> {
        let cards = self.deck.draw_n(street.reveals())?;
        self.community.extend(cards);
        self.reset_street();
        self.stage = Stage::Betting(street);
        self.turn = self
            .next_to_act(self.button)
            .or_else(|| self.next_seat_after(self.button, |p| !p.is_folded()))
            .unwrap_or(self.button);
        log::debug!(
            "{street:?} opens, board [{}]",
            self.community.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
        );
        Ok(())
    }

    fn open_draw(&mut self) {
        self.reset_street();
        for p in &mut self.players {
            p.drawn = p.is_folded();
        }
        self.stage = Stage::Draw;
        self.turn = self.next_seat_after(self.button, |p| !p.is_folded()).unwrap_or(self.button);
        log::debug!("draw opens");
    }

    fn close_draw(&mut self) -> Result<(), GameError> {
        let next = self
            .variant
            .streets()
            .iter()
            .copied()
            .find(|&s| self.variant.draws_after(s))
            .and_then(|s| self.variant.next_street(s))
            .ok_or_else(|| {
                GameError::InvalidState(format!("{} has no street after the draw", self.variant))
            })?;
        self.open_street(next)?;
        if self.street_complete() {
            self.close_street()?;
        }
        Ok(())
    }

    fn reset_street(&mut self) {
        for p in &mut self.players {
            p.street_bet = 0;
            p.acted = false;
        }
        self.current_bet = 0;
    }

    /// True once at most one player holds cards, or the final street is
    /// settled, or the round already reached showdown.
    pub fn is_round_over(&self) -> bool {
        match self.stage {
            Stage::AwaitingPlayers | Stage::Dealt => false,
            Stage::Showdown | Stage::Settled => true,
            Stage::Draw => self.live_count() <= 1,
            Stage::Betting(street) => {
                self.live_count() <= 1
                    || (street == self.variant.final_street() && self.street_complete())
            }
        }
    }

    // ---- showdown ------------------------------------------------------

    /// Rank the live hands, pay every pot tier and settle the round.
    ///
    /// Payouts come back in seat order starting left of the button. Odd
    /// chips of a split tier go to the winners nearest that seat. Chips nobody
    /// called are returned first and do not count as a win.
    pub fn evaluate_showdown(&mut self) -> Result<Vec<Payout>, GameError> {
        if self.stage == Stage::Settled || !self.is_round_over() {
            return Err(GameError::InvalidStageAction { stage: self.stage, action: "showdown" });
        }
        let mut stakes = self.stakes();
        let staked: u64 = stakes.iter().map(|s| s.contributed).sum();
        if staked != self.pot {
            return Err(GameError::InvalidState(format!(
                "pot {} does not match contributions {staked}",
                self.pot
            )));
        }

        let n = self.players.len();
        let mut returned = vec![0u64; n];
        if let Some((seat, chips)) = pot::uncalled(&stakes) {
            stakes[seat].contributed -= chips;
            returned[seat] = chips;
        }

        let live: Vec<usize> = (0..n).filter(|&i| !self.players[i].is_folded()).collect();
        let mut ranks: Vec<Option<HandRank>> = vec![None; n];
        if live.len() > 1 {
            for &i in &live {
                ranks[i] = Some(self.variant.best_hand(&self.players[i].hand, &self.community)?);
            }
        }

        let pots = pot::side_pots(&stakes);
        let order: Vec<usize> = clockwise(self.button, n).collect();
        let mut winnings = vec![0u64; n];
        let mut split = vec![false; n];
        for tier in &pots {
            let contenders: Vec<usize> =
                order.iter().copied().filter(|i| tier.eligible.contains(i)).collect();
            let best = contenders.iter().filter_map(|&i| ranks[i].as_ref()).max();
            let winners: Vec<usize> = match best {
                Some(best) => contenders
                    .iter()
                    .copied()
                    .filter(|&i| ranks[i].as_ref() == Some(best))
                    .collect(),
                None => contenders,
            };
            if winners.is_empty() {
                return Err(GameError::InvalidState(format!(
                    "no eligible winner for a pot of {}",
                    tier.amount
                )));
            }
            for (i, amount) in pot::split(tier.amount, &winners) {
                winnings[i] += amount;
                split[i] |= winners.len() > 1;
            }
        }

        self.stage = Stage::Showdown;
        let mut payouts = Vec::new();
        for &i in &order {
            let (won, back) = (winnings[i], returned[i]);
            if won + back == 0 {
                continue;
            }
            self.players[i].stack += won + back;
            if back > 0 {
                self.record(i, HandHistoryVerb::Returned, Some(back));
            }
            let player = self.players[i].id.clone();
            let mut hand = None;
            if won > 0 {
                self.players[i].hands_won += 1;
                let verb = if split[i] { HandHistoryVerb::Split } else { HandHistoryVerb::Win };
                self.record(i, verb, Some(won));
                hand = ranks[i].clone();
                match &hand {
                    Some(rank) => log::info!("{player} wins {won} with {}", rank.category),
                    None => log::info!("{player} wins {won}"),
                }
            }
            payouts.push(Payout { player, amount: won + back, hand });
        }

        for p in &mut self.players {
            p.street_bet = 0;
        }
        self.pot = 0;
        self.current_bet = 0;
        self.side_pots = pots;
        self.stage = Stage::Settled;
        Ok(payouts)
    }

    // ---- queries -------------------------------------------------------

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn community(&self) -> &[Card] {
        &self.community
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    /// Highest street bet on the current street.
    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Seat index of the betting cursor.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Who the table is waiting on, if anyone.
    pub fn current_player(&self) -> Option<&PlayerId> {
        match self.stage {
            Stage::Betting(_) | Stage::Draw => self.players.get(self.turn).map(|p| &p.id),
            _ => None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn button(&self) -> usize {
        self.button
    }

    /// Tiers paid at the last showdown, main pot first.
    pub fn side_pots(&self) -> &[SidePot] {
        &self.side_pots
    }

    /// Tiers the pot would split into if the round ended now.
    pub fn pot_breakdown(&self) -> Vec<SidePot> {
        pot::side_pots(&self.stakes())
    }

    pub fn stack(&self, id: &PlayerId) -> Result<u64, GameError> {
        Ok(self.players[self.seat_of(id)?].stack)
    }

    pub fn street_bet(&self, id: &PlayerId) -> Result<u64, GameError> {
        Ok(self.players[self.seat_of(id)?].street_bet)
    }

    /// Chips `id` must add to stay in the hand.
    pub fn to_call(&self, id: &PlayerId) -> Result<u64, GameError> {
        Ok(self.owed(self.seat_of(id)?))
    }

    pub fn history(&self) -> &[HandHistoryEntry] {
        &self.history
    }

    pub fn history_recent(&self, n: usize) -> &[HandHistoryEntry] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    // ---- helpers -------------------------------------------------------

    fn seat_of(&self, id: &PlayerId) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| GameError::NotAPlayer(id.clone()))
    }

    /// Resolve `id` to the seat holding the cursor, or say why it may not act.
    fn turn_seat(
        &self,
        id: &PlayerId,
        action: &'static str,
        in_draw: bool,
    ) -> Result<usize, GameError> {
        let seat = self.seat_of(id)?;
        let allowed = match self.stage {
            Stage::Betting(_) => true,
            Stage::Draw => in_draw,
            _ => false,
        };
        if !allowed {
            return Err(GameError::InvalidStageAction { stage: self.stage, action });
        }
        let current = self.players.get(self.turn).ok_or_else(|| self.bad_turn())?;
        if seat != self.turn {
            return Err(GameError::OutOfTurn { expected: current.id.clone(), got: id.clone() });
        }
        let done = match self.stage {
            Stage::Draw => current.drawn,
            _ => !owes_action(current, self.current_bet),
        };
        if done {
            return Err(GameError::AlreadyActed(id.clone()));
        }
        Ok(seat)
    }

    fn ensure_between_rounds(&self, action: &'static str) -> Result<(), GameError> {
        match self.stage {
            Stage::AwaitingPlayers | Stage::Settled => Ok(()),
            stage => Err(GameError::InvalidStageAction { stage, action }),
        }
    }

    fn owed(&self, seat: usize) -> u64 {
        self.current_bet.saturating_sub(self.players[seat].street_bet)
    }

    fn live_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_folded()).count()
    }

    fn stakes(&self) -> Vec<Stake> {
        self.players
            .iter()
            .map(|p| Stake { contributed: p.contributed, live: !p.is_folded() })
            .collect()
    }

    fn next_seat_after(&self, from: usize, pred: impl Fn(&Player) -> bool) -> Option<usize> {
        clockwise(from, self.players.len()).find(|&i| pred(&self.players[i]))
    }

    fn next_active(&self, from: usize) -> Option<usize> {
        self.next_seat_after(from, Player::can_act)
    }

    fn next_to_act(&self, from: usize) -> Option<usize> {
        let bet = self.current_bet;
        self.next_seat_after(from, |p| owes_action(p, bet))
    }

    fn bad_turn(&self) -> GameError {
        GameError::InvalidState(format!(
            "turn cursor {} outside {} seats",
            self.turn,
            self.players.len()
        ))
    }

    fn record(&mut self, seat: usize, verb: HandHistoryVerb, amount: Option<u64>) {
        let entry = HandHistoryEntry {
            player: self.players[seat].id.clone(),
            verb,
            amount,
            stage: self.stage,
        };
        self.history.push(entry);
    }
}
