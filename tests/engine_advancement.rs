use poker_table::config::TableConfig;
use poker_table::game::{Game, Stage, Turn};
use poker_table::player::PlayerId;
use poker_table::variants::{Street, Variant};

fn mk_game(variant: Variant, seats: &[(&str, u64)]) -> Game {
    let mut g = Game::new(variant, TableConfig { seed: Some(42), ..TableConfig::default() });
    for &(name, stack) in seats {
        g.seat(name, stack).unwrap();
    }
    g
}

fn id(s: &str) -> PlayerId {
    PlayerId::from(s)
}

fn advance_with_checks(game: &mut Game, street: Street) {
    let max_steps = game.players().len() + 3;
    for _ in 0..max_steps {
        if game.stage() != Stage::Betting(street) {
            return;
        }
        let who = game.current_player().cloned().unwrap();
        game.call(&who).unwrap();
        game.advance_turn().unwrap();
    }
    panic!("street did not advance from {street:?}");
}

#[test]
fn auto_showdown_when_all_players_all_in() {
    let mut g = mk_game(Variant::Holdem, &[("A", 20), ("B", 20), ("C", 20)]);
    g.start_round().unwrap();

    g.bet(&id("A"), 20).unwrap();
    g.advance_turn().unwrap();
    g.call(&id("B")).unwrap();
    g.advance_turn().unwrap();
    g.call(&id("C")).unwrap();

    assert_eq!(g.advance_turn().unwrap(), Turn::RoundEnded);
    assert_eq!(g.stage(), Stage::Showdown);
    assert_eq!(g.community().len(), 5);
    assert_eq!(g.pot(), 60);

    let paid: u64 = g.evaluate_showdown().unwrap().iter().map(|p| p.amount).sum();
    assert_eq!(paid, 60);
}

#[test]
fn auto_showdown_when_one_active_and_others_all_in() {
    let mut g = mk_game(Variant::Holdem, &[("A", 1000), ("B", 50)]);
    g.start_round().unwrap();
    g.call(&id("A")).unwrap();
    g.advance_turn().unwrap();
    // B shoves the 40 left behind the big blind
    g.bet(&id("B"), 40).unwrap();
    assert_eq!(g.advance_turn().unwrap(), Turn::Next(id("A")));
    g.call(&id("A")).unwrap();

    assert_eq!(g.advance_turn().unwrap(), Turn::RoundEnded);
    assert_eq!(g.community().len(), 5);
    assert!(g.is_round_over());
}

#[test]
fn blinds_that_put_everyone_all_in_run_the_board_out() {
    let mut g = mk_game(Variant::Holdem, &[("A", 5), ("B", 10)]);
    g.start_round().unwrap();
    assert_eq!(g.stage(), Stage::Showdown);
    assert_eq!(g.community().len(), 5);
    assert!(g.is_round_over());
    assert_eq!(g.advance_turn().unwrap(), Turn::RoundEnded);
}

#[test]
fn short_big_blind_sets_the_bet_to_what_was_posted() {
    let mut g = mk_game(Variant::Holdem, &[("A", 1000), ("B", 1000), ("C", 8)]);
    g.start_round().unwrap();
    // C could only post 8 of the big blind
    assert_eq!(g.current_bet(), 8);
    g.raise(&id("A"), 22).unwrap();
    assert_eq!(g.current_bet(), 30);
    g.advance_turn().unwrap();
    g.call(&id("B")).unwrap();
    // C is all-in, so the street closes
    assert_eq!(g.advance_turn().unwrap(), Turn::Next(id("B")));
    assert_eq!(g.stage(), Stage::Betting(Street::Flop));
}

#[test]
fn check_down_advances_to_showdown() {
    let mut g = mk_game(Variant::Holdem, &[("A", 100), ("B", 100), ("C", 100)]);
    g.start_round().unwrap();

    advance_with_checks(&mut g, Street::Preflop);
    advance_with_checks(&mut g, Street::Flop);
    advance_with_checks(&mut g, Street::Turn);
    assert_eq!(g.community().len(), 5);
    advance_with_checks(&mut g, Street::River);

    assert_eq!(g.stage(), Stage::Showdown);
    assert_eq!(g.pot(), 30);
}

#[test]
fn postflop_bet_and_calls_advance() {
    let mut g = mk_game(Variant::Holdem, &[("A", 100), ("B", 100), ("C", 100)]);
    g.start_round().unwrap();
    advance_with_checks(&mut g, Street::Preflop);
    assert_eq!(g.stage(), Stage::Betting(Street::Flop));

    g.bet(&id("B"), 20).unwrap();
    g.advance_turn().unwrap();
    advance_with_checks(&mut g, Street::Flop);

    assert_eq!(g.stage(), Stage::Betting(Street::Turn));
    assert_eq!(g.pot(), 90);
}

#[test]
fn advance_is_rejected_between_rounds() {
    let mut g = mk_game(Variant::Holdem, &[("A", 100), ("B", 100)]);
    assert!(g.advance_turn().is_err());
    assert!(!g.is_round_over());
}
