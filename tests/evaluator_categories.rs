use poker_table::cards::parse_cards;
use poker_table::evaluator::{compare, evaluate, Category};
use poker_table::GameError;
use std::cmp::Ordering;

fn category(cards: &str) -> Category {
    evaluate(&parse_cards(cards).unwrap()).unwrap().category
}

#[test]
fn category_royal_flush() {
    assert_eq!(category("As Ks Qs Js Ts"), Category::RoyalFlush);
    assert_eq!(category("Th Jh Qh Kh Ah 2c 2d"), Category::RoyalFlush);
}

#[test]
fn category_straight_flush() {
    assert_eq!(category("9d Td Jd Qd Kd"), Category::StraightFlush);
    assert_eq!(category("Ac 2c 3c 4c 5c"), Category::StraightFlush);
}

#[test]
fn category_four_of_a_kind() {
    assert_eq!(category("9c 9d 9h 9s Ac"), Category::FourOfAKind);
}

#[test]
fn category_full_house() {
    assert_eq!(category("3c 3d 3h Js Jc"), Category::FullHouse);
}

#[test]
fn category_flush() {
    assert_eq!(category("Kh Th 8h 6h 3h"), Category::Flush);
}

#[test]
fn category_straight() {
    assert_eq!(category("Ac 5c 4d 3h 2s"), Category::Straight);
    assert_eq!(category("Tc Jd Qh Ks As"), Category::Straight);
}

#[test]
fn category_three_of_a_kind() {
    assert_eq!(category("Qc Qd Qh Ts 2c"), Category::ThreeOfAKind);
}

#[test]
fn category_two_pair() {
    assert_eq!(category("8c 8d 5h 5s Kc"), Category::TwoPair);
}

#[test]
fn category_pair() {
    assert_eq!(category("Ac Ad 9h 7s 2c"), Category::Pair);
}

#[test]
fn category_high_card() {
    assert_eq!(category("Ac Jd 9h 7s 2c"), Category::HighCard);
}

#[test]
fn category_values_are_one_through_ten() {
    assert_eq!(Category::HighCard.ordinal(), 1);
    assert_eq!(Category::Pair.ordinal(), 2);
    assert_eq!(Category::RoyalFlush.ordinal(), 10);
}

#[test]
fn straight_flush_outranks_four_of_a_kind() {
    let sf = parse_cards("5h 6h 7h 8h 9h").unwrap();
    let quads = parse_cards("Ac Ad Ah As Kc").unwrap();
    assert_eq!(compare(&sf, &quads).unwrap(), Ordering::Greater);
}

#[test]
fn wheel_loses_to_six_high_straight() {
    let wheel = parse_cards("Ac 2d 3h 4s 5c").unwrap();
    let six = parse_cards("2c 3d 4h 5s 6c").unwrap();
    assert_eq!(compare(&wheel, &six).unwrap(), Ordering::Less);
}

#[test]
fn pair_kickers_break_ties() {
    let a = parse_cards("Kc Kd Ah 7s 2c").unwrap();
    let b = parse_cards("Kh Ks Qh 7d 2d").unwrap();
    assert_eq!(compare(&a, &b).unwrap(), Ordering::Greater);
}

#[test]
fn identical_ranks_in_other_suits_tie() {
    let a = parse_cards("Ac Kd 9h 7s 2c").unwrap();
    let b = parse_cards("Ad Kh 9s 7c 2d").unwrap();
    assert_eq!(compare(&a, &b).unwrap(), Ordering::Equal);
}

#[test]
fn rejects_bad_card_counts_and_duplicates() {
    let four = parse_cards("Ac Kd 9h 7s").unwrap();
    assert_eq!(evaluate(&four).unwrap_err(), GameError::InsufficientCards(4));
    let eight = parse_cards("Ac Kd 9h 7s 2c 3c 4c 5c").unwrap();
    assert_eq!(evaluate(&eight).unwrap_err(), GameError::TooManyCards(8));
    let dup = parse_cards("Ac Ac 9h 7s 2c").unwrap();
    assert!(matches!(evaluate(&dup).unwrap_err(), GameError::DuplicateCard(_)));
}
