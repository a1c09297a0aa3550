use proptest::prelude::*;

use crate::domain::fixtures::CardFixtures;
use crate::domain::risk::{
    assess_hand, assess_play, assess_play_with, suit_status, RiskAssessment, RiskLevel,
    TacticalPriority, TacticalSet, RULES,
};
use crate::domain::state::{OpenedSuit, SuitStatus};
use crate::domain::test_gens;
use crate::domain::test_state_helpers::{give_captured, put_on_table, round_with_hands};
use crate::domain::{RoundSetup, Suit};

fn c(token: &str) -> crate::domain::CardId {
    CardFixtures::one(token)
}

#[test]
fn rules_are_in_tier_order() {
    for pair in RULES.windows(2) {
        assert!(pair[0].level >= pair[1].level, "{} before {}", pair[0].id, pair[1].id);
    }
}

#[test]
fn suit_status_matrix() {
    let mut state = round_with_hands(0, [&[], &[], &[], &[]]);
    state.opened_suits = vec![
        OpenedSuit { suit: Suit::Cash, leader: 0, is_banker: true },
        OpenedSuit { suit: Suit::Coins, leader: 2, is_banker: false },
    ];
    assert_eq!(suit_status(&state, 1, Suit::Strings), SuitStatus::Neutral);
    assert_eq!(suit_status(&state, 0, Suit::Cash), SuitStatus::Safe);
    assert_eq!(suit_status(&state, 1, Suit::Cash), SuitStatus::Forbidden);
    assert_eq!(suit_status(&state, 1, Suit::Coins), SuitStatus::Recommended);
    assert_eq!(suit_status(&state, 2, Suit::Coins), SuitStatus::Safe);
    assert_eq!(suit_status(&state, 0, Suit::Coins), SuitStatus::Neutral);
}

#[test]
fn banker_only_guards_se_yang() {
    let state = round_with_hands(0, [&["s_3", "s_8"], &["k_2"], &[], &[]]);
    // A black card opening a suit is only an anti-banker concern.
    let safe = assess_play(&state, 0, c("s_3")).unwrap();
    assert_eq!(safe.risk_level, RiskLevel::Safe);
    assert_eq!(safe.rule_id, RiskAssessment::SAFE_RULE_ID);
    assert_eq!(safe.tactical_context, None);

    let red = assess_play(&state, 0, c("s_8")).unwrap();
    assert_eq!(red.rule_id, "RED_CARD_LEAD");
    assert_eq!(red.risk_level, RiskLevel::Notice);
}

#[test]
fn peasant_opening_a_suit_is_notice() {
    let state = round_with_hands(0, [&["c_2"], &["k_2", "k_8"], &[], &[]]);
    let a = assess_play(&state, 1, c("k_8")).unwrap();
    assert_eq!(a.rule_id, "NEW_SUIT_OPEN");
    assert_eq!(a.tactical_context, Some(TacticalPriority::AntiBanker));
}

#[test]
fn feeding_a_bai_lao_suspect_is_penalty() {
    let mut state = round_with_hands(0, [&["s_2"], &["c_10", "c_3"], &[], &[]]);
    state.players[2].is_suspected_bai_lao = true;

    let feed = assess_play(&state, 1, c("c_10")).unwrap();
    assert_eq!(feed.risk_level, RiskLevel::Penalty);
    assert_eq!(feed.rule_id, "BAI_LAO_FEED");

    // Black cash is not a feed.
    let black = assess_play(&state, 1, c("c_3")).unwrap();
    assert_eq!(black.rule_id, "NEW_SUIT_OPEN");
}

#[test]
fn exposing_shang_to_a_collector_is_warning() {
    let mut state = round_with_hands(0, [&["s_2"], &["t_11"], &[], &[]]);
    give_captured(&mut state, 3, &["c_11", "s_9"]);
    let a = assess_play(&state, 1, c("t_11")).unwrap();
    assert_eq!(a.risk_level, RiskLevel::Warning);
    assert_eq!(a.rule_id, "SHANG_EXPOSED");
}

#[test]
fn capturing_a_fellow_peasant_is_warning() {
    let mut state = round_with_hands(0, [&["s_2"], &["k_7"], &[], &[]]);
    put_on_table(&mut state, 2, &["k_3"]);
    let a = assess_play(&state, 1, c("k_7")).unwrap();
    assert_eq!(a.rule_id, "ALLY_CAPTURE");

    // Capturing the banker's card is fine.
    let mut state = round_with_hands(0, [&["s_2"], &["k_7"], &[], &[]]);
    put_on_table(&mut state, 0, &["k_3"]);
    let a = assess_play(&state, 1, c("k_7")).unwrap();
    assert_eq!(a.risk_level, RiskLevel::Safe);
}

#[test]
fn contexts_restrict_rules() {
    let mut state = round_with_hands(0, [&["s_2"], &["c_10"], &[], &[]]);
    state.players[2].is_suspected_bai_lao = true;

    let none = assess_play_with(&state, 1, c("c_10"), TacticalSet::none()).unwrap();
    assert_eq!(none.risk_level, RiskLevel::Safe);

    let se_yang_only = TacticalSet::none().with(TacticalPriority::AntiSeYang);
    let a = assess_play_with(&state, 1, c("c_10"), se_yang_only).unwrap();
    assert_eq!(a.rule_id, "RED_CARD_LEAD");
}

#[test]
fn assess_hand_covers_every_card() {
    let state = RoundSetup::dealt(1, 2, 99).build().unwrap();
    for seat in 0..4 {
        let assessed = assess_hand(&state, seat).unwrap();
        let cards: Vec<_> = assessed.iter().map(|(c, _)| *c).collect();
        assert_eq!(cards, state.players[seat as usize].hand);
    }
}

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Classification is a pure function of its inputs.
    #[test]
    fn prop_assessment_is_pure(seed in test_gens::seed(), seat in test_gens::player_id()) {
        let state = RoundSetup::dealt(1, 0, seed).build().unwrap();
        let before = state.clone();
        let first = assess_hand(&state, seat).unwrap();
        let second = assess_hand(&state, seat).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(state, before);
    }
}
