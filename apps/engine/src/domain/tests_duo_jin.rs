use proptest::prelude::*;

use crate::domain::duo_jin::{classify, holds_brocade, resolve_duo_jin, DuoJinType};
use crate::domain::patterns::PatternCategory;
use crate::domain::test_gens;
use crate::domain::test_state_helpers::{cards, give_captured, round_with_hands};

const NO_HANDS: [&[&str]; 4] = [&[], &[], &[], &[]];

#[test]
fn brocade_needs_three_shang() {
    assert!(!holds_brocade(&cards(&["c_11", "s_9", "c_10"])));
    assert!(holds_brocade(&cards(&["c_11", "s_9", "t_11"])));
}

#[test]
fn score_base_by_victim_pile() {
    assert_eq!(classify(&cards(&["s_9", "k_9", "t_11"])), DuoJinType::Normal);
    assert_eq!(classify(&cards(&["c_11", "k_9", "t_11"])), DuoJinType::Cash);
    assert_eq!(
        classify(&cards(&["s_9", "k_9", "t_11", "c_9"])),
        DuoJinType::NuJiang
    );
    assert_eq!(DuoJinType::Normal.score_base(), 3);
    assert_eq!(DuoJinType::Cash.score_base(), 5);
    assert_eq!(DuoJinType::NuJiang.score_base(), 10);
}

#[test]
fn gaining_shang_against_a_brocade_fires() {
    let mut state = round_with_hands(0, NO_HANDS);
    give_captured(&mut state, 3, &["s_9", "k_9", "t_11"]);

    let award = resolve_duo_jin(&state, 1, &cards(&["c_11", "c_3"])).unwrap();
    assert_eq!(award.player, 1);
    assert_eq!(award.info.victim_id, 3);
    assert_eq!(award.info.kind, DuoJinType::Normal);
    assert_eq!(award.detail.category, PatternCategory::DuoJin);
    assert_eq!(award.detail.score, 3);
    assert_eq!(award.detail.duo_jin, Some(award.info));
    assert_eq!(award.detail.cards.len(), 1);
}

#[test]
fn no_fire_without_shang_or_brocade() {
    let mut state = round_with_hands(0, NO_HANDS);
    give_captured(&mut state, 3, &["s_9", "k_9"]);
    assert!(resolve_duo_jin(&state, 1, &cards(&["t_11"])).is_none());

    give_captured(&mut state, 3, &["t_11"]);
    assert!(resolve_duo_jin(&state, 1, &cards(&["c_10", "c_3"])).is_none());
    // The holder cannot seize its own brocade.
    assert!(resolve_duo_jin(&state, 3, &cards(&["c_11"])).is_none());
}

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// The base depends on the victim's pile only, never on the thief.
    #[test]
    fn prop_base_independent_of_thief(
        free_shang in 0usize..4,
        with_bai in any::<bool>(),
        thief_a in 0u8..=2u8,
        thief_b in 0u8..=2u8,
    ) {
        let shang = ["c_11", "s_9", "k_9", "t_11"];
        let mut pile: Vec<&str> = shang
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != free_shang)
            .map(|(_, t)| *t)
            .collect();
        if with_bai {
            pile.push("c_9");
        }
        let mut state = round_with_hands(0, NO_HANDS);
        give_captured(&mut state, 3, &pile);
        let gained = cards(&[shang[free_shang]]);

        let a = resolve_duo_jin(&state, thief_a, &gained).unwrap();
        let b = resolve_duo_jin(&state, thief_b, &gained).unwrap();
        prop_assert_eq!(a.info, b.info);
        prop_assert!([3, 5, 10].contains(&a.info.score_base));

        let expected = if with_bai {
            DuoJinType::NuJiang
        } else if free_shang != 0 {
            DuoJinType::Cash
        } else {
            DuoJinType::Normal
        };
        prop_assert_eq!(a.info.kind, expected);
    }
}
