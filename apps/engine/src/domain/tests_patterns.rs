use proptest::prelude::*;

use crate::domain::cards_types::{HeldCard, MianZhang, Rank};
use crate::domain::patterns::{detect_patterns, PatternCategory, PatternContext, PatternDetail};
use crate::domain::test_gens;
use crate::domain::test_state_helpers::cards;

fn names(found: &[PatternDetail]) -> Vec<&str> {
    found.iter().map(|d| d.name.as_str()).collect()
}

fn total(found: &[PatternDetail], category: PatternCategory) -> i64 {
    found
        .iter()
        .filter(|d| d.category == category)
        .map(|d| d.score)
        .sum()
}

#[test]
fn empty_pile_has_no_patterns() {
    assert!(detect_patterns(&[], &PatternContext::default()).is_empty());
}

#[test]
fn full_kai_zhu_takes_precedence_over_pairs() {
    let pile = cards(&["c_11", "c_10", "c_9"]);
    let found = detect_patterns(&pile, &PatternContext::default());
    let kai_zhu: Vec<_> = found
        .iter()
        .filter(|d| d.category == PatternCategory::KaiZhu)
        .collect();
    assert_eq!(kai_zhu.len(), 1);
    assert_eq!(kai_zhu[0].name, "萬千百");
    assert_eq!(kai_zhu[0].score, 5);
}

#[test]
fn categories_share_cards() {
    // 萬萬 + 千萬 is both a Kai Zhu pair and the Cash Qiao Men.
    let pile = cards(&["c_11", "c_10"]);
    let found = detect_patterns(&pile, &PatternContext::default());
    assert_eq!(names(&found), vec!["萬千", "十巧門"]);
    assert_eq!(total(&found, PatternCategory::KaiZhu), 3);
    assert_eq!(total(&found, PatternCategory::QiaoMen), 2);
}

#[test]
fn four_shang_beats_three_shang() {
    let pile = cards(&["c_11", "s_9", "k_9", "t_11"]);
    let found = detect_patterns(&pile, &PatternContext::default());
    let se_yang: Vec<_> = found
        .iter()
        .filter(|d| d.category == PatternCategory::SeYang)
        .collect();
    assert_eq!(se_yang.len(), 1);
    assert_eq!(se_yang[0].name, "四賞");
    assert_eq!(se_yang[0].score, 10);
}

#[test]
fn three_shang_and_shoulders() {
    let pile = cards(&["s_9", "k_9", "t_11", "c_10", "s_8", "k_8", "t_10"]);
    let found = detect_patterns(&pile, &PatternContext::default());
    assert_eq!(total(&found, PatternCategory::SeYang), 5 + 6);
    assert!(names(&found).contains(&"三賞"));
    assert!(names(&found).contains(&"四肩"));
    // 貫 / 索 / 文 Qiao Men pairs are present too.
    assert_eq!(total(&found, PatternCategory::QiaoMen), 6);
}

#[test]
fn four_ji() {
    let pile = cards(&["c_1", "s_1", "k_1", "t_1"]);
    let found = detect_patterns(&pile, &PatternContext::default());
    assert_eq!(names(&found), vec!["四極"]);
    assert_eq!(found[0].score, 4);
}

#[test]
fn qing_runs_score_length_minus_two() {
    let pile = cards(&["t_2", "t_3", "t_4", "t_5", "t_6", "s_2", "s_3", "k_4", "k_6"]);
    let found = detect_patterns(&pile, &PatternContext::default());
    assert_eq!(names(&found), vec!["文順5"]);
    assert_eq!(found[0].score, 3);
    assert_eq!(found[0].cards.len(), 5);
}

#[test]
fn split_runs_score_separately() {
    let pile = cards(&["c_2", "c_3", "c_4", "c_6", "c_7", "c_8"]);
    let found = detect_patterns(&pile, &PatternContext::default());
    assert_eq!(names(&found), vec!["十順3", "十順3"]);
    assert_eq!(total(&found, PatternCategory::SeYang), 2);
}

#[test]
fn seized_brocade_loses_shang_sets_only() {
    let pile = cards(&["c_11", "s_9", "k_9", "c_10", "s_8", "k_8", "t_10"]);
    let ctx = PatternContext {
        brocade_seized: true,
        ..PatternContext::default()
    };
    let found = detect_patterns(&pile, &ctx);
    assert!(!names(&found).contains(&"三賞"));
    assert!(names(&found).contains(&"四肩"));
    assert_eq!(total(&found, PatternCategory::KaiZhu), 3);
}

#[test]
fn mian_zhang_fills_one_missing_slot() {
    // 二索 stands in for a ZUN card; 萬萬 and 九貫 are held.
    let mz = MianZhang {
        card: cards(&["k_2"])[0],
        substitute_rank: Rank::Zun,
    };
    let pile = cards(&["c_11", "s_9", "k_2"]);
    let ctx = PatternContext {
        mian_zhang: Some(mz),
        ..PatternContext::default()
    };
    let found = detect_patterns(&pile, &ctx);
    let three = found
        .iter()
        .find(|d| d.name == "三賞")
        .expect("substitute completes three Shang");
    assert!(three
        .cards
        .contains(&HeldCard::substituted(mz.card, Rank::Zun)));
    assert_eq!(three.cards[2].original_rank(), Rank::Qing);
    assert_eq!(three.cards[2].effective_rank(), Rank::Zun);

    // Without the designation nothing Se Yang is found.
    let plain = detect_patterns(&pile, &PatternContext::default());
    assert_eq!(total(&plain, PatternCategory::SeYang), 0);
}

#[test]
fn kai_chong_card_completes_se_yang() {
    let pile = cards(&["c_10", "s_8", "k_8"]);
    let won = cards(&["t_10"]);
    let ctx = PatternContext {
        kai_chong_cards: &won,
        ..PatternContext::default()
    };
    let found = detect_patterns(&pile, &ctx);
    let kc: Vec<_> = found
        .iter()
        .filter(|d| d.category == PatternCategory::KcSeYang)
        .collect();
    assert_eq!(kc.len(), 1);
    assert_eq!(kc[0].name, "四肩");
    assert_eq!(total(&found, PatternCategory::SeYang), 0);
}

#[test]
fn kai_chong_does_not_reuse_se_yang_cards() {
    let pile = cards(&["c_10", "s_8", "k_8", "t_10"]);
    let won = cards(&["c_1"]);
    let ctx = PatternContext {
        kai_chong_cards: &won,
        ..PatternContext::default()
    };
    let found = detect_patterns(&pile, &ctx);
    assert_eq!(total(&found, PatternCategory::SeYang), 6);
    assert_eq!(total(&found, PatternCategory::KcSeYang), 0);
}

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// No physical card is used twice inside one category.
    #[test]
    fn prop_no_card_reuse_within_category(pile in test_gens::captured_pile()) {
        let found = detect_patterns(&pile, &PatternContext::default());
        for category in [PatternCategory::KaiZhu, PatternCategory::QiaoMen, PatternCategory::SeYang] {
            let mut used: Vec<_> = found
                .iter()
                .filter(|d| d.category == category)
                .flat_map(|d| d.card_ids())
                .collect();
            let n = used.len();
            used.sort();
            used.dedup();
            prop_assert_eq!(used.len(), n);
        }
    }

    /// Every pattern card comes from the pile.
    #[test]
    fn prop_patterns_only_use_pile_cards(pile in test_gens::captured_pile()) {
        let found = detect_patterns(&pile, &PatternContext::default());
        for d in &found {
            prop_assert!(d.score > 0);
            for id in d.card_ids() {
                prop_assert!(pile.contains(&id));
            }
        }
    }

    /// Detection ignores pile order.
    #[test]
    fn prop_order_independent(pile in test_gens::captured_pile()) {
        let mut reversed = pile.clone();
        reversed.reverse();
        let a = detect_patterns(&pile, &PatternContext::default());
        let b = detect_patterns(&reversed, &PatternContext::default());
        let score = |v: &[PatternDetail]| v.iter().map(|d| d.score).sum::<i64>();
        prop_assert_eq!(score(&a), score(&b));
        prop_assert_eq!(names(&a), names(&b));
    }
}
