use proptest::prelude::*;

use crate::config::{CategoryMultipliers, ScoringConfig};
use crate::domain::duo_jin::{DuoJinInfo, DuoJinType};
use crate::domain::kai_chong::{KaiChongDetail, MatchType};
use crate::domain::patterns::{detect_patterns, PatternContext};
use crate::domain::risk::{RiskLevel, TacticalPriority, ViolationRecord};
use crate::domain::settlement::{
    net_change, settle, DuoJinTransfer, NotificationCategory, PlayerRoundInput, ScoreCategory,
    SettlementInput,
};
use crate::domain::special_capture::SpecialCaptureFlags;
use crate::domain::state::{PlayerId, Role};
use crate::domain::test_gens;
use crate::domain::test_state_helpers::cards;
use crate::domain::CardId;

fn player_input(id: PlayerId, banker: PlayerId, captured: Vec<CardId>) -> PlayerRoundInput {
    PlayerRoundInput {
        player_id: id,
        role: if id == banker { Role::Banker } else { Role::Peasant },
        patterns: detect_patterns(&captured, &PatternContext::default()),
        captured,
        trick_pile: Vec::new(),
        trick_count: 0,
        kai_chong: Vec::new(),
        special_captures: SpecialCaptureFlags::default(),
    }
}

fn input(banker: PlayerId, piles: [&[&str]; 4]) -> SettlementInput {
    SettlementInput {
        round_no: 1,
        banker,
        players: (0..4u8)
            .map(|id| player_input(id, banker, cards(piles[id as usize])))
            .collect(),
        duo_jin: Vec::new(),
        violations: Vec::new(),
    }
}

fn violation(player_id: PlayerId, rule_id: &'static str) -> ViolationRecord {
    ViolationRecord {
        player_id,
        round: 1,
        card: cards(&["s_3"])[0],
        rule_id,
        risk_level: RiskLevel::Penalty,
        tactical_context: TacticalPriority::AntiBanker,
    }
}

fn totals(input: &SettlementInput, config: &ScoringConfig) -> Vec<i64> {
    settle(input, config)
        .results
        .iter()
        .map(|r| r.total_round_change)
        .collect()
}

#[test]
fn peasants_net_against_banker() {
    let input = input(0, [&["c_11"], &["c_10", "c_9"], &[], &["s_2"]]);
    let settlement = settle(&input, &ScoringConfig::default());
    let r = &settlement.results;

    assert_eq!(r[1].raw.diao, 5);
    assert_eq!(r[1].settled.diao, 2);
    assert_eq!(r[1].settled.kai_zhu, 2);
    assert_eq!(r[2].settled.diao, -3);
    assert_eq!(r[3].settled.diao, -2);
    assert_eq!(r[0].settled.diao, 3);
    assert_eq!(r[0].settled.kai_zhu, -2);

    let t: Vec<i64> = r.iter().map(|x| x.total_round_change).collect();
    assert_eq!(t, vec![1, 4, -3, -2]);
    assert_eq!(net_change(r), 0);
    assert_eq!(r[1].coin_change, 40);
    assert_eq!(r[1].patterns, vec!["千百".to_string()]);
    assert_eq!(r[1].diao_raw_value, 5);
    assert_eq!(r[1].cards_won_count, 2);
}

#[test]
fn banker_is_negative_sum_of_peasants_per_category() {
    let input = input(2, [&["c_11", "c_10"], &["s_9", "s_8"], &["t_2", "t_3", "t_4"], &[]]);
    let settlement = settle(&input, &ScoringConfig::default());
    for category in ScoreCategory::ALL {
        let peasants: i64 = settlement
            .results
            .iter()
            .filter(|r| r.player_id != 2)
            .map(|r| r.settled.get(category))
            .sum();
        assert_eq!(settlement.results[2].settled.get(category), -peasants);
    }
}

#[test]
fn multiplier_scales_settled_points() {
    let input = input(0, [&["c_11"], &["c_10", "c_9"], &[], &["s_2"]]);
    let config = ScoringConfig {
        multipliers: CategoryMultipliers::uniform(2),
        exchange_rate: 1,
    };
    assert_eq!(totals(&input, &config), vec![2, 8, -6, -4]);
}

#[test]
fn duo_jin_moves_base_from_victim_to_thief() {
    let mut input = input(0, [&[], &[], &["s_9", "k_9", "c_11"], &[]]);
    input.duo_jin.push(DuoJinTransfer {
        thief: 1,
        info: DuoJinInfo {
            victim_id: 2,
            score_base: DuoJinType::Cash.score_base(),
            kind: DuoJinType::Cash,
        },
    });
    let settlement = settle(&input, &ScoringConfig::default());
    let r = &settlement.results;
    assert_eq!(r[1].settled.duo_jin, 5);
    assert_eq!(r[2].settled.duo_jin, -5);
    assert_eq!(r[0].settled.duo_jin, 0);
    assert_eq!(net_change(r), 0);

    let critical: Vec<_> = settlement
        .notifications
        .iter()
        .filter(|n| n.category == NotificationCategory::Critical)
        .collect();
    assert_eq!(critical.len(), 2);
    assert_eq!(critical.iter().map(|n| n.delta).sum::<i64>(), 0);
}

#[test]
fn bao_pei_payer_covers_other_peasants() {
    let mut input = input(0, [&["c_11"], &["c_10", "c_9"], &[], &["s_2"]]);
    input.violations.push(violation(0, "RED_CARD_LEAD"));
    input.violations.push(violation(2, "FORBIDDEN_SUIT_LEAD"));
    input.violations.push(violation(3, "BAI_LAO_FEED"));

    let settlement = settle(&input, &ScoringConfig::default());
    let r = &settlement.results;
    // Before: [1, 4, -3, -2]; seat 2 covers seat 3's loss.
    let t: Vec<i64> = r.iter().map(|x| x.total_round_change).collect();
    assert_eq!(t, vec![1, 4, -5, 0]);

    let payer = r[2].penalty.as_ref().unwrap();
    assert_eq!(payer.payer_id, 2);
    assert_eq!(payer.reason, "FORBIDDEN_SUIT_LEAD");
    assert_eq!(payer.adjustment, -2);
    assert_eq!(r[3].penalty.as_ref().unwrap().adjustment, 2);
    assert!(r[1].penalty.is_none());
    assert!(r[0].penalty.is_none());
    assert_eq!(r[2].violations.len(), 1);
    assert_eq!(net_change(r), 0);
}

#[test]
fn bao_pei_with_no_losses_to_cover_records_no_penalty() {
    let mut input = input(0, [&[], &["c_11"], &[], &[]]);
    input.violations.push(violation(1, "FORBIDDEN_SUIT_LEAD"));

    let settlement = settle(&input, &ScoringConfig::default());
    let r = &settlement.results;
    let t: Vec<i64> = r.iter().map(|x| x.total_round_change).collect();
    assert_eq!(t, vec![-3, 3, 0, 0]);
    assert!(r.iter().all(|x| x.penalty.is_none()));
    assert_eq!(r[1].violations.len(), 1);
    assert!(settlement
        .notifications
        .iter()
        .all(|n| n.category != NotificationCategory::Critical));
}

#[test]
fn kai_chong_points_are_netted() {
    let mut input = input(0, [&[], &[], &[], &[]]);
    input.players[3].kai_chong.push(KaiChongDetail {
        player_id: 3,
        matched_card: cards(&["k_5"])[0],
        source_cards: cards(&["k_4", "k_6"]),
        score: 6,
        individual_scores: vec![3, 3],
        match_type: MatchType::ShuangLin,
        priority_score: 7006,
        merit_multiplier: 3,
        description: "雙鄰".to_string(),
        duo_jin: None,
    });
    let settlement = settle(&input, &ScoringConfig::default());
    assert_eq!(settlement.results[3].settled.kai_chong, 6);
    assert_eq!(settlement.results[0].settled.kai_chong, -6);
    assert_eq!(settlement.results[3].scoring_cards, cards(&["k_4", "k_6"]));
    let n = &settlement.notifications[0];
    assert_eq!(n.id, "r1-p3-1");
    assert_eq!(n.category, NotificationCategory::KaiChong);
}

#[test]
fn notification_ids_are_per_player_sequences() {
    let input = input(0, [&[], &["c_11", "c_10", "s_9", "s_8"], &[], &[]]);
    let settlement = settle(&input, &ScoringConfig::default());
    let ids: Vec<&str> = settlement.notifications.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["r1-p1-1", "r1-p1-2", "r1-p1-3"]);
    assert!(settlement
        .notifications
        .iter()
        .all(|n| n.category == NotificationCategory::Pattern));
}

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Totals always sum to zero, penalties and Duo Jin included.
    #[test]
    fn prop_closed_economy(
        cards in test_gens::unique_cards(24),
        banker in test_gens::player_id(),
        violator in test_gens::player_id(),
        thief in test_gens::player_id(),
        multiplier in 1i64..=4,
    ) {
        let mut input = SettlementInput {
            round_no: 3,
            banker,
            players: (0..4u8)
                .map(|id| {
                    let start = id as usize * 6;
                    player_input(id, banker, cards[start..start + 6].to_vec())
                })
                .collect(),
            duo_jin: Vec::new(),
            violations: vec![violation(violator, "FORBIDDEN_SUIT_LEAD")],
        };
        let victim = (thief + 1) % 4;
        input.duo_jin.push(DuoJinTransfer {
            thief,
            info: DuoJinInfo { victim_id: victim, score_base: 3, kind: DuoJinType::Normal },
        });
        let config = ScoringConfig {
            multipliers: CategoryMultipliers::uniform(multiplier),
            exchange_rate: 10,
        };
        let settlement = settle(&input, &config);
        prop_assert_eq!(net_change(&settlement.results), 0);
        for r in &settlement.results {
            prop_assert_eq!(r.coin_change, r.total_round_change * 10);
        }
    }

    /// Re-settling unchanged inputs is byte-identical.
    #[test]
    fn prop_settlement_idempotent(cards in test_gens::unique_cards(20), banker in test_gens::player_id()) {
        let input = SettlementInput {
            round_no: 1,
            banker,
            players: (0..4u8)
                .map(|id| {
                    let start = id as usize * 5;
                    player_input(id, banker, cards[start..start + 5].to_vec())
                })
                .collect(),
            duo_jin: Vec::new(),
            violations: Vec::new(),
        };
        let config = ScoringConfig::default();
        let a = serde_json::to_string(&settle(&input, &config)).unwrap();
        let b = serde_json::to_string(&settle(&input, &config)).unwrap();
        prop_assert_eq!(a, b);
    }
}
