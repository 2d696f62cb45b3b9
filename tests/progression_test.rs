//! End-to-end facade scenarios: events in, consistent snapshots and
//! notifications out.

mod common;

use common::{bare_facade, default_facade, profile_with_stars, seeded_rng};
use starpath::{
    EconomyError, GACHA_SPIN_COST, GameResult, Notification, Profile, ProfileStore, TestResult,
    Tier,
};

fn test_result(correctness: Vec<bool>, topic: Option<&str>) -> TestResult {
    TestResult {
        total_questions: correctness.len() as u32,
        correctness,
        topic_id: topic.map(|t| t.to_string()),
        duration_seconds: 75,
    }
}

#[test]
fn first_test_emits_exactly_one_bronze_unlock() {
    let facade = default_facade();
    let profile = Profile::new();

    // Imperfect short test: only the total-tests ladder can fire.
    let (next, notifications) =
        facade.record_test_result(&profile, test_result(vec![true, false, true], None));

    assert_eq!(next.stats.total_tests, 1);
    assert_eq!(
        notifications,
        vec![Notification::AchievementUnlocked {
            id: "test_rookie".to_string(),
            tier: Tier::Bronze,
            reward_stars: 1,
        }]
    );
    assert_eq!(next.stars, 1);
    assert_eq!(next.stats.total_stars_earned, 1);
}

#[test]
fn achievement_tier_pays_exactly_once() {
    let facade = default_facade();
    let mut profile = Profile::new();

    let mut bronze_payouts = 0;
    for _ in 0..3 {
        let (next, notifications) =
            facade.record_test_result(&profile, test_result(vec![true, false], None));
        bronze_payouts += notifications
            .iter()
            .filter(|n| {
                matches!(
                    n,
                    Notification::AchievementUnlocked { id, tier: Tier::Bronze, .. }
                        if id == "test_rookie"
                )
            })
            .count();
        profile = next;
    }
    assert_eq!(bronze_payouts, 1);
    assert_eq!(profile.stats.total_tests, 3);
}

#[test]
fn game_result_credits_payout_and_counts_win() {
    let facade = bare_facade();
    let profile = Profile::new();

    let (next, notifications) = facade.record_game_result(
        &profile,
        GameResult {
            game_type: "memory".to_string(),
            difficulty: Some("hard".to_string()),
            score: 18,
            stars_earned: 4,
            won: true,
        },
    );
    assert!(notifications.is_empty());
    assert_eq!(next.stars, 4);
    assert_eq!(next.stats.game_wins.get("memory_hard"), Some(&1));
    assert_eq!(next.stats.game_high_scores.get("memory"), Some(&18));
}

#[test]
fn buy_avatar_with_empty_balance_is_rejected_without_mutation() {
    let facade = default_facade();
    let profile = Profile::new();
    let snapshot = serde_json::to_string(&profile).unwrap();

    let err = facade.buy_avatar(&profile, "avatar_08", 30).unwrap_err();
    assert_eq!(
        err,
        EconomyError::InsufficientFunds {
            cost: 30,
            balance: 0
        }
    );
    assert_eq!(serde_json::to_string(&profile).unwrap(), snapshot);
}

#[test]
fn gacha_spin_on_fresh_profile_is_always_new() {
    let facade = bare_facade();
    let profile = profile_with_stars(GACHA_SPIN_COST);
    let mut rng = seeded_rng(42);

    let (next, notifications) = facade.spin_gacha(&profile, &mut rng).unwrap();
    assert_eq!(next.stars, 0);
    assert_eq!(next.owned_collectible_ids.len(), 1);
    match &notifications[0] {
        Notification::CollectibleGranted { collectible, is_new } => {
            assert!(*is_new);
            assert!(next.owns_collectible(&collectible.id));
        }
        other => panic!("expected a grant, got {other:?}"),
    }
    assert_eq!(next.stats.stars_spent, GACHA_SPIN_COST);
    assert_eq!(next.stats.total_cards, 1);
}

#[test]
fn duplicate_gacha_draw_refunds_ten_stars() {
    let facade = bare_facade();
    let mut profile = profile_with_stars(GACHA_SPIN_COST);
    // Own the entire catalog so every draw is a duplicate.
    for item in facade.context().catalog().items() {
        profile.owned_collectible_ids.insert(item.id.clone());
    }
    let owned_before = profile.owned_collectible_ids.len();
    let mut rng = seeded_rng(43);

    let (next, notifications) = facade.spin_gacha(&profile, &mut rng).unwrap();
    assert_eq!(next.stars, 10); // 50 - 50 + 10 refund
    assert_eq!(next.stats.stars_spent, 40);
    assert_eq!(next.owned_collectible_ids.len(), owned_before);
    assert!(matches!(
        notifications[0],
        Notification::CollectibleGranted { is_new: false, .. }
    ));
}

#[test]
fn gacha_spin_without_funds_is_rejected() {
    let facade = bare_facade();
    let profile = profile_with_stars(GACHA_SPIN_COST - 1);
    let mut rng = seeded_rng(44);

    let err = facade.spin_gacha(&profile, &mut rng).unwrap_err();
    assert!(matches!(err, EconomyError::InsufficientFunds { .. }));
}

#[test]
fn invariants_hold_across_a_session() {
    let facade = default_facade();
    let mut profile = profile_with_stars(200);
    let mut rng = seeded_rng(45);
    let mut previous_owned = profile.owned_collectible_ids.clone();

    for round in 0..10u64 {
        let (next, _) = facade.record_test_result(
            &profile,
            test_result(vec![true, true, round % 3 != 0], Some("addition")),
        );
        profile = next;
        if profile.stars >= GACHA_SPIN_COST {
            let (next, _) = facade.spin_gacha(&profile, &mut rng).unwrap();
            profile = next;
        }

        // Owned set only ever grows.
        assert!(profile.owned_collectible_ids.is_superset(&previous_owned));
        previous_owned = profile.owned_collectible_ids.clone();
        // Derived counter matches the canonical set.
        assert_eq!(
            profile.stats.total_cards as usize,
            profile.owned_collectible_ids.len()
        );
        // Tier sets never shrink and each tier appears at most once by type.
        for progress in profile.achievements.values() {
            assert!(progress.unlocked_tiers.len() <= 3);
        }
    }
    assert_eq!(profile.stats.total_tests, 10);
}

#[test]
fn legacy_profile_migrates_and_keeps_progressing() {
    let legacy = r#"{"stars": 60, "ownedCollectibleIds": ["card_frog", "card_owl"]}"#;
    let loaded = starpath::store::decode_profile(legacy).unwrap();
    assert!(loaded.migrated);

    let facade = default_facade();
    let (next, _) =
        facade.record_test_result(&loaded.profile, test_result(vec![true, true], None));
    assert_eq!(next.stats.total_tests, 1);
    assert_eq!(next.owned_collectible_ids.len(), 2);

    let store = starpath::MemoryStore::new();
    store.save(&next).unwrap();
    let reloaded = store.load(next.id).unwrap().unwrap();
    assert!(!reloaded.migrated);
    assert_eq!(reloaded.profile, next);
}
