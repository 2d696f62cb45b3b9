//! Daily shop rotation and purchases.
//!
//! The shop offers up to five unowned collectibles per calendar day. A
//! refresh replaces the whole slot list atomically and stamps every slot
//! with the refresh date; calling again on the same date is a no-op,
//! which makes the rotation idempotent within a day.

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::catalog::{Catalog, Collectible, Rarity};
use crate::error::EconomyError;
use crate::ledger;
use crate::profile::{Profile, ShopSlot};

/// Maximum number of shop slots.
pub const SHOP_SLOT_COUNT: usize = 5;

/// Refresh the shop if the stamped date differs from `today`.
///
/// Returns `None` when nothing needs to change: the slots are already
/// stamped with `today`, or the player owns the whole catalog and the
/// shop is already empty.
pub fn refresh_if_stale<R: Rng>(
    profile: &Profile,
    catalog: &Catalog,
    today: NaiveDate,
    rng: &mut R,
) -> Option<Profile> {
    if let Some(slot) = profile.shop_slots.first() {
        if slot.last_refresh_date == today {
            return None;
        }
    }

    let unowned: Vec<&Collectible> = catalog
        .items()
        .iter()
        .filter(|c| !profile.owns_collectible(&c.id))
        .collect();

    if unowned.is_empty() {
        if profile.shop_slots.is_empty() {
            return None;
        }
        let mut next = profile.clone();
        next.shop_slots.clear();
        return Some(next);
    }

    let picks = pick_slots(&unowned, rng);
    tracing::debug!(date = %today, slots = picks.len(), "shop refreshed");

    let mut next = profile.clone();
    next.shop_slots = picks
        .into_iter()
        .map(|c| ShopSlot {
            collectible_id: c.id.clone(),
            rarity: c.rarity,
            last_refresh_date: today,
        })
        .collect();
    Some(next)
}

/// Select up to 2 commons, 2 uncommons and 1 rare at random, then backfill
/// scarce buckets from the remaining pool in priority order
/// epic → legendary → rare → uncommon → common.
fn pick_slots<'a, R: Rng>(unowned: &[&'a Collectible], rng: &mut R) -> Vec<&'a Collectible> {
    let mut picks: Vec<&Collectible> = Vec::with_capacity(SHOP_SLOT_COUNT);

    for (rarity, count) in [
        (Rarity::Common, 2),
        (Rarity::Uncommon, 2),
        (Rarity::Rare, 1),
    ] {
        let bucket: Vec<&Collectible> = unowned
            .iter()
            .copied()
            .filter(|c| c.rarity == rarity)
            .collect();
        picks.extend(bucket.choose_multiple(rng, count).copied());
    }

    if picks.len() < SHOP_SLOT_COUNT {
        for rarity in [
            Rarity::Epic,
            Rarity::Legendary,
            Rarity::Rare,
            Rarity::Uncommon,
            Rarity::Common,
        ] {
            for candidate in unowned.iter().copied().filter(|c| c.rarity == rarity) {
                if picks.len() >= SHOP_SLOT_COUNT {
                    break;
                }
                if picks.iter().any(|p| p.id == candidate.id) {
                    continue;
                }
                picks.push(candidate);
            }
        }
    }

    picks
}

/// Buy one collectible out of the shop.
///
/// Fails with [`EconomyError::AlreadyOwned`] before any funds check, and
/// with [`EconomyError::InsufficientFunds`] when the price exceeds the
/// balance. On success the id joins the owned set and its slot (if any)
/// is removed; the remaining slots are untouched.
pub fn purchase(
    profile: &Profile,
    collectible_id: &str,
    price: u32,
) -> Result<Profile, EconomyError> {
    if profile.owns_collectible(collectible_id) {
        return Err(EconomyError::AlreadyOwned(collectible_id.to_string()));
    }
    let mut next = ledger::spend(profile, price)?;
    next.owned_collectible_ids.insert(collectible_id.to_string());
    next.shop_slots.retain(|s| s.collectible_id != collectible_id);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    #[test]
    fn test_refresh_fills_five_slots_and_stamps_date() {
        let profile = Profile::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let next = refresh_if_stale(&profile, Catalog::builtin(), today(), &mut rng).unwrap();

        assert_eq!(next.shop_slots.len(), SHOP_SLOT_COUNT);
        for slot in &next.shop_slots {
            assert_eq!(slot.last_refresh_date, today());
            assert!(!profile.owns_collectible(&slot.collectible_id));
        }
        // No duplicate offers
        let mut ids: Vec<&str> = next
            .shop_slots
            .iter()
            .map(|s| s.collectible_id.as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SHOP_SLOT_COUNT);
    }

    #[test]
    fn test_refresh_is_idempotent_within_a_day() {
        let profile = Profile::new();
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let refreshed = refresh_if_stale(&profile, Catalog::builtin(), today(), &mut rng).unwrap();

        let again = refresh_if_stale(&refreshed, Catalog::builtin(), today(), &mut rng);
        assert!(again.is_none());
        // A new date rotates again
        let tomorrow = today().succ_opt().unwrap();
        let rotated =
            refresh_if_stale(&refreshed, Catalog::builtin(), tomorrow, &mut rng).unwrap();
        assert_eq!(rotated.shop_slots[0].last_refresh_date, tomorrow);
    }

    #[test]
    fn test_scarce_pool_yields_exactly_the_unowned_ids() {
        // Own everything except 2 commons and 1 rare.
        let catalog = Catalog::builtin();
        let mut profile = Profile::new();
        let keep = ["card_frog", "card_snail", "card_wolf"];
        for item in catalog.items() {
            if !keep.contains(&item.id.as_str()) {
                profile.owned_collectible_ids.insert(item.id.clone());
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let next = refresh_if_stale(&profile, catalog, today(), &mut rng).unwrap();

        let mut offered: Vec<&str> = next
            .shop_slots
            .iter()
            .map(|s| s.collectible_id.as_str())
            .collect();
        offered.sort_unstable();
        let mut expected = keep.to_vec();
        expected.sort_unstable();
        assert_eq!(offered, expected);
    }

    #[test]
    fn test_fully_owned_catalog_empties_the_shop_once() {
        let catalog = Catalog::builtin();
        let mut profile = Profile::new();
        for item in catalog.items() {
            profile.owned_collectible_ids.insert(item.id.clone());
        }
        // Stale slot from yesterday
        profile.shop_slots.push(ShopSlot {
            collectible_id: "card_frog".to_string(),
            rarity: Rarity::Common,
            last_refresh_date: today().pred_opt().unwrap(),
        });

        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let next = refresh_if_stale(&profile, catalog, today(), &mut rng).unwrap();
        assert!(next.shop_slots.is_empty());

        // And stays a no-op afterwards
        assert!(refresh_if_stale(&next, catalog, today(), &mut rng).is_none());
    }

    #[test]
    fn test_backfill_prefers_epic_then_legendary() {
        // Only epics and legendaries remain: the quota rounds find
        // nothing and backfill fills all five slots.
        let catalog = Catalog::builtin();
        let mut profile = Profile::new();
        for item in catalog.items() {
            if !matches!(item.rarity, Rarity::Epic | Rarity::Legendary) {
                profile.owned_collectible_ids.insert(item.id.clone());
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let next = refresh_if_stale(&profile, catalog, today(), &mut rng).unwrap();
        assert_eq!(next.shop_slots.len(), SHOP_SLOT_COUNT);
        // 4 epics exist in the built-in catalog, so they all come first.
        let epics = next
            .shop_slots
            .iter()
            .take(4)
            .filter(|s| s.rarity == Rarity::Epic)
            .count();
        assert_eq!(epics, 4);
        assert_eq!(next.shop_slots[4].rarity, Rarity::Legendary);
    }

    #[test]
    fn test_purchase_distinguishes_error_causes() {
        let mut profile = Profile::new();
        profile.stars = 10;
        profile.owned_collectible_ids.insert("card_owl".to_string());

        let owned = purchase(&profile, "card_owl", 5).unwrap_err();
        assert_eq!(owned, EconomyError::AlreadyOwned("card_owl".to_string()));

        let broke = purchase(&profile, "card_fox", 25).unwrap_err();
        assert_eq!(
            broke,
            EconomyError::InsufficientFunds {
                cost: 25,
                balance: 10
            }
        );
    }

    #[test]
    fn test_purchase_removes_slot_and_spends() {
        let mut profile = Profile::new();
        profile.stars = 40;
        profile.shop_slots = vec![
            ShopSlot {
                collectible_id: "card_fox".to_string(),
                rarity: Rarity::Uncommon,
                last_refresh_date: today(),
            },
            ShopSlot {
                collectible_id: "card_frog".to_string(),
                rarity: Rarity::Common,
                last_refresh_date: today(),
            },
        ];

        let next = purchase(&profile, "card_fox", 25).unwrap();
        assert_eq!(next.stars, 15);
        assert!(next.owns_collectible("card_fox"));
        assert_eq!(next.shop_slots.len(), 1);
        assert_eq!(next.shop_slots[0].collectible_id, "card_frog");
    }
}
