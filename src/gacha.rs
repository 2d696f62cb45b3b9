//! Weighted-random collectible draws.
//!
//! A draw rolls a rarity from the fixed weight table, falls back to the
//! nearest non-empty bucket when the catalog has no items of the rolled
//! rarity, then picks uniformly within the bucket. Ownership never
//! excludes candidates; it only decides `is_new`.

use std::collections::BTreeSet;

use rand::Rng;

use crate::catalog::{Catalog, Collectible, Rarity};
use crate::error::EconomyError;

/// Outcome of one gacha draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GachaDraw {
    pub collectible: Collectible,
    /// False when the profile already owned the drawn id (duplicate).
    pub is_new: bool,
}

/// Draw one collectible from the catalog.
///
/// Pass `&mut rand::rng()` in production, or a seeded
/// `rand_chacha::ChaCha8Rng` in tests for deterministic behavior.
pub fn draw<R: Rng>(
    catalog: &Catalog,
    owned: &BTreeSet<String>,
    rng: &mut R,
) -> Result<GachaDraw, EconomyError> {
    if catalog.is_empty() {
        return Err(EconomyError::EmptyCatalog);
    }

    let roll = rng.random_range(0..Rarity::TOTAL_WEIGHT);
    let rolled = rarity_for_roll(roll);
    // Catalog is non-empty, so some bucket resolves.
    let bucket = resolve_bucket(catalog, rolled).expect("non-empty catalog has a bucket");

    let collectible = bucket[rng.random_range(0..bucket.len())].clone();
    let is_new = !owned.contains(&collectible.id);
    tracing::debug!(
        id = %collectible.id,
        rarity = collectible.rarity.as_str(),
        is_new,
        "gacha draw"
    );
    Ok(GachaDraw { collectible, is_new })
}

/// Map a roll in `[0, TOTAL_WEIGHT)` to a rarity by walking the weight
/// table in fixed order and subtracting until the roll goes negative.
pub(crate) fn rarity_for_roll(roll: u32) -> Rarity {
    let mut remaining = roll as i64;
    for rarity in Rarity::ALL {
        remaining -= rarity.weight() as i64;
        if remaining < 0 {
            return rarity;
        }
    }
    // Unreachable while the weights sum to TOTAL_WEIGHT.
    Rarity::Legendary
}

/// Find the bucket for the rolled rarity: the bucket itself if non-empty,
/// else the first non-empty bucket scanning toward legendary, else the
/// first non-empty bucket scanning back toward common.
fn resolve_bucket(catalog: &Catalog, rolled: Rarity) -> Option<Vec<&Collectible>> {
    let start = rolled.index();
    for rarity in &Rarity::ALL[start..] {
        let bucket = catalog.of_rarity(*rarity);
        if !bucket.is_empty() {
            return Some(bucket);
        }
    }
    for rarity in Rarity::ALL[..start].iter().rev() {
        let bucket = catalog.of_rarity(*rarity);
        if !bucket.is_empty() {
            return Some(bucket);
        }
    }
    None
}
