//! Collectible rarities and the global collectible catalog.
//!
//! The catalog is fixed for the process lifetime. Profiles only ever store
//! collectible ids; everything else (name, rarity) is looked up here.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Rarity tier of a collectible, ordered from most to least frequent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// All rarities in draw-walk order (most frequent first).
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Sum of all gacha weights.
    pub const TOTAL_WEIGHT: u32 = 100;

    /// Fixed gacha weight out of [`Rarity::TOTAL_WEIGHT`].
    pub fn weight(&self) -> u32 {
        match self {
            Self::Common => 44,
            Self::Uncommon => 30,
            Self::Rare => 20,
            Self::Epic => 5,
            Self::Legendary => 1,
        }
    }

    /// Canonical string representation (matches the persisted schema).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    /// Parse from the persisted string form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "common" => Some(Self::Common),
            "uncommon" => Some(Self::Uncommon),
            "rare" => Some(Self::Rare),
            "epic" => Some(Self::Epic),
            "legendary" => Some(Self::Legendary),
            _ => None,
        }
    }

    /// Position in [`Rarity::ALL`].
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// One entry of the global collectible catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub rarity: Rarity,
}

/// The immutable global collectible catalog.
///
/// Built once at startup, shared by gacha draws and shop rotation.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Collectible>,
    by_id: BTreeMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(items: Vec<Collectible>) -> Result<Self, ConfigError> {
        let mut by_id = BTreeMap::new();
        for (idx, item) in items.iter().enumerate() {
            if by_id.insert(item.id.clone(), idx).is_some() {
                return Err(ConfigError::DuplicateCollectible(item.id.clone()));
            }
        }
        Ok(Self { items, by_id })
    }

    /// The built-in catalog shipped with the app.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
            Catalog::new(builtin_collectibles()).expect("built-in catalog has unique ids")
        });
        &BUILTIN
    }

    pub fn get(&self, id: &str) -> Option<&Collectible> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    pub fn items(&self) -> &[Collectible] {
        &self.items
    }

    /// All items of one rarity, in catalog order.
    pub fn of_rarity(&self, rarity: Rarity) -> Vec<&Collectible> {
        self.items.iter().filter(|c| c.rarity == rarity).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Catalog content: (id, name, icon, rarity).
static COLLECTIBLES: &[(&str, &str, &str, Rarity)] = &[
    // === COMMON ===
    ("card_ladybug", "Lucky Ladybug", "🐞", Rarity::Common),
    ("card_snail", "Slow Snail", "🐌", Rarity::Common),
    ("card_frog", "Pond Frog", "🐸", Rarity::Common),
    ("card_mouse", "Field Mouse", "🐭", Rarity::Common),
    ("card_duck", "Puddle Duck", "🦆", Rarity::Common),
    ("card_rabbit", "Meadow Rabbit", "🐰", Rarity::Common),
    ("card_hedgehog", "Tiny Hedgehog", "🦔", Rarity::Common),
    ("card_bee", "Busy Bee", "🐝", Rarity::Common),
    ("card_butterfly", "Paper Butterfly", "🦋", Rarity::Common),
    ("card_squirrel", "Nutty Squirrel", "🐿️", Rarity::Common),
    // === UNCOMMON ===
    ("card_fox", "Clever Fox", "🦊", Rarity::Uncommon),
    ("card_owl", "Night Owl", "🦉", Rarity::Uncommon),
    ("card_penguin", "Ice Penguin", "🐧", Rarity::Uncommon),
    ("card_koala", "Sleepy Koala", "🐨", Rarity::Uncommon),
    ("card_panda", "Bamboo Panda", "🐼", Rarity::Uncommon),
    ("card_dolphin", "Wave Dolphin", "🐬", Rarity::Uncommon),
    ("card_parrot", "Chatty Parrot", "🦜", Rarity::Uncommon),
    ("card_turtle", "Ancient Turtle", "🐢", Rarity::Uncommon),
    // === RARE ===
    ("card_wolf", "Moon Wolf", "🐺", Rarity::Rare),
    ("card_lion", "Golden Lion", "🦁", Rarity::Rare),
    ("card_eagle", "Storm Eagle", "🦅", Rarity::Rare),
    ("card_whale", "Deep Whale", "🐋", Rarity::Rare),
    ("card_peacock", "Royal Peacock", "🦚", Rarity::Rare),
    ("card_octopus", "Puzzle Octopus", "🐙", Rarity::Rare),
    // === EPIC ===
    ("card_unicorn", "Star Unicorn", "🦄", Rarity::Epic),
    ("card_trex", "Thunder Rex", "🦖", Rarity::Epic),
    ("card_mammoth", "Frost Mammoth", "🦣", Rarity::Epic),
    ("card_griffin", "Sky Griffin", "🪽", Rarity::Epic),
    // === LEGENDARY ===
    ("card_dragon", "Number Dragon", "🐉", Rarity::Legendary),
    ("card_phoenix", "Sun Phoenix", "🔥", Rarity::Legendary),
];

fn builtin_collectibles() -> Vec<Collectible> {
    COLLECTIBLES
        .iter()
        .map(|&(id, name, icon, rarity)| Collectible {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            rarity,
        })
        .collect()
}
