//! Starpath progression engine
//!
//! Turns gameplay and test events into durable progression: star currency,
//! tiered achievement unlocks, weighted-random collectible draws, and a
//! daily-rotating shop. The engine is purely synchronous: every operation
//! takes an immutable profile snapshot and returns a new one together with
//! the notifications the UI should display.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use starpath::{EngineContext, Profile, ProgressionFacade, TestResult};
//!
//! let facade = ProgressionFacade::new(Arc::new(EngineContext::with_defaults()));
//! let profile = Profile::new();
//!
//! let (profile, notifications) = facade.record_test_result(
//!     &profile,
//!     TestResult {
//!         total_questions: 5,
//!         correctness: vec![true, true, true, true, true],
//!         topic_id: Some("addition".to_string()),
//!         duration_seconds: 80,
//!     },
//! );
//! assert_eq!(profile.stats.total_tests, 1);
//! assert!(!notifications.is_empty());
//! ```
//!
//! The caller must persist the returned snapshot before issuing the next
//! operation against the same profile; there is no version check.

pub mod achievements;
pub mod catalog;
pub mod error;
pub mod events;
pub mod facade;
pub mod gacha;
pub mod ledger;
pub mod profile;
pub mod shop;
pub mod store;

pub use achievements::{AchievementConfig, RuleKind, Tier, TierSpec};
pub use catalog::{Catalog, Collectible, Rarity};
pub use error::{ConfigError, EconomyError};
pub use events::{GameResult, ProgressEvent, TestResult};
pub use facade::{
    EngineContext, GACHA_DUPLICATE_REFUND, GACHA_SPIN_COST, Notification, ProgressionFacade,
};
pub use gacha::GachaDraw;
pub use profile::{AchievementProgress, Profile, ShopSlot, Stats};
pub use store::{LoadedProfile, MemoryStore, ProfileStore, StoreError};
