//! Achievement system: static configuration and the evaluation engine.

mod config;
mod engine;

pub use config::{
    AchievementConfig, RuleKind, Tier, TierSpec, default_catalog, load_from_path,
    load_from_yaml, validate,
};
pub use engine::{Evaluation, TierUnlock, evaluate};
