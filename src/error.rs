//! Error taxonomy for the progression engine.
//!
//! Business errors are recoverable: callers branch on them and show a
//! message, nothing is propagated as fatal. Config errors are raised once
//! at startup while building the engine context and abort initialization.

/// Recoverable business errors returned by facade and component operations.
///
/// Every operation either fully applies or fully rejects; when one of
/// these is returned, the input profile is untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EconomyError {
    /// A spend exceeded the current star balance.
    #[error("insufficient funds: cost {cost} exceeds balance of {balance} stars")]
    InsufficientFunds { cost: u32, balance: u32 },

    /// A purchase targeted an id that is already in the owned set.
    #[error("'{0}' is already owned")]
    AlreadyOwned(String),

    /// A gacha draw was attempted against a catalog with zero collectibles.
    #[error("collectible catalog is empty")]
    EmptyCatalog,
}

/// Fatal configuration errors.
///
/// These indicate broken content or a programmer error and are only
/// produced while loading catalogs at process start.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("duplicate achievement id: {0}")]
    DuplicateAchievement(String),

    #[error("achievement '{0}' defines no tiers")]
    EmptyTiers(String),

    #[error("achievement '{0}' tiers are not in ascending threshold order")]
    UnsortedTiers(String),

    #[error("achievement '{0}' defines the same tier twice")]
    DuplicateTier(String),

    #[error("duplicate collectible id: {0}")]
    DuplicateCollectible(String),
}
