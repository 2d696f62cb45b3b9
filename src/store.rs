//! Persistence seam: profile blobs keyed by profile id.
//!
//! The engine itself never does IO; callers load a profile, run facade
//! operations, and save the returned snapshot. The codec tolerates
//! legacy records that predate parts of the schema: missing fields are
//! backfilled with zero-valued defaults and the load is flagged as
//! migrated so callers can log it.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::profile::Profile;

/// Errors raised by a profile store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("profile codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// A decoded profile plus whether legacy fields had to be defaulted.
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub profile: Profile,
    /// True when the stored blob lacked schema fields and zero-valued
    /// defaults were backfilled.
    pub migrated: bool,
}

/// Durable blob store keyed by profile id.
pub trait ProfileStore {
    fn load(&self, id: Uuid) -> Result<Option<LoadedProfile>, StoreError>;
    fn save(&self, profile: &Profile) -> Result<(), StoreError>;
    /// Remove the record entirely (account deletion).
    fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Serialize a profile to its persisted JSON form.
pub fn encode_profile(profile: &Profile) -> Result<String, StoreError> {
    Ok(serde_json::to_string(profile)?)
}

/// Decode a persisted blob, backfilling missing legacy fields.
pub fn decode_profile(json: &str) -> Result<LoadedProfile, StoreError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let migrated = REQUIRED_FIELDS
        .iter()
        .any(|field| value.get(field).is_none());
    let profile: Profile = serde_json::from_value(value)?;
    if migrated {
        tracing::info!(profile = %profile.id, "legacy profile record defaulted");
    }
    Ok(LoadedProfile { profile, migrated })
}

/// Top-level schema fields a current record always carries.
static REQUIRED_FIELDS: &[&str] = &[
    "stars",
    "ownedCollectibleIds",
    "ownedAvatarIds",
    "ownedThemeIds",
    "achievements",
    "stats",
    "shopSlots",
];

/// In-memory store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: Arc<Mutex<BTreeMap<Uuid, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().expect("lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self, id: Uuid) -> Result<Option<LoadedProfile>, StoreError> {
        let blobs = self.blobs.lock().expect("lock");
        let Some(json) = blobs.get(&id) else {
            return Ok(None);
        };
        let mut loaded = decode_profile(json)?;
        // The store key is authoritative for identity.
        loaded.profile.id = id;
        Ok(Some(loaded))
    }

    fn save(&self, profile: &Profile) -> Result<(), StoreError> {
        let json = encode_profile(profile)?;
        let mut blobs = self.blobs.lock().expect("lock");
        blobs.insert(profile.id, json);
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut blobs = self.blobs.lock().expect("lock");
        blobs.remove(&id);
        Ok(())
    }
}
