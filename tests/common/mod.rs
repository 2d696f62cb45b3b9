//! Shared test fixtures for the progression engine integration tests.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::sync::{Arc, Once};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use starpath::{EngineContext, Profile, ProgressionFacade};

/// Install a tracing subscriber honoring `RUST_LOG`, once per binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Facade over the built-in catalogs.
pub fn default_facade() -> ProgressionFacade {
    init_tracing();
    ProgressionFacade::new(Arc::new(EngineContext::with_defaults()))
}

/// Facade with no achievements configured, for tests that assert exact
/// currency arithmetic without reward interference.
pub fn bare_facade() -> ProgressionFacade {
    let ctx = EngineContext::new(starpath::Catalog::builtin().clone(), vec![])
        .expect("empty config is valid");
    ProgressionFacade::new(Arc::new(ctx))
}

/// Deterministic RNG for reproducible draws.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Profile with a starting balance.
pub fn profile_with_stars(stars: u32) -> Profile {
    let mut profile = Profile::new();
    profile.stars = stars;
    profile
}
