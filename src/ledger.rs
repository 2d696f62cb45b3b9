//! Currency ledger: the only code path that changes a star balance.
//!
//! Both functions are pure snapshot updates. `spend` rejects without
//! mutation when the cost exceeds the balance, which keeps the
//! non-negative balance invariant by construction.

use crate::error::EconomyError;
use crate::profile::Profile;

/// Deduct `cost` stars, failing with [`EconomyError::InsufficientFunds`]
/// when the balance is too low.
pub fn spend(profile: &Profile, cost: u32) -> Result<Profile, EconomyError> {
    if cost > profile.stars {
        return Err(EconomyError::InsufficientFunds {
            cost,
            balance: profile.stars,
        });
    }
    let mut next = profile.clone();
    next.stars -= cost;
    Ok(next)
}

/// Add `amount` stars to the balance.
pub fn credit(profile: &Profile, amount: u32) -> Profile {
    let mut next = profile.clone();
    next.stars += amount;
    next
}
