//! Bounded discrete-log cache (spec.md §4.5).
//!
//! Recovering a small plaintext tally from `G^tally mod P` means inverting
//! exponentiation by brute force: walk `G^0, G^1, G^2, ...` until the
//! target is found. `DLogger` remembers every step it has already taken so
//! repeated lookups (one per candidate tally, across many ballots) reuse
//! the same walk instead of restarting from zero.

use std::collections::HashMap;
use std::sync::Mutex;

use num_bigint::BigUint;
use num_traits::One;

use crate::error::GroupError;
use crate::group::context::GroupContext;
use crate::group::element::ElementModP;

/// The walk never proceeds past this many steps unless a caller raises
/// the bound explicitly via [`DLogger::with_max`]. `1_000_000` covers any
/// plausible single-race tally while keeping a worst-case miss bounded.
pub const DEFAULT_MAX_EXPONENT: u64 = 1_000_000;

struct DLoggerState {
    /// `g^k mod P -> k` for every `k` walked so far.
    cache: HashMap<BigUint, u64>,
    /// `g^last_k mod P`, the running point the next step multiplies by `g`.
    last_value: BigUint,
    last_k: u64,
}

/// A monotone, per-context cache mapping `g^k mod P` back to `k` for
/// `k` in `[0, max_exponent]`.
pub struct DLogger {
    context: &'static GroupContext,
    max_exponent: u64,
    state: Mutex<DLoggerState>,
}

impl DLogger {
    pub(crate) fn new(context: &'static GroupContext) -> Self {
        Self::with_max(context, DEFAULT_MAX_EXPONENT)
    }

    pub fn with_max(context: &'static GroupContext, max_exponent: u64) -> Self {
        let mut cache = HashMap::new();
        cache.insert(BigUint::one(), 0u64);
        DLogger {
            context,
            max_exponent,
            state: Mutex::new(DLoggerState {
                cache,
                last_value: BigUint::one(),
                last_k: 0,
            }),
        }
    }

    pub fn max_exponent(&self) -> u64 {
        self.max_exponent
    }

    /// Finds `k` such that `g^k mod P == element`, extending the cached
    /// walk as needed. Returns `None` (not an error) once `k` would exceed
    /// `max_exponent` without a match, per spec.md §7's "DLogExhausted is
    /// a recoverable outcome, not a thrown exception" framing.
    pub fn lookup(&self, element: &ElementModP) -> Option<u64> {
        if !std::ptr::eq(element.context(), self.context) {
            return None;
        }
        let target = element.value();
        let mut state = self.state.lock().expect("DLogger mutex poisoned");

        if let Some(k) = state.cache.get(target) {
            return Some(*k);
        }

        let g = &self.context.parameters().g;
        let p = &self.context.parameters().p;
        while state.last_k < self.max_exponent {
            let next_k = state.last_k + 1;
            let next_value = (&state.last_value * g) % p;
            state.cache.insert(next_value.clone(), next_k);
            state.last_value = next_value;
            state.last_k = next_k;
            if state.last_value == *target {
                return Some(next_k);
            }
        }
        None
    }

    /// Same as [`DLogger::lookup`], surfaced as `Result` for call sites
    /// that want `?` instead of matching on `Option`.
    pub fn lookup_or_fail(&self, element: &ElementModP) -> Result<u64, GroupError> {
        self.lookup(element).ok_or(GroupError::DLogExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::context::standard_context_3072;

    #[test]
    fn finds_small_exponents() {
        let ctx = standard_context_3072();
        let dlog = DLogger::with_max(ctx, 100);
        for k in 0u64..10 {
            let element = ctx.g_pow_p(k);
            assert_eq!(dlog.lookup(&element), Some(k));
        }
    }

    #[test]
    fn reuses_the_cache_across_calls() {
        let ctx = standard_context_3072();
        let dlog = DLogger::with_max(ctx, 1000);
        let target = ctx.g_pow_p(50u64);
        assert_eq!(dlog.lookup(&target), Some(50));
        // Second lookup of a smaller exponent must hit the cache, not re-walk.
        let smaller = ctx.g_pow_p(10u64);
        assert_eq!(dlog.lookup(&smaller), Some(10));
    }

    #[test]
    fn exhausts_past_the_bound() {
        let ctx = standard_context_3072();
        let dlog = DLogger::with_max(ctx, 5);
        let target = ctx.g_pow_p(6u64);
        assert_eq!(dlog.lookup(&target), None);
        assert_eq!(dlog.lookup_or_fail(&target), Err(GroupError::DLogExhausted));
    }
}
