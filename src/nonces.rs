//! `Nonces`: a deterministic, seed-indexed scalar sequence (spec.md §4.6).
//!
//! Ballot encryption needs many independent-looking nonces derived from one
//! short secret seed, reproducibly, without storing each one. Construction
//! folds the given `headers` into the raw `seed` exactly once, producing an
//! `internalSeed`; every subsequent `get(i)` derives `H(internalSeed, i)`,
//! so the same seed, headers, and index always reproduce the same scalar
//! and the sequence never needs to be materialized up front.

use crate::group::context::GroupContext;
use crate::group::element::ElementModQ;
use crate::hash::{hash_elements, Hashable};

/// A deterministic, conceptually infinite sequence of scalars derived from
/// one seed. `headers` given at construction (e.g. an election or contest
/// identifier) are folded into `internal_seed` once, so nonces from two
/// different headers never collide even with the same raw seed and index.
pub struct Nonces {
    context: &'static GroupContext,
    internal_seed: ElementModQ,
}

impl Nonces {
    pub fn new(seed: ElementModQ, headers: &[&str]) -> Self {
        let context = seed.context();
        let internal_seed = if headers.is_empty() {
            seed
        } else {
            let header_strings: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
            let mut items: Vec<&dyn Hashable> = Vec::with_capacity(1 + header_strings.len());
            items.push(&seed);
            for header in &header_strings {
                items.push(header);
            }
            hash_elements(context, &items)
        };
        Nonces {
            context,
            internal_seed,
        }
    }

    pub fn internal_seed(&self) -> &ElementModQ {
        &self.internal_seed
    }

    /// The `index`-th nonce in the sequence.
    pub fn get(&self, index: u64) -> ElementModQ {
        self.get_with_headers(index, &[])
    }

    /// Like [`Nonces::get`], mixing in additional fragments beyond what was
    /// folded into `internal_seed` at construction (e.g. a per-call salt).
    pub fn get_with_headers(&self, index: u64, extra: &[&dyn Hashable]) -> ElementModQ {
        let mut items: Vec<&dyn Hashable> = Vec::with_capacity(2 + extra.len());
        items.push(&self.internal_seed);
        items.push(&index);
        items.extend_from_slice(extra);
        hash_elements(self.context, &items)
    }

    /// An iterator over the sequence starting at index 0. The sequence has
    /// no natural end, so callers combine this with `.take(n)`.
    pub fn iter(&self) -> NoncesIter<'_> {
        NoncesIter {
            nonces: self,
            next_index: 0,
        }
    }
}

/// Never yields `None`; pair with `.take(n)` to bound consumption.
pub struct NoncesIter<'a> {
    nonces: &'a Nonces,
    next_index: u64,
}

impl<'a> Iterator for NoncesIter<'a> {
    type Item = ElementModQ;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.nonces.get(self.next_index);
        self.next_index += 1;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::context::standard_context_3072;
    use num_bigint::BigUint;

    #[test]
    fn is_deterministic_per_index() {
        let ctx = standard_context_3072();
        let seed = ctx.element_mod_q_checked(&BigUint::from(42u32)).unwrap();
        let nonces = Nonces::new(seed, &[]);
        assert_eq!(nonces.get(5), nonces.get(5));
    }

    #[test]
    fn distinct_indices_differ() {
        let ctx = standard_context_3072();
        let seed = ctx.element_mod_q_checked(&BigUint::from(42u32)).unwrap();
        let nonces = Nonces::new(seed, &[]);
        assert_ne!(nonces.get(0), nonces.get(1));
    }

    #[test]
    fn distinct_headers_differ() {
        let ctx = standard_context_3072();
        let seed = ctx.element_mod_q_checked(&BigUint::from(42u32)).unwrap();
        let a = Nonces::new(seed.clone(), &["contest-1"]);
        let b = Nonces::new(seed, &["contest-2"]);
        assert_ne!(a.get(0), b.get(0));
    }

    #[test]
    fn iterator_take_matches_direct_get() {
        let ctx = standard_context_3072();
        let seed = ctx.element_mod_q_checked(&BigUint::from(7u32)).unwrap();
        let nonces = Nonces::new(seed, &[]);
        let collected: Vec<_> = nonces.iter().take(4).collect();
        for (i, value) in collected.iter().enumerate() {
            assert_eq!(value, &nonces.get(i as u64));
        }
    }
}
