//! The `hash_elements` contract (spec.md §4.7): SHA-256 over a
//! length-delimited, pipe-framed encoding of heterogeneous items, reduced
//! into `[0, Q)`.
//!
//! Every item is rendered to a UTF-8 fragment and the fragments are joined
//! as `"|frag_0|frag_1|...|frag_n|"`. An empty item list is special-cased
//! to the literal string `"|null|"` rather than `"||"`, so that
//! `hash_elements(ctx, &[])` is distinguishable from hashing a single
//! already-empty fragment.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use crate::group::context::GroupContext;
use crate::group::element::{ElementModP, ElementModQ};

/// Anything that can be framed as one fragment of a `hash_elements` call.
///
/// Numbers and strings render as their own text; group elements render as
/// uppercase hex; nested arrays render as the hex digest of recursively
/// hashing their own contents, so structure is preserved instead of
/// flattened into the parent's fragment list.
pub trait Hashable {
    fn hash_fragment(&self, context: &'static GroupContext) -> String;
}

impl Hashable for ElementModQ {
    fn hash_fragment(&self, _context: &'static GroupContext) -> String {
        self.to_hex()
    }
}

impl Hashable for ElementModP {
    fn hash_fragment(&self, _context: &'static GroupContext) -> String {
        self.to_hex()
    }
}

impl Hashable for u64 {
    fn hash_fragment(&self, _context: &'static GroupContext) -> String {
        self.to_string()
    }
}

impl Hashable for i64 {
    fn hash_fragment(&self, _context: &'static GroupContext) -> String {
        self.to_string()
    }
}

impl Hashable for str {
    fn hash_fragment(&self, _context: &'static GroupContext) -> String {
        self.to_string()
    }
}

impl Hashable for String {
    fn hash_fragment(&self, _context: &'static GroupContext) -> String {
        self.clone()
    }
}

impl<T: Hashable> Hashable for Option<T> {
    fn hash_fragment(&self, context: &'static GroupContext) -> String {
        match self {
            Some(value) => value.hash_fragment(context),
            None => "null".to_string(),
        }
    }
}

impl<T: Hashable> Hashable for [T] {
    /// Nested arrays hash their own contents first, then splice the
    /// resulting digest in as a single hex fragment, so a two-element
    /// outer list with a three-element inner list can't collide with a
    /// five-element flat list.
    fn hash_fragment(&self, context: &'static GroupContext) -> String {
        let refs: Vec<&dyn Hashable> = self.iter().map(|item| item as &dyn Hashable).collect();
        hash_elements(context, &refs).to_hex()
    }
}

impl<T: Hashable> Hashable for Vec<T> {
    fn hash_fragment(&self, context: &'static GroupContext) -> String {
        self.as_slice().hash_fragment(context)
    }
}

/// Hashes `items` per spec.md §4.7 and reduces the SHA-256 digest mod `Q`.
pub fn hash_elements(context: &'static GroupContext, items: &[&dyn Hashable]) -> ElementModQ {
    let framed = if items.is_empty() {
        "|null|".to_string()
    } else {
        let mut framed = String::from("|");
        for item in items {
            framed.push_str(&item.hash_fragment(context));
            framed.push('|');
        }
        framed
    };

    let digest = Sha256::digest(framed.as_bytes());
    let value = BigUint::from_bytes_be(&digest) % &context.parameters().q;
    context.element_mod_q(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::context::standard_context_3072;

    #[test]
    fn empty_argument_list_hashes_the_null_sentinel() {
        let ctx = standard_context_3072();
        let expected_digest = Sha256::digest(b"|null|");
        let expected = BigUint::from_bytes_be(&expected_digest) % &ctx.parameters().q;
        assert_eq!(hash_elements(ctx, &[]).value(), &expected);
    }

    #[test]
    fn is_deterministic() {
        let ctx = standard_context_3072();
        let a = 7u64;
        let b = "hello".to_string();
        let first = hash_elements(ctx, &[&a, &b]);
        let second = hash_elements(ctx, &[&a, &b]);
        assert_eq!(first, second);
    }

    #[test]
    fn distinguishes_argument_boundaries() {
        let ctx = standard_context_3072();
        let ab = "ab".to_string();
        let c = "c".to_string();
        let abc = "abc".to_string();
        let split = hash_elements(ctx, &[&ab as &dyn Hashable, &c as &dyn Hashable]);
        let joined = hash_elements(ctx, &[&abc as &dyn Hashable]);
        assert_ne!(split, joined);
    }

    #[test]
    fn nested_arrays_are_not_flattened() {
        let ctx = standard_context_3072();
        let inner: Vec<u64> = vec![1, 2, 3];
        let flat: Vec<u64> = vec![1, 2, 3];
        let nested_hash = hash_elements(ctx, &[&inner]);
        let flat_hash = hash_elements(ctx, &[&flat[0], &flat[1], &flat[2]]);
        assert_ne!(nested_hash, flat_hash);
    }
}
