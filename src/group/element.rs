//! Value types for residues mod `Q` and mod `P` (spec.md §3, §4.2).

use std::cmp::Ordering;
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::Serialize;

use crate::group::context::GroupContext;
use crate::group::pow_radix::PowRadixTable;

/// Either a small non-negative integer exponent or a scalar in `[0, Q)`.
///
/// `ElementModP::pow_p` accepts anything convertible into this so callers
/// can write `base.pow_p(3u64)` or `base.pow_p(scalar)` without picking a
/// method name per overload, matching spec.md §3's "exponent is either a
/// non-negative small integer or an `ElementModQ`".
#[derive(Clone, Debug)]
pub enum Exponent {
    Small(u64),
    Scalar(ElementModQ),
}

impl From<u64> for Exponent {
    fn from(value: u64) -> Self {
        Exponent::Small(value)
    }
}

impl From<ElementModQ> for Exponent {
    fn from(value: ElementModQ) -> Self {
        Exponent::Scalar(value)
    }
}

impl From<&ElementModQ> for Exponent {
    fn from(value: &ElementModQ) -> Self {
        Exponent::Scalar(value.clone())
    }
}

impl Exponent {
    fn to_biguint(&self) -> BigUint {
        match self {
            Exponent::Small(k) => BigUint::from(*k),
            Exponent::Scalar(e) => e.value.clone(),
        }
    }
}

/// A non-negative integer strictly less than `Q`, paired with the context
/// it was created from (spec.md §3).
#[derive(Clone, Debug)]
pub struct ElementModQ {
    value: BigUint,
    context: &'static GroupContext,
}

impl ElementModQ {
    /// Callers outside `group::context` never construct this directly;
    /// `GroupContext`'s factories are the only entry point, so that every
    /// value is guaranteed to be in `[0, Q)` before it exists.
    pub(crate) fn new_unchecked(value: BigUint, context: &'static GroupContext) -> Self {
        debug_assert!(&value < &context.parameters().q, "ElementModQ out of range");
        ElementModQ { value, context }
    }

    pub fn context(&self) -> &'static GroupContext {
        self.context
    }

    /// The raw integer view.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// `0 <= self < Q`. Always true by construction; kept as a predicate
    /// per spec.md §4.1's "in-bounds predicates" requirement.
    pub fn is_in_bounds(&self) -> bool {
        self.value < self.context.parameters().q
    }

    /// `0 < self < Q`.
    pub fn is_in_bounds_no_zero(&self) -> bool {
        self.is_in_bounds() && !self.is_zero()
    }

    /// Minimal-length big-endian bytes; zero encodes as the empty slice.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }

    /// Uppercase hex, always an even number of characters (spec.md §9:
    /// this core mandates the padded variant over the odd-length one).
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.to_bytes_be())
    }

    /// Fixed-width 32-byte big-endian canonical form consumed by the hash
    /// layer (spec.md §4.2). `Q` is always under 2^256 for the recognized
    /// parameter sets, so this only ever zero-pads, never truncates.
    pub fn to_uint256(&self) -> [u8; 32] {
        let bytes = self.to_bytes_be();
        let mut out = [0u8; 32];
        out[32 - bytes.len()..].copy_from_slice(&bytes);
        out
    }
}

impl PartialEq for ElementModQ {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && std::ptr::eq(self.context, other.context)
    }
}

impl Eq for ElementModQ {}

impl PartialOrd for ElementModQ {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ElementModQ {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Serialize for ElementModQ {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// A non-negative integer strictly less than `P` (spec.md §3). When
/// `accel` is populated, `pow_p` is backed by a [`PowRadixTable`] instead
/// of a direct `modpow` — the "`AcceleratedElementModP`" of spec.md is
/// this type with `accel: Some(_)` rather than a distinct subclass (see
/// spec.md §9's tagged-variant design note).
#[derive(Clone)]
pub struct ElementModP {
    value: BigUint,
    context: &'static GroupContext,
    accel: Option<Arc<PowRadixTable>>,
}

impl std::fmt::Debug for ElementModP {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementModP")
            .field("value", &self.to_hex())
            .field("accelerated", &self.accel.is_some())
            .finish()
    }
}

impl ElementModP {
    pub(crate) fn new_unchecked(value: BigUint, context: &'static GroupContext) -> Self {
        debug_assert!(&value < &context.parameters().p, "ElementModP out of range");
        ElementModP {
            value,
            context,
            accel: None,
        }
    }

    pub(crate) fn new_accelerated(
        value: BigUint,
        context: &'static GroupContext,
        table: Arc<PowRadixTable>,
    ) -> Self {
        ElementModP {
            value,
            context,
            accel: Some(table),
        }
    }

    pub fn context(&self) -> &'static GroupContext {
        self.context
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_in_bounds(&self) -> bool {
        self.value < self.context.parameters().p
    }

    pub fn is_in_bounds_no_zero(&self) -> bool {
        self.is_in_bounds() && !self.is_zero()
    }

    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.to_bytes_be())
    }

    /// `true` iff `self` is in bounds and `self^Q ≡ 1 (mod P)`, i.e. a
    /// member of the order-`Q` subgroup (spec.md §4.2).
    pub fn is_valid_residue(&self) -> bool {
        let params = self.context.parameters();
        let in_subgroup = self.is_in_bounds() && self.value.modpow(&params.q, &params.p).is_one();
        if !in_subgroup {
            tracing::debug!(
                target: "eg_group_core::group::element",
                value = %self.to_hex(),
                "element failed subgroup membership check"
            );
        }
        in_subgroup
    }

    /// Returns a functionally equivalent element backed by a `PowRadix`
    /// table. Idempotent: calling this on an already-accelerated element
    /// returns a clone of `self` (spec.md §4.3).
    pub fn accelerate_pow(&self) -> ElementModP {
        if let Some(table) = &self.accel {
            debug_assert_eq!(table.base(), &self.value);
            return self.clone();
        }
        let params = self.context.parameters();
        let table = Arc::new(PowRadixTable::build(
            self.value.clone(),
            &params.p,
            params.q.bits() as u32,
        ));
        ElementModP::new_accelerated(self.value.clone(), self.context, table)
    }

    /// `self^exponent mod P`. `exponent == 0` and `exponent == 1`
    /// short-circuit without touching the table or running `modpow`
    /// (spec.md §4.1).
    pub fn pow_p(&self, exponent: impl Into<Exponent>) -> ElementModP {
        let e = exponent.into().to_biguint();
        if e.is_zero() {
            return self.context.constants().one_mod_p.clone();
        }
        if e.is_one() {
            return self.clone();
        }
        let value = match &self.accel {
            Some(table) => table.pow(&e),
            None => self.value.modpow(&e, &self.context.parameters().p),
        };
        // The result is a new value, not `self`'s base, so it does not
        // inherit `self`'s table: acceleration is a property of the base
        // being raised to a power, not of the power itself.
        ElementModP::new_unchecked(value, self.context)
    }
}

impl PartialEq for ElementModP {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && std::ptr::eq(self.context, other.context)
    }
}

impl Eq for ElementModP {}

impl PartialOrd for ElementModP {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ElementModP {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Serialize for ElementModP {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use crate::group::context::standard_context_3072;
    use num_bigint::BigUint;

    #[test]
    fn even_length_hex_round_trips() {
        let ctx = standard_context_3072();
        let e = ctx.element_mod_q_checked(&BigUint::from(3u32)).unwrap();
        let hex = e.to_hex();
        assert_eq!(hex.len() % 2, 0);
        let back = ctx.element_mod_q_from_hex_checked(&hex).unwrap();
        assert_eq!(e, back);
    }

    #[test]
    fn zero_is_zero() {
        let ctx = standard_context_3072();
        let zero = ctx.element_mod_q_checked(&BigUint::from(0u32)).unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero, ctx.constants().zero_mod_q.clone());
    }

    #[test]
    fn ordering_compares_the_underlying_integer() {
        let ctx = standard_context_3072();
        let three = ctx.element_mod_q_checked(&BigUint::from(3u32)).unwrap();
        let four = ctx.element_mod_q_checked(&BigUint::from(4u32)).unwrap();
        assert!(three < four);
    }

    #[test]
    fn accelerate_pow_is_idempotent() {
        let ctx = standard_context_3072();
        let g = ctx.constants().g_mod_p.clone();
        let accelerated_twice = g.accelerate_pow().accelerate_pow();
        assert_eq!(accelerated_twice.value(), g.value());
    }
}
