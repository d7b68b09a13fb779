//! `GroupContext`: the arithmetic factory and operation surface bound to
//! one parameter set (spec.md §4.1).

use std::sync::{Arc, OnceLock};

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::GroupError;
use crate::group::dlog::DLogger;
use crate::group::element::{ElementModP, ElementModQ, Exponent};
use crate::group::parameters::{
    find_parameters, standard_parameters_3072, standard_parameters_4096, ParameterSet,
};
use crate::group::pow_radix::PowRadixTable;

/// Small, frequently-reused elements computed once per context (spec.md
/// §4.1's "cached constants").
pub struct GroupConstants {
    pub zero_mod_q: ElementModQ,
    pub one_mod_q: ElementModQ,
    pub two_mod_q: ElementModQ,
    pub zero_mod_p: ElementModP,
    pub one_mod_p: ElementModP,
    pub two_mod_p: ElementModP,
    /// `G mod P`, pre-accelerated: every context's single hottest base.
    pub g_mod_p: ElementModP,
    pub g_squared_mod_p: ElementModP,
    pub g_inverse_mod_p: ElementModP,
}

/// Everything arithmetic in this crate is scoped to a `GroupContext`: the
/// parameter set it was built from, its cached constants, and an owned
/// discrete-log cache (spec.md §4.1, §4.5).
pub struct GroupContext {
    parameters: &'static ParameterSet,
    constants: OnceLock<GroupConstants>,
    dlog: OnceLock<DLogger>,
}

impl GroupContext {
    fn new(parameters: &'static ParameterSet) -> Self {
        GroupContext {
            parameters,
            constants: OnceLock::new(),
            dlog: OnceLock::new(),
        }
    }

    pub fn parameters(&self) -> &'static ParameterSet {
        self.parameters
    }

    pub fn constants(&'static self) -> &'static GroupConstants {
        self.constants.get_or_init(|| self.build_constants())
    }

    /// The context's own `DLogger`, seeded against `g_mod_p` (spec.md
    /// §4.5: "a `DLogger` is always tied to one context's generator").
    pub fn dlog(&'static self) -> &DLogger {
        self.dlog.get_or_init(|| DLogger::new(self))
    }

    fn build_constants(&'static self) -> GroupConstants {
        let zero_mod_q = ElementModQ::new_unchecked(BigUint::zero(), self);
        let one_mod_q = ElementModQ::new_unchecked(BigUint::one(), self);
        let two_mod_q = ElementModQ::new_unchecked(BigUint::from(2u32), self);

        let zero_mod_p = ElementModP::new_unchecked(BigUint::zero(), self);
        let one_mod_p = ElementModP::new_unchecked(BigUint::one(), self);
        let two_mod_p = ElementModP::new_unchecked(BigUint::from(2u32), self);

        let g = self.parameters.g.clone();
        let p = &self.parameters.p;
        let q_bits = self.parameters.q.bits() as u32;
        let table = Arc::new(PowRadixTable::build(g.clone(), p, q_bits));
        let g_mod_p = ElementModP::new_accelerated(g.clone(), self, table);

        let g_squared_mod_p = g_mod_p.pow_p(2u64);
        let g_inverse_value = g.modpow(&(&self.parameters.q - BigUint::one()), p);
        let g_inverse_mod_p = ElementModP::new_unchecked(g_inverse_value, self);

        tracing::debug!(
            target: "eg_group_core::group::context",
            name = self.parameters.name,
            "group constants initialized"
        );

        GroupConstants {
            zero_mod_q,
            one_mod_q,
            two_mod_q,
            zero_mod_p,
            one_mod_p,
            two_mod_p,
            g_mod_p,
            g_squared_mod_p,
            g_inverse_mod_p,
        }
    }

    // -- element factories -------------------------------------------------

    /// Wraps `value` with `value mod Q`, always succeeding (spec.md §4.1's
    /// "safe" constructor).
    pub fn element_mod_q(&'static self, value: &BigUint) -> ElementModQ {
        ElementModQ::new_unchecked(value % &self.parameters.q, self)
    }

    /// Accepts `value` only if it is already in `[0, Q)`.
    pub fn element_mod_q_checked(&'static self, value: &BigUint) -> Result<ElementModQ, GroupError> {
        if value < &self.parameters.q {
            Ok(ElementModQ::new_unchecked(value.clone(), self))
        } else {
            Err(GroupError::OutOfRange)
        }
    }

    pub fn element_mod_q_from_hex_checked(
        &'static self,
        hex_str: &str,
    ) -> Result<ElementModQ, GroupError> {
        let value = parse_hex_biguint(hex_str).ok_or(GroupError::ParseError { kind: "mod Q" })?;
        self.element_mod_q_checked(&value)
    }

    /// Safe-wrapping constructor: `(value mod (Q - minimum)) + minimum`,
    /// always landing in `[minimum, Q)` regardless of how large `value` is
    /// (spec.md §4.1, §4 "Randomness").
    pub fn element_mod_q_wrapping(&'static self, value: &BigUint, minimum: &BigUint) -> ElementModQ {
        let span = &self.parameters.q - minimum;
        let wrapped = (value % &span) + minimum;
        ElementModQ::new_unchecked(wrapped, self)
    }

    /// Like [`GroupContext::element_mod_q_wrapping`], but parses `hex_str`
    /// first and falls back to `ZERO_MOD_Q` on a parse failure instead of
    /// returning a `Result` (spec.md §4.1).
    pub fn element_mod_q_wrapping_from_hex(&'static self, hex_str: &str, minimum: &BigUint) -> ElementModQ {
        match parse_hex_biguint(hex_str) {
            Some(value) => self.element_mod_q_wrapping(&value, minimum),
            None => self.constants().zero_mod_q.clone(),
        }
    }

    pub fn element_mod_p(&'static self, value: &BigUint) -> ElementModP {
        ElementModP::new_unchecked(value % &self.parameters.p, self)
    }

    pub fn element_mod_p_checked(&'static self, value: &BigUint) -> Result<ElementModP, GroupError> {
        if value < &self.parameters.p {
            Ok(ElementModP::new_unchecked(value.clone(), self))
        } else {
            Err(GroupError::OutOfRange)
        }
    }

    pub fn element_mod_p_from_hex_checked(
        &'static self,
        hex_str: &str,
    ) -> Result<ElementModP, GroupError> {
        let value = parse_hex_biguint(hex_str).ok_or(GroupError::ParseError { kind: "mod P" })?;
        self.element_mod_p_checked(&value)
    }

    /// Safe-wrapping constructor over `P`, analogous to
    /// [`GroupContext::element_mod_q_wrapping`].
    pub fn element_mod_p_wrapping(&'static self, value: &BigUint, minimum: &BigUint) -> ElementModP {
        let span = &self.parameters.p - minimum;
        let wrapped = (value % &span) + minimum;
        ElementModP::new_unchecked(wrapped, self)
    }

    /// Like [`GroupContext::element_mod_p_wrapping`], but parses `hex_str`
    /// first and falls back to `ZERO_MOD_P` on a parse failure.
    pub fn element_mod_p_wrapping_from_hex(&'static self, hex_str: &str, minimum: &BigUint) -> ElementModP {
        match parse_hex_biguint(hex_str) {
            Some(value) => self.element_mod_p_wrapping(&value, minimum),
            None => self.constants().zero_mod_p.clone(),
        }
    }

    // -- compatibility -------------------------------------------------

    /// `Err(IncompatibleContexts)` unless every given context is this one
    /// (spec.md §4.1: arithmetic across contexts is a hard error, not a
    /// silent coercion).
    pub fn compatible_context_or_fail(
        &'static self,
        contexts: &[&'static GroupContext],
    ) -> Result<(), GroupError> {
        if contexts.iter().all(|c| std::ptr::eq(*c, self)) {
            Ok(())
        } else {
            Err(GroupError::IncompatibleContexts)
        }
    }

    // -- arithmetic mod Q -------------------------------------------------

    pub fn add_q(&'static self, a: &ElementModQ, b: &ElementModQ) -> Result<ElementModQ, GroupError> {
        self.compatible_context_or_fail(&[a.context(), b.context()])?;
        Ok(ElementModQ::new_unchecked(
            (a.value() + b.value()) % &self.parameters.q,
            self,
        ))
    }

    pub fn sub_q(&'static self, a: &ElementModQ, b: &ElementModQ) -> Result<ElementModQ, GroupError> {
        self.compatible_context_or_fail(&[a.context(), b.context()])?;
        let q = &self.parameters.q;
        let value = ((a.value() + q) - b.value()) % q;
        Ok(ElementModQ::new_unchecked(value, self))
    }

    pub fn negate_q(&'static self, a: &ElementModQ) -> Result<ElementModQ, GroupError> {
        self.compatible_context_or_fail(&[a.context()])?;
        let q = &self.parameters.q;
        let value = if a.is_zero() {
            BigUint::zero()
        } else {
            q - a.value()
        };
        Ok(ElementModQ::new_unchecked(value, self))
    }

    pub fn mult_q(&'static self, a: &ElementModQ, b: &ElementModQ) -> Result<ElementModQ, GroupError> {
        self.compatible_context_or_fail(&[a.context(), b.context()])?;
        Ok(ElementModQ::new_unchecked(
            (a.value() * b.value()) % &self.parameters.q,
            self,
        ))
    }

    /// Modular inverse of `a` mod `Q`, via the extended Euclidean
    /// algorithm (spec.md §4.1). `Q` is prime, so every nonzero residue
    /// has an inverse; zero has none.
    pub fn mult_inv_q(&'static self, a: &ElementModQ) -> Result<ElementModQ, GroupError> {
        self.compatible_context_or_fail(&[a.context()])?;
        if a.is_zero() {
            return Err(GroupError::DivisionByZero);
        }
        let inv = mod_inverse(a.value(), &self.parameters.q).ok_or(GroupError::DivisionByZero)?;
        Ok(ElementModQ::new_unchecked(inv, self))
    }

    pub fn div_q(&'static self, a: &ElementModQ, b: &ElementModQ) -> Result<ElementModQ, GroupError> {
        let b_inv = self.mult_inv_q(b)?;
        self.mult_q(a, &b_inv)
    }

    // -- arithmetic mod P -------------------------------------------------

    pub fn mult_p(&'static self, a: &ElementModP, b: &ElementModP) -> Result<ElementModP, GroupError> {
        self.compatible_context_or_fail(&[a.context(), b.context()])?;
        Ok(ElementModP::new_unchecked(
            (a.value() * b.value()) % &self.parameters.p,
            self,
        ))
    }

    pub fn mult_inv_p(&'static self, a: &ElementModP) -> Result<ElementModP, GroupError> {
        self.compatible_context_or_fail(&[a.context()])?;
        if a.is_zero() {
            return Err(GroupError::DivisionByZero);
        }
        let inv = mod_inverse(a.value(), &self.parameters.p).ok_or(GroupError::DivisionByZero)?;
        Ok(ElementModP::new_unchecked(inv, self))
    }

    pub fn div_p(&'static self, a: &ElementModP, b: &ElementModP) -> Result<ElementModP, GroupError> {
        let b_inv = self.mult_inv_p(b)?;
        self.mult_p(a, &b_inv)
    }

    pub fn pow_p(
        &'static self,
        base: &ElementModP,
        exponent: impl Into<Exponent>,
    ) -> Result<ElementModP, GroupError> {
        self.compatible_context_or_fail(&[base.context()])?;
        Ok(base.pow_p(exponent))
    }

    /// `G^exponent mod P`, using the context's pre-accelerated generator.
    pub fn g_pow_p(&'static self, exponent: impl Into<Exponent>) -> ElementModP {
        self.constants().g_mod_p.pow_p(exponent)
    }

    /// A random scalar in `[minimum, Q)`, drawn wide and folded in through
    /// [`GroupContext::element_mod_q_wrapping`] rather than rejection
    /// sampling (spec.md §4 "Randomness"). A few extra guard bytes keep the
    /// modular wrap's bias far below any observable threshold.
    pub fn rand_q(&'static self, minimum: &BigUint) -> ElementModQ {
        let span = &self.parameters.q - minimum;
        let byte_len = span.to_bytes_be().len().max(1) + 8;
        let mut buf = vec![0u8; byte_len];
        OsRng.fill_bytes(&mut buf);
        let raw = BigUint::from_bytes_be(&buf);
        self.element_mod_q_wrapping(&raw, minimum)
    }
}

fn parse_hex_biguint(hex_str: &str) -> Option<BigUint> {
    let bytes = hex::decode(hex_str).ok()?;
    Some(BigUint::from_bytes_be(&bytes))
}

/// Extended Euclidean algorithm over signed bigints, lifted back into
/// `[0, modulus)`. Returns `None` only if `a` and `modulus` share a
/// common factor (never the case for the prime moduli this crate uses).
fn mod_inverse(a: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(modulus.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let new_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, new_r);
        let new_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, new_s);
    }

    if old_r != BigInt::one() {
        return None;
    }

    let modulus_signed = BigInt::from(modulus.clone());
    let mut result = old_s % &modulus_signed;
    if result.is_negative() {
        result += &modulus_signed;
    }
    result.to_biguint()
}

static CONTEXT_4096: OnceLock<GroupContext> = OnceLock::new();
static CONTEXT_3072: OnceLock<GroupContext> = OnceLock::new();

/// The shared, process-wide 4096-bit context.
pub fn standard_context_4096() -> &'static GroupContext {
    CONTEXT_4096.get_or_init(|| GroupContext::new(standard_parameters_4096()))
}

/// The shared, process-wide 3072-bit context.
pub fn standard_context_3072() -> &'static GroupContext {
    CONTEXT_3072.get_or_init(|| GroupContext::new(standard_parameters_3072()))
}

/// Looks up the standard context matching a `(P, Q, G, R)` quadruple, if
/// any (spec.md §4.1's admission predicate — no arbitrary runtime groups).
pub fn context_for_parameters(
    p: &BigUint,
    q: &BigUint,
    g: &BigUint,
    r: &BigUint,
) -> Result<&'static GroupContext, GroupError> {
    let found = find_parameters(p, q, g, r).ok_or(GroupError::UnknownParameters)?;
    if std::ptr::eq(found, standard_parameters_4096()) {
        Ok(standard_context_4096())
    } else {
        Ok(standard_context_3072())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_memoized() {
        let ctx = standard_context_3072();
        let a = ctx.constants() as *const GroupConstants;
        let b = ctx.constants() as *const GroupConstants;
        assert_eq!(a, b);
    }

    #[test]
    fn add_sub_round_trip() {
        let ctx = standard_context_3072();
        let three = ctx.element_mod_q_checked(&BigUint::from(3u32)).unwrap();
        let four = ctx.element_mod_q_checked(&BigUint::from(4u32)).unwrap();
        let sum = ctx.add_q(&three, &four).unwrap();
        let back = ctx.sub_q(&sum, &four).unwrap();
        assert_eq!(back, three);
    }

    #[test]
    fn mult_inv_q_is_the_true_inverse() {
        let ctx = standard_context_3072();
        let five = ctx.element_mod_q_checked(&BigUint::from(5u32)).unwrap();
        let inv = ctx.mult_inv_q(&five).unwrap();
        let product = ctx.mult_q(&five, &inv).unwrap();
        assert_eq!(product, ctx.constants().one_mod_q.clone());
    }

    #[test]
    fn mult_inv_q_of_zero_is_division_by_zero() {
        let ctx = standard_context_3072();
        let zero = ctx.constants().zero_mod_q.clone();
        assert_eq!(ctx.mult_inv_q(&zero), Err(GroupError::DivisionByZero));
    }

    #[test]
    fn g_is_a_valid_residue() {
        let ctx = standard_context_3072();
        assert!(ctx.constants().g_mod_p.is_valid_residue());
    }

    #[test]
    fn g_pow_p_matches_direct_modpow() {
        let ctx = standard_context_3072();
        let accelerated = ctx.g_pow_p(7u64);
        let direct = ctx
            .parameters()
            .g
            .modpow(&BigUint::from(7u32), &ctx.parameters().p);
        assert_eq!(accelerated.value(), &direct);
    }

    #[test]
    fn arithmetic_across_contexts_fails() {
        let ctx3072 = standard_context_3072();
        let ctx4096 = standard_context_4096();
        let a = ctx3072.element_mod_q_checked(&BigUint::from(1u32)).unwrap();
        let b = ctx4096.element_mod_q_checked(&BigUint::from(1u32)).unwrap();
        assert_eq!(
            ctx3072.add_q(&a, &b),
            Err(GroupError::IncompatibleContexts)
        );
    }

    #[test]
    fn unknown_parameters_are_rejected() {
        let bogus = BigUint::from(4u32);
        assert_eq!(
            context_for_parameters(&bogus, &bogus, &bogus, &bogus),
            Err(GroupError::UnknownParameters)
        );
    }
}
