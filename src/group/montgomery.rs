//! `MontgomeryElementModP`: a typed pass-through wrapper (spec.md §4.4, §9).
//!
//! Downstream protocol code (ElGamal encryption, Chaum-Pedersen proofs) often
//! wants to mark a value as "already reduced mod P, produced by a prior
//! multiplication" so it can be threaded through a batch operation without
//! re-deriving bounds. This type carries exactly that marker; it performs no
//! Montgomery-form reduction itself (spec.md §9 keeps the name for API
//! compatibility with the ElectionGuard reference while noting the actual
//! representation stays plain `BigUint` residues).

use crate::error::GroupError;
use crate::group::element::ElementModP;

/// A residue mod `P` tagged as having already gone through one multiplication
/// step, so that [`GroupContext::mult_p`] can be called on it directly
/// without re-checking membership each time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MontgomeryElementModP(ElementModP);

impl MontgomeryElementModP {
    pub fn new(element: ElementModP) -> Self {
        MontgomeryElementModP(element)
    }

    pub fn into_inner(self) -> ElementModP {
        self.0
    }

    pub fn as_element(&self) -> &ElementModP {
        &self.0
    }

    /// `self * other mod P`, delegating to the owning context's `mult_p`.
    pub fn multiply(&self, other: &MontgomeryElementModP) -> Result<MontgomeryElementModP, GroupError> {
        let context = self.0.context();
        let product = context.mult_p(&self.0, &other.0)?;
        Ok(MontgomeryElementModP(product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::context::standard_context_3072;

    #[test]
    fn multiply_matches_direct_mult_p() {
        let ctx = standard_context_3072();
        let a = ctx.g_pow_p(3u64);
        let b = ctx.g_pow_p(5u64);
        let expected = ctx.mult_p(&a, &b).unwrap();

        let wrapped_a = MontgomeryElementModP::new(a);
        let wrapped_b = MontgomeryElementModP::new(b);
        let product = wrapped_a.multiply(&wrapped_b).unwrap();
        assert_eq!(product.into_inner(), expected);
    }
}
