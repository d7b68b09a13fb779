//! Fixed-base exponentiation accelerator (spec.md §4.3).
//!
//! Turns repeated `base^e mod P` for one fixed `base` and `e` in `[0, Q)`
//! into `w = ceil(bits(Q) / k)` table lookups and modular multiplications
//! instead of a full square-and-multiply ladder over `e`.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

/// Window size in bits. The contract in spec.md §4.3 treats any value in
/// `{8, 12, 14, 16}` as acceptable; 8 is chosen here so that building a
/// table (and running this crate's test suite) stays fast, at the cost of
/// more multiplications per `pow_p` than a larger window would need.
pub const DEFAULT_WINDOW_BITS: u32 = 8;

/// `T[i][v] = base^(v * 2^(k*i)) mod P`, `w` rows by `2^k` columns.
pub struct PowRadixTable {
    base: BigUint,
    modulus: BigUint,
    k: u32,
    w: usize,
    table: Vec<Vec<BigUint>>,
}

impl PowRadixTable {
    /// Builds the table for `base` over `modulus`, sized for exponents up
    /// to `exponent_bits` bits wide (i.e. `bits(Q)`), using the default
    /// window size.
    pub fn build(base: BigUint, modulus: &BigUint, exponent_bits: u32) -> Self {
        Self::build_with_window(base, modulus, exponent_bits, DEFAULT_WINDOW_BITS)
    }

    pub fn build_with_window(
        base: BigUint,
        modulus: &BigUint,
        exponent_bits: u32,
        k: u32,
    ) -> Self {
        let w = exponent_bits.div_ceil(k) as usize;
        let column_count = 1usize << k;

        tracing::debug!(
            target: "eg_group_core::group::pow_radix",
            k,
            w,
            column_count,
            "building PowRadix table"
        );

        let mut table: Vec<Vec<BigUint>> = Vec::with_capacity(w);
        // base_i = base^(2^(k*i)) mod P, computed incrementally by raising
        // the previous row's base to the 2^k power.
        let mut row_base = base.clone() % modulus;
        for _ in 0..w {
            let mut row = Vec::with_capacity(column_count);
            row.push(BigUint::one());
            for v in 1..column_count {
                let next = (&row[v - 1] * &row_base) % modulus;
                row.push(next);
            }
            table.push(row);
            row_base = row_base.modpow(&BigUint::from(1u32 << k), modulus);
        }

        PowRadixTable {
            base,
            modulus: modulus.clone(),
            k,
            w,
            table,
        }
    }

    pub fn base(&self) -> &BigUint {
        &self.base
    }

    pub fn window_bits(&self) -> u32 {
        self.k
    }

    pub fn row_count(&self) -> usize {
        self.w
    }

    /// `base^exponent mod P`, via digit-wise lookup instead of `modpow`.
    pub fn pow(&self, exponent: &BigUint) -> BigUint {
        let mask = (BigUint::one() << self.k) - BigUint::one();
        let mut remaining = exponent.clone();
        let mut result = BigUint::one();
        for row in &self.table {
            if remaining.is_zero() {
                break;
            }
            let digit = (&remaining & &mask).to_usize().unwrap_or(0);
            remaining >>= self.k;
            if digit != 0 {
                result = (&result * &row[digit]) % &self.modulus;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    /// A small prime field stand-in so tests run fast: `modulus = 2^61-1`
    /// (a Mersenne prime), `base = 5`, exponents up to 16 bits wide.
    fn small_modulus() -> BigUint {
        (BigUint::one() << 61u32) - BigUint::one()
    }

    #[test]
    fn matches_direct_modpow_for_every_digit_combination() {
        let modulus = small_modulus();
        let base = BigUint::from(5u32);
        let table = PowRadixTable::build_with_window(base.clone(), &modulus, 16, 4);

        for e in 0u32..=300 {
            let exponent = BigUint::from(e);
            let expected = base.modpow(&exponent, &modulus);
            assert_eq!(table.pow(&exponent), expected, "mismatch at e={e}");
        }
    }

    #[test]
    fn zero_exponent_is_one() {
        let modulus = small_modulus();
        let table = PowRadixTable::build_with_window(BigUint::from(7u32), &modulus, 16, 4);
        assert_eq!(table.pow(&BigUint::zero()), BigUint::one());
    }
}
