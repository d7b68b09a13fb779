//! Regenerates "nothing up my sleeve" group parameters.
//!
//! Not part of the library surface: a standalone tool an auditor runs to
//! confirm the constants baked into [`eg_group_core::group::parameters`]
//! could plausibly have been constructed rather than chosen to hide a
//! trapdoor. `Q` is the first 256-bit prime shaped `1^32 || ln2 bits ||
//! 1^32`; `P` is the first prime of the form `Q*R + 1` for an even `R` of
//! the target bit length; `G` is the smallest small integer base whose
//! `R`-th power mod `P` isn't 1.

use eg_group_core::group::is_probable_prime;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

const MILLER_RABIN_ROUNDS: u32 = 40;
const ENVELOPE_ONES: u32 = 32;

/// `floor(ln(2) * 2^precision_bits)`, via the series `ln(2) = sum 1/(k 2^k)`
/// evaluated in fixed-point integer arithmetic. No floating point anywhere
/// in the derivation.
fn ln2_fixed_point(precision_bits: u32) -> BigUint {
    let scale = BigUint::one() << precision_bits;
    let mut sum = BigUint::zero();
    let mut k = 1u32;
    loop {
        let denom = BigUint::from(k) << k;
        let term = &scale / &denom;
        if term.is_zero() {
            break;
        }
        sum += term;
        k += 1;
    }
    sum
}

/// The middle `bit_count` bits of `frac(ln 2)`, as their own `bit_count`-bit
/// integer.
fn ln2_middle_bits(bit_count: u32) -> BigUint {
    // A few guard bits keep rounding in the series from leaking into the
    // bits we actually keep.
    let guard = 64;
    let fixed = ln2_fixed_point(bit_count + guard);
    fixed >> guard
}

/// Builds `1^leading || middle || 1^trailing` as one integer of
/// `leading + middle_bits + trailing` bits.
fn envelope(leading: u32, middle: &BigUint, middle_bits: u32, trailing: u32) -> BigUint {
    let ones_leading = (BigUint::one() << leading) - BigUint::one();
    let ones_trailing = (BigUint::one() << trailing) - BigUint::one();
    (ones_leading << (middle_bits + trailing)) | (middle << trailing) | ones_trailing
}

/// Searches upward from `start` (forced odd) for the first probable prime,
/// stepping by 2.
fn next_prime_from(start: BigUint, rng: &mut impl rand::RngCore) -> BigUint {
    let mut candidate = if &start % 2u32 == BigUint::zero() {
        start + BigUint::one()
    } else {
        start
    };
    loop {
        if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS, &mut *rng) {
            return candidate;
        }
        candidate += BigUint::from(2u32);
    }
}

fn derive_q(rng: &mut impl rand::RngCore) -> BigUint {
    let middle_bits = 256 - 2 * ENVELOPE_ONES;
    let middle = ln2_middle_bits(middle_bits);
    let seed = envelope(ENVELOPE_ONES, &middle, middle_bits, ENVELOPE_ONES);
    next_prime_from(seed, &mut *rng)
}

/// Finds the smallest even `R` such that `Q*R + 1` is prime and has exactly
/// `target_bits` bits, then returns `(p, r)`.
fn derive_p_and_r(q: &BigUint, target_bits: u32, rng: &mut impl rand::RngCore) -> (BigUint, BigUint) {
    let r_bits = target_bits - q.bits() as u32;
    let middle_bits = r_bits.saturating_sub(2 * ENVELOPE_ONES).max(1);
    let middle = ln2_middle_bits(middle_bits);
    let mut r = envelope(ENVELOPE_ONES.min(r_bits / 2), &middle, middle_bits, ENVELOPE_ONES.min(r_bits / 2));
    if &r % 2u32 != BigUint::zero() {
        r += BigUint::one();
    }
    loop {
        let p = q * &r + BigUint::one();
        if p.bits() as u32 == target_bits && is_probable_prime(&p, MILLER_RABIN_ROUNDS, &mut *rng) {
            return (p, r);
        }
        r += BigUint::from(2u32);
    }
}

/// The smallest `base in {2, 3, 4, ...}` with `base^r mod p != 1`.
fn smallest_generator(p: &BigUint, r: &BigUint) -> BigUint {
    let mut base = BigUint::from(2u32);
    loop {
        let candidate = base.modpow(r, p);
        if candidate != BigUint::one() {
            return candidate;
        }
        base += BigUint::one();
    }
}

fn derive_and_report(name: &str, target_bits: u32, rng: &mut impl rand::RngCore) {
    let q = derive_q(&mut *rng);
    info!(target: "generate_parameters", bits = q.bits(), "derived Q");
    let (p, r) = derive_p_and_r(&q, target_bits, &mut *rng);
    info!(target: "generate_parameters", bits = p.bits(), "derived P");
    let g = smallest_generator(&p, &r);

    assert_eq!((&p - BigUint::one()) % &q, BigUint::zero());
    assert_eq!((&p - BigUint::one()) / &q, r);
    assert_eq!(g.modpow(&q, &p), BigUint::one());

    println!("--- {name} ({target_bits} bits) ---");
    println!("Q = {:X}", q);
    println!("P = {:X}", p);
    println!("R = {:X}", r);
    println!("G = {:X}", g);
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut rng = OsRng;
    derive_and_report("standard_3072", 3072, &mut rng);
    derive_and_report("standard_4096", 4096, &mut rng);
}
