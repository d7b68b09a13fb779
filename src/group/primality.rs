//! Miller-Rabin probable-primality testing over [`BigUint`].
//!
//! The group arithmetic core treats the two standard parameter sets as
//! baked-in constants (§4.1), but `ParameterSet::validate` and the
//! `generate_parameters` dev tool both need to double check the
//! "nothing up my sleeve" construction actually produced primes, so this
//! module is the one place that primality testing lives.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::RngCore;

/// Runs `rounds` independent Miller-Rabin witnesses against `n`.
///
/// A composite is detected with probability at least `1 - 4^-rounds`; there
/// are no false negatives for prime inputs. `rounds = 40` (used throughout
/// this crate) gives a soundness error far below any plausible accidental
/// collision.
pub fn is_probable_prime(n: &BigUint, rounds: u32, rng: &mut impl RngCore) -> bool {
    let zero = BigUint::zero();
    let one = BigUint::one();
    let two = &one + &one;

    if *n < two {
        return false;
    }
    if *n == two {
        return true;
    }
    if (n % &two).is_zero() {
        return false;
    }

    // n - 1 = 2^s * d with d odd.
    let n_minus_one = n - &one;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while (&d % &two).is_zero() {
        d /= &two;
        s += 1;
    }

    'witness: for _ in 0..rounds {
        let a = random_in_range(&two, &n_minus_one, rng);
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 0..s.saturating_sub(1) {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Draws a uniform random value in `[low, high)` by rejection sampling.
fn random_in_range(low: &BigUint, high: &BigUint, rng: &mut impl RngCore) -> BigUint {
    let span = high - low;
    let byte_len = span.to_bytes_be().len().max(1) + 1;
    let mut buf = vec![0u8; byte_len];
    loop {
        rng.fill_bytes(&mut buf);
        let candidate = BigUint::from_bytes_be(&buf) % &span;
        if &candidate + low >= *low {
            return candidate + low;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    #[test]
    fn small_primes_are_prime() {
        let mut rng = rng();
        for p in [2u32, 3, 5, 7, 11, 13, 997, 7919] {
            assert!(
                is_probable_prime(&BigUint::from(p), 40, &mut rng),
                "{p} should be prime"
            );
        }
    }

    #[test]
    fn small_composites_are_composite() {
        let mut rng = rng();
        for n in [1u32, 4, 6, 8, 9, 15, 100, 9999] {
            assert!(
                !is_probable_prime(&BigUint::from(n), 40, &mut rng),
                "{n} should be composite"
            );
        }
    }
}
