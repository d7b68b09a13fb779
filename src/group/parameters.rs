//! The two whitelisted standard parameter sets (spec.md §4.1).
//!
//! `P`/`Q`/`G`/`R` below are "nothing up my sleeve" parameters: `Q` is the
//! first 256-bit prime of the form `1^32 || bits(frac(ln 2)) || 1^32`; each
//! `P` is the first prime of the form `Q * R + 1` (`R` even) with the
//! analogous leading/trailing-ones shape and the target bit length; `G` is
//! `2^R mod P`, the smallest small-base generator of the order-`Q`
//! subgroup. See `src/bin/generate_parameters.rs` for the derivation this
//! module's constants were produced by, and
//! [`ParameterSet::validate`] for the checks a reader can run to confirm
//! the relations below actually hold.

use std::sync::OnceLock;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{Num, One, Zero};
use rand::rngs::OsRng;

use crate::error::GroupError;
use crate::group::primality::is_probable_prime;

/// Bundle of `(name, numBits, P, Q, G, R)` plus the derived cofactor
/// relation `P - 1 = Q * R`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    pub name: &'static str,
    pub num_bits: usize,
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
    pub r: BigUint,
}

impl ParameterSet {
    /// Basic validity requirements: bit lengths, `q` prime, `p` prime,
    /// `p - 1 == q * r`, and `g` generates the order-`q` subgroup.
    ///
    /// Mirrors the validation a `FixedParameters::validate` would run in
    /// other ElectionGuard ports: this core treats its two parameter sets
    /// as trusted constants at runtime, but keeps this method around so
    /// the relations are checked once, in tests, rather than asserted only
    /// by comment.
    pub fn validate(&self) -> Result<(), GroupError> {
        let mut rng = OsRng;
        if self.q.bits() as usize > self.num_bits {
            return Err(GroupError::OutOfRange);
        }
        if self.p.bits() as usize != self.num_bits {
            return Err(GroupError::OutOfRange);
        }
        if !is_probable_prime(&self.q, 40, &mut rng) {
            return Err(GroupError::OutOfRange);
        }
        if !is_probable_prime(&self.p, 40, &mut rng) {
            return Err(GroupError::OutOfRange);
        }
        let (quot, rem) = (&self.p - BigUint::one()).div_rem(&self.q);
        if !rem.is_zero() || quot != self.r {
            return Err(GroupError::OutOfRange);
        }
        if self.g.is_zero() || self.g == BigUint::one() {
            return Err(GroupError::OutOfRange);
        }
        if self.g.modpow(&self.q, &self.p) != BigUint::one() {
            return Err(GroupError::OutOfRange);
        }
        Ok(())
    }
}

fn parse_hex(chunks: &[&str]) -> BigUint {
    let joined: String = chunks.concat();
    BigUint::from_str_radix(&joined, 16).expect("embedded parameter hex is well-formed")
}

const Q_HEX: &[&str] = &[
"ffffffffb17217f7d1cf79abc9e3b39803f2f6af40f343267298b62e00000245",
];

const P_4096_HEX: &[&str] = &[
"ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe7b876206debac98559552fb4afa1b10ed2e",
"ae35c138214427573b291169b8253e96ca16224ae8c51acbda11317c387eb9ea9bc3b136603b256fa0ec7657f74b72ce87b1",
"9d6548caf5dfa6bd38303248655fa1872f20e3a2da2d97c50f3fd5c607f4ca11fb5bfb90610d30f88fe551a2ee569d6dfc1e",
"fa157d2e23de1400b39617460775db8990e5c943e732b479cd33cccc4e659393514c4c1a1e0bd1d6095d25669b333564a337",
"6a9c7f8a5e148e82074db6015cfe7aa30c480a5417350d2c955d5179b1e17b9dae313cdb6c606cb1078f735d1b2db31b5f50",
"b5185064c18b4d162db3b365853d7598a1951ae273ee5570b6c68f96983496d4e6d330af889b44a02554731cdc8ea17293d1",
"228a4ef98d6f5177fbcf0755268a5c1f9538b98261affd446b1ca3cf5e9222b88c66d3c5422183edc99421090bbb16faf3d9",
"49f236e02b20cee886b905c128d53d0bd2f9621363196af503020060e49908391a0c57339ba2beba7d052ac5b61cc4e9207c",
"ef2f0ce2d7373958d7622658901e646a95184460dc4e7487156e0c292413d5e361c1696dd24aaebd473826fda0c238b90ab1",
"11bbbd67c724972cd18bfbbd9d426c472096e76115c05f6f7cebac9f4f51fd6bad42b59b4f394831f6b1cce55793d15544b8",
"15c7986d8add420852eced4b",
];

const R_4096_HEX: &[&str] = &[
"1000000004e8de808464b4e62a4f9193fc4d7706c0cbf7f8c369811a30657665dede6e803deb811f599e889d4780aaff282b",
"cb9a8da244d3742be27ea695f157a202d5c78d085567dd6c1a692aade77e512cd6c5ffc4cf16433dc66645b04a9083376c0f",
"79004d5f99691fa3500d33e0eb1d145109db3996be0d0e35f519a8903f5eefe0810645ad66918656d9e1954fb23328bd5ea5",
"35620d8a0157959b8f750cca3d287c4d77aa3a16de9423594e180b9a8ab5ba8ff9da349c4237568ef2e5d7af1f4f30893fae",
"608fadd005b9cf0f46b0718ffb0ec08a5ed73282350d647ca68a2f87ba9cf381f971de3988c5a1596f803bbd5b660440bacb",
"7a813e8d8073c89b812d6f4c1cbe302163f49efc62a917e358f4a6a82ce315301518120350f7d57c0c8a340532324396d9c7",
"6b1c90fb39e924a144e59027f55679e962e64ce6b08594ac1d88453e9800691ab158b5b3d449df590924dc74f704ff0e5eb5",
"38c80496a496cc04becdaf2b6b9ee3e60d50742e8bdb5a8dd1113159487cde1d7dd70e900bb444b70dd43ee5f4eb44df369a",
"e67edbb0ae0c43f8766e68f132e2690422dac4e4738a9608771d3a305af17dbcf78d81fbc48bc524e9de6641b36d7bf7b76e",
"9101515bcb19c4780eb4fa8e8a87e6ee5829e3f853a3000b6af8a6e4c31c2",
];

const G_4096_HEX: &[&str] = &[
"cbec0c13d4b9ca79d77a5c800900548195760765a0345ab038adba443fa369cccf4b81195a37931d10978ca3b9a3916ad93f",
"20de8d6bde67f10b1f6858aaeb36a51f036798aeec772ca56e12803971b9f89417ad1d74b7d3680e65f4927f20cc0a253e9b",
"70707b4a162d47e7010c936bcc0db1b9f2c2e2a3dac86db9ff29252ddbb30cc2aafba47aab7c1167ccd15a1e0d20df92c5b9",
"4deb60208413fc8f232709ef417ee56f77a12f159a48a2c830c5ad93f35bd7db45dae537076229e32d1f1cfcbb25ec375dd1",
"079b3a4d5859eba5389807ae30992864ff3500d07409e3e6bcad21481bcf57f39431bf07e7c35cea0e0b25b9f446942aa767",
"ea2aab4e08d51492c4e5d1602107d6bd560df454685d893b7da0444def883d6bc6b2cf143344a1ca7c305f36393f42db8a99",
"539a555ad499424d29bee1faa2d91d2224d0bfa91a0f4997f1088f86d9faa340c1b48d2d31ff823c715e50b78ee0b187d840",
"859aa9610375ad1412b8962593bb26d4462984315fdcff5c408724f7dfc048361cafbc43ff9c74b5b841b051b627faa8d3d8",
"f098a2232cc89444d8d48e59d8b2540eabbaf9ddf18e4495fc5aa8afe32e4f7cca030da9c64526bafb8ddfc114caa0345a34",
"64b6bed34e1b8589494f2ff69c6f8bc137b18213fde0df27e441dea7170d25e291b9a919bfc524849bbc1d69e0584e9ce759",
"9a5adfaad3a34b185273522d",
];

const P_3072_HEX: &[&str] = &[
"ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff3ea8449fe8f70edd062b1a63a6c4c60c52ab",
"33161e238438897a39ce78b63c9f364f5b8aef22ec2fee6e0850eca42d06fb0c75df5497e00c554b03d7d2874a000ca8f58d",
"94f0341cbe2ec92156c9f949db4a9316f281501e53daec3f64f1b783154c60320e2ff79333ce3573facc5fdcf11785903155",
"bbd90f023b220224fcd8471bf4f445f0a88a14f0cd976ea354bb20cdb5ccb3db239288d586554e2a0e8a6fe51a8cfaa72ef2",
"ad8a43dc4212b210b779dfe49d7307cc846532e4b9694edad162af053b1751f3a3d091f65665815412b5e8c202461069ac14",
"b958784934b8d6cce1daa50537011aa4fb42b9a3def41bda1f85ef6fdbf2f2d89d2a4b1835278fd9405789f456812b552879",
"a6168695c12963b0ff01eaab73e5b5c1585318e7624f14a51a4a026b6808292057fd99b66dc085a98ac8d8caf9eeeea98a24",
"1bbbb6a7c8520a40970111a42fee49775f93fa6eea3d6116d6a97c9fb5b805d2eed1",
];

const R_3072_HEX: &[&str] = &[
"1000000004e8de808464b4e62a4f9193fc4d7706c0cbf7f8c369811a30657665d44d6b68325e2cdfdba6860e551a4beb7c1c",
"728e1473274773ee4e4b57052bcc04dce26f8087359b48b897237277cac370cc4fd1fff2ba393f1e9af18ab1251565fdf7ba",
"c9305a518d54aba9071e54a8419ad3b6472be3df427887056024cb5999a071eb38305ec81b13bf202369c47f54f8ce9de737",
"d86c5deb0d08c2c06e987f25fdb02ea2390f1f2c6cb0d54b4c35e432cf5934d4fc650f7f4348d267538df1a7bff8f3fba539",
"b7871fe84768aede10e5f2d8b50fd0e399d04f2f8c5760b43fb41974cfd0cd7464bb25b2077e333a5c50a138c85c82f61185",
"4fa3ed27c217ce0ca177cd28f0a6011e9e553bc09a6c88c0d30d60c1f644a0bff402991ac425c21d85e5ce5f4d2731df9bcf",
"57d32bc15ddda3d33d3afeab0c6a6c1bccbf421f474e1b318c4b1596b3977fe0edda567f140233c7c609ed97dcede28e34a7",
"98890",
];

const G_3072_HEX: &[&str] = &[
"829f572dd13382eb21be68861a6164040dfa8bf75cc6c19d8678205d3aef807a0ce0de0cccca021ca42ab7efae22c25f5af3",
"a77320d3575bf2689f19489f931422fcfc3e8d5d6e63386b94a164a7d1ccfd6206e7f0a277e458c90780239fa6d04bb1dda7",
"e6eb8321799a3bf5057bf4098813c004377db242b56ebef5fcb2c56f82711ab800c1fa9c8bbb4a906a784c18c7cdcb547a2b",
"f5b6db167f3a42369b38ee95d2d20eb6d26dca20452670579d621521c44aa50240f1548ea049cd7b6297ea7792c3b6a3c5fe",
"acc0671886d79354a42a879f247a5bdee5a6669caf3608ff40a9d543bbcf55271d7a4062713fb9b42dfd794cd075f9e0d7a6",
"6e6f0b346d4225659eba6ca02af4b13401cad176158391e48b11d173814a2af7bd1752edad75b2d30151433e60de171b93e2",
"90ee44c11fb7d8d2a4c869ec2cb8d318865dc2185cb6e2f2624cf3e0901159ff0d89d494ead1bbc6d9462552b3910a6daf1a",
"6497de30aa06785802d4b2a7f7a65b9a1f043c3bda052a383ba32849159bc6bd0010",
];

static STANDARD_PARAMETERS_4096: OnceLock<ParameterSet> = OnceLock::new();
static STANDARD_PARAMETERS_3072: OnceLock<ParameterSet> = OnceLock::new();

/// The full-strength 4096-bit standard group (spec.md §4.1).
pub fn standard_parameters_4096() -> &'static ParameterSet {
    STANDARD_PARAMETERS_4096.get_or_init(|| ParameterSet {
        name: "standard_parameters_4096",
        num_bits: 4096,
        p: parse_hex(P_4096_HEX),
        q: parse_hex(Q_HEX),
        g: parse_hex(G_4096_HEX),
        r: parse_hex(R_4096_HEX),
    })
}

/// The 3072-bit standard group (spec.md §4.1): roughly 1.8x faster
/// `modPow`s than the 4096-bit group, same 256-bit field order `Q`.
pub fn standard_parameters_3072() -> &'static ParameterSet {
    STANDARD_PARAMETERS_3072.get_or_init(|| ParameterSet {
        name: "standard_parameters_3072",
        num_bits: 3072,
        p: parse_hex(P_3072_HEX),
        q: parse_hex(Q_HEX),
        g: parse_hex(G_3072_HEX),
        r: parse_hex(R_3072_HEX),
    })
}

/// Returns the predeclared parameter set whose `(P, Q, G, R)` all equal the
/// given values, or `None` if the quadruple matches no whitelisted set.
///
/// The core never builds a bespoke context for arbitrary caller-supplied
/// parameters; this is the only admission path for externally supplied
/// quadruples (spec.md §4.1).
pub fn find_parameters(p: &BigUint, q: &BigUint, g: &BigUint, r: &BigUint) -> Option<&'static ParameterSet> {
    for candidate in [standard_parameters_3072(), standard_parameters_4096()] {
        if &candidate.p == p && &candidate.q == q && &candidate.g == g && &candidate.r == r {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_4096_is_valid() {
        standard_parameters_4096().validate().expect("4096-bit group must validate");
    }

    #[test]
    fn standard_3072_is_valid() {
        standard_parameters_3072().validate().expect("3072-bit group must validate");
    }

    #[test]
    fn parameter_sets_are_memoized() {
        let a = standard_parameters_4096() as *const ParameterSet;
        let b = standard_parameters_4096() as *const ParameterSet;
        assert_eq!(a, b, "accessor must return the same singleton instance");
    }

    #[test]
    fn admission_helper_rejects_unknown_quadruples() {
        let p = &standard_parameters_3072().p;
        let q = &standard_parameters_3072().q;
        let g = &standard_parameters_3072().g;
        let bad_r = &standard_parameters_3072().r + BigUint::one();
        assert!(find_parameters(p, q, g, &bad_r).is_none());
    }

    #[test]
    fn admission_helper_accepts_known_quadruples() {
        let params = standard_parameters_4096();
        let found = find_parameters(&params.p, &params.q, &params.g, &params.r)
            .expect("known quadruple must be admitted");
        assert_eq!(found.name, params.name);
    }
}
