//! Group arithmetic core for an ElectionGuard-style verifiable-election
//! library: `ElementModQ`/`ElementModP` value types over a safe-prime
//! subgroup, the `GroupContext` factory and arithmetic surface, the
//! `PowRadix` fixed-base accelerator, a bounded discrete-log cache, the
//! `hash_elements` contract, and a deterministic nonce sequence.
//!
//! This crate only ever operates over the two whitelisted parameter sets
//! (spec.md §4.1); there is no support for arbitrary runtime-supplied
//! groups.

pub mod error;
pub mod group;
pub mod hash;
pub mod nonces;

pub use error::GroupError;
pub use group::{
    context_for_parameters, standard_context_3072, standard_context_4096, DLogger, ElementModP,
    ElementModQ, Exponent, GroupContext, MontgomeryElementModP, ParameterSet, PowRadixTable,
};
pub use hash::{hash_elements, Hashable};
pub use nonces::Nonces;
