//! Group arithmetic: value types, the context/factory, and the supporting
//! accelerators (spec.md §4.1-§4.5).

pub mod context;
pub mod dlog;
pub mod element;
pub mod montgomery;
pub mod parameters;
pub mod pow_radix;
pub mod primality;

pub use context::{context_for_parameters, standard_context_3072, standard_context_4096, GroupConstants, GroupContext};
pub use dlog::DLogger;
pub use element::{ElementModP, ElementModQ, Exponent};
pub use montgomery::MontgomeryElementModP;
pub use parameters::ParameterSet;
pub use pow_radix::PowRadixTable;
pub use primality::is_probable_prime;
