//! Error kinds for the group arithmetic core (spec.md §7).

use thiserror::Error;

/// Failure modes of the group arithmetic core.
///
/// `OutOfRange` and `ParseError` are returned by the *checked* element
/// constructors as ordinary `Result`s. `DivisionByZero` and
/// `IncompatibleContexts` indicate a programming error at the call site and
/// should generally be propagated rather than matched on. `DLogExhausted`
/// and `UnknownParameters` are expected, recoverable outcomes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GroupError {
    /// A checked constructor received a value outside `[0, modulus)`.
    #[error("value is out of range for the target modulus")]
    OutOfRange,

    /// A checked string constructor could not parse its input as an integer.
    #[error("could not parse {kind} element from input string")]
    ParseError {
        /// Which element kind failed to parse (`"mod Q"` or `"mod P"`).
        kind: &'static str,
    },

    /// Attempted to invert zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Arithmetic or a compatibility check was given elements from
    /// different (or zero) `GroupContext`s.
    #[error("elements belong to incompatible group contexts")]
    IncompatibleContexts,

    /// `DLogger` walked past its configured bound without finding the
    /// queried element.
    #[error("discrete log search exhausted its bound without a match")]
    DLogExhausted,

    /// The admission helper was given a `(P, Q, G, R)` quadruple that does
    /// not match any whitelisted parameter set.
    #[error("parameter quadruple does not match a known standard group")]
    UnknownParameters,
}
