//! Error types for the `qumulo-models` crate.
//!
//! All validating constructors in this crate return variants of
//! [`ModelError`].

/// Errors produced when validating model inputs.
///
/// Variants never carry the rejected value itself: the inputs validated
/// here are usernames and passwords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A field contained a character outside the printable ASCII range.
    #[error("{field} must be printable ASCII (invalid character at position {position})")]
    NotPrintableAscii {
        /// Human-readable name of the field (e.g. `"old password"`).
        field: String,
        /// Zero-based character index of the first offending character.
        position: usize,
    },
}
