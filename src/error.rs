use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, Error>;

/// Failures reported by the selection and mutation operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The set of available values is empty.
    #[error("attempt to draw from an empty set of ranges")]
    EmptyDomain,
    /// The value is not covered by any range.
    #[error("value is not in the set of available values")]
    OutOfDomain,
    /// The value is already covered by a range.
    #[error("value is already in the set of available values")]
    AlreadyPresent,
}
