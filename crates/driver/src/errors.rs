/// Errors while reading the triangle stream.
///
/// Token positions count whitespace-separated tokens from 1; the triangle
/// count is token 1.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("input is empty, expected a triangle count")]
    MissingCount,

    #[error("invalid triangle count {0:?}")]
    InvalidCount(String),

    #[error("invalid coordinate {token:?} at token {position}")]
    InvalidNumber { token: String, position: usize },

    #[error("expected {expected} triangles, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("unexpected token {token:?} at position {position} after the last triangle")]
    TrailingData { token: String, position: usize },
}
