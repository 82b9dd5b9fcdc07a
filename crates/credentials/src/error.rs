//! Credential decoding and verification error types.

/// Errors produced while decoding stored credential columns or deriving a
/// comparable form from a candidate.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The algorithm name does not match any registry entry. Algorithm names
    /// are matched exactly and case-sensitively.
    #[error("unknown credential algorithm `{0}`")]
    UnknownAlgorithm(String),

    /// Fewer columns were supplied than the encoding consumes.
    #[error("algorithm `{algorithm}` needs {expected} column(s), got {actual}")]
    MissingColumns {
        /// Registry name of the algorithm.
        algorithm: &'static str,
        /// Minimum number of columns the encoding consumes.
        expected: usize,
        /// Number of columns actually supplied.
        actual: usize,
    },

    /// A column held a value of a type the encoding cannot coerce.
    #[error("expected a {expected} column, got {actual}")]
    WrongColumnType {
        /// What the encoding wanted (e.g. "text", "bytes", "integer").
        expected: &'static str,
        /// What the column actually held.
        actual: &'static str,
    },

    /// A stored value could not be parsed (bad crypt string, wrong hash or
    /// salt length, invalid UTF-8, ...).
    #[error("malformed credential data: {0}")]
    Malformed(String),

    /// Iteration counts must be positive.
    #[error("iteration count must be positive, got {0}")]
    NonPositiveIterations(i64),

    /// Bcrypt hashing failed (e.g. cost outside 4..=31).
    #[error("bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    /// Radix-64 decoding of a crypt string segment failed.
    #[error("crypt string radix-64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Hex decoding of a text column failed.
    #[error("hex-encoded column: {0}")]
    Hex(#[from] hex::FromHexError),
}
