//! Realm error types.

use std::error::Error as StdError;

use quarry_credentials::CredentialError;

/// Errors surfaced by realm configuration and query execution.
///
/// Row-scoped mapping failures are deliberately absent: they are logged and
/// skipped (see the isolated failure policy on
/// [`PrincipalQuery`](crate::query::PrincipalQuery)), never propagated, so
/// a malformed row cannot masquerade as an operational outage and an outage
/// can never masquerade as a missing credential.
#[derive(Debug, thiserror::Error)]
pub enum RealmError {
    /// The data source was unreachable or query execution failed. Fatal and
    /// propagated; never folded into "credential unsupported".
    #[error("data source error: {source}")]
    DataSource {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Configuration-time credential error (unknown algorithm, invalid
    /// encoding parameters). Raised when mappers are built, not at query
    /// time.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// A mapper's column list cannot satisfy its algorithm.
    #[error("mapper `{name}`: {reason}")]
    InvalidMapper {
        /// The credential name the mapper was being built for.
        name: String,
        /// Why construction failed.
        reason: String,
    },

    /// A mapper was attached before any principal query was declared.
    #[error("mapper attached before any principal query was declared")]
    DanglingMapper,
}

impl RealmError {
    /// Wrap an external data-source failure.
    pub fn data_source<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::DataSource {
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, RealmError>;
