//! A query-driven, SQL-backed security realm.
//!
//! A [`SqlRealm`] owns an ordered set of [`PrincipalQuery`] groups, each a
//! parameterized SQL statement plus the [`KeyMapper`]s that decode its
//! result columns into typed credentials. Asking the realm about a
//! credential name costs nothing (configuration-only answer); asking a
//! [`RealmIdentity`] executes the queries with the principal bound as the
//! single SQL parameter and aggregates whatever the mappers decode.
//!
//! ```no_run
//! # async fn example(pool: sqlx::SqlitePool) -> Result<(), quarry_realm::RealmError> {
//! use std::sync::Arc;
//! use quarry_realm::{DataSource, KeyMapper, SqlRealm};
//!
//! let source: Arc<dyn DataSource> = Arc::new(pool);
//! let realm = SqlRealm::builder()
//!     .principal_query("SELECT password FROM users WHERE name = ?", source)
//!     .with_mapper(KeyMapper::new("password", "bcrypt", &[1])?)
//!     .build()?;
//!
//! let identity = realm.identity("john");
//! if identity.verify_credential("password", "abcd1234").await? {
//!     // authenticated
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod mapper;
pub mod query;
pub mod realm;
pub mod row;
pub mod source;
pub mod support;

pub use {
    config::{MapperConfig, QueryConfig, RealmConfig},
    error::RealmError,
    identity::RealmIdentity,
    mapper::{KeyMapper, MapError},
    query::PrincipalQuery,
    realm::{SqlRealm, SqlRealmBuilder},
    row::SqlRow,
    source::DataSource,
    support::CredentialSupport,
};

pub use quarry_credentials as credentials;
