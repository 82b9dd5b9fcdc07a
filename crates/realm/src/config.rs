//! Declarative realm configuration.
//!
//! Mirrors the builder surface 1:1 so a realm can be described in TOML (or
//! any serde format) and wired to a data source at startup:
//!
//! ```toml
//! [[queries]]
//! sql = "SELECT password FROM user_clear_password WHERE name = ?"
//!
//! [[queries.credentials]]
//! name      = "password"
//! algorithm = "clear"
//! columns   = [1]
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    error::RealmError, mapper::KeyMapper, realm::SqlRealm, source::DataSource,
};

/// Top-level realm configuration: ordered principal queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealmConfig {
    #[serde(default)]
    pub queries: Vec<QueryConfig>,
}

/// One principal query: SQL text (exactly one `?` placeholder) and the
/// credentials mapped out of its result columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub sql: String,
    #[serde(default)]
    pub credentials: Vec<MapperConfig>,
}

/// One credential mapping: logical name, registry algorithm name, and the
/// 1-based result-set columns holding the encoded form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperConfig {
    pub name: String,
    pub algorithm: String,
    pub columns: Vec<u32>,
}

impl RealmConfig {
    /// Build a realm running every configured query against `source`.
    /// Misconfiguration (unknown algorithms, bad column lists) surfaces
    /// here, not at query time.
    pub fn build(&self, source: Arc<dyn DataSource>) -> Result<SqlRealm, RealmError> {
        let mut builder = SqlRealm::builder();
        for query in &self.queries {
            builder = builder.principal_query(query.sql.clone(), Arc::clone(&source));
            for mapper in &query.credentials {
                builder =
                    builder.with_mapper(KeyMapper::new(&mapper.name, &mapper.algorithm, &mapper.columns)?);
            }
        }
        builder.build()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[queries]]
        sql = "SELECT password FROM user_clear_password WHERE name = ?"

        [[queries.credentials]]
        name      = "password"
        algorithm = "clear"
        columns   = [1]

        [[queries]]
        sql = "SELECT digest, salt, iterationCount FROM user_scram WHERE name = ?"

        [[queries.credentials]]
        name      = "scram"
        algorithm = "scram-sha-256"
        columns   = [1, 2, 3]
    "#;

    #[test]
    fn deserializes_from_toml() {
        let config: RealmConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.queries.len(), 2);
        assert_eq!(config.queries[0].credentials[0].algorithm, "clear");
        assert_eq!(config.queries[1].credentials[0].columns, vec![1, 2, 3]);
    }

    #[test]
    fn unknown_algorithm_fails_at_build() {
        let mut config: RealmConfig = toml::from_str(SAMPLE).unwrap();
        config.queries[0].credentials[0].algorithm = "md4".into();

        struct NoSource;

        #[async_trait::async_trait]
        impl DataSource for NoSource {
            async fn execute(
                &self,
                _sql: &str,
                _principal: &str,
            ) -> Result<Vec<crate::row::SqlRow>, RealmError> {
                Ok(Vec::new())
            }
        }

        assert!(matches!(
            config.build(Arc::new(NoSource)),
            Err(RealmError::Credential(_))
        ));
    }
}
