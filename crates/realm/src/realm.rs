//! The SQL-backed security realm.

use std::sync::Arc;

use crate::{
    error::RealmError, identity::RealmIdentity, mapper::KeyMapper, query::PrincipalQuery,
    source::DataSource, support::CredentialSupport,
};

/// A credential-resolution authority backed by a set of principal queries.
///
/// Immutable after [`build`](SqlRealmBuilder::build) and cheap to clone;
/// safe to share across threads and tasks, each creating independent
/// [`RealmIdentity`] instances.
#[derive(Debug, Clone)]
pub struct SqlRealm {
    queries: Arc<[PrincipalQuery]>,
}

impl SqlRealm {
    pub fn builder() -> SqlRealmBuilder {
        SqlRealmBuilder {
            queries: Vec::new(),
            dangling_mapper: false,
        }
    }

    /// Realm-scope support for a credential name, answered from
    /// configuration alone — no database access.
    ///
    /// Any mapper that could produce the name yields `Unknown` (support is
    /// identity-dependent and cannot be determined without a concrete
    /// identity); a name no mapper references is `Unsupported`.
    pub fn credential_support(&self, credential_name: &str) -> CredentialSupport {
        if self.queries.iter().any(|q| q.produces(credential_name)) {
            CredentialSupport::Unknown
        } else {
            CredentialSupport::Unsupported
        }
    }

    /// Create an identity handle for `principal`. Pure construction, no
    /// I/O; existence is determined lazily on the first credential
    /// operation.
    pub fn identity(&self, principal: impl Into<String>) -> RealmIdentity {
        RealmIdentity::new(principal.into(), Arc::clone(&self.queries))
    }

    /// The configured principal queries, in declaration order.
    pub fn queries(&self) -> &[PrincipalQuery] {
        &self.queries
    }
}

/// Builds a [`SqlRealm`] from ordered query groups.
///
/// [`principal_query`](Self::principal_query) opens a group;
/// [`with_mapper`](Self::with_mapper) attaches a mapper to the most
/// recently opened one.
#[derive(Debug)]
pub struct SqlRealmBuilder {
    queries: Vec<PrincipalQuery>,
    dangling_mapper: bool,
}

impl SqlRealmBuilder {
    /// Open a new query group executing `sql` against `source`.
    pub fn principal_query(mut self, sql: impl Into<String>, source: Arc<dyn DataSource>) -> Self {
        self.queries.push(PrincipalQuery::new(sql, source));
        self
    }

    /// Attach `mapper` to the most recently opened query group.
    pub fn with_mapper(mut self, mapper: KeyMapper) -> Self {
        match self.queries.last_mut() {
            Some(query) => query.push_mapper(mapper),
            None => self.dangling_mapper = true,
        }
        self
    }

    /// Freeze the configuration into an immutable realm.
    pub fn build(self) -> Result<SqlRealm, RealmError> {
        if self.dangling_mapper {
            return Err(RealmError::DanglingMapper);
        }
        Ok(SqlRealm {
            queries: self.queries.into(),
        })
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::SqlRow;

    struct NoSource;

    #[async_trait::async_trait]
    impl DataSource for NoSource {
        async fn execute(&self, _sql: &str, _principal: &str) -> Result<Vec<SqlRow>, RealmError> {
            Ok(Vec::new())
        }
    }

    fn source() -> Arc<dyn DataSource> {
        Arc::new(NoSource)
    }

    #[test]
    fn realm_scope_support_is_config_only() {
        let realm = SqlRealm::builder()
            .principal_query("SELECT password FROM t WHERE name = ?", source())
            .with_mapper(KeyMapper::new("cred1", "clear", &[1]).unwrap())
            .build()
            .unwrap();

        assert_eq!(
            realm.credential_support("cred1"),
            CredentialSupport::Unknown
        );
        assert_eq!(
            realm.credential_support("cred2"),
            CredentialSupport::Unsupported
        );
    }

    #[test]
    fn mapper_without_query_fails_build() {
        let err = SqlRealm::builder()
            .with_mapper(KeyMapper::new("cred1", "clear", &[1]).unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, RealmError::DanglingMapper));
    }

    #[test]
    fn queries_preserve_declaration_order() {
        let realm = SqlRealm::builder()
            .principal_query("SELECT a FROM t1 WHERE name = ?", source())
            .principal_query("SELECT b FROM t2 WHERE name = ?", source())
            .build()
            .unwrap();
        assert_eq!(realm.queries().len(), 2);
        assert!(realm.queries()[0].sql().contains("t1"));
        assert!(realm.queries()[1].sql().contains("t2"));
    }
}
