//! Principal queries: one SQL template plus the mappers that read its rows.

use std::{collections::HashMap, fmt, sync::Arc};

use quarry_credentials::Credential;
use tracing::warn;

use crate::{error::RealmError, mapper::KeyMapper, row::SqlRow, source::DataSource};

/// One query group: a SQL template with a single `?` placeholder for the
/// principal name, the mappers decoding its result columns, and the data
/// source it runs against. Immutable once the realm is built.
#[derive(Clone)]
pub struct PrincipalQuery {
    sql: String,
    mappers: Vec<KeyMapper>,
    source: Arc<dyn DataSource>,
}

impl PrincipalQuery {
    pub fn new(sql: impl Into<String>, source: Arc<dyn DataSource>) -> Self {
        Self {
            sql: sql.into(),
            mappers: Vec::new(),
            source,
        }
    }

    /// Attach a mapper to this query group.
    pub fn with_mapper(mut self, mapper: KeyMapper) -> Self {
        self.mappers.push(mapper);
        self
    }

    pub(crate) fn push_mapper(&mut self, mapper: KeyMapper) {
        self.mappers.push(mapper);
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn mappers(&self) -> &[KeyMapper] {
        &self.mappers
    }

    /// Whether any mapper of this query produces `credential_name`.
    pub(crate) fn produces(&self, credential_name: &str) -> bool {
        self.mappers
            .iter()
            .any(|m| m.credential_name() == credential_name)
    }

    /// Execute the query once with `principal` bound to the placeholder.
    /// Zero rows is a normal, empty result.
    pub async fn execute(&self, principal: &str) -> Result<Vec<SqlRow>, RealmError> {
        self.source.execute(&self.sql, principal).await
    }

    /// Apply every mapper to every row, inserting decoded credentials into
    /// `out` keyed by credential name (later writers overwrite earlier
    /// ones). A failing mapper/row pair is logged and skipped; it never
    /// aborts sibling mappers or rows.
    pub(crate) fn collect_into(&self, rows: &[SqlRow], out: &mut HashMap<String, Credential>) {
        for row in rows {
            for mapper in &self.mappers {
                match mapper.map(row) {
                    Ok(credential) => {
                        out.insert(mapper.credential_name().to_owned(), credential);
                    }
                    Err(e) => warn!(
                        credential = %mapper.credential_name(),
                        algorithm = %mapper.algorithm(),
                        error = %e,
                        "skipping unmappable credential"
                    ),
                }
            }
        }
    }
}

impl fmt::Debug for PrincipalQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrincipalQuery")
            .field("sql", &self.sql)
            .field("mappers", &self.mappers)
            .finish_non_exhaustive()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use quarry_credentials::ColumnValue;

    use super::*;

    struct NoSource;

    #[async_trait::async_trait]
    impl DataSource for NoSource {
        async fn execute(&self, _sql: &str, _principal: &str) -> Result<Vec<SqlRow>, RealmError> {
            Ok(Vec::new())
        }
    }

    fn query_with(mappers: &[KeyMapper]) -> PrincipalQuery {
        let mut query = PrincipalQuery::new("SELECT password FROM t WHERE name = ?", Arc::new(NoSource));
        for m in mappers {
            query.push_mapper(m.clone());
        }
        query
    }

    #[test]
    fn one_bad_mapping_does_not_defeat_siblings() {
        let query = query_with(&[
            KeyMapper::new("bad", "bcrypt", &[1]).unwrap(),
            KeyMapper::new("good", "clear", &[2]).unwrap(),
        ]);
        let rows = vec![SqlRow::new(vec![
            ColumnValue::Text("not-a-crypt-string".into()),
            ColumnValue::Text("abcd1234".into()),
        ])];

        let mut out = HashMap::new();
        query.collect_into(&rows, &mut out);
        assert!(!out.contains_key("bad"));
        match out.get("good").unwrap() {
            Credential::Clear(c) => assert_eq!(c.as_str(), "abcd1234"),
            other => panic!("unexpected credential {other:?}"),
        }
    }

    #[test]
    fn later_rows_overwrite_earlier_ones() {
        let query = query_with(&[KeyMapper::new("cred", "clear", &[1]).unwrap()]);
        let rows = vec![
            SqlRow::new(vec![ColumnValue::Text("first".into())]),
            SqlRow::new(vec![ColumnValue::Text("second".into())]),
        ];

        let mut out = HashMap::new();
        query.collect_into(&rows, &mut out);
        match out.get("cred").unwrap() {
            Credential::Clear(c) => assert_eq!(c.as_str(), "second"),
            other => panic!("unexpected credential {other:?}"),
        }
    }

    #[test]
    fn produces_matches_exact_names() {
        let query = query_with(&[KeyMapper::new("cred", "clear", &[1]).unwrap()]);
        assert!(query.produces("cred"));
        assert!(!query.produces("Cred"));
        assert!(!query.produces("other"));
    }
}
