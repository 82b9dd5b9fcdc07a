//! The data-source abstraction and its SQLite implementation.

use async_trait::async_trait;
use quarry_credentials::ColumnValue;
use sqlx::{Row as _, SqlitePool, TypeInfo as _, ValueRef as _, sqlite::SqliteRow};
use tracing::warn;

use crate::{error::RealmError, row::SqlRow};

/// A provider of principal-query execution.
///
/// `sql` carries exactly one positional `?` placeholder; implementations
/// must bind `principal` to it — splicing the principal into the SQL text
/// is forbidden. Connectivity and execution failures are fatal
/// ([`RealmError::DataSource`]); an empty result set is not an error.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Execute `sql` with `principal` bound to its single parameter and
    /// return every row, fully materialized.
    async fn execute(&self, sql: &str, principal: &str) -> Result<Vec<SqlRow>, RealmError>;
}

#[async_trait]
impl DataSource for SqlitePool {
    async fn execute(&self, sql: &str, principal: &str) -> Result<Vec<SqlRow>, RealmError> {
        let rows = sqlx::query(sql)
            .bind(principal)
            .fetch_all(self)
            .await
            .map_err(RealmError::data_source)?;
        rows.iter().map(convert_row).collect()
    }
}

fn convert_row(row: &SqliteRow) -> Result<SqlRow, RealmError> {
    let mut values = Vec::with_capacity(row.len());
    for index in 0..row.len() {
        values.push(convert_column(row, index)?);
    }
    Ok(SqlRow::new(values))
}

/// Map one SQLite value onto the realm's column model by its runtime
/// storage class.
fn convert_column(row: &SqliteRow, index: usize) -> Result<ColumnValue, RealmError> {
    let raw = row.try_get_raw(index).map_err(RealmError::data_source)?;
    if raw.is_null() {
        return Ok(ColumnValue::Null);
    }
    let type_info = raw.type_info();
    let value = match type_info.name() {
        "INTEGER" | "BOOLEAN" => {
            ColumnValue::Integer(row.try_get(index).map_err(RealmError::data_source)?)
        }
        "TEXT" => ColumnValue::Text(row.try_get(index).map_err(RealmError::data_source)?),
        "BLOB" => ColumnValue::Bytes(row.try_get(index).map_err(RealmError::data_source)?),
        "REAL" => {
            // No credential encoding consumes floats; this only happens when
            // an operator selects a superfluous column.
            warn!(column = index + 1, "stringifying REAL column value");
            ColumnValue::Text(
                row.try_get::<f64, _>(index)
                    .map_err(RealmError::data_source)?
                    .to_string(),
            )
        }
        other => {
            warn!(
                column = index + 1,
                sql_type = other,
                "unsupported column type, treating as NULL"
            );
            ColumnValue::Null
        }
    };
    Ok(value)
}
