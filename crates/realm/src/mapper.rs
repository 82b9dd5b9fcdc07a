//! Key mappers: column positions in, typed credentials out.

use quarry_credentials::{Algorithm, ColumnValue, Credential, CredentialError, decode};

use crate::{error::RealmError, row::SqlRow};

/// Binds a credential name and algorithm to the ordered columns that hold
/// its encoded form within one principal query's result set.
///
/// Mapping is purely positional: no column-name lookup ever happens, the
/// indices (1-based, SQL convention) map directly onto `SELECT` column
/// order. Immutable once built; misconfiguration (unknown algorithm, too
/// few columns, a zero index) fails at construction, not at query time.
#[derive(Debug, Clone)]
pub struct KeyMapper {
    credential_name: String,
    algorithm: Algorithm,
    columns: Vec<u32>,
}

impl KeyMapper {
    /// Build a mapper for `credential_name` using the registry entry named
    /// by `algorithm` and the given 1-based column indices.
    pub fn new(
        credential_name: impl Into<String>,
        algorithm: &str,
        columns: &[u32],
    ) -> Result<Self, RealmError> {
        let credential_name = credential_name.into();
        let algorithm: Algorithm = algorithm.parse()?;
        if columns.len() < algorithm.required_columns() {
            return Err(RealmError::InvalidMapper {
                name: credential_name,
                reason: format!(
                    "algorithm `{algorithm}` needs at least {} column(s), got {}",
                    algorithm.required_columns(),
                    columns.len()
                ),
            });
        }
        if columns.contains(&0) {
            return Err(RealmError::InvalidMapper {
                name: credential_name,
                reason: "column indices are 1-based, 0 is not a valid index".into(),
            });
        }
        Ok(Self {
            credential_name,
            algorithm,
            columns: columns.to_vec(),
        })
    }

    /// The logical credential name this mapper produces.
    pub fn credential_name(&self) -> &str {
        &self.credential_name
    }

    /// The registry algorithm the mapped columns are decoded with.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Decode this mapper's columns from `row` into a typed credential.
    pub fn map(&self, row: &SqlRow) -> Result<Credential, MapError> {
        let mut values: Vec<ColumnValue> = Vec::with_capacity(self.columns.len());
        for &index in &self.columns {
            let value = row.get(index).ok_or(MapError::ColumnIndexOutOfRange {
                index,
                columns: row.columns(),
            })?;
            values.push(value.clone());
        }
        Ok(decode(self.algorithm, &values)?)
    }
}

/// Row-scoped mapping failure. Isolated by the query layer: logged and
/// skipped without aborting sibling mappers or rows.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The configured column index exceeds the row's column count.
    #[error("column index {index} out of range for a {columns}-column row")]
    ColumnIndexOutOfRange {
        /// The 1-based index the mapper was configured with.
        index: u32,
        /// How many columns the row actually had.
        columns: usize,
    },

    /// The columns were present but could not be decoded.
    #[error(transparent)]
    Decode(#[from] CredentialError),
}
