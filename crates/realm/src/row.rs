//! An owned result-set row with SQL-style positional access.

use quarry_credentials::ColumnValue;

/// One row returned by a principal query, detached from the driver.
///
/// Column access is 1-based, matching SQL `SELECT` column numbering and the
/// indices realm operators write in mapper configuration. Index 0 and
/// out-of-range indices return `None`.
#[derive(Debug, Clone)]
pub struct SqlRow {
    values: Vec<ColumnValue>,
}

impl SqlRow {
    pub fn new(values: Vec<ColumnValue>) -> Self {
        Self { values }
    }

    /// Get the value at a 1-based column index.
    pub fn get(&self, index: u32) -> Option<&ColumnValue> {
        let index = usize::try_from(index).ok()?.checked_sub(1)?;
        self.values.get(index)
    }

    /// Number of columns in the row.
    pub fn columns(&self) -> usize {
        self.values.len()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_based_access() {
        let row = SqlRow::new(vec![
            ColumnValue::Text("a".into()),
            ColumnValue::Integer(2),
        ]);
        assert_eq!(row.get(1), Some(&ColumnValue::Text("a".into())));
        assert_eq!(row.get(2), Some(&ColumnValue::Integer(2)));
        assert_eq!(row.get(0), None);
        assert_eq!(row.get(3), None);
        assert_eq!(row.columns(), 2);
    }
}
