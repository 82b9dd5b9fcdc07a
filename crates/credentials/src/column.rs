//! Raw positional column values and the coercions decode functions apply.

use std::borrow::Cow;

use crate::error::CredentialError;

/// A raw value read from one result-set column, before any credential
/// interpretation. The data-source layer produces these; decode functions
/// consume them positionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    Null,
    Integer(i64),
    Text(String),
    Bytes(Vec<u8>),
}

impl ColumnValue {
    /// Human-readable type tag, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
        }
    }

    /// Coerce to text: `Text` as-is, `Bytes` must be valid UTF-8.
    pub fn as_text(&self) -> Result<Cow<'_, str>, CredentialError> {
        match self {
            Self::Text(s) => Ok(Cow::Borrowed(s)),
            Self::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => Ok(Cow::Borrowed(s)),
                Err(e) => Err(CredentialError::Malformed(format!(
                    "text column is not valid UTF-8: {e}"
                ))),
            },
            other => Err(CredentialError::WrongColumnType {
                expected: "text",
                actual: other.type_name(),
            }),
        }
    }

    /// Coerce to hash/salt/digest bytes: `Bytes` as-is, `Text` must be an
    /// even-length hex string.
    pub fn as_octets(&self) -> Result<Cow<'_, [u8]>, CredentialError> {
        match self {
            Self::Bytes(b) => Ok(Cow::Borrowed(b)),
            Self::Text(s) => Ok(Cow::Owned(hex::decode(s)?)),
            other => Err(CredentialError::WrongColumnType {
                expected: "bytes",
                actual: other.type_name(),
            }),
        }
    }

    /// Coerce to a positive iteration/cost count: `Integer` as-is, `Text`
    /// must parse as an integer. Non-positive values fail.
    pub fn as_count(&self) -> Result<u32, CredentialError> {
        let n = match self {
            Self::Integer(n) => *n,
            Self::Text(s) => s.parse::<i64>().map_err(|e| {
                CredentialError::Malformed(format!("iteration count `{s}`: {e}"))
            })?,
            other => {
                return Err(CredentialError::WrongColumnType {
                    expected: "integer",
                    actual: other.type_name(),
                });
            }
        };
        u32::try_from(n).ok().filter(|n| *n > 0).ok_or(
            CredentialError::NonPositiveIterations(n),
        )
    }

    /// Coerce to key material: `Bytes` only, no text form is accepted.
    pub fn as_key_bytes(&self) -> Result<&[u8], CredentialError> {
        match self {
            Self::Bytes(b) => Ok(b),
            other => Err(CredentialError::WrongColumnType {
                expected: "bytes",
                actual: other.type_name(),
            }),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_from_utf8_bytes() {
        let v = ColumnValue::Bytes(b"abcd1234".to_vec());
        assert_eq!(v.as_text().unwrap(), "abcd1234");
    }

    #[test]
    fn text_rejects_invalid_utf8() {
        let v = ColumnValue::Bytes(vec![0xff, 0xfe]);
        assert!(matches!(v.as_text(), Err(CredentialError::Malformed(_))));
    }

    #[test]
    fn octets_from_hex_text() {
        let v = ColumnValue::Text("deadbeef".into());
        assert_eq!(v.as_octets().unwrap().as_ref(), &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn octets_reject_bad_hex() {
        assert!(ColumnValue::Text("xyz".into()).as_octets().is_err());
        assert!(ColumnValue::Text("abc".into()).as_octets().is_err());
    }

    #[test]
    fn count_must_be_positive() {
        assert_eq!(ColumnValue::Integer(4096).as_count().unwrap(), 4096);
        assert_eq!(ColumnValue::Text("10".into()).as_count().unwrap(), 10);
        assert!(matches!(
            ColumnValue::Integer(0).as_count(),
            Err(CredentialError::NonPositiveIterations(0))
        ));
        assert!(matches!(
            ColumnValue::Integer(-1).as_count(),
            Err(CredentialError::NonPositiveIterations(-1))
        ));
    }

    #[test]
    fn null_never_coerces() {
        assert!(ColumnValue::Null.as_text().is_err());
        assert!(ColumnValue::Null.as_octets().is_err());
        assert!(ColumnValue::Null.as_count().is_err());
        assert!(ColumnValue::Null.as_key_bytes().is_err());
    }

    #[test]
    fn key_bytes_reject_text() {
        assert!(ColumnValue::Text("pem".into()).as_key_bytes().is_err());
    }
}
