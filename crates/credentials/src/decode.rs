//! The catalog's decode table: raw columns in, typed credentials out.

use crate::{
    algorithm::Algorithm,
    column::ColumnValue,
    credential::{
        BcryptPassword, ClearPassword, Credential, PrivateKey, SaltedDigest, ScramDigest,
        SimpleDigest,
    },
    error::CredentialError,
    mcf,
};

/// Decode the ordered columns selected for `algorithm` into a typed
/// credential. Total over well-formed input; every malformation maps to a
/// [`CredentialError`] rather than a panic.
pub fn decode(
    algorithm: Algorithm,
    columns: &[ColumnValue],
) -> Result<Credential, CredentialError> {
    if columns.len() < algorithm.required_columns() {
        return Err(CredentialError::MissingColumns {
            algorithm: algorithm.name(),
            expected: algorithm.required_columns(),
            actual: columns.len(),
        });
    }

    Ok(match algorithm {
        Algorithm::Clear => Credential::Clear(ClearPassword::new(columns[0].as_text()?)),
        Algorithm::Bcrypt => Credential::Bcrypt(decode_bcrypt(columns)?),
        Algorithm::SimpleDigest(digest_alg) => Credential::SimpleDigest(SimpleDigest {
            algorithm: digest_alg,
            digest: columns[0].as_octets()?.into_owned(),
        }),
        Algorithm::SaltedDigest(digest_alg, order) => Credential::SaltedDigest(SaltedDigest {
            algorithm: digest_alg,
            order,
            digest: columns[0].as_octets()?.into_owned(),
            salt: columns[1].as_octets()?.into_owned(),
        }),
        Algorithm::ScramDigest(family) => Credential::ScramDigest(ScramDigest {
            family,
            digest: columns[0].as_octets()?.into_owned(),
            salt: columns[1].as_octets()?.into_owned(),
            iterations: columns[2].as_count()?,
        }),
        Algorithm::RsaPrivateKey => Credential::PrivateKey(PrivateKey {
            der: columns[0].as_key_bytes()?.to_vec(),
        }),
    })
}

/// Bcrypt stores either a single Modular Crypt string column or the
/// (hash, salt, cost) triple split across three columns.
fn decode_bcrypt(columns: &[ColumnValue]) -> Result<BcryptPassword, CredentialError> {
    if columns.len() >= 3 {
        let hash: [u8; 23] = columns[0]
            .as_octets()?
            .into_owned()
            .try_into()
            .map_err(|v: Vec<u8>| {
                CredentialError::Malformed(format!("bcrypt hash is {} bytes, expected 23", v.len()))
            })?;
        let salt: [u8; 16] = columns[1]
            .as_octets()?
            .into_owned()
            .try_into()
            .map_err(|v: Vec<u8>| {
                CredentialError::Malformed(format!("bcrypt salt is {} bytes, expected 16", v.len()))
            })?;
        let cost = columns[2].as_count()?;
        if !(mcf::MIN_COST..=mcf::MAX_COST).contains(&cost) {
            return Err(CredentialError::Malformed(format!(
                "bcrypt cost {cost} outside {}..={}",
                mcf::MIN_COST,
                mcf::MAX_COST
            )));
        }
        Ok(BcryptPassword { hash, salt, cost })
    } else {
        mcf::parse(&columns[0].as_text()?)
    }
}
