//! The realm's declared capability level for a credential name.

/// How far the realm can go with a given credential name, at realm or
/// identity scope.
///
/// Ordered from least to most capable, so `support >=
/// CredentialSupport::ObtainableOnly` reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CredentialSupport {
    /// The credential is definitely absent for this identity (or no mapper
    /// references the name at realm scope).
    Unsupported,
    /// Some mapper could produce the name, but support varies per identity
    /// and no identity has been consulted. Realm-scope answer only.
    Unknown,
    /// The stored form can be fetched but not compared against a candidate
    /// (e.g. a private key).
    ObtainableOnly,
    /// Both verification and retrieval are possible.
    FullySupported,
}

impl CredentialSupport {
    /// Whether retrieval could possibly succeed.
    pub fn may_be_obtainable(self) -> bool {
        self != Self::Unsupported
    }

    /// Whether verification is definitely possible.
    pub fn is_fully_supported(self) -> bool {
        self == Self::FullySupported
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::CredentialSupport::*;

    #[test]
    fn capability_ordering() {
        assert!(Unsupported < Unknown);
        assert!(Unknown < ObtainableOnly);
        assert!(ObtainableOnly < FullySupported);
    }

    #[test]
    fn helpers() {
        assert!(!Unsupported.may_be_obtainable());
        assert!(ObtainableOnly.may_be_obtainable());
        assert!(FullySupported.is_fully_supported());
        assert!(!ObtainableOnly.is_fully_supported());
    }
}
