//! Credential domain types

use std::fmt;

/// Short-lived service-account key
///
/// `name` is the IAM resource name used to revoke the key, `material` is the
/// decoded JSON key file. The material is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceAccountKey {
    pub name: String,
    pub material: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("name", &self.name)
            .field("material", &"<redacted>")
            .finish()
    }
}
