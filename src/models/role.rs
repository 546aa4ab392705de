use serde::{Deserialize, Serialize};

use super::access::GlobalAccess;

/// A person joined with their site-wide role, if any.
///
/// `role_id` is only present when a role row exists, i.e. when
/// `access_level` is not `NoAccess`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonWithRole {
    pub did: String,
    pub name: String,
    #[serde(default)]
    pub access_level: GlobalAccess,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
}

impl PersonWithRole {
    pub fn new(did: impl Into<String>, name: impl Into<String>, access_level: GlobalAccess) -> Self {
        PersonWithRole { did: did.into(), name: name.into(), access_level, role_id: None }
    }
}
