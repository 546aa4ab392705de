use serde::{Deserialize, Serialize};

use super::access::GroupAccess;

/// An organization (group). Counts are supplied by the directory and are
/// never derived here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub gid: i64,
    pub name: String,
    #[serde(default)]
    pub member_count: Option<i64>,
    #[serde(default)]
    pub event_count: Option<i64>,
}

impl Organization {
    pub fn new(gid: i64, name: impl Into<String>) -> Self {
        Organization { gid, name: name.into(), member_count: None, event_count: None }
    }
}

/// One row of an organization's member roster (person joined with the
/// membership relation). `id` is present once the membership is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub did: String,
    pub name: String,
    pub access_level: GroupAccess,
    pub group: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}
