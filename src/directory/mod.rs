//! Boundary to the external data service.
//!
//! The console never owns data. It reads pages of records through
//! [`Directory`] and forwards every change as a [`Mutation`]; the directory
//! decides what actually happens and the next read reflects it.

use std::fmt;

use async_trait::async_trait;

use crate::models::{GlobalAccess, GroupAccess, GroupMember, Organization, Page, Person, PersonWithRole};

pub mod fixture;

pub use fixture::{FixtureData, FixtureDirectory, FixtureSize};

/// A change forwarded to the directory. Removals carry the row id the
/// roster was showing when it is known, so a row that changed in between
/// is refused instead of silently removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    SetRole { did: String, access: GlobalAccess },
    RemoveRole { did: String, role_id: Option<i64> },
    AddMember { gid: i64, did: String, access: GroupAccess },
    SetMemberAccess { gid: i64, did: String, access: GroupAccess },
    RemoveMember { gid: i64, did: String, id: Option<i64> },
    DeleteOrganization { gid: i64 },
}

impl Mutation {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::SetRole { .. } => "role.set",
            Mutation::RemoveRole { .. } => "role.removed",
            Mutation::AddMember { .. } => "member.added",
            Mutation::SetMemberAccess { .. } => "member.access_set",
            Mutation::RemoveMember { .. } => "member.removed",
            Mutation::DeleteOrganization { .. } => "organization.deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    UnknownPerson(String),
    UnknownOrganization(i64),
    AlreadyMember { gid: i64, did: String },
    NotMember { gid: i64, did: String },
    NoRole(String),
    Stale(String),
    Rejected(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::UnknownPerson(did) => write!(f, "No person with Discord ID {did}"),
            DirectoryError::UnknownOrganization(gid) => write!(f, "No organization with id {gid}"),
            DirectoryError::AlreadyMember { gid, did } => {
                write!(f, "{did} is already a member of organization {gid}")
            }
            DirectoryError::NotMember { gid, did } => {
                write!(f, "{did} is not a member of organization {gid}")
            }
            DirectoryError::NoRole(did) => write!(f, "{did} has no role to change"),
            DirectoryError::Stale(what) => write!(f, "The {what} changed since it was listed"),
            DirectoryError::Rejected(reason) => write!(f, "Rejected: {reason}"),
        }
    }
}

impl std::error::Error for DirectoryError {}

#[async_trait]
pub trait Directory: Send + Sync {
    async fn people(&self, page: u32, per_page: u32) -> Result<Page<Person>, DirectoryError>;

    async fn person(&self, did: &str) -> Result<Option<Person>, DirectoryError>;

    async fn organizations(&self, page: u32, per_page: u32) -> Result<Page<Organization>, DirectoryError>;

    async fn organization(&self, gid: i64) -> Result<Option<Organization>, DirectoryError>;

    async fn members(&self, gid: i64) -> Result<Vec<GroupMember>, DirectoryError>;

    async fn roles(&self, page: u32, per_page: u32) -> Result<Page<PersonWithRole>, DirectoryError>;

    async fn role(&self, did: &str) -> Result<Option<PersonWithRole>, DirectoryError>;

    async fn apply(&self, mutation: Mutation) -> Result<(), DirectoryError>;
}
