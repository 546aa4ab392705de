pub mod access;
pub mod organization;
pub mod page;
pub mod person;
pub mod role;

pub use access::{BadgeColor, GlobalAccess, GroupAccess};
pub use organization::{GroupMember, Organization};
pub use page::Page;
pub use person::{GroupMembership, Person, Tag};
pub use role::PersonWithRole;
