//! In-memory stand-in for the external data service, seeded with generated
//! volunteers so the console can be run and tested without a backend.

use std::collections::HashSet;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::models::{
    GlobalAccess, GroupAccess, GroupMember, GroupMembership, Organization, Page, Person, PersonWithRole, Tag,
};
use super::{Directory, DirectoryError, Mutation};

const REAL_TAGS: [&str; 4] = ["Dev-Software", "Dev-Art", "Community Building", "Attendence"];

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Chloe", "Dmitri", "Elena", "Farah", "Gabriel", "Hana", "Ivan", "Jade",
    "Kofi", "Lena", "Marco", "Nadia", "Omar", "Priya", "Quinn", "Rosa", "Sami", "Tess",
];

const LAST_NAMES: &[&str] = &[
    "Anders", "Baker", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Hughes", "Ito",
    "Jensen", "Kowalski", "Lopez", "Moreau", "Novak", "Okafor", "Petrov", "Reyes", "Sato",
];

const GROUP_NAMES: &[&str] = &[
    "Harbor Outreach", "North Side Collective", "Riverbank Mutual Aid", "Civic Tech Guild",
    "Lantern Press", "Open Door Network", "Summit Organizers", "Westfield Tenants Union",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRow {
    pub did: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRow {
    pub gid: i64,
    pub name: String,
    #[serde(default)]
    pub event_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipRow {
    pub id: i64,
    pub did: String,
    pub gid: i64,
    pub access_level: GroupAccess,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRow {
    pub id: i64,
    pub did: String,
    pub access_level: GlobalAccess,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedTag {
    pub did: String,
    pub tid: i64,
}

/// How much data to generate.
#[derive(Debug, Clone, Copy)]
pub struct FixtureSize {
    pub people: usize,
    pub groups: usize,
}

impl Default for FixtureSize {
    fn default() -> Self {
        FixtureSize { people: 50, groups: 5 }
    }
}

/// Raw tables behind the fixture directory. Public so tests can build
/// exact scenarios and deployments can load a JSON snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureData {
    #[serde(default)]
    pub people: Vec<PersonRow>,
    #[serde(default)]
    pub groups: Vec<GroupRow>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub memberships: Vec<MembershipRow>,
    #[serde(default)]
    pub roles: Vec<RoleRow>,
    #[serde(default)]
    pub assigned_tags: Vec<AssignedTag>,
}

/// Needs Approval / Organizer / Admin split 10/80/10, plus a slice of
/// people left without a role so there is someone to assign.
const ROLE_WEIGHTS: [(GlobalAccess, u32); 4] = [
    (GlobalAccess::NoAccess, 10),
    (GlobalAccess::NeedsApproval, 10),
    (GlobalAccess::Organizer, 80),
    (GlobalAccess::Admin, 10),
];

impl FixtureData {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Random data shaped like the staging database: every person gets a
    /// global role (mostly organizers, some without access), joins up to
    /// three groups and carries up to two of the real tags.
    pub fn generate<R: Rng + ?Sized>(size: FixtureSize, rng: &mut R) -> Self {
        let mut data = FixtureData::default();

        for (i, name) in REAL_TAGS.iter().enumerate() {
            data.tags.push(Tag { tid: i as i64 + 1, name: name.to_string() });
        }

        let mut seen = HashSet::new();
        while data.people.len() < size.people {
            let did = rng.random_range(100_000_000_000_000_000u64..=999_999_999_999_999_999).to_string();
            if !seen.insert(did.clone()) {
                continue;
            }
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
            let email = rng
                .random_bool(0.9)
                .then(|| format!("{}.{}@example.org", first.to_lowercase(), last.to_lowercase()));
            let phone = rng
                .random_bool(0.7)
                .then(|| format!("555-01{:02}", rng.random_range(0..100)));
            data.people.push(PersonRow { did, name: format!("{first} {last}"), email, phone });
        }

        for gid in 1..=size.groups as i64 {
            let base = GROUP_NAMES[(gid as usize - 1) % GROUP_NAMES.len()];
            let name = if gid as usize > GROUP_NAMES.len() { format!("{base} {gid}") } else { base.to_string() };
            data.groups.push(GroupRow { gid, name, event_count: rng.random_range(0..6) });
        }

        let gids: Vec<i64> = data.groups.iter().map(|g| g.gid).collect();
        let tids: Vec<i64> = data.tags.iter().map(|t| t.tid).collect();
        let dids: Vec<String> = data.people.iter().map(|p| p.did.clone()).collect();

        for did in &dids {
            let joins = rng.random_range(0..=gids.len().min(3));
            let picked: Vec<i64> = gids.choose_multiple(rng, joins).copied().collect();
            for gid in picked {
                let access_level = GroupAccess::ALL.choose(rng).copied().unwrap_or_default();
                let id = data.next_membership_id();
                data.memberships.push(MembershipRow { id, did: did.clone(), gid, access_level });
            }

            let access_level = ROLE_WEIGHTS
                .choose_weighted(rng, |(_, weight)| *weight)
                .map(|(access, _)| *access)
                .unwrap_or_default();
            if access_level.is_assigned() {
                let id = data.next_role_id();
                data.roles.push(RoleRow { id, did: did.clone(), access_level });
            }

            let tag_count = rng.random_range(0..=tids.len().min(2));
            let tags: Vec<i64> = tids.choose_multiple(rng, tag_count).copied().collect();
            for tid in tags {
                data.assigned_tags.push(AssignedTag { did: did.clone(), tid });
            }
        }

        data
    }

    pub fn with_person(mut self, did: &str, name: &str) -> Self {
        self.people.push(PersonRow { did: did.to_string(), name: name.to_string(), email: None, phone: None });
        self
    }

    pub fn with_group(mut self, gid: i64, name: &str) -> Self {
        self.groups.push(GroupRow { gid, name: name.to_string(), event_count: 0 });
        self
    }

    pub fn with_member(mut self, gid: i64, did: &str, access_level: GroupAccess) -> Self {
        let id = self.next_membership_id();
        self.memberships.push(MembershipRow { id, did: did.to_string(), gid, access_level });
        self
    }

    pub fn with_role(mut self, did: &str, access_level: GlobalAccess) -> Self {
        let id = self.next_role_id();
        self.roles.push(RoleRow { id, did: did.to_string(), access_level });
        self
    }

    pub fn with_tag(mut self, did: &str, tid: i64, name: &str) -> Self {
        if !self.tags.iter().any(|t| t.tid == tid) {
            self.tags.push(Tag { tid, name: name.to_string() });
        }
        self.assigned_tags.push(AssignedTag { did: did.to_string(), tid });
        self
    }

    fn next_membership_id(&self) -> i64 {
        self.memberships.iter().map(|m| m.id).max().unwrap_or(0) + 1
    }

    fn next_role_id(&self) -> i64 {
        self.roles.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    fn person_row(&self, did: &str) -> Option<&PersonRow> {
        self.people.iter().find(|p| p.did == did)
    }

    fn group_row(&self, gid: i64) -> Option<&GroupRow> {
        self.groups.iter().find(|g| g.gid == gid)
    }

    fn person_view(&self, row: &PersonRow) -> Person {
        let groups = self
            .memberships
            .iter()
            .filter(|m| m.did == row.did)
            .filter_map(|m| {
                self.group_row(m.gid).map(|g| GroupMembership {
                    gid: g.gid,
                    name: g.name.clone(),
                    access_level: Some(m.access_level),
                })
            })
            .collect();
        let tags = self
            .assigned_tags
            .iter()
            .filter(|a| a.did == row.did)
            .filter_map(|a| self.tags.iter().find(|t| t.tid == a.tid).cloned())
            .collect();
        Person {
            did: row.did.clone(),
            name: row.name.clone(),
            email: row.email.clone(),
            phone: row.phone.clone(),
            groups,
            tags,
        }
    }

    fn organization_view(&self, row: &GroupRow) -> Organization {
        let members = self.memberships.iter().filter(|m| m.gid == row.gid).count() as i64;
        Organization {
            gid: row.gid,
            name: row.name.clone(),
            member_count: Some(members),
            event_count: Some(row.event_count),
        }
    }

    fn role_view(&self, row: &PersonRow) -> PersonWithRole {
        let role = self.roles.iter().find(|r| r.did == row.did);
        PersonWithRole {
            did: row.did.clone(),
            name: row.name.clone(),
            access_level: role.map(|r| r.access_level).unwrap_or_default(),
            role_id: role.map(|r| r.id),
        }
    }

    fn require_person(&self, did: &str) -> Result<(), DirectoryError> {
        self.person_row(did)
            .map(|_| ())
            .ok_or_else(|| DirectoryError::UnknownPerson(did.to_string()))
    }

    fn require_group(&self, gid: i64) -> Result<(), DirectoryError> {
        self.group_row(gid).map(|_| ()).ok_or(DirectoryError::UnknownOrganization(gid))
    }

    fn membership_mut(&mut self, gid: i64, did: &str) -> Result<&mut MembershipRow, DirectoryError> {
        self.memberships
            .iter_mut()
            .find(|m| m.gid == gid && m.did == did)
            .ok_or_else(|| DirectoryError::NotMember { gid, did: did.to_string() })
    }

    fn apply(&mut self, mutation: Mutation) -> Result<(), DirectoryError> {
        match mutation {
            Mutation::SetRole { did, access } => {
                self.require_person(&did)?;
                if !access.is_assigned() {
                    return Err(DirectoryError::Rejected("use role removal to revoke access".into()));
                }
                match self.roles.iter_mut().find(|r| r.did == did) {
                    Some(role) => role.access_level = access,
                    None => {
                        let id = self.next_role_id();
                        self.roles.push(RoleRow { id, did, access_level: access });
                    }
                }
            }
            Mutation::RemoveRole { did, role_id } => {
                let role = self
                    .roles
                    .iter()
                    .find(|r| r.did == did)
                    .ok_or_else(|| DirectoryError::NoRole(did.clone()))?;
                if role_id.is_some_and(|id| id != role.id) {
                    return Err(DirectoryError::Stale(format!("role of {did}")));
                }
                self.roles.retain(|r| r.did != did);
            }
            Mutation::AddMember { gid, did, access } => {
                self.require_person(&did)?;
                self.require_group(gid)?;
                if self.memberships.iter().any(|m| m.gid == gid && m.did == did) {
                    return Err(DirectoryError::AlreadyMember { gid, did });
                }
                let id = self.next_membership_id();
                self.memberships.push(MembershipRow { id, did, gid, access_level: access });
            }
            Mutation::SetMemberAccess { gid, did, access } => {
                self.require_group(gid)?;
                self.membership_mut(gid, &did)?.access_level = access;
            }
            Mutation::RemoveMember { gid, did, id } => {
                self.require_group(gid)?;
                let membership = self.membership_mut(gid, &did)?;
                if id.is_some_and(|id| id != membership.id) {
                    return Err(DirectoryError::Stale(format!("membership of {did}")));
                }
                self.memberships.retain(|m| !(m.gid == gid && m.did == did));
            }
            Mutation::DeleteOrganization { gid } => {
                self.require_group(gid)?;
                self.groups.retain(|g| g.gid != gid);
                self.memberships.retain(|m| m.gid != gid);
            }
        }
        Ok(())
    }
}

pub struct FixtureDirectory {
    data: RwLock<FixtureData>,
}

impl FixtureDirectory {
    pub fn new(data: FixtureData) -> Self {
        FixtureDirectory { data: RwLock::new(data) }
    }

    /// Generate a fixture; a seed makes the data reproducible.
    pub fn generate(size: FixtureSize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(FixtureData::generate(size, &mut rng))
    }

    pub async fn snapshot(&self) -> FixtureData {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl Directory for FixtureDirectory {
    async fn people(&self, page: u32, per_page: u32) -> Result<Page<Person>, DirectoryError> {
        let data = self.data.read().await;
        let people: Vec<Person> = data.people.iter().map(|p| data.person_view(p)).collect();
        Ok(Page::slice(&people, page, per_page))
    }

    async fn person(&self, did: &str) -> Result<Option<Person>, DirectoryError> {
        let data = self.data.read().await;
        Ok(data.person_row(did).map(|p| data.person_view(p)))
    }

    async fn organizations(&self, page: u32, per_page: u32) -> Result<Page<Organization>, DirectoryError> {
        let data = self.data.read().await;
        let orgs: Vec<Organization> = data.groups.iter().map(|g| data.organization_view(g)).collect();
        Ok(Page::slice(&orgs, page, per_page))
    }

    async fn organization(&self, gid: i64) -> Result<Option<Organization>, DirectoryError> {
        let data = self.data.read().await;
        Ok(data.group_row(gid).map(|g| data.organization_view(g)))
    }

    async fn members(&self, gid: i64) -> Result<Vec<GroupMember>, DirectoryError> {
        let data = self.data.read().await;
        data.require_group(gid)?;
        Ok(data
            .memberships
            .iter()
            .filter(|m| m.gid == gid)
            .filter_map(|m| {
                data.person_row(&m.did).map(|p| GroupMember {
                    did: p.did.clone(),
                    name: p.name.clone(),
                    access_level: m.access_level,
                    group: gid,
                    id: Some(m.id),
                })
            })
            .collect())
    }

    async fn roles(&self, page: u32, per_page: u32) -> Result<Page<PersonWithRole>, DirectoryError> {
        let data = self.data.read().await;
        let roles: Vec<PersonWithRole> = data.people.iter().map(|p| data.role_view(p)).collect();
        Ok(Page::slice(&roles, page, per_page))
    }

    async fn role(&self, did: &str) -> Result<Option<PersonWithRole>, DirectoryError> {
        let data = self.data.read().await;
        Ok(data.person_row(did).map(|p| data.role_view(p)))
    }

    async fn apply(&self, mutation: Mutation) -> Result<(), DirectoryError> {
        let kind = mutation.kind();
        self.data.write().await.apply(mutation)?;
        log::info!("Fixture directory applied {kind}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_data_has_unique_long_ids() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = FixtureData::generate(FixtureSize { people: 40, groups: 3 }, &mut rng);
        assert_eq!(data.people.len(), 40);
        assert_eq!(data.groups.len(), 3);
        let unique: HashSet<&str> = data.people.iter().map(|p| p.did.as_str()).collect();
        assert_eq!(unique.len(), 40);
        assert!(data.people.iter().all(|p| p.did.len() == 18));
    }

    #[test]
    fn generated_relations_point_at_existing_rows() {
        let mut rng = StdRng::seed_from_u64(11);
        let data = FixtureData::generate(FixtureSize::default(), &mut rng);
        for m in &data.memberships {
            assert!(data.person_row(&m.did).is_some());
            assert!(data.group_row(m.gid).is_some());
        }
        assert!(data.roles.iter().all(|r| r.access_level.is_assigned()));
        assert!(data.tags.iter().any(|t| t.name == "Community Building"));
    }

    #[test]
    fn generation_is_reproducible_with_a_seed() {
        let a = FixtureData::generate(FixtureSize::default(), &mut StdRng::seed_from_u64(3));
        let b = FixtureData::generate(FixtureSize::default(), &mut StdRng::seed_from_u64(3));
        assert_eq!(a.to_json(), b.to_json());
    }

    #[test]
    fn json_snapshot_round_trips() {
        let data = FixtureData::default()
            .with_person("d1", "Alice")
            .with_group(1, "Harbor Outreach")
            .with_member(1, "d1", GroupAccess::Edit)
            .with_role("d1", GlobalAccess::Admin);
        let back = FixtureData::from_json(&data.to_json()).unwrap();
        assert_eq!(back.memberships[0].access_level, GroupAccess::Edit);
        assert_eq!(back.roles[0].access_level, GlobalAccess::Admin);
    }

    #[test]
    fn set_role_rejects_no_access() {
        let mut data = FixtureData::default().with_person("d1", "Alice");
        let err = data
            .apply(Mutation::SetRole { did: "d1".into(), access: GlobalAccess::NoAccess })
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Rejected(_)));
    }

    #[test]
    fn deleting_an_organization_drops_its_memberships() {
        let mut data = FixtureData::default()
            .with_person("d1", "Alice")
            .with_group(1, "Harbor Outreach")
            .with_group(2, "Lantern Press")
            .with_member(1, "d1", GroupAccess::View)
            .with_member(2, "d1", GroupAccess::Edit);
        data.apply(Mutation::DeleteOrganization { gid: 1 }).unwrap();
        assert_eq!(data.groups.len(), 1);
        assert_eq!(data.memberships.len(), 1);
        assert_eq!(data.memberships[0].gid, 2);
    }

    #[test]
    fn assigned_roles_split_ten_eighty_ten() {
        let assigned: Vec<(GlobalAccess, u32)> =
            ROLE_WEIGHTS.iter().copied().filter(|(access, _)| access.is_assigned()).collect();
        assert_eq!(
            assigned,
            vec![(GlobalAccess::NeedsApproval, 10), (GlobalAccess::Organizer, 80), (GlobalAccess::Admin, 10)]
        );
        assert!(ROLE_WEIGHTS.iter().any(|(access, weight)| !access.is_assigned() && *weight > 0));
    }

    #[test]
    fn removals_refuse_a_row_that_changed_since_listing() {
        let mut data = FixtureData::default()
            .with_person("d1", "Alice")
            .with_group(1, "Harbor Outreach")
            .with_member(1, "d1", GroupAccess::View)
            .with_role("d1", GlobalAccess::Organizer);
        let role_id = data.roles[0].id;
        let membership_id = data.memberships[0].id;

        let err = data
            .apply(Mutation::RemoveRole { did: "d1".into(), role_id: Some(role_id + 1) })
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Stale(_)));
        let err = data
            .apply(Mutation::RemoveMember { gid: 1, did: "d1".into(), id: Some(membership_id + 1) })
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Stale(_)));
        assert_eq!(data.roles.len(), 1);
        assert_eq!(data.memberships.len(), 1);

        data.apply(Mutation::RemoveRole { did: "d1".into(), role_id: Some(role_id) }).unwrap();
        data.apply(Mutation::RemoveMember { gid: 1, did: "d1".into(), id: Some(membership_id) }).unwrap();
        assert!(data.roles.is_empty());
        assert!(data.memberships.is_empty());
    }
}
