//! Role and membership editing as forwarded intents.
//!
//! Rosters never mutate anything. Their callbacks record an [`Intent`] in an
//! [`IntentQueue`]; whoever owns the queue forwards the intents to the
//! directory and re-renders from whatever data comes back.

use std::cell::RefCell;

use crate::models::{GroupMember, Organization, PersonWithRole};
use super::roster::RosterTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AssignRole { did: String },
    EditRole { did: String, role_id: Option<i64> },
    RemoveRole { did: String, role_id: Option<i64> },
    AddMember { gid: i64 },
    EditMember { gid: i64, did: String, id: Option<i64> },
    RemoveMember { gid: i64, did: String, id: Option<i64> },
    DeleteOrganization { gid: i64 },
}

impl Intent {
    /// Only people without a global role can be assigned one.
    pub fn assign(person: &PersonWithRole) -> Option<Intent> {
        (!person.access_level.is_assigned()).then(|| Intent::AssignRole { did: person.did.clone() })
    }

    pub fn edit(person: &PersonWithRole) -> Option<Intent> {
        person.access_level.is_assigned().then(|| Intent::EditRole {
            did: person.did.clone(),
            role_id: person.role_id,
        })
    }

    pub fn remove(person: &PersonWithRole) -> Option<Intent> {
        person.access_level.is_assigned().then(|| Intent::RemoveRole {
            did: person.did.clone(),
            role_id: person.role_id,
        })
    }

    pub fn edit_member(member: &GroupMember) -> Intent {
        Intent::EditMember { gid: member.group, did: member.did.clone(), id: member.id }
    }

    pub fn remove_member(member: &GroupMember) -> Intent {
        Intent::RemoveMember { gid: member.group, did: member.did.clone(), id: member.id }
    }
}

/// Collects intents emitted during one dispatch.
#[derive(Debug, Default)]
pub struct IntentQueue {
    intents: RefCell<Vec<Intent>>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, intent: Intent) {
        self.intents.borrow_mut().push(intent);
    }

    /// Push if present; a `None` means the caller asked for an intent the
    /// record's state does not allow.
    fn offer(&self, intent: Option<Intent>, what: &str, did: &str) {
        match intent {
            Some(intent) => self.push(intent),
            None => log::warn!("Dropped {what} intent for {did}: not valid for current access level"),
        }
    }

    pub fn take(&self) -> Vec<Intent> {
        std::mem::take(&mut *self.intents.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.intents.borrow().is_empty()
    }

    /// Wire assign/edit/remove of the roles roster to this queue.
    pub fn attach_roles<'a>(
        &'a self,
        table: RosterTable<'a, PersonWithRole>,
    ) -> RosterTable<'a, PersonWithRole> {
        table
            .on_assign(move |p| self.offer(Intent::assign(p), "assign", &p.did))
            .on_edit(move |p| self.offer(Intent::edit(p), "edit", &p.did))
            .on_remove(move |p| self.offer(Intent::remove(p), "remove", &p.did))
    }

    /// Wire add/edit/remove of one organization's member roster.
    pub fn attach_members<'a>(
        &'a self,
        gid: i64,
        table: RosterTable<'a, GroupMember>,
    ) -> RosterTable<'a, GroupMember> {
        table
            .on_add_member(move || self.push(Intent::AddMember { gid }))
            .on_edit(move |m| self.push(Intent::edit_member(m)))
            .on_remove(move |m| self.push(Intent::remove_member(m)))
    }

    pub fn attach_organizations<'a>(
        &'a self,
        table: RosterTable<'a, Organization>,
    ) -> RosterTable<'a, Organization> {
        table.on_delete(move |org| self.push(Intent::DeleteOrganization { gid: org.gid }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GlobalAccess;

    #[test]
    fn assign_only_for_unassigned() {
        let none = PersonWithRole::new("d1", "Alice", GlobalAccess::NoAccess);
        let admin = PersonWithRole::new("d2", "Bob", GlobalAccess::Admin);
        assert_eq!(Intent::assign(&none), Some(Intent::AssignRole { did: "d1".into() }));
        assert_eq!(Intent::assign(&admin), None);
        assert_eq!(Intent::edit(&none), None);
        assert_eq!(Intent::remove(&none), None);
        assert!(Intent::remove(&admin).is_some());
    }

    #[test]
    fn take_drains_the_queue() {
        let queue = IntentQueue::new();
        queue.push(Intent::AddMember { gid: 3 });
        assert_eq!(queue.take(), vec![Intent::AddMember { gid: 3 }]);
        assert!(queue.is_empty());
    }
}
