// Roster rendering for each record type the console lists.

use crate::models::{BadgeColor, GroupMember, Organization, Person, PersonWithRole};
use super::roster::{ActionLabel, Badge, Cell, RosterRecord, RowAction};

impl RosterRecord for Person {
    const TITLE: &'static str = "People";
    const COLUMNS: &'static [&'static str] = &["Name", "Discord ID", "Contact", "Groups", "Tags"];
    const EMPTY_MESSAGE: &'static str = "No people found.";

    fn key(&self) -> String {
        self.did.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        let groups = self.groups.iter().map(|g| Badge::light(&g.name, BadgeColor::Blue)).collect();
        let tags = self.tags.iter().map(|t| Badge::dot(&t.name)).collect();
        vec![
            Cell::text(&self.name),
            Cell::muted(&self.did),
            Cell::text(self.contact_line()),
            Cell::badges_or(Badge::overflow(groups), "No groups"),
            Cell::badges_or(Badge::overflow(tags), "No tags"),
        ]
    }
}

impl RosterRecord for Organization {
    const TITLE: &'static str = "Organizations";
    const COLUMNS: &'static [&'static str] = &["Name", "Members", "Events"];
    const EMPTY_MESSAGE: &'static str = "No organizations found. Add one to get started.";
    const ACTIONS: &'static [RowAction] = &[RowAction::Delete];

    fn key(&self) -> String {
        self.gid.to_string()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::strong(&self.name),
            Cell::badges(vec![Badge::light(self.member_count.unwrap_or(0).to_string(), BadgeColor::Blue)]),
            Cell::badges(vec![Badge::light(self.event_count.unwrap_or(0).to_string(), BadgeColor::Green)]),
        ]
    }

    fn action_label(action: RowAction) -> ActionLabel {
        match action {
            RowAction::Delete => ActionLabel { tooltip: "Delete organization", ..action.default_label() },
            _ => action.default_label(),
        }
    }
}

impl RosterRecord for PersonWithRole {
    const TITLE: &'static str = "Role Assignments";
    const COLUMNS: &'static [&'static str] = &["Name", "Discord ID", "Global Access Level"];
    const EMPTY_MESSAGE: &'static str = "No people found. Add people first to assign roles.";
    const ACTIONS: &'static [RowAction] = &[RowAction::Assign, RowAction::Edit, RowAction::Remove];

    fn key(&self) -> String {
        self.did.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::strong(&self.name),
            Cell::muted(&self.did),
            Cell::badges(vec![Badge::light(self.access_level.label(), self.access_level.color())]),
        ]
    }

    /// No role yet: only Assign. Any role, even an unknown one: Edit and Remove.
    fn permits(&self, action: RowAction) -> bool {
        match action {
            RowAction::Assign => !self.access_level.is_assigned(),
            RowAction::Edit | RowAction::Remove => self.access_level.is_assigned(),
            RowAction::Delete => false,
        }
    }

    fn action_label(action: RowAction) -> ActionLabel {
        let tooltip = match action {
            RowAction::Assign => "Assign role",
            RowAction::Edit => "Edit role",
            RowAction::Remove => "Remove role",
            RowAction::Delete => return action.default_label(),
        };
        ActionLabel { tooltip, ..action.default_label() }
    }
}

impl RosterRecord for GroupMember {
    const TITLE: &'static str = "Members";
    const COLUMNS: &'static [&'static str] = &["Name", "Discord ID", "Access Level"];
    const EMPTY_MESSAGE: &'static str = "This organization has no members.";
    const ACTIONS: &'static [RowAction] = &[RowAction::Edit, RowAction::Remove];

    fn key(&self) -> String {
        self.did.clone()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::strong(&self.name),
            Cell::muted(&self.did),
            Cell::badges(vec![Badge::light(self.access_level.label(), self.access_level.color())]),
        ]
    }

    fn action_label(action: RowAction) -> ActionLabel {
        match action {
            RowAction::Edit => ActionLabel { tooltip: "Edit access level", ..action.default_label() },
            RowAction::Remove => ActionLabel { tooltip: "Remove member", ..action.default_label() },
            _ => action.default_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GlobalAccess, GroupMembership, Tag};

    #[test]
    fn person_cells_fall_back_when_relations_are_empty() {
        let cells = Person::new("d1", "Alice").cells();
        assert_eq!(cells[2].text, "No contact info");
        assert_eq!(cells[3].text, "No groups");
        assert_eq!(cells[4].text, "No tags");
        assert!(cells[3].badges.is_empty());
    }

    #[test]
    fn person_groups_overflow_after_three() {
        let mut p = Person::new("d1", "Alice");
        p.groups = (1..=5)
            .map(|gid| GroupMembership { gid, name: format!("G{gid}"), access_level: None })
            .collect();
        p.tags = vec![Tag { tid: 1, name: "Dev-Art".into() }];
        let cells = p.cells();
        let groups: Vec<&str> = cells[3].badges.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(groups, vec!["G1", "G2", "G3", "+2"]);
        assert_eq!(cells[4].badges.len(), 1);
    }

    #[test]
    fn organization_counts_default_to_zero() {
        let cells = Organization::new(7, "Acme").cells();
        assert_eq!(cells[1].badges[0].text, "0");
        assert_eq!(cells[2].badges[0].text, "0");
    }

    #[test]
    fn role_permissions_are_exclusive() {
        let none = PersonWithRole::new("d1", "Alice", GlobalAccess::NoAccess);
        let odd = PersonWithRole::new("d2", "Bob", GlobalAccess::Unknown(5));
        assert!(none.permits(RowAction::Assign));
        assert!(!none.permits(RowAction::Edit) && !none.permits(RowAction::Remove));
        assert!(!odd.permits(RowAction::Assign));
        assert!(odd.permits(RowAction::Edit) && odd.permits(RowAction::Remove));
    }

    #[test]
    fn role_view_resolves_actions_per_row() {
        let roles = vec![
            PersonWithRole::new("d1", "Alice", GlobalAccess::NoAccess),
            PersonWithRole::new("d2", "Bob", GlobalAccess::Admin),
        ];
        let view = crate::components::RosterTable::new(&roles).on_assign(|_| {}).on_remove(|_| {}).view();
        assert!(view.rows[0].has_action(RowAction::Assign));
        assert!(!view.rows[0].has_action(RowAction::Remove));
        assert!(view.rows[1].has_action(RowAction::Remove));
        assert!(!view.rows[1].has_action(RowAction::Edit));
        assert_eq!(view.rows[1].actions[0].tooltip, "Remove role");
    }
}
