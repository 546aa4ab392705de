//! Roster table tests: rendering and event dispatch for every record type.
//!
//! Covers:
//! - Row count and order follow the input collection
//! - Empty rosters keep the header and show one placeholder row
//! - Action buttons appear only when a callback is supplied and the record permits it
//! - Action events never reach the row-click callback
//! - Pagination visibility and page-change dispatch

mod common;

use std::cell::Cell;

use dggcrm_console::components::{
    DispatchError, OrganizationMembersTable, OrganizationsTable, PeopleTable, RolesTable, RowAction,
    TableEvent,
};
use dggcrm_console::models::{GlobalAccess, GroupAccess, GroupMembership, Organization, Tag};
use common::*;

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_rows_follow_input_order() {
    let mut list = people(3);
    list.reverse();

    let html = PeopleTable::new(&list).render().expect("render");

    assert_eq!(row_keys(&html), vec!["d3", "d2", "d1"]);
    assert!(html.contains("People (3)"));
}

#[test]
fn test_empty_roster_shows_placeholder_and_header() {
    let html = PeopleTable::new(&[]).on_page_change(|_| {}).render().expect("render");

    assert_eq!(count(&html, r#"class="roster-row"#), 0);
    assert_eq!(count(&html, r#"class="roster-empty""#), 1);
    assert!(html.contains("No people found."));
    assert!(html.contains("<th>Discord ID</th>"));
    // totalPages defaults to 1, so no pagination even with a handler
    assert!(!html.contains(r#"class="pagination""#));
}

#[test]
fn test_empty_single_page_without_page_handler() {
    let html = PeopleTable::new(&[]).page(1, 1).render().expect("render");

    assert_eq!(count(&html, r#"class="roster-row"#), 0);
    assert_eq!(count(&html, r#"class="roster-empty""#), 1);
    assert!(html.contains("No people found."));
    assert!(!html.contains(r#"class="pagination""#));
    assert!(!html.contains("page:"));
}

#[test]
fn test_empty_roles_placeholder_spans_action_column() {
    let html = RolesTable::new(&[]).on_assign(|_| {}).render().expect("render");

    assert!(html.contains(r#"colspan="4""#));
    assert!(html.contains("No people found. Add people first to assign roles."));
}

#[test]
fn test_person_badges_and_contact_fallback() {
    let mut p = person(ALICE, "Alice Anders");
    p.email = Some("alice@example.org".into());
    p.phone = Some("555-0101".into());
    p.groups = (1..=5)
        .map(|gid| GroupMembership { gid, name: format!("Group {gid}"), access_level: Some(GroupAccess::View) })
        .collect();
    p.tags = vec![Tag { tid: 1, name: "Dev-Art".into() }];
    let bare = person(BOB, "Bruno Baker");
    let list = vec![p, bare];

    let html = PeopleTable::new(&list).render().expect("render");

    assert!(html.contains("alice@example.org • 555-0101"));
    assert!(html.contains("No contact info"));
    assert!(html.contains("Group 3"));
    assert!(!html.contains("Group 4"));
    assert!(html.contains("+2"));
    assert!(html.contains("Dev-Art"));
    assert!(html.contains("No groups"));
    assert!(html.contains("No tags"));
}

#[test]
fn test_organization_counts_default_to_zero() {
    let mut counted = Organization::new(HARBOR, "Harbor Outreach");
    counted.member_count = Some(12);
    counted.event_count = Some(3);
    let bare = Organization::new(LANTERN, "Lantern Press");
    let orgs = vec![counted, bare];

    let html = OrganizationsTable::new(&orgs).on_delete(|_| {}).render().expect("render");

    assert!(html.contains(">12<"));
    assert!(html.contains(">3<"));
    assert_eq!(count(&html, r#"badge-gray">0<|badge-blue">0<"#), 1);
    assert_eq!(count(&html, r#"title="Delete organization""#), 2);
}

// ============================================================================
// ROLE ACTIONS
// ============================================================================

#[test]
fn test_unassigned_person_only_offers_assign() {
    let roles = vec![with_role("d1", "Alice", GlobalAccess::NoAccess)];

    let html = RolesTable::new(&roles)
        .on_assign(|_| {})
        .on_edit(|_| {})
        .on_remove(|_| {})
        .render()
        .expect("render");

    assert_eq!(row_keys(&html), vec!["d1"]);
    assert_eq!(count(&html, r#"data-action="assign""#), 1);
    assert_eq!(count(&html, r#"data-action="edit""#), 0);
    assert_eq!(count(&html, r#"data-action="remove""#), 0);
    assert!(html.contains("No Access"));
}

#[test]
fn test_assigned_person_offers_edit_and_remove() {
    let roles = vec![with_role("d2", "Bob", GlobalAccess::Organizer)];

    let html = RolesTable::new(&roles)
        .on_assign(|_| {})
        .on_edit(|_| {})
        .on_remove(|_| {})
        .render()
        .expect("render");

    assert_eq!(count(&html, r#"data-action="assign""#), 0);
    assert_eq!(count(&html, r#"data-action="edit""#), 1);
    assert_eq!(count(&html, r#"data-action="remove""#), 1);
    assert!(html.contains("badge-blue\">Organizer<"));
}

#[test]
fn test_missing_callback_hides_action() {
    let roles = vec![with_role("d1", "Alice", GlobalAccess::NoAccess)];

    let html = RolesTable::new(&roles).on_edit(|_| {}).render().expect("render");

    assert_eq!(count(&html, r#"data-action="#), 0);
}

#[test]
fn test_dispatch_rejects_action_the_record_does_not_permit() {
    let roles = vec![with_role("d1", "Alice", GlobalAccess::NoAccess)];
    let edits = Cell::new(0);
    let table = RolesTable::new(&roles).on_edit(|_| edits.set(edits.get() + 1));

    let err = table.dispatch(&TableEvent::Action(RowAction::Edit, "d1".into())).unwrap_err();

    assert_eq!(err, DispatchError::NotPermitted { action: RowAction::Edit, key: "d1".into() });
    assert_eq!(edits.get(), 0);
}

// ============================================================================
// DISPATCH
// ============================================================================

#[test]
fn test_remove_does_not_trigger_row_click() {
    let members = vec![member(HARBOR, "123", "Alice", GroupAccess::Edit)];
    let clicks = Cell::new(0);
    let removed = Cell::new(0);
    let table = OrganizationMembersTable::new(&members)
        .on_row_click(|_| clicks.set(clicks.get() + 1))
        .on_remove(|m| {
            assert_eq!(m.did, "123");
            removed.set(removed.get() + 1);
        });

    table.dispatch(&TableEvent::Action(RowAction::Remove, "123".into())).expect("dispatch");

    assert_eq!(removed.get(), 1);
    assert_eq!(clicks.get(), 0);
}

#[test]
fn test_row_click_delivers_the_record() {
    let list = people(4);
    let picked = std::cell::RefCell::new(None);
    let table = PeopleTable::new(&list).on_row_click(|p| *picked.borrow_mut() = Some(p.name.clone()));

    table.dispatch(&TableEvent::RowClick("d3".into())).expect("dispatch");
    drop(table);

    assert_eq!(picked.into_inner().as_deref(), Some("Person 3"));
}

#[test]
fn test_unknown_row_is_an_error() {
    let list = people(2);
    let table = PeopleTable::new(&list).on_row_click(|_| {});

    let err = table.dispatch(&TableEvent::RowClick("nobody".into())).unwrap_err();

    assert_eq!(err, DispatchError::UnknownRow("nobody".into()));
}

#[test]
fn test_add_member_requires_handler() {
    let members = vec![member(HARBOR, "d1", "Alice", GroupAccess::View)];
    let table = OrganizationMembersTable::new(&members);

    assert!(!table.render().expect("render").contains("Add Member"));
    assert_eq!(table.dispatch(&TableEvent::AddMember).unwrap_err(), DispatchError::NoHandler("add member"));
}

// ============================================================================
// PAGINATION
// ============================================================================

#[test]
fn test_single_page_never_paginates() {
    let list = people(3);

    let html = PeopleTable::new(&list).page(1, 1).on_page_change(|_| {}).render().expect("render");

    assert!(!html.contains(r#"class="pagination""#));
}

#[test]
fn test_pagination_needs_a_handler() {
    let list = people(3);

    let without = PeopleTable::new(&list).page(1, 2).render().expect("render");
    let with = PeopleTable::new(&list).page(1, 2).on_page_change(|_| {}).render().expect("render");

    assert!(!without.contains(r#"class="pagination""#));
    assert!(with.contains(r#"class="pagination""#));
    assert_eq!(count(&with, r#"value="page:2""#), 2);
}

#[test]
fn test_page_change_reaches_handler_only_when_visible() {
    let list = people(3);
    let requested = Cell::new(None);

    let hidden = PeopleTable::new(&list).page(1, 1).on_page_change(|p| requested.set(Some(p)));
    assert_eq!(hidden.dispatch(&TableEvent::PageChange(2)).unwrap_err(), DispatchError::PaginationHidden);
    assert_eq!(requested.get(), None);

    let shown = PeopleTable::new(&list).page(1, 3).on_page_change(|p| requested.set(Some(p)));
    shown.dispatch(&TableEvent::PageChange(3)).expect("dispatch");
    assert_eq!(requested.get(), Some(3));
}

#[test]
fn test_loading_keeps_rows_visible() {
    let list = people(2);

    let html = PeopleTable::new(&list).loading(true).render().expect("render");

    assert!(html.contains("loading-overlay"));
    assert_eq!(row_keys(&html).len(), 2);
}
