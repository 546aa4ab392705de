// Reusable view components. Each one takes borrowed records plus optional
// callbacks and produces askama-rendered HTML; none of them mutate data.

pub mod console;
pub mod detail;
pub mod editor;
pub mod pagination;
pub mod records;
pub mod roster;

pub use console::{ConsoleError, ConsoleEvent, PersonConsole, TransitionError, ViewState};
pub use detail::PersonDetailTemplate;
pub use editor::{Intent, IntentQueue};
pub use pagination::{PageItem, Pagination, PaginationView};
pub use roster::{
    ActionLabel, ActionView, Badge, Cell, DispatchError, ParseEventError, RosterRecord, RosterTable,
    RosterTableTemplate, RowAction, RowView, TableEvent,
};

use crate::models::{GroupMember, Organization, Person, PersonWithRole};

pub type PeopleTable<'a> = RosterTable<'a, Person>;
pub type OrganizationsTable<'a> = RosterTable<'a, Organization>;
pub type RolesTable<'a> = RosterTable<'a, PersonWithRole>;
pub type OrganizationMembersTable<'a> = RosterTable<'a, GroupMember>;
