use std::fmt;
use std::str::FromStr;

use askama::Template;

use crate::models::BadgeColor;
use super::pagination::{Pagination, PaginationView};

pub type RowCallback<'a, R> = Box<dyn Fn(&R) + 'a>;
pub type PageCallback<'a> = Box<dyn Fn(u32) + 'a>;
pub type TableCallback<'a> = Box<dyn Fn() + 'a>;

/// Per-row affordances a roster can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Edit,
    Delete,
    Assign,
    Remove,
}

impl RowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowAction::Edit => "edit",
            RowAction::Delete => "delete",
            RowAction::Assign => "assign",
            RowAction::Remove => "remove",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "edit" => Some(RowAction::Edit),
            "delete" => Some(RowAction::Delete),
            "assign" => Some(RowAction::Assign),
            "remove" => Some(RowAction::Remove),
            _ => None,
        }
    }

    pub fn default_label(&self) -> ActionLabel {
        match self {
            RowAction::Edit => ActionLabel { text: "Edit", tooltip: "Edit", color: BadgeColor::Blue },
            RowAction::Delete => ActionLabel { text: "Delete", tooltip: "Delete", color: BadgeColor::Red },
            RowAction::Assign => ActionLabel { text: "Assign", tooltip: "Assign", color: BadgeColor::Blue },
            RowAction::Remove => ActionLabel { text: "Remove", tooltip: "Remove", color: BadgeColor::Red },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionLabel {
    pub text: &'static str,
    pub tooltip: &'static str,
    pub color: BadgeColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub color: &'static str,
    pub variant: &'static str,
}

impl Badge {
    pub fn light(text: impl Into<String>, color: BadgeColor) -> Self {
        Badge { text: text.into(), color: color.as_str(), variant: "light" }
    }

    pub fn dot(text: impl Into<String>) -> Self {
        Badge { text: text.into(), color: BadgeColor::Gray.as_str(), variant: "dot" }
    }

    /// First three badges plus a dimmed `+N` for the rest.
    pub fn overflow(mut badges: Vec<Badge>) -> Vec<Badge> {
        const SHOWN: usize = 3;
        if badges.len() > SHOWN {
            let hidden = badges.len() - SHOWN;
            let variant = badges[0].variant;
            badges.truncate(SHOWN);
            badges.push(Badge { text: format!("+{hidden}"), color: "dimmed", variant });
        }
        badges
    }
}

/// A rendered table cell: plain text with a style class, or a badge group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub class: &'static str,
    pub badges: Vec<Badge>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell { text: text.into(), class: "text", badges: Vec::new() }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Cell { text: text.into(), class: "text-strong", badges: Vec::new() }
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Cell { text: text.into(), class: "text-dimmed", badges: Vec::new() }
    }

    pub fn badges(badges: Vec<Badge>) -> Self {
        Cell { text: String::new(), class: "badge-group", badges }
    }

    /// Badges, or a muted message when there are none.
    pub fn badges_or(badges: Vec<Badge>, empty: &str) -> Self {
        if badges.is_empty() { Cell::muted(empty) } else { Cell::badges(badges) }
    }
}

/// A record type that can be listed in a [`RosterTable`].
pub trait RosterRecord {
    const TITLE: &'static str;
    const COLUMNS: &'static [&'static str];
    const EMPTY_MESSAGE: &'static str;
    /// Every action this record type can ever offer; drives the Actions column.
    const ACTIONS: &'static [RowAction] = &[];

    /// Stable key used to address the row in events.
    fn key(&self) -> String;

    fn cells(&self) -> Vec<Cell>;

    /// Whether this particular record offers `action`.
    fn permits(&self, action: RowAction) -> bool {
        Self::ACTIONS.contains(&action)
    }

    fn action_label(action: RowAction) -> ActionLabel {
        action.default_label()
    }
}

/// Something the user did to a rendered roster, encoded into the `event`
/// field of the roster form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    RowClick(String),
    Action(RowAction, String),
    PageChange(u32),
    AddMember,
}

impl fmt::Display for TableEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableEvent::RowClick(key) => write!(f, "row:{key}"),
            TableEvent::Action(action, key) => write!(f, "action:{}:{key}", action.as_str()),
            TableEvent::PageChange(page) => write!(f, "page:{page}"),
            TableEvent::AddMember => write!(f, "add"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEventError(pub String);

impl fmt::Display for ParseEventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognised table event: {:?}", self.0)
    }
}

impl std::error::Error for ParseEventError {}

impl FromStr for TableEvent {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseEventError(s.to_string());
        if s == "add" {
            return Ok(TableEvent::AddMember);
        }
        let (kind, rest) = s.split_once(':').ok_or_else(bad)?;
        match kind {
            "row" if !rest.is_empty() => Ok(TableEvent::RowClick(rest.to_string())),
            "page" => rest.parse().map(TableEvent::PageChange).map_err(|_| bad()),
            "action" => {
                let (action, key) = rest.split_once(':').ok_or_else(bad)?;
                let action = RowAction::parse(action).ok_or_else(bad)?;
                if key.is_empty() {
                    return Err(bad());
                }
                Ok(TableEvent::Action(action, key.to_string()))
            }
            _ => Err(bad()),
        }
    }
}

/// Why an event could not be delivered. Every variant corresponds to a
/// control that the roster would not have rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    UnknownRow(String),
    NotPermitted { action: RowAction, key: String },
    NoHandler(&'static str),
    PaginationHidden,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownRow(key) => write!(f, "No row with key {key}"),
            DispatchError::NotPermitted { action, key } => {
                write!(f, "Action {} is not available for row {key}", action.as_str())
            }
            DispatchError::NoHandler(what) => write!(f, "No handler for {what}"),
            DispatchError::PaginationHidden => write!(f, "Pagination is not shown"),
        }
    }
}

impl std::error::Error for DispatchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub kind: RowAction,
    pub label: &'static str,
    pub tooltip: &'static str,
    pub color: &'static str,
    pub event: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub key: String,
    pub cells: Vec<Cell>,
    pub actions: Vec<ActionView>,
    pub clickable: bool,
    pub row_event: String,
}

impl RowView {
    pub fn has_action(&self, kind: RowAction) -> bool {
        self.actions.iter().any(|a| a.kind == kind)
    }
}

/// Resolved, render-ready state of a roster. Capabilities are evaluated
/// once here; the template only reads flags.
#[derive(Template)]
#[template(path = "components/roster_table.html")]
pub struct RosterTableTemplate {
    pub title: Option<String>,
    pub action_path: String,
    pub current_page: u32,
    pub columns: Vec<&'static str>,
    pub has_action_column: bool,
    pub colspan: usize,
    pub rows: Vec<RowView>,
    pub empty_message: &'static str,
    pub loading: bool,
    pub add_member: Option<ActionView>,
    pub pagination: Option<PaginationView>,
}

/// Generic roster over borrowed records. Callbacks are optional; an
/// affordance is rendered only when its callback is present.
pub struct RosterTable<'a, R: RosterRecord> {
    records: &'a [R],
    loading: bool,
    title: Option<String>,
    action_path: String,
    pagination: Pagination,
    on_row_click: Option<RowCallback<'a, R>>,
    on_edit: Option<RowCallback<'a, R>>,
    on_delete: Option<RowCallback<'a, R>>,
    on_assign: Option<RowCallback<'a, R>>,
    on_remove: Option<RowCallback<'a, R>>,
    on_add_member: Option<TableCallback<'a>>,
    on_page_change: Option<PageCallback<'a>>,
}

impl<'a, R: RosterRecord> RosterTable<'a, R> {
    pub fn new(records: &'a [R]) -> Self {
        RosterTable {
            records,
            loading: false,
            title: Some(format!("{} ({})", R::TITLE, records.len())),
            action_path: String::new(),
            pagination: Pagination::default(),
            on_row_click: None,
            on_edit: None,
            on_delete: None,
            on_assign: None,
            on_remove: None,
            on_add_member: None,
            on_page_change: None,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn show_title(mut self, show: bool) -> Self {
        if !show {
            self.title = None;
        }
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Where the roster form posts its events.
    pub fn action_path(mut self, path: impl Into<String>) -> Self {
        self.action_path = path.into();
        self
    }

    pub fn page(mut self, current_page: u32, total_pages: u32) -> Self {
        self.pagination = Pagination::new(current_page, total_pages);
        self
    }

    pub fn on_row_click(mut self, f: impl Fn(&R) + 'a) -> Self {
        self.on_row_click = Some(Box::new(f));
        self
    }

    pub fn on_edit(mut self, f: impl Fn(&R) + 'a) -> Self {
        self.on_edit = Some(Box::new(f));
        self
    }

    pub fn on_delete(mut self, f: impl Fn(&R) + 'a) -> Self {
        self.on_delete = Some(Box::new(f));
        self
    }

    pub fn on_assign(mut self, f: impl Fn(&R) + 'a) -> Self {
        self.on_assign = Some(Box::new(f));
        self
    }

    pub fn on_remove(mut self, f: impl Fn(&R) + 'a) -> Self {
        self.on_remove = Some(Box::new(f));
        self
    }

    pub fn on_add_member(mut self, f: impl Fn() + 'a) -> Self {
        self.on_add_member = Some(Box::new(f));
        self
    }

    pub fn on_page_change(mut self, f: impl Fn(u32) + 'a) -> Self {
        self.on_page_change = Some(Box::new(f));
        self
    }

    fn handler(&self, action: RowAction) -> Option<&RowCallback<'a, R>> {
        match action {
            RowAction::Edit => self.on_edit.as_ref(),
            RowAction::Delete => self.on_delete.as_ref(),
            RowAction::Assign => self.on_assign.as_ref(),
            RowAction::Remove => self.on_remove.as_ref(),
        }
    }

    fn find(&self, key: &str) -> Result<&'a R, DispatchError> {
        self.records
            .iter()
            .find(|r| r.key() == key)
            .ok_or_else(|| DispatchError::UnknownRow(key.to_string()))
    }

    pub fn view(&self) -> RosterTableTemplate {
        let enabled: Vec<RowAction> = R::ACTIONS
            .iter()
            .copied()
            .filter(|a| self.handler(*a).is_some())
            .collect();
        let clickable = self.on_row_click.is_some();

        let rows = self
            .records
            .iter()
            .map(|record| {
                let key = record.key();
                let actions = enabled
                    .iter()
                    .filter(|a| record.permits(**a))
                    .map(|a| {
                        let label = R::action_label(*a);
                        ActionView {
                            kind: *a,
                            label: label.text,
                            tooltip: label.tooltip,
                            color: label.color.as_str(),
                            event: TableEvent::Action(*a, key.clone()).to_string(),
                        }
                    })
                    .collect();
                RowView {
                    row_event: TableEvent::RowClick(key.clone()).to_string(),
                    key,
                    cells: record.cells(),
                    actions,
                    clickable,
                }
            })
            .collect();

        let has_action_column = !R::ACTIONS.is_empty();
        let pagination = if self.pagination.is_visible(self.on_page_change.is_some()) {
            self.pagination.view()
        } else {
            None
        };

        RosterTableTemplate {
            title: self.title.clone(),
            action_path: self.action_path.clone(),
            current_page: self.pagination.current_page,
            columns: R::COLUMNS.to_vec(),
            has_action_column,
            colspan: R::COLUMNS.len() + usize::from(has_action_column),
            rows,
            empty_message: R::EMPTY_MESSAGE,
            loading: self.loading,
            add_member: self.on_add_member.as_ref().map(|_| ActionView {
                kind: RowAction::Assign,
                label: "Add Member",
                tooltip: "Add member",
                color: BadgeColor::Blue.as_str(),
                event: TableEvent::AddMember.to_string(),
            }),
            pagination,
        }
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        self.view().render()
    }

    /// Deliver `event` to exactly one callback. Action events never reach
    /// the row-click handler.
    pub fn dispatch(&self, event: &TableEvent) -> Result<(), DispatchError> {
        match event {
            TableEvent::RowClick(key) => {
                let handler = self.on_row_click.as_ref().ok_or(DispatchError::NoHandler("row click"))?;
                handler(self.find(key)?);
            }
            TableEvent::Action(action, key) => {
                let record = self.find(key)?;
                if !record.permits(*action) {
                    return Err(DispatchError::NotPermitted { action: *action, key: key.clone() });
                }
                let handler = self.handler(*action).ok_or(DispatchError::NoHandler(action.as_str()))?;
                handler(record);
            }
            TableEvent::PageChange(page) => match &self.on_page_change {
                Some(handler) if self.pagination.is_visible(true) => handler(*page),
                _ => return Err(DispatchError::PaginationHidden),
            },
            TableEvent::AddMember => {
                let handler = self.on_add_member.as_ref().ok_or(DispatchError::NoHandler("add member"))?;
                handler();
            }
        }
        Ok(())
    }
}
