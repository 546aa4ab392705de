//! People console: a roster that swaps to a single-person detail view.

use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

use askama::Template;
use serde::{Deserialize, Serialize};

use crate::models::Person;
use super::detail::PersonDetailTemplate;
use super::roster::{DispatchError, PageCallback, ParseEventError, RosterTable, TableEvent};

/// Which screen the console shows. The detail state carries the selected
/// person's key, so "detail without a selection" cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Table,
    Detail { did: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    pub from: &'static str,
    pub event: &'static str,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot {} from the {} view", self.event, self.from)
    }
}

impl std::error::Error for TransitionError {}

impl ViewState {
    fn name(&self) -> &'static str {
        match self {
            ViewState::Table => "table",
            ViewState::Detail { .. } => "detail",
        }
    }

    /// Table -> Detail(person).
    pub fn select_person(&mut self, person: &Person) -> Result<(), TransitionError> {
        match self {
            ViewState::Table => {
                *self = ViewState::Detail { did: person.did.clone() };
                Ok(())
            }
            ViewState::Detail { .. } => Err(TransitionError { from: self.name(), event: "select a person" }),
        }
    }

    /// Detail -> Table. Drops the selection.
    pub fn back(&mut self) -> Result<(), TransitionError> {
        match self {
            ViewState::Detail { .. } => {
                *self = ViewState::Table;
                Ok(())
            }
            ViewState::Table => Err(TransitionError { from: self.name(), event: "go back" }),
        }
    }

    pub fn selected_did(&self) -> Option<&str> {
        match self {
            ViewState::Table => None,
            ViewState::Detail { did } => Some(did),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    Table(TableEvent),
    Back,
}

impl FromStr for ConsoleEvent {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "back" {
            Ok(ConsoleEvent::Back)
        } else {
            s.parse().map(ConsoleEvent::Table)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    Dispatch(DispatchError),
    Transition(TransitionError),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::Dispatch(e) => write!(f, "{e}"),
            ConsoleError::Transition(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConsoleError {}

impl From<DispatchError> for ConsoleError {
    fn from(e: DispatchError) -> Self {
        ConsoleError::Dispatch(e)
    }
}

impl From<TransitionError> for ConsoleError {
    fn from(e: TransitionError) -> Self {
        ConsoleError::Transition(e)
    }
}

/// Owns the view state for its lifetime and borrows the people list it is
/// rendered against. In the detail state `people` is searched for the
/// selected key; a miss renders the placeholder instead of failing.
pub struct PersonConsole<'a> {
    people: &'a [Person],
    state: ViewState,
    loading: bool,
    current_page: u32,
    total_pages: u32,
    action_path: String,
    on_page_change: Option<PageCallback<'a>>,
}

impl<'a> PersonConsole<'a> {
    pub fn new(people: &'a [Person], state: ViewState) -> Self {
        PersonConsole {
            people,
            state,
            loading: false,
            current_page: 1,
            total_pages: 1,
            action_path: String::new(),
            on_page_change: None,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn page(mut self, current_page: u32, total_pages: u32) -> Self {
        self.current_page = current_page;
        self.total_pages = total_pages;
        self
    }

    pub fn action_path(mut self, path: impl Into<String>) -> Self {
        self.action_path = path.into();
        self
    }

    pub fn on_page_change(mut self, f: impl Fn(u32) + 'a) -> Self {
        self.on_page_change = Some(Box::new(f));
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }

    /// The selected person, if the detail view is showing and the person
    /// is still present in the supplied list.
    pub fn selected(&self) -> Option<&'a Person> {
        let did = self.state.selected_did()?;
        self.people.iter().find(|p| p.did == did)
    }

    fn roster<'s>(&'s self, on_pick: impl Fn(&Person) + 's) -> RosterTable<'s, Person> {
        let mut table = RosterTable::new(self.people)
            .show_title(false)
            .loading(self.loading)
            .page(self.current_page, self.total_pages)
            .action_path(self.action_path.as_str())
            .on_row_click(on_pick);
        if let Some(handler) = &self.on_page_change {
            table = table.on_page_change(move |page| handler(page));
        }
        table
    }

    pub fn handle(&mut self, event: &ConsoleEvent) -> Result<(), ConsoleError> {
        match event {
            ConsoleEvent::Back => self.state.back()?,
            ConsoleEvent::Table(event) => {
                if let ViewState::Detail { .. } = self.state {
                    return Err(TransitionError { from: self.state.name(), event: "use the roster" }.into());
                }
                let picked: RefCell<Option<String>> = RefCell::new(None);
                self.roster(|p| *picked.borrow_mut() = Some(p.did.clone())).dispatch(event)?;

                let people = self.people;
                if let Some(person) = picked.into_inner().and_then(|did| people.iter().find(|p| p.did == did)) {
                    self.state.select_person(person)?;
                }
            }
        }
        Ok(())
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        match self.state {
            ViewState::Table => self.roster(|_| {}).render(),
            ViewState::Detail { .. } => PersonDetailTemplate::new(self.selected(), &self.action_path).render(),
        }
    }
}
