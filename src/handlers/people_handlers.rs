use std::cell::Cell;

use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::components::{ConsoleEvent, PersonConsole, ViewState};
use crate::config::AppConfig;
use crate::directory::Directory;
use crate::errors::{AppError, render};
use crate::models::Person;
use crate::session;
use crate::templates_structs::{ConsolePageTemplate, PageContext};
use super::{EventForm, PageQuery, check_page, page_or_flash, see_other};

/// People the console is rendered against: the requested roster page, or
/// just the selected person (possibly gone) in the detail view.
async fn load(
    dir: &dyn Directory,
    state: &ViewState,
    page: u32,
    per_page: u32,
) -> Result<(Vec<Person>, u32), AppError> {
    match state {
        ViewState::Table => {
            let people = dir.people(page, per_page).await?;
            check_page(page, people.total_pages)?;
            Ok((people.items, people.total_pages))
        }
        ViewState::Detail { did } => {
            let selected = dir.person(did).await?;
            if selected.is_none() {
                log::warn!("Selected person {did} no longer exists");
            }
            Ok((selected.into_iter().collect(), 1))
        }
    }
}

fn console<'a>(
    people: &'a [Person],
    state: ViewState,
    page: u32,
    total_pages: u32,
    target: &'a Cell<Option<u32>>,
) -> PersonConsole<'a> {
    PersonConsole::new(people, state)
        .page(page, total_pages)
        .action_path("/people")
        .on_page_change(move |p| target.set(Some(p)))
}

/// GET /people: roster or detail, depending on this session's view state.
pub async fn index(
    dir: web::Data<dyn Directory>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let state = session::people_view(&session);
    let page = query.page.unwrap_or(1);
    let (people, total_pages) = load(dir.get_ref(), &state, page, config.page_size).await?;

    let target = Cell::new(None);
    let content = console(&people, state, page, total_pages, &target).render()?;

    let ctx = PageContext::build(&session, "/people");
    render(ConsolePageTemplate { ctx, heading: "People".to_string(), content })
}

/// POST /people: row click selects a person, `back` returns to the roster,
/// page events move through the roster.
pub async fn dispatch(
    dir: web::Data<dyn Directory>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<EventForm>,
) -> Result<HttpResponse, AppError> {
    let event: ConsoleEvent = form.event.parse()?;
    let state = session::people_view(&session);
    let page = form.page.unwrap_or(1);
    let (people, total_pages) = load(dir.get_ref(), &state, page, config.page_size).await?;

    let target = Cell::new(None);
    let mut console = console(&people, state, page, total_pages, &target);
    if let Err(e) = console.handle(&event) {
        log::warn!("People console rejected {:?}: {e}", form.event);
        return Err(e.into());
    }
    session::store_people_view(&session, console.state())?;

    let next = match target.get() {
        Some(requested) => page_or_flash(&session, requested, page, total_pages),
        None => page,
    };
    Ok(see_other(format!("/people?page={next}")))
}
