use std::cell::{Cell, RefCell};

use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::components::IntentQueue;
use crate::directory::Directory;
use crate::errors::AppError;
use crate::models::Page;
use crate::session::set_flash;
use self::intents::Forwarded;

pub mod intents;
pub mod organization_handlers;
pub mod people_handlers;
pub mod role_handlers;

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// Body of every roster form: the encoded event plus the page it was on.
#[derive(Deserialize)]
pub struct EventForm {
    pub event: String,
    pub page: Option<u32>,
}

#[derive(Deserialize)]
pub struct AccessForm {
    pub access_level: i64,
}

/// What a roster's callbacks asked for during one dispatch.
#[derive(Default)]
pub struct Signals {
    pub intents: IntentQueue,
    pub page: Cell<Option<u32>>,
    pub navigate: RefCell<Option<String>>,
}

/// The roster a form was posted from. After a mutation its page count is
/// read again so the redirect never lands past the last page.
#[derive(Debug, Clone, Copy)]
pub enum Roster {
    Organizations,
    Members(i64),
    Roles,
}

impl Roster {
    pub fn path(self) -> String {
        match self {
            Roster::Organizations => "/orgs".to_string(),
            Roster::Members(gid) => format!("/orgs/{gid}"),
            Roster::Roles => "/roles".to_string(),
        }
    }

    async fn total_pages(self, dir: &dyn Directory, per_page: u32) -> Result<u32, AppError> {
        let total = match self {
            Roster::Organizations => dir.organizations(1, per_page).await?.total_pages,
            Roster::Members(gid) => Page::slice(&dir.members(gid).await?, 1, per_page).total_pages,
            Roster::Roles => dir.roles(1, per_page).await?.total_pages,
        };
        Ok(total)
    }
}

/// Where a dispatch started: roster, page and the page size it was read with.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub roster: Roster,
    pub page: u32,
    pub total_pages: u32,
    pub per_page: u32,
}

impl Signals {
    pub fn open(&self, location: String) {
        *self.navigate.borrow_mut() = Some(location);
    }

    /// Turn the recorded signal into a response: navigation first, then a
    /// page change, then any editor intent. Nothing recorded means stay put.
    pub async fn respond(self, dir: &dyn Directory, session: &Session, at: Position) -> Result<HttpResponse, AppError> {
        let back_to = at.roster.path();
        if let Some(location) = self.navigate.into_inner() {
            return Ok(see_other(location));
        }
        if let Some(target) = self.page.get() {
            let next = page_or_flash(session, target, at.page, at.total_pages);
            return Ok(see_other(format!("{back_to}?page={next}")));
        }
        let Some(intent) = self.intents.take().into_iter().next() else {
            return Ok(see_other(format!("{back_to}?page={}", at.page)));
        };
        match intents::forward(dir, session, intent).await {
            Forwarded::Form(location) => Ok(see_other(location)),
            Forwarded::Roster => {
                let total_pages = at.roster.total_pages(dir, at.per_page).await?;
                Ok(see_other(format!("{back_to}?page={}", landing_page(at.page, total_pages))))
            }
        }
    }
}

/// The page to return to once the roster may have shrunk under it.
pub fn landing_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

pub fn see_other(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location.as_ref()))
        .finish()
}

/// Page numbers come from the client, so anything outside `1..=total` is
/// rejected here rather than clamped by the pagination control.
pub fn check_page(page: u32, total_pages: u32) -> Result<(), AppError> {
    if page == 0 || page > total_pages.max(1) {
        return Err(AppError::BadRequest(format!("Page {page} is out of range")));
    }
    Ok(())
}

/// A requested page change, or the current page with a flash when the
/// requested one does not exist.
pub fn page_or_flash(session: &Session, target: u32, current: u32, total_pages: u32) -> u32 {
    match check_page(target, total_pages) {
        Ok(()) => target,
        Err(e) => {
            log::warn!("{e}");
            set_flash(session, format!("Page {target} does not exist"));
            current
        }
    }
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../templates/errors/404.html"))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(|| async { see_other("/people") }))
        // People console
        .route("/people", web::get().to(people_handlers::index))
        .route("/people", web::post().to(people_handlers::dispatch))
        // Organizations (/orgs/{gid}/members/new BEFORE /orgs/{gid}/members/{did})
        .route("/orgs", web::get().to(organization_handlers::list))
        .route("/orgs", web::post().to(organization_handlers::dispatch))
        .route("/orgs/{gid}", web::get().to(organization_handlers::members))
        .route("/orgs/{gid}", web::post().to(organization_handlers::dispatch_members))
        .route("/orgs/{gid}/members/new", web::get().to(organization_handlers::new_member_form))
        .route("/orgs/{gid}/members", web::post().to(organization_handlers::add_member))
        .route("/orgs/{gid}/members/{did}/edit", web::get().to(organization_handlers::edit_member_form))
        .route("/orgs/{gid}/members/{did}", web::post().to(organization_handlers::update_member))
        // Global roles
        .route("/roles", web::get().to(role_handlers::list))
        .route("/roles", web::post().to(role_handlers::dispatch))
        .route("/roles/{did}/edit", web::get().to(role_handlers::edit_form))
        .route("/roles/{did}", web::post().to(role_handlers::update));
}
