use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::components::{OrganizationMembersTable, OrganizationsTable, TableEvent};
use crate::config::AppConfig;
use crate::directory::{Directory, Mutation};
use crate::errors::{AppError, render};
use crate::models::{GroupAccess, GroupMember, Organization, Page};
use crate::templates_structs::{ConsolePageTemplate, LevelOption, MemberFormTemplate, PageContext};
use super::{AccessForm, EventForm, PageQuery, Position, Roster, Signals, check_page, intents};

#[derive(Deserialize)]
pub struct NewMemberForm {
    pub did: String,
    pub access_level: i64,
}

/// Only the two membership levels are accepted from forms.
fn group_access(level: i64) -> Result<GroupAccess, AppError> {
    GroupAccess::ALL
        .into_iter()
        .find(|a| a.level() == level)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid access level {level}")))
}

async fn load_organization(dir: &dyn Directory, gid: i64) -> Result<Organization, AppError> {
    dir.organization(gid).await?.ok_or(AppError::NotFound)
}

async fn load_members(
    dir: &dyn Directory,
    gid: i64,
    page: u32,
    per_page: u32,
) -> Result<Page<GroupMember>, AppError> {
    let all = dir.members(gid).await?;
    let members = Page::slice(&all, page, per_page);
    check_page(page, members.total_pages)?;
    Ok(members)
}

// ── Organizations roster ──

/// GET /orgs
pub async fn list(
    dir: web::Data<dyn Directory>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = query.page.unwrap_or(1);
    let orgs = dir.organizations(page, config.page_size).await?;
    check_page(page, orgs.total_pages)?;

    let signals = Signals::default();
    let content = signals
        .intents
        .attach_organizations(OrganizationsTable::new(&orgs.items))
        .title(format!("Organizations ({})", orgs.total_count))
        .action_path("/orgs")
        .page(page, orgs.total_pages)
        .on_row_click(|_| {})
        .on_page_change(|_| {})
        .render()?;

    let ctx = PageContext::build(&session, "/orgs");
    render(ConsolePageTemplate { ctx, heading: "Organizations".to_string(), content })
}

/// POST /orgs: open an organization, delete one, or change page.
pub async fn dispatch(
    dir: web::Data<dyn Directory>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<EventForm>,
) -> Result<HttpResponse, AppError> {
    let event: TableEvent = form.event.parse()?;
    let page = form.page.unwrap_or(1);
    let orgs = dir.organizations(page, config.page_size).await?;
    check_page(page, orgs.total_pages)?;

    let signals = Signals::default();
    signals
        .intents
        .attach_organizations(OrganizationsTable::new(&orgs.items))
        .page(page, orgs.total_pages)
        .on_row_click(|org| signals.open(format!("/orgs/{}", org.gid)))
        .on_page_change(|p| signals.page.set(Some(p)))
        .dispatch(&event)?;

    let at = Position { roster: Roster::Organizations, page, total_pages: orgs.total_pages, per_page: config.page_size };
    signals.respond(dir.get_ref(), &session, at).await
}

// ── One organization's members ──

/// GET /orgs/{gid}
pub async fn members(
    dir: web::Data<dyn Directory>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let gid = path.into_inner();
    let page = query.page.unwrap_or(1);
    let org = load_organization(dir.get_ref(), gid).await?;
    let members = load_members(dir.get_ref(), gid, page, config.page_size).await?;

    let signals = Signals::default();
    let content = signals
        .intents
        .attach_members(gid, OrganizationMembersTable::new(&members.items))
        .title(format!("Members of {} ({})", org.name, members.total_count))
        .action_path(format!("/orgs/{gid}"))
        .page(page, members.total_pages)
        .on_page_change(|_| {})
        .render()?;

    let ctx = PageContext::build(&session, &format!("/orgs/{gid}"));
    render(ConsolePageTemplate { ctx, heading: org.name, content })
}

/// POST /orgs/{gid}: add, edit or remove a member, or change page.
pub async fn dispatch_members(
    dir: web::Data<dyn Directory>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<EventForm>,
) -> Result<HttpResponse, AppError> {
    let gid = path.into_inner();
    let event: TableEvent = form.event.parse()?;
    let page = form.page.unwrap_or(1);
    load_organization(dir.get_ref(), gid).await?;
    let members = load_members(dir.get_ref(), gid, page, config.page_size).await?;

    let signals = Signals::default();
    signals
        .intents
        .attach_members(gid, OrganizationMembersTable::new(&members.items))
        .page(page, members.total_pages)
        .on_page_change(|p| signals.page.set(Some(p)))
        .dispatch(&event)?;

    let at = Position { roster: Roster::Members(gid), page, total_pages: members.total_pages, per_page: config.page_size };
    signals.respond(dir.get_ref(), &session, at).await
}

// ── Membership forms ──

/// GET /orgs/{gid}/members/new
pub async fn new_member_form(
    dir: web::Data<dyn Directory>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let gid = path.into_inner();
    let organization = load_organization(dir.get_ref(), gid).await?;

    let ctx = PageContext::build(&session, &format!("/orgs/{gid}"));
    render(MemberFormTemplate {
        ctx,
        form_title: format!("Add member to {}", organization.name),
        form_action: format!("/orgs/{gid}/members"),
        organization,
        member: None,
        options: LevelOption::group(Some(GroupAccess::View)),
    })
}

/// POST /orgs/{gid}/members
pub async fn add_member(
    dir: web::Data<dyn Directory>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<NewMemberForm>,
) -> Result<HttpResponse, AppError> {
    let gid = path.into_inner();
    let access = group_access(form.access_level)?;
    let did = form.did.trim().to_string();
    if did.is_empty() {
        return Err(AppError::BadRequest("Discord ID is required".to_string()));
    }

    let mutation = Mutation::AddMember { gid, did, access };
    if intents::apply(dir.get_ref(), &session, mutation, "Member added").await {
        Ok(super::see_other(format!("/orgs/{gid}")))
    } else {
        Ok(super::see_other(format!("/orgs/{gid}/members/new")))
    }
}

/// GET /orgs/{gid}/members/{did}/edit
pub async fn edit_member_form(
    dir: web::Data<dyn Directory>,
    session: Session,
    path: web::Path<(i64, String)>,
) -> Result<HttpResponse, AppError> {
    let (gid, did) = path.into_inner();
    let organization = load_organization(dir.get_ref(), gid).await?;
    let member = dir
        .members(gid)
        .await?
        .into_iter()
        .find(|m| m.did == did)
        .ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &format!("/orgs/{gid}"));
    render(MemberFormTemplate {
        ctx,
        form_title: format!("Edit access for {}", member.name),
        form_action: format!("/orgs/{gid}/members/{did}"),
        options: LevelOption::group(Some(member.access_level)),
        organization,
        member: Some(member),
    })
}

/// POST /orgs/{gid}/members/{did}
pub async fn update_member(
    dir: web::Data<dyn Directory>,
    session: Session,
    path: web::Path<(i64, String)>,
    form: web::Form<AccessForm>,
) -> Result<HttpResponse, AppError> {
    let (gid, did) = path.into_inner();
    let access = group_access(form.access_level)?;

    let mutation = Mutation::SetMemberAccess { gid, did, access };
    intents::apply(dir.get_ref(), &session, mutation, "Access level updated").await;
    Ok(super::see_other(format!("/orgs/{gid}")))
}
