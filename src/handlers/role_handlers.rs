use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::components::{RolesTable, TableEvent};
use crate::config::AppConfig;
use crate::directory::{Directory, Mutation};
use crate::errors::{AppError, render};
use crate::models::GlobalAccess;
use crate::templates_structs::{ConsolePageTemplate, LevelOption, PageContext, RoleFormTemplate};
use super::{AccessForm, EventForm, PageQuery, Position, Roster, Signals, check_page, intents, see_other};

/// GET /roles
pub async fn list(
    dir: web::Data<dyn Directory>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = query.page.unwrap_or(1);
    let roles = dir.roles(page, config.page_size).await?;
    check_page(page, roles.total_pages)?;

    let signals = Signals::default();
    let content = signals
        .intents
        .attach_roles(RolesTable::new(&roles.items))
        .title(format!("Role Assignments ({})", roles.total_count))
        .action_path("/roles")
        .page(page, roles.total_pages)
        .on_page_change(|_| {})
        .render()?;

    let ctx = PageContext::build(&session, "/roles");
    render(ConsolePageTemplate { ctx, heading: "Global Roles".to_string(), content })
}

/// POST /roles: assign, edit or remove a role, or change page.
pub async fn dispatch(
    dir: web::Data<dyn Directory>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<EventForm>,
) -> Result<HttpResponse, AppError> {
    let event: TableEvent = form.event.parse()?;
    let page = form.page.unwrap_or(1);
    let roles = dir.roles(page, config.page_size).await?;
    check_page(page, roles.total_pages)?;

    let signals = Signals::default();
    signals
        .intents
        .attach_roles(RolesTable::new(&roles.items))
        .page(page, roles.total_pages)
        .on_page_change(|p| signals.page.set(Some(p)))
        .dispatch(&event)?;

    let at = Position { roster: Roster::Roles, page, total_pages: roles.total_pages, per_page: config.page_size };
    signals.respond(dir.get_ref(), &session, at).await
}

/// GET /roles/{did}/edit: assign when the person has no role, edit otherwise.
pub async fn edit_form(
    dir: web::Data<dyn Directory>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let did = path.into_inner();
    let person = dir.role(&did).await?.ok_or(AppError::NotFound)?;

    let form_title = if person.access_level.is_assigned() {
        format!("Edit role for {}", person.name)
    } else {
        format!("Assign role to {}", person.name)
    };

    let ctx = PageContext::build(&session, "/roles");
    render(RoleFormTemplate {
        ctx,
        form_title,
        form_action: format!("/roles/{did}"),
        options: LevelOption::global(person.access_level),
        person,
    })
}

/// POST /roles/{did}
pub async fn update(
    dir: web::Data<dyn Directory>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<AccessForm>,
) -> Result<HttpResponse, AppError> {
    let did = path.into_inner();
    let access = GlobalAccess::from(Some(form.access_level));
    if !GlobalAccess::ASSIGNABLE.contains(&access) {
        return Err(AppError::BadRequest(format!("Invalid access level {}", form.access_level)));
    }

    let mutation = Mutation::SetRole { did, access };
    intents::apply(dir.get_ref(), &session, mutation, "Role updated").await;
    Ok(see_other("/roles"))
}
