// Page-level askama templates. Component fragments are rendered first and
// embedded as `content`.

use actix_session::Session;
use askama::Template;

use crate::models::{GlobalAccess, GroupAccess, GroupMember, Organization, PersonWithRole};
use crate::session::take_flash;

pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

const NAV: [(&str, &str); 3] = [("People", "/people"), ("Orgs", "/orgs"), ("Roles", "/roles")];

/// Common context shared by all pages.
/// Templates access these as `ctx.nav`, `ctx.flash`, etc.
pub struct PageContext {
    pub app_name: &'static str,
    pub version: &'static str,
    pub nav: Vec<NavLink>,
    pub flash: Option<String>,
}

impl PageContext {
    pub fn build(session: &Session, current_path: &str) -> Self {
        let nav = NAV
            .iter()
            .map(|&(label, href)| NavLink {
                label,
                href,
                active: current_path == href || current_path.starts_with(&format!("{href}/")),
            })
            .collect();
        Self {
            app_name: "DGG CRM",
            version: env!("CARGO_PKG_VERSION"),
            nav,
            flash: take_flash(session),
        }
    }
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct ConsolePageTemplate {
    pub ctx: PageContext,
    pub heading: String,
    pub content: String,
}

/// One `<option>` in an access-level select.
pub struct LevelOption {
    pub value: i64,
    pub label: &'static str,
    pub selected: bool,
}

impl LevelOption {
    pub fn global(current: GlobalAccess) -> Vec<LevelOption> {
        GlobalAccess::ASSIGNABLE
            .iter()
            .filter_map(|a| {
                a.level().map(|value| LevelOption { value, label: a.label(), selected: *a == current })
            })
            .collect()
    }

    pub fn group(current: Option<GroupAccess>) -> Vec<LevelOption> {
        GroupAccess::ALL
            .iter()
            .map(|a| LevelOption { value: a.level(), label: a.label(), selected: Some(*a) == current })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "roles/form.html")]
pub struct RoleFormTemplate {
    pub ctx: PageContext,
    pub form_title: String,
    pub form_action: String,
    pub person: PersonWithRole,
    pub options: Vec<LevelOption>,
}

#[derive(Template)]
#[template(path = "orgs/member_form.html")]
pub struct MemberFormTemplate {
    pub ctx: PageContext,
    pub form_title: String,
    pub form_action: String,
    pub organization: Organization,
    pub member: Option<GroupMember>,
    pub options: Vec<LevelOption>,
}
