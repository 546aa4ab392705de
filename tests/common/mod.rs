//! Shared test infrastructure for component and HTTP tests.
//!
//! # Records
//! - `person()`, `people()` - plain volunteers for the people roster
//! - `with_role()`, `member()` - roles and membership roster records
//!
//! # Directory
//! - `scenario_data()` - a small, fixed directory with known ids
//! - `console_app!` - the full route table over a fixture directory

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use regex::Regex;

use dggcrm_console::directory::{Directory, FixtureData, FixtureDirectory};
use dggcrm_console::models::{GlobalAccess, GroupAccess, GroupMember, Person, PersonWithRole};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ALICE: &str = "100000000000000001";
pub const BOB: &str = "100000000000000002";
pub const CARA: &str = "100000000000000003";
pub const HARBOR: i64 = 1;
pub const LANTERN: i64 = 2;

// ============================================================================
// RECORDS
// ============================================================================

pub fn person(did: &str, name: &str) -> Person {
    Person::new(did, name)
}

/// `n` people named "Person 1".."Person n" with dids "d1".."dn".
pub fn people(n: usize) -> Vec<Person> {
    (1..=n).map(|i| Person::new(format!("d{i}"), format!("Person {i}"))).collect()
}

pub fn with_role(did: &str, name: &str, access: GlobalAccess) -> PersonWithRole {
    let mut p = PersonWithRole::new(did, name, access);
    if access.is_assigned() {
        p.role_id = Some(1);
    }
    p
}

pub fn member(gid: i64, did: &str, name: &str, access_level: GroupAccess) -> GroupMember {
    GroupMember { did: did.to_string(), name: name.to_string(), access_level, group: gid, id: Some(1) }
}

// ============================================================================
// HTML HELPERS
// ============================================================================

pub fn count(html: &str, pattern: &str) -> usize {
    Regex::new(pattern).expect("Bad test regex").find_iter(html).count()
}

/// Keys of the rendered rows in document order.
pub fn row_keys(html: &str) -> Vec<String> {
    Regex::new(r#"class="roster-row[^"]*" data-key="([^"]+)""#)
        .expect("Bad test regex")
        .captures_iter(html)
        .map(|c| c[1].to_string())
        .collect()
}

// ============================================================================
// DIRECTORY SETUP
// ============================================================================

/// Alice (admin, editor of Harbor), Bob (no role, viewer of Harbor),
/// Cara (organizer, no memberships) and two organizations.
pub fn scenario_data() -> FixtureData {
    FixtureData::default()
        .with_person(ALICE, "Alice Anders")
        .with_person(BOB, "Bruno Baker")
        .with_person(CARA, "Chloe Castillo")
        .with_group(HARBOR, "Harbor Outreach")
        .with_group(LANTERN, "Lantern Press")
        .with_member(HARBOR, ALICE, GroupAccess::Edit)
        .with_member(HARBOR, BOB, GroupAccess::View)
        .with_role(ALICE, GlobalAccess::Admin)
        .with_role(CARA, GlobalAccess::Organizer)
        .with_tag(ALICE, 1, "Dev-Software")
}

/// `n` people and nothing else.
pub fn crowd_data(n: usize) -> FixtureData {
    (1..=n).fold(FixtureData::default(), |data, i| {
        data.with_person(&format!("{}", 200_000_000_000_000_000u64 + i as u64), &format!("Volunteer {i}"))
    })
}

pub fn directory(data: FixtureData) -> (Arc<FixtureDirectory>, Arc<dyn Directory>) {
    let fixture = Arc::new(FixtureDirectory::new(data));
    let shared: Arc<dyn Directory> = fixture.clone();
    (fixture, shared)
}

/// Initialise the full console over `$dir` (an `Arc<dyn Directory>`).
#[macro_export]
macro_rules! console_app {
    ($dir:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(dggcrm_console::session::middleware(actix_web::cookie::Key::generate()))
                .app_data(actix_web::web::Data::from($dir))
                .app_data(actix_web::web::Data::new(dggcrm_console::config::AppConfig::default()))
                .configure(dggcrm_console::handlers::routes)
                .default_service(actix_web::web::to(dggcrm_console::handlers::not_found)),
        )
        .await
    };
}

// ============================================================================
// SESSION HELPERS
// ============================================================================

/// The session cookie set by `resp`, if it changed the session.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response().cookies().find(|c| c.name() == "dggcrm").map(|c| c.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
