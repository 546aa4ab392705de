use actix_session::Session;

use crate::components::Intent;
use crate::directory::{Directory, Mutation};
use crate::session::set_flash;

/// Where an intent leaves the user: on a form, or back on the roster it
/// came from after a mutation was sent.
#[derive(Debug, PartialEq, Eq)]
pub enum Forwarded {
    Form(String),
    Roster,
}

/// Forward one editor intent. Intents that need a chosen level go to the
/// matching form; removals and deletions go straight to the directory.
pub async fn forward(dir: &dyn Directory, session: &Session, intent: Intent) -> Forwarded {
    match intent {
        Intent::AssignRole { did } | Intent::EditRole { did, .. } => Forwarded::Form(format!("/roles/{did}/edit")),
        Intent::RemoveRole { did, role_id } => {
            apply(dir, session, Mutation::RemoveRole { did, role_id }, "Role removed").await;
            Forwarded::Roster
        }
        Intent::AddMember { gid } => Forwarded::Form(format!("/orgs/{gid}/members/new")),
        Intent::EditMember { gid, did, .. } => Forwarded::Form(format!("/orgs/{gid}/members/{did}/edit")),
        Intent::RemoveMember { gid, did, id } => {
            apply(dir, session, Mutation::RemoveMember { gid, did, id }, "Member removed").await;
            Forwarded::Roster
        }
        Intent::DeleteOrganization { gid } => {
            apply(dir, session, Mutation::DeleteOrganization { gid }, "Organization deleted").await;
            Forwarded::Roster
        }
    }
}

/// Send a mutation and report the outcome as a flash message. Returns
/// whether the directory accepted it.
pub async fn apply(dir: &dyn Directory, session: &Session, mutation: Mutation, done: &str) -> bool {
    let kind = mutation.kind();
    match dir.apply(mutation).await {
        Ok(()) => {
            log::info!("Forwarded {kind}");
            set_flash(session, done);
            true
        }
        Err(e) => {
            log::warn!("Directory rejected {kind}: {e}");
            set_flash(session, e.to_string());
            false
        }
    }
}
