use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::Key;

use crate::components::ViewState;
use crate::errors::AppError;

const COOKIE_NAME: &str = "dggcrm";
const PEOPLE_VIEW_KEY: &str = "people_view";
const FLASH_KEY: &str = "flash";

/// Cookie-backed session shared by the server and the HTTP tests.
pub fn middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(COOKIE_NAME.to_string())
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}

/// Build the signing key from `SESSION_KEY`, falling back to a random one.
pub fn key_from(secret: Option<&str>) -> Key {
    match secret {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    }
}

/// People console state for this browser session; a missing or unreadable
/// entry starts at the roster.
pub fn people_view(session: &Session) -> ViewState {
    session
        .get::<ViewState>(PEOPLE_VIEW_KEY)
        .unwrap_or(None)
        .unwrap_or_default()
}

pub fn store_people_view(session: &Session, state: &ViewState) -> Result<(), AppError> {
    session
        .insert(PEOPLE_VIEW_KEY, state)
        .map_err(|e| AppError::Session(format!("Failed to store people view: {e}")))
}

pub fn set_flash(session: &Session, message: impl Into<String>) {
    let _ = session.insert(FLASH_KEY, message.into());
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}
