use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

use crate::components::{ConsoleError, DispatchError, ParseEventError};
use crate::directory::DirectoryError;

#[derive(Debug)]
pub enum AppError {
    Template(askama::Error),
    Directory(DirectoryError),
    BadRequest(String),
    Session(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Directory(e) => write!(f, "Directory error: {e}"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            AppError::Session(msg) => write!(f, "Session error: {msg}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound
            | AppError::Directory(DirectoryError::UnknownPerson(_))
            | AppError::Directory(DirectoryError::UnknownOrganization(_)) => {
                HttpResponse::NotFound().body("Not Found")
            }
            AppError::BadRequest(msg) => {
                log::warn!("{self}");
                HttpResponse::BadRequest().body(msg.clone())
            }
            AppError::Directory(e @ (DirectoryError::AlreadyMember { .. }
            | DirectoryError::NotMember { .. }
            | DirectoryError::NoRole(_)
            | DirectoryError::Stale(_)
            | DirectoryError::Rejected(_))) => {
                log::warn!("{self}");
                HttpResponse::Conflict().body(e.to_string())
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<DirectoryError> for AppError {
    fn from(e: DirectoryError) -> Self {
        AppError::Directory(e)
    }
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<ConsoleError> for AppError {
    fn from(e: ConsoleError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<ParseEventError> for AppError {
    fn from(e: ParseEventError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

/// Render a template into a 200 HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}
