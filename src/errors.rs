use actix_web::{HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Unauthorized,
    Forbidden,
    NotFound,
    MissingFields(&'static str),
    Validation(String),
    Search(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Unauthorized => write!(f, "Authentication required"),
            AppError::Forbidden => write!(f, "Not a member of this team"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::MissingFields(what) => write!(f, "Missing fields: {what}"),
            AppError::Validation(msg) => write!(f, "Invalid request: {msg}"),
            AppError::Search(e) => write!(f, "Search error: {e}"),
        }
    }
}

fn body(code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({ "error": { "code": code, "message": message } })
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized => {
                HttpResponse::Unauthorized().json(body("UNAUTHORIZED", "Authentication required"))
            }
            AppError::Forbidden => {
                HttpResponse::Forbidden().json(body("FORBIDDEN", "Not a member of this team"))
            }
            AppError::NotFound => {
                HttpResponse::NotFound().json(body("NOT_FOUND", "Not found"))
            }
            AppError::MissingFields(what) => {
                HttpResponse::BadRequest().json(body("MISSING_FIELDS", what))
            }
            AppError::Validation(msg) => {
                HttpResponse::BadRequest().json(body("BAD_REQUEST", msg))
            }
            AppError::Db(e) => {
                log::error!("Database error: {e}");
                HttpResponse::InternalServerError()
                    .json(body("DATABASE_ERROR", "Database operation failed"))
            }
            AppError::Search(e) => {
                log::error!("Search error: {e}");
                HttpResponse::InternalServerError()
                    .json(body("UPSTREAM_ERROR", "Business search failed"))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Search(e.to_string())
    }
}
