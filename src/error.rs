use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub const TRY_AGAIN: &str = "Something went wrong, please try again.";
pub const CHECK_README: &str = "Something went wrong, please try again. If your having problems with the query, check the readme for further instructions.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please enter a valid year, in place of the \":year\"-placeholder, in the URL field")]
    InvalidYear,

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Storage {
        message: &'static str,
        #[source]
        source: sea_orm::DbErr,
    },
}

impl ApiError {
    pub fn storage(message: &'static str) -> impl FnOnce(sea_orm::DbErr) -> Self {
        move |source| Self::Storage { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidYear => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Storage { source, .. } = &self {
            tracing::error!(error = %source, "movie query failed");
        }
        (self.status(), Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
