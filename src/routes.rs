use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::Uri,
    routing::{MethodRouter, get},
};
use tracing::debug;

use crate::{
    AppState,
    entities::movie,
    error::{ApiError, ApiResult, CHECK_README, TRY_AGAIN},
    models::EndpointInfo,
    store::{MovieFilter, MovieStore},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Index,
    Movies,
    MovieById,
    MoviesByYear,
    MoviesByTitle,
}

// Every endpoint is mounted with `get`.
const METHODS: &[&str] = &["GET"];

/// Every route the service serves. Mounted by [`router`] and listed by [`index`].
pub const ENDPOINTS: [Endpoint; 5] = [
    Endpoint::Index,
    Endpoint::Movies,
    Endpoint::MovieById,
    Endpoint::MoviesByYear,
    Endpoint::MoviesByTitle,
];

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Index => "/",
            Endpoint::Movies => "/movies",
            Endpoint::MovieById => "/movies/{id}",
            Endpoint::MoviesByYear => "/movies/year/{year}",
            Endpoint::MoviesByTitle => "/movies/title/{title}",
        }
    }

    fn handler<S: MovieStore>(self) -> MethodRouter<Arc<AppState<S>>> {
        match self {
            Endpoint::Index => get(index::<S>),
            Endpoint::Movies => get(list_movies::<S>),
            Endpoint::MovieById => get(movie_by_id::<S>),
            Endpoint::MoviesByYear => get(movies_by_year::<S>),
            Endpoint::MoviesByTitle => get(movies_by_title::<S>),
        }
    }
}

pub fn router<S: MovieStore>(state: Arc<AppState<S>>) -> Router {
    let prefix = state.route_prefix.clone();

    let routes = ENDPOINTS
        .into_iter()
        .fold(Router::new(), |router, endpoint| {
            router.route(endpoint.path(), endpoint.handler::<S>())
        })
        .fallback(unknown_route)
        .with_state(state);

    if prefix.is_empty() { routes } else { Router::new().nest(&prefix, routes).fallback(unknown_route) }
}

pub fn inventory(prefix: &str) -> Vec<EndpointInfo> {
    ENDPOINTS
        .into_iter()
        .map(|endpoint| EndpointInfo {
            path: match (prefix, endpoint.path()) {
                ("", path) => path.to_string(),
                (prefix, "/") => prefix.to_string(),
                (prefix, path) => format!("{prefix}{path}"),
            },
            methods: METHODS.to_vec(),
        })
        .collect()
}

pub async fn index<S: MovieStore>(State(state): State<Arc<AppState<S>>>) -> Json<Vec<EndpointInfo>> {
    Json(inventory(&state.route_prefix))
}

pub async fn list_movies<S: MovieStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ApiResult<Json<Vec<movie::Model>>> {
    let movies = state.store.find_all(&MovieFilter::All).await.map_err(ApiError::storage(TRY_AGAIN))?;
    debug!(count = movies.len(), "listed movies");

    if movies.is_empty() {
        return Err(ApiError::NotFound("No movies found".to_string()));
    }
    Ok(Json(movies))
}

pub async fn movie_by_id<S: MovieStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> ApiResult<Json<movie::Model>> {
    debug!(id = %id, "fetching movie");
    let filter = MovieFilter::Id(id.clone());

    match state.store.find_one(&filter).await.map_err(ApiError::storage(CHECK_README))? {
        Some(movie) => Ok(Json(movie)),
        None => Err(ApiError::NotFound(format!(
            "Movie with id {id} not found. Having troubles finding the movie? Make sure you switch out ':id' for the id you wish to base your query on"
        ))),
    }
}

pub async fn movies_by_year<S: MovieStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(year): Path<String>,
) -> ApiResult<Json<Vec<movie::Model>>> {
    let year = match parse_year(&year).ok_or(ApiError::InvalidYear)? {
        ParsedYear::Value(year) => year,
        // No stored year is this large, so skip the query.
        ParsedYear::OutOfRange(digits) => return Err(year_not_found(digits)),
    };
    debug!(year = year, "fetching movies by release year");

    let movies = state
        .store
        .find_all(&MovieFilter::ReleaseYear(year))
        .await
        .map_err(ApiError::storage(CHECK_README))?;

    if movies.is_empty() {
        return Err(year_not_found(year));
    }
    Ok(Json(movies))
}

fn year_not_found(year: impl std::fmt::Display) -> ApiError {
    ApiError::NotFound(format!("Movie with the release date {year} wasn't found"))
}

pub async fn movies_by_title<S: MovieStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(title): Path<String>,
) -> ApiResult<Json<Vec<movie::Model>>> {
    let title = movie::fold_title(&title);
    debug!(title = %title, "searching movies by title");

    let movies = state
        .store
        .find_all(&MovieFilter::TitleContains(title.clone()))
        .await
        .map_err(ApiError::storage(CHECK_README))?;

    if movies.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No movies found with the word '{title}' in the title"
        )));
    }
    Ok(Json(movies))
}

async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route matches {}", uri.path()))
}

#[derive(Debug, PartialEq, Eq)]
enum ParsedYear {
    Value(i64),
    /// A digit run too large for `i64`, kept as written (sign included).
    OutOfRange(String),
}

/// Reads a leading base-10 integer the way `parseInt` does: leading whitespace
/// and a sign are allowed, anything after the digits is ignored.
fn parse_year(raw: &str) -> Option<ParsedYear> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let digits = &digits[..end];
    match digits.parse::<i64>() {
        Ok(value) => Some(ParsedYear::Value(if negative { -value } else { value })),
        Err(_) => {
            let digits = digits.trim_start_matches('0');
            Some(ParsedYear::OutOfRange(if negative { format!("-{digits}") } else { digits.to_string() }))
        }
    }
}
