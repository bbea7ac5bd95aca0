//! Series CRUD endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use series_core::{Error, NewSerie, Patch, Serie};

use crate::error::AppError;
use crate::AppState;

const SERIE_NOT_FOUND: &str = "Serie not found";

/// Series routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/series", get(list_series).post(create_serie))
        .route(
            "/series/:id",
            get(get_serie).put(update_serie).delete(delete_serie),
        )
        .route("/series/gender/", get(filter_without_gender))
        .route("/series/gender/:gender", get(filter_by_gender))
}

/// List every cached series.
async fn list_series(State(state): State<AppState>) -> Json<Vec<Serie>> {
    Json(state.series.list())
}

/// Fetch a single series. A missing id answers 400, not 404.
async fn get_serie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Serie>, AppError> {
    state.series.get_by_id(&id).map(Json).map_err(|e| match e {
        Error::NotFound(_) => AppError::bad_request(SERIE_NOT_FOUND),
        other => internal("failed to read serie", other, SERIE_NOT_FOUND),
    })
}

async fn filter_by_gender(
    State(state): State<AppState>,
    Path(gender): Path<String>,
) -> Result<Json<Vec<Serie>>, AppError> {
    filter(&state, &gender)
}

async fn filter_without_gender(
    State(state): State<AppState>,
) -> Result<Json<Vec<Serie>>, AppError> {
    filter(&state, "")
}

fn filter(state: &AppState, gender: &str) -> Result<Json<Vec<Serie>>, AppError> {
    state
        .series
        .filter_by_gender(gender)
        .map(Json)
        .map_err(|e| match e {
            Error::InvalidInput(_) => AppError::bad_request("Gender not specified"),
            Error::NoMatches(_) => AppError::not_found("No series found for the specified genre"),
            other => internal(
                "failed to filter series",
                other,
                "Error when searching for series",
            ),
        })
}

/// Create a series from `{name, gender, seasons}`.
async fn create_serie(
    State(state): State<AppState>,
    payload: Result<Json<NewSerie>, JsonRejection>,
) -> Result<(StatusCode, Json<Serie>), AppError> {
    const INSUFFICIENT: &str = "Insufficient data provided";

    let Json(new) = payload.map_err(|e| {
        tracing::debug!(error = %e, "rejected create body");
        AppError::bad_request(INSUFFICIENT)
    })?;

    match state.series.create(new).await {
        Ok(serie) => Ok((StatusCode::CREATED, Json(serie))),
        Err(Error::InvalidInput(_)) => Err(AppError::bad_request(INSUFFICIENT)),
        Err(e) => Err(internal("failed to create serie", e, "Error adding series")),
    }
}

/// Merge the JSON body over an existing series.
async fn update_serie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Patch>, JsonRejection>,
) -> Result<Json<Serie>, AppError> {
    let Json(patch) = payload.map_err(|e| {
        tracing::debug!(error = %e, "rejected update body");
        AppError::bad_request("Invalid request body")
    })?;

    match state.series.update(&id, &patch).await {
        Ok(serie) => Ok(Json(serie)),
        Err(Error::NotFound(_)) => Err(AppError::not_found(SERIE_NOT_FOUND)),
        Err(e) => Err(internal(
            "failed to update serie",
            e,
            "Error when updating the series.",
        )),
    }
}

async fn delete_serie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    match state.series.delete(&id).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(Error::NotFound(_)) => Err(AppError::not_found(SERIE_NOT_FOUND)),
        Err(e) => Err(internal("failed to delete serie", e, "Error writing to database")),
    }
}

fn internal(context: &str, err: Error, body: &str) -> AppError {
    tracing::error!(error = %err, "{}", context);
    AppError::internal(body)
}
