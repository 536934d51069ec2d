//! Beer HTTP Routes
//!
//! Binds each `/beers` request to one [`BeerService`] operation. Emptiness
//! from the service becomes a 404 here; validation runs before the service
//! is touched.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use futures_util::stream::{self, StreamExt};
use serde::Deserialize;

use crate::model::BeerDto;
use crate::service::{BeerService, BeerStream};
use crate::validation::Validate;

use super::errors::{ApiError, ApiResult};
use super::response::{created, json_array};

/// Collection path for beers
pub const BEER_PATH: &str = "/beers";
/// Single-beer path template
pub const BEER_ID_PATH: &str = "/beers/:id";

/// Secondary lookups on the collection read
#[derive(Debug, Default, Deserialize)]
pub struct BeerQuery {
    /// First beer with exactly this name
    pub name: Option<String>,
    /// Every beer of exactly this style
    pub style: Option<String>,
}

/// Create beer routes
pub fn beer_routes(service: BeerService) -> Router {
    Router::new()
        .route(BEER_PATH, get(list_beers).post(create_beer))
        .route(
            BEER_ID_PATH,
            get(get_beer)
                .put(update_beer)
                .patch(patch_beer)
                .delete(delete_beer),
        )
        .with_state(service)
}

async fn list_beers(
    State(service): State<BeerService>,
    query: Result<Query<BeerQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;

    let beers: BeerStream = match (query.name, query.style) {
        (Some(_), Some(_)) => {
            return Err(ApiError::InvalidQuery(
                "name and style cannot be combined".to_string(),
            ))
        }
        (Some(name), None) => {
            let first = service.find_first_by_name(&name).await?;
            stream::iter(first.map(Ok)).boxed()
        }
        (None, Some(style)) => service.find_all_by_style(&style).await?,
        (None, None) => service.list().await?,
    };

    Ok(json_array(beers))
}

async fn get_beer(
    State(service): State<BeerService>,
    Path(id): Path<String>,
) -> ApiResult<Json<BeerDto>> {
    let beer = service.get(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(beer))
}

async fn create_beer(
    State(service): State<BeerService>,
    payload: Result<Json<BeerDto>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(dto) = payload?;
    dto.check().map_err(ApiError::Validation)?;

    let saved = service.create(dto).await?;
    tracing::info!(id = saved.id.as_deref(), "beer created");
    created(BEER_PATH, saved.id.as_deref())
}

async fn update_beer(
    State(service): State<BeerService>,
    Path(id): Path<String>,
    payload: Result<Json<BeerDto>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(dto) = payload?;
    dto.check().map_err(ApiError::Validation)?;

    service.update(&id, dto).await?.ok_or(ApiError::NotFound)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn patch_beer(
    State(service): State<BeerService>,
    Path(id): Path<String>,
    payload: Result<Json<BeerDto>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(dto) = payload?;

    service.patch(&id, dto).await?.ok_or(ApiError::NotFound)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_beer(
    State(service): State<BeerService>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    service.get(&id).await?.ok_or(ApiError::NotFound)?;
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
