//! Customer HTTP Routes

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::model::CustomerDto;
use crate::service::CustomerService;
use crate::validation::Validate;

use super::errors::{ApiError, ApiResult};
use super::response::{created, json_array};

/// Collection path for customers
pub const CUSTOMER_PATH: &str = "/customers";
/// Single-customer path template
pub const CUSTOMER_ID_PATH: &str = "/customers/:id";

#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    /// Every customer with exactly this name
    pub name: Option<String>,
}

/// Create customer routes
pub fn customer_routes(service: CustomerService) -> Router {
    Router::new()
        .route(CUSTOMER_PATH, get(list_customers).post(create_customer))
        .route(
            CUSTOMER_ID_PATH,
            get(get_customer)
                .put(update_customer)
                .patch(patch_customer)
                .delete(delete_customer),
        )
        .with_state(service)
}

async fn list_customers(
    State(service): State<CustomerService>,
    query: Result<Query<CustomerQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;

    let customers = match query.name {
        Some(name) => service.find_all_by_name(&name).await?,
        None => service.list().await?,
    };
    Ok(json_array(customers))
}

async fn get_customer(
    State(service): State<CustomerService>,
    Path(id): Path<String>,
) -> ApiResult<Json<CustomerDto>> {
    let customer = service.get(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(customer))
}

async fn create_customer(
    State(service): State<CustomerService>,
    payload: Result<Json<CustomerDto>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(dto) = payload?;
    dto.check().map_err(ApiError::Validation)?;

    let saved = service.create(dto).await?;
    tracing::info!(id = saved.id.as_deref(), "customer created");
    created(CUSTOMER_PATH, saved.id.as_deref())
}

async fn update_customer(
    State(service): State<CustomerService>,
    Path(id): Path<String>,
    payload: Result<Json<CustomerDto>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(dto) = payload?;
    dto.check().map_err(ApiError::Validation)?;

    service.update(&id, dto).await?.ok_or(ApiError::NotFound)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn patch_customer(
    State(service): State<CustomerService>,
    Path(id): Path<String>,
    payload: Result<Json<CustomerDto>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(dto) = payload?;

    service.patch(&id, dto).await?.ok_or(ApiError::NotFound)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_customer(
    State(service): State<CustomerService>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    service.get(&id).await?.ok_or(ApiError::NotFound)?;
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
