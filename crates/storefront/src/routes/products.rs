//! Product route handlers.
//!
//! Product intake is JSON in, JSON out: a draft that passes validation is
//! persisted and echoed back with a 201; a draft that fails comes back as a
//! 422 with the per-field violation messages.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::instrument;

use depot_core::ProductDraft;
use depot_core::validate::ValidationReport;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::services::catalog::{self, CatalogError};
use crate::state::AppState;

/// Body of a validation-failure response.
#[derive(Debug, Serialize)]
pub struct ValidationBody {
    pub errors: ValidationReport,
}

/// `POST /products` - validate and create a product.
///
/// Returns 201 with the persisted product, or 422 with the violation
/// report.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> Result<Response> {
    let products = ProductRepository::new(state.pool());
    match catalog::create_product(&products, &draft).await {
        Ok(product) => Ok((StatusCode::CREATED, Json(product)).into_response()),
        Err(CatalogError::Invalid(errors)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationBody { errors }),
        )
            .into_response()),
        Err(CatalogError::Repository(e)) => Err(AppError::from(e)),
    }
}

/// `POST /products/validate` - dry-run validation of a draft.
///
/// Always 200; the report is empty when the draft is valid.
#[instrument(skip_all)]
pub async fn validate(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<ValidationBody>> {
    let products = ProductRepository::new(state.pool());
    let errors = catalog::validate_draft(&products, &draft)
        .await
        .map_err(AppError::from)?;
    Ok(Json(ValidationBody { errors }))
}
