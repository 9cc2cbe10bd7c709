//! Product intake: validation and creation.
//!
//! Validation itself is pure and lives in `depot_core::validate`; this
//! service supplies the one fact validation cannot compute on its own -
//! whether the draft's title is already taken - and persists drafts that
//! pass.

use thiserror::Error;

use depot_core::validate::{ValidationReport, fields, messages};
use depot_core::{ProductDraft, validate_product};

use crate::db::RepositoryError;
use crate::models::product::Product;

/// Errors that can occur while creating a product.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The draft failed validation; the report carries the per-field
    /// messages. Not a fault, just a rejected candidate.
    #[error("product failed validation")]
    Invalid(ValidationReport),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Product persistence as seen by the catalog service.
pub trait ProductStore {
    /// Whether any persisted product carries exactly this title.
    fn title_taken(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Insert a draft that already passed validation.
    fn insert(
        &self,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<Product, RepositoryError>> + Send;
}

/// Validate a draft against the field rules and the persisted titles.
///
/// Always returns a report; an invalid draft is not an error. Only a failed
/// uniqueness read surfaces as `RepositoryError`.
///
/// # Errors
///
/// Returns `RepositoryError` when the title lookup fails.
pub async fn validate_draft<S: ProductStore>(
    store: &S,
    draft: &ProductDraft,
) -> Result<ValidationReport, RepositoryError> {
    let taken = store.title_taken(&draft.title).await?;
    Ok(validate_product(draft, taken))
}

/// Validate and persist a draft.
///
/// # Errors
///
/// Returns [`CatalogError::Invalid`] with the violation report when the
/// draft fails validation, including the case where the title is claimed by
/// a concurrent insert between the uniqueness read and our own insert.
/// Returns [`CatalogError::Repository`] for storage failures.
pub async fn create_product<S: ProductStore>(
    store: &S,
    draft: &ProductDraft,
) -> Result<Product, CatalogError> {
    let report = validate_draft(store, draft).await?;
    if !report.is_valid() {
        return Err(CatalogError::Invalid(report));
    }

    match store.insert(draft).await {
        Ok(product) => Ok(product),
        // Lost the race for the title; report it the same way the
        // pre-insert check would have.
        Err(RepositoryError::Conflict(_)) => {
            let mut report = ValidationReport::default();
            report.add(fields::TITLE, messages::TITLE_TAKEN);
            Err(CatalogError::Invalid(report))
        }
        Err(e) => Err(CatalogError::Repository(e)),
    }
}
