use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Product, SearchQuery},
    utils::extractors::{FormError, ProductForm, extract_product_form},
};

const FAILED_TO_UPDATE: &str = "Failed to update";

pub async fn get_all_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.products.get_all_products().await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = state
        .products
        .get_product_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

pub async fn add_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Product>)> {
    let ProductForm { product, image } = extract_product_form(multipart)
        .await
        .map_err(|e| match e {
            FormError::Malformed(msg) => AppError::BadRequest(msg),
            FormError::Upload(msg) => AppError::InternalError(msg),
        })?;

    let product = state.products.add_product(product, image).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response> {
    let product = state
        .products
        .get_product_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Product not found".to_string()))?;

    let data = product
        .image_data
        .ok_or(AppError::NotFound("Product has no image".to_string()))?;

    let content_type = product
        .image_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok(([(header::CONTENT_TYPE, content_type)], Body::from(data)).into_response())
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<(StatusCode, &'static str)> {
    let ProductForm { product, image } = extract_product_form(multipart)
        .await
        .map_err(|e| match e {
            FormError::Malformed(msg) => AppError::BadRequest(msg),
            FormError::Upload(msg) => {
                tracing::error!("Update of product {} failed: {}", id, msg);
                AppError::BadGateway(FAILED_TO_UPDATE.to_string())
            }
        })?;

    // A store that updated nothing is reported as a client error.
    state
        .products
        .update_product(id, product, image)
        .await
        .map_err(|e| {
            tracing::error!("Update of product {} failed: {}", id, e);
            AppError::BadRequest(FAILED_TO_UPDATE.to_string())
        })?
        .ok_or(AppError::BadRequest(FAILED_TO_UPDATE.to_string()))?;

    Ok((StatusCode::OK, "updated"))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, &'static str)> {
    if state.products.get_product_by_id(id).await?.is_none() {
        return Err(AppError::NotFound("product not found".to_string()));
    }

    state.products.delete_product(id).await?;

    Ok((StatusCode::OK, "Deleted"))
}

pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state.products.search_products(&params.keyword).await?;

    Ok(Json(products))
}
