mod health;
mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    let api = Router::new()
        .route("/products", get(products::get_all_products))
        .route("/products/search", get(products::search_products))
        .route("/product", post(products::add_product))
        .route(
            "/product/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/product/{id}/image", get(products::get_product_image));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/api", api)
}
