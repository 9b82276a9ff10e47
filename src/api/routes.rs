use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Lookups
        .route("/countries", get(handlers::get_countries))
        .route(
            "/countries/:country/customers",
            get(handlers::get_country_customers),
        )
        .route("/sales-orgs", get(handlers::get_sales_orgs))
        .route(
            "/sales-orgs/:sales_org/materials",
            get(handlers::get_sales_org_materials),
        )
        .route(
            "/customers/:soldto/sales-orgs",
            get(handlers::get_customer_sales_orgs),
        )
        .route(
            "/customers/:soldto/order-years",
            get(handlers::get_customer_order_years),
        )
        .route(
            "/customers/:soldto/product-lines",
            get(handlers::get_customer_product_lines),
        )
        // Views
        .route("/recommendations", post(handlers::recommend_products))
        .route(
            "/recommendations/export",
            post(handlers::export_recommendations),
        )
        .route("/similar-materials", post(handlers::similar_materials))
        .route(
            "/similar-materials/export",
            post(handlers::export_similar_materials),
        )
        .route("/new-customer", post(handlers::new_customer))
        .route("/new-customer/export", post(handlers::export_new_customer))
        .route("/target-customers", post(handlers::target_customers))
        .route(
            "/target-customers/export",
            post(handlers::export_target_customers),
        )
}
