use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{admin, public, stats};
use crate::middleware::rate_limit::create_public_governor;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // IP-based governor for the public routes
    let public_governor = create_public_governor();

    // Public routes (catalog, tags, comments, booking creation)
    let public_routes = Router::new()
        .route("/cars", get(public::list_cars))
        .route("/tags", get(public::list_tags))
        .route("/comments", get(public::car_comments))
        .route("/booking", post(public::create_booking))
        .layer(public_governor);

    // Admin routes are intentionally unauthenticated
    let admin_routes = Router::new()
        // Car management
        .route("/cars", get(admin::list_cars))
        .route("/cars", post(admin::create_car))
        .route("/cars/{id}", put(admin::update_car))
        .route("/cars/{id}", delete(admin::delete_car))
        // Booking management
        .route("/bookings", get(admin::list_bookings))
        .route("/bookings/{id}", delete(admin::cancel_booking))
        // Statistics
        .route("/stats/overview", get(stats::overview))
        .route("/stats/most-requested-cars", get(stats::most_requested_cars))
        .route("/stats/bookings-per-month", get(stats::bookings_per_month))
        .route("/stats/car-popularity", get(stats::car_popularity))
        .route("/stats/utilization", get(stats::utilization));

    // Combine all routes
    Router::new()
        .nest("/api", public_routes)
        .nest("/api/admin", admin_routes)
        .with_state(state)
}
