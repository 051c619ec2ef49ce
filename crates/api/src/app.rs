use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_user_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{auth, health, parkings, pickups, reservations, schools, students};
use crate::services::{PickupService, ReservationService};
use shared::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
    pub pickups: PickupService,
    pub reservations: ReservationService,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let jwt = Arc::new(JwtConfig::with_leeway(
        &config.jwt.secret,
        config.jwt.access_token_expiry_secs,
        config.jwt.refresh_token_expiry_secs,
        config.jwt.leeway_secs,
    ));

    // Rate limiting is disabled when rate_limit_per_minute is 0
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        jwt,
        rate_limiter,
        pickups: PickupService::new(pool.clone(), config.pickup_policy.policy()),
        reservations: ReservationService::new(pool),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Protected routes (require a valid access token)
    // Middleware order: auth runs first, then rate limiting (keyed by user)
    let protected_routes = Router::new()
        .route("/api/v1/auth/me", get(auth::me))
        // School routes (v1)
        .route("/api/v1/schools", post(schools::create_school))
        .route("/api/v1/schools/:id", get(schools::get_school))
        .route(
            "/api/v1/schools/:id/pickups",
            get(pickups::list_school_pickups),
        )
        // Student and guardian routes (v1)
        .route("/api/v1/students", post(students::create_student))
        .route("/api/v1/students/mine", get(students::list_my_students))
        .route("/api/v1/students/:id", get(students::get_student))
        .route(
            "/api/v1/students/:id/guardians",
            get(students::list_guardians).post(students::add_guardian),
        )
        .route(
            "/api/v1/students/:id/guardians/:user_id",
            delete(students::remove_guardian),
        )
        .route(
            "/api/v1/students/:id/pickups",
            get(pickups::list_student_pickups),
        )
        // Pickup workflow routes (v1)
        .route("/api/v1/pickups", post(pickups::request_pickup))
        .route("/api/v1/pickups/active", get(pickups::list_active_pickups))
        .route("/api/v1/pickups/:id", get(pickups::get_pickup))
        .route("/api/v1/pickups/:id/release", post(pickups::release_pickup))
        .route("/api/v1/pickups/:id/confirm", post(pickups::confirm_pickup))
        .route("/api/v1/pickups/:id/cancel", post(pickups::cancel_pickup))
        // Parking facility routes (v1)
        .route("/api/v1/parkings", post(parkings::create_parking))
        .route("/api/v1/parkings/nearby", get(parkings::nearby_parkings))
        .route(
            "/api/v1/parkings/:id",
            get(parkings::get_parking).patch(parkings::update_parking),
        )
        .route("/api/v1/parkings/:id/spots", post(parkings::add_spot))
        .route(
            "/api/v1/parkings/:id/spots/available",
            get(parkings::available_spots),
        )
        // Reservation routes (v1)
        .route(
            "/api/v1/reservations",
            post(reservations::create_reservation).get(reservations::list_reservations),
        )
        .route("/api/v1/reservations/:id", get(reservations::get_reservation))
        .route("/api/v1/reservations/:id/check-in", post(reservations::check_in))
        .route(
            "/api/v1/reservations/:id/check-out",
            post(reservations::check_out),
        )
        .route(
            "/api/v1/reservations/:id/cancel",
            post(reservations::cancel_reservation),
        )
        // Rate limiting runs after auth (needs the authenticated user)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware)) // Security headers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
