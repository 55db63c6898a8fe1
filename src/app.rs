use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, MethodRouter},
    BoxError, Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::JwtKeys;
use crate::config::{AppConfig, SecurityConfig};
use crate::database::{HealthCheck, Repositories};
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::{require_role, AuthGate};
use crate::services::subscription_service::SubscriptionPageSizes;
use crate::services::{NewsService, SchoolService, SubscriptionService, UserService};
use crate::types::Role;

const ADMIN: &[Role] = &[Role::Admin];
const STUDENT: &[Role] = &[Role::Student];
const ANY_ROLE: &[Role] = &[Role::Admin, Role::Student];

/// Services shared by every handler. Each one receives only the
/// repositories it uses.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub schools: Arc<SchoolService>,
    pub news: Arc<NewsService>,
    pub subscriptions: Arc<SubscriptionService>,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    pub fn new(repos: Repositories, keys: JwtKeys, config: &AppConfig) -> Self {
        let pages = &config.pagination;
        Self {
            users: Arc::new(UserService::new(
                repos.users,
                keys,
                config.security.jwt_expiry_hours,
            )),
            schools: Arc::new(SchoolService::new(repos.schools.clone(), pages.schools)),
            news: Arc::new(NewsService::new(
                repos.schools.clone(),
                repos.news.clone(),
                pages.news,
            )),
            subscriptions: Arc::new(SubscriptionService::new(
                repos.schools,
                repos.news,
                repos.subscriptions,
                SubscriptionPageSizes {
                    schools: pages.subscription_schools,
                    news: pages.subscription_news,
                },
            )),
            health: repos.health,
        }
    }
}

/// Builds the full router: public routes, role-gated routes, and the
/// request timeout, tracing and CORS layers.
pub fn router(state: AppState, keys: &JwtKeys, config: &AppConfig) -> Router {
    let admin = AuthGate::new(keys.clone(), ADMIN);
    let student = AuthGate::new(keys.clone(), STUDENT);
    let any_role = AuthGate::new(keys.clone(), ANY_ROLE);

    Router::new()
        .route("/ping", endpoint(get(public::ping_get)))
        .route("/health", endpoint(get(public::health_get)))
        .route("/users", endpoint(post(public::user_post)))
        .route("/users/login", endpoint(post(public::login_post)))
        .route(
            "/schools",
            endpoint(
                gated(post(protected::schools::schools_post), &admin)
                    .merge(gated(get(protected::schools::schools_get), &any_role)),
            ),
        )
        .route(
            "/news",
            endpoint(gated(
                post(protected::news::news_post)
                    .get(protected::news::news_get)
                    .put(protected::news::news_put),
                &admin,
            )),
        )
        .route(
            "/news/:news_id",
            endpoint(gated(delete(protected::news::news_delete), &admin)),
        )
        .route(
            "/subscriptions",
            endpoint(gated(
                post(protected::subscriptions::subscriptions_post)
                    .get(protected::subscriptions::subscriptions_get),
                &student,
            )),
        )
        .route(
            "/subscriptions/news/:school_id",
            endpoint(gated(get(protected::subscriptions::subscription_news_get), &student)),
        )
        .route(
            "/subscriptions/:school_id",
            endpoint(gated(delete(protected::subscriptions::subscriptions_delete), &student)),
        )
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(config.request_timeout()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.security))
        .with_state(state)
}

fn gated(route: MethodRouter<AppState>, gate: &AuthGate) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(gate.clone(), require_role))
}

/// Unsupported methods on a known path answer 405 in the error envelope.
/// The fallback sits outside the role gate.
fn endpoint(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(method_not_allowed)
}

async fn not_found() -> ApiError {
    ApiError::not_exist("app/fallback", "not found.")
}

async fn method_not_allowed() -> Response {
    let status = StatusCode::METHOD_NOT_ALLOWED;
    let body = json!({ "code": status.as_u16(), "message": "method not allowed." });
    (status, Json(body)).into_response()
}

/// Timeouts drop the in-flight handler and answer with the internal envelope.
async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request timed out");
    }
    ApiError::internal("app/middleware", err)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    // `AllowOrigin::list` rejects the wildcard, so it is mapped explicitly.
    let allow_origin = if security.cors_origins.iter().any(|origin| origin.trim() == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = security
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
