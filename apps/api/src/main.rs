//! Clinova API composition root.

#![forbid(unsafe_code)]

mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use clinova_application::{
    AuthService, AuthorizationService, IdentityService, InventoryService, RoleDirectoryService,
    StaffService,
};
use clinova_core::AppError;
use clinova_infrastructure::{
    Argon2PasswordHasher, PostgresInventoryRepository, PostgresRolePermissionRepository,
    PostgresStaffRepository,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

    let database_url = required_env("DATABASE_URL")?;
    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .unwrap_or_else(|_| "false".to_owned())
        .eq_ignore_ascii_case("true");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let session_store = PostgresStore::new(pool.clone())
        .with_table_name("tower_sessions")
        .map_err(|error| {
            AppError::Validation(format!("invalid session table name configuration: {error}"))
        })?;
    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)));

    let staff_repository = Arc::new(PostgresStaffRepository::new(pool.clone()));
    let role_repository = Arc::new(PostgresRolePermissionRepository::new(pool.clone()));
    let inventory_repository = Arc::new(PostgresInventoryRepository::new(pool.clone()));
    let password_hasher = Arc::new(Argon2PasswordHasher::new());

    let authorization_service = AuthorizationService::new(role_repository.clone());

    let app_state = AppState {
        auth_service: AuthService::new(staff_repository.clone(), password_hasher.clone()),
        identity_service: IdentityService::new(staff_repository.clone(), role_repository.clone()),
        staff_service: StaffService::new(
            staff_repository,
            role_repository.clone(),
            authorization_service.clone(),
            password_hasher,
        ),
        role_directory_service: RoleDirectoryService::new(
            role_repository,
            authorization_service.clone(),
        ),
        inventory_service: InventoryService::new(inventory_repository, authorization_service),
        postgres_pool: pool,
        frontend_url: frontend_url.clone(),
    };

    let protected_routes = Router::new()
        .route(
            "/api/staff",
            get(handlers::staff::list_staff_handler).post(handlers::staff::create_staff_handler),
        )
        .route(
            "/api/staff/{staff_id}",
            get(handlers::staff::get_staff_handler)
                .put(handlers::staff::update_staff_handler)
                .delete(handlers::staff::deactivate_staff_handler),
        )
        .route("/api/roles", get(handlers::roles::list_roles_handler))
        .route(
            "/api/permissions",
            get(handlers::roles::permission_catalog_handler),
        )
        .route(
            "/api/inventory/items",
            get(handlers::inventory::list_items_handler)
                .post(handlers::inventory::create_item_handler),
        )
        .route(
            "/api/inventory/items/{item_id}",
            get(handlers::inventory::get_item_handler)
                .put(handlers::inventory::update_item_handler),
        )
        .route(
            "/api/inventory/low-stock",
            get(handlers::inventory::low_stock_handler),
        )
        .route(
            "/api/inventory/units",
            get(handlers::inventory::measurement_units_handler),
        )
        .route_layer(from_fn(middleware::require_auth));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/api/auth/login", post(handlers::auth::login_handler))
        .route("/api/auth/logout", post(handlers::auth::logout_handler))
        .route("/api/auth/me", get(handlers::auth::me_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state);

    let host = IpAddr::from_str(&api_host)
        .map_err(|error| AppError::Internal(format!("invalid API_HOST '{api_host}': {error}")))?;
    let address = SocketAddr::from((host, api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "clinova-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
