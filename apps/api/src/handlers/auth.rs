use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clinova_application::{IdentityResolution, LoginOutcome};
use clinova_core::{AppError, SessionPrincipal};
use tower_sessions::Session;
use tracing::error;

use crate::dto::{IdentityResponse, LoginRequest};
use crate::error::{ApiResult, ErrorResponse};
use crate::state::AppState;

/// Session key the authenticated principal is stored under.
pub const SESSION_PRINCIPAL_KEY: &str = "clinova.principal";

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<IdentityResponse>> {
    let outcome = state
        .auth_service
        .login(payload.email.trim(), &payload.password)
        .await?;

    let LoginOutcome::Authenticated(staff) = outcome else {
        return Err(AppError::Unauthorized("invalid email or password".to_owned()).into());
    };

    let principal = SessionPrincipal::new(staff.id.as_uuid(), staff.email.clone());
    session
        .insert(SESSION_PRINCIPAL_KEY, principal.clone())
        .await
        .map_err(|error| AppError::Internal(format!("failed to persist session: {error}")))?;

    match state
        .identity_service
        .resolve_current_identity(Some(&principal))
        .await?
    {
        IdentityResolution::Authenticated(identity) => Ok(Json(IdentityResponse::from(identity))),
        IdentityResolution::Unauthenticated => {
            Err(AppError::Unauthorized("invalid email or password".to_owned()).into())
        }
    }
}

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Resolves the current session into the identity payload.
///
/// This handler is the single translation point between the resolution
/// outcome and the wire contract: 200 with the identity, 401 with
/// `Not authenticated`, or 500 with `Failed to fetch user information`.
/// Faults are logged with the operation name only; credentials never
/// reach the log stream.
pub async fn me_handler(State(state): State<AppState>, session: Session) -> Response {
    let principal = match session
        .get::<SessionPrincipal>(SESSION_PRINCIPAL_KEY)
        .await
    {
        Ok(principal) => principal,
        Err(read_error) => {
            error!(%read_error, "session read failed during identity lookup");
            return internal_failure();
        }
    };

    match state
        .identity_service
        .resolve_current_identity(principal.as_ref())
        .await
    {
        Ok(IdentityResolution::Authenticated(identity)) => {
            (StatusCode::OK, Json(IdentityResponse::from(identity))).into_response()
        }
        Ok(IdentityResolution::Unauthenticated) => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Not authenticated")),
        )
            .into_response(),
        Err(resolve_error) => {
            error!(%resolve_error, "identity resolution failed");
            internal_failure()
        }
    }
}

fn internal_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Failed to fetch user information")),
    )
        .into_response()
}
