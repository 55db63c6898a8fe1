use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{Claims, JwtKeys};
use crate::error::ApiError;
use crate::types::Role;

const LOGIN_REQUIRED: &str = "please log in.";
const INVALID_TOKEN: &str = "invalid token.";
const NOT_AUTHORIZED: &str = "not authorized.";

/// Authenticated caller, injected into request extensions by [`require_role`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            role: claims.role,
        }
    }
}

/// Per-route gate state: the verifying keys and the roles let through.
#[derive(Clone, Debug)]
pub struct AuthGate {
    keys: JwtKeys,
    allowed: &'static [Role],
}

impl AuthGate {
    pub fn new(keys: JwtKeys, allowed: &'static [Role]) -> Self {
        Self { keys, allowed }
    }

    /// Every failure is `Auth` (401), including a valid token whose role is
    /// not in the allowlist.
    pub fn check(&self, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
        const OP: &str = "middleware/auth";

        let token = extract_bearer(headers).ok_or_else(|| ApiError::auth(OP, LOGIN_REQUIRED))?;

        let claims = self.keys.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            ApiError::auth(OP, INVALID_TOKEN)
        })?;

        if !self.allowed.contains(&claims.role) {
            return Err(ApiError::auth(OP, NOT_AUTHORIZED));
        }

        Ok(AuthUser::from(claims))
    }
}

/// Role gate middleware, mounted with `axum::middleware::from_fn_with_state`.
pub async fn require_role(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = gate.check(request.headers())?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Accepts exactly `Bearer <token>`.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}
