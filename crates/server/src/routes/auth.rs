use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog::auth::domain::{LoginInput, RegisterInput};
use catalog::auth::repo::seaorm::SeaOrmAuthRepository;
use catalog::auth::service::{decode_token, AuthConfig, AuthService};

use crate::errors::ApiError;
use crate::extract::{collect, ValidateRequest, ValidatedJson};

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        AuthService::new(
            Arc::new(SeaOrmAuthRepository { db: self.db.clone() }),
            AuthConfig {
                jwt_secret: self.auth.jwt_secret.clone(),
                token_ttl_secs: self.auth.token_ttl_secs,
            },
        )
    }
}

/// Identity decoded from the bearer token, attached to protected requests.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterBody {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ValidateRequest for RegisterBody {
    fn violations(&self) -> Vec<String> {
        let mut v = Vec::new();
        match &self.username {
            Some(username) => collect(&mut v, models::user::validate_username(username)),
            None => v.push("username should not be empty".into()),
        }
        match &self.password {
            Some(password) => collect(&mut v, models::user::validate_password(password)),
            None => v.push("password should not be empty".into()),
        }
        v
    }
}

/// Login is deliberately lax: any malformed credentials fail the same way
/// a wrong password does, without revealing which part was off.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ValidateRequest for LoginBody {
    fn violations(&self) -> Vec<String> {
        Vec::new()
    }
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub id: Uuid,
    pub username: String,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub access_token: String,
}

#[utoipa::path(post, path = "/api/auth/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Username Taken")
    ))]
pub async fn register(
    State(state): State<ServerState>,
    ValidatedJson(body): ValidatedJson<RegisterBody>,
) -> Result<(StatusCode, Json<RegisterOutput>), ApiError> {
    let user = state
        .auth_service()
        .register(RegisterInput {
            username: body.username.unwrap_or_default(),
            password: body.password.unwrap_or_default(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(RegisterOutput { id: user.id, username: user.username })))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In"),
        (status = 401, description = "Unauthorized")
    ))]
pub async fn login(
    State(state): State<ServerState>,
    ValidatedJson(body): ValidatedJson<LoginBody>,
) -> Result<Json<LoginOutput>, ApiError> {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return Err(ApiError::unauthorized("Invalid credentials"));
    };
    let session = state.auth_service().login(LoginInput { username, password }).await?;
    Ok(Json(LoginOutput { access_token: session.token }))
}

/// Gate for protected routes: verify the bearer token and attach the
/// embedded identity before the handler runs.
pub async fn require_jwt(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    let claims = decode_token(token, &state.auth.jwt_secret)
        .map_err(|_| ApiError::unauthorized("Unauthorized"))?;

    req.extensions_mut()
        .insert(AuthenticatedUser { user_id: claims.sub, username: claims.username });
    Ok(next.run(req).await)
}
