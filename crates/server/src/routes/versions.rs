use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use catalog::dao::version_dao;
use catalog::dto::VersionResponse;

use crate::errors::ApiError;
use crate::extract::{collect, parse_uuid_v4, ValidateRequest, ValidatedJson};
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateVersionBody {
    #[serde(rename = "serviceId")]
    pub service_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ValidateRequest for CreateVersionBody {
    fn violations(&self) -> Vec<String> {
        let mut v = Vec::new();
        match &self.service_id {
            Some(raw) if Uuid::parse_str(raw).is_ok() => {}
            Some(_) => v.push("serviceId must be a UUID".into()),
            None => v.push("serviceId should not be empty".into()),
        }
        match &self.name {
            Some(name) => collect(&mut v, models::version::validate_name(name)),
            None => v.push("name should not be empty".into()),
        }
        match &self.description {
            Some(description) => {
                collect(&mut v, models::version::validate_description(description))
            }
            None => v.push("description should not be empty".into()),
        }
        v
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateVersionBody {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ValidateRequest for UpdateVersionBody {
    fn violations(&self) -> Vec<String> {
        let mut v = Vec::new();
        if let Some(name) = &self.name {
            collect(&mut v, models::version::validate_name(name));
        }
        if let Some(description) = &self.description {
            collect(&mut v, models::version::validate_description(description));
        }
        v
    }
}

#[utoipa::path(post, path = "/api/versions", tag = "versions",
    request_body = crate::openapi::CreateVersionRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Duplicate Version"),
        (status = 500, description = "Create Failed")
    ))]
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(body): ValidatedJson<CreateVersionBody>,
) -> Result<(StatusCode, Json<VersionResponse>), ApiError> {
    let service_id = body
        .service_id
        .as_deref()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .unwrap_or_default();

    match version_dao::create_version(
        &state.db,
        service_id,
        body.name.as_deref().unwrap_or_default(),
        body.description.as_deref().unwrap_or_default(),
    )
    .await?
    {
        Some(created) => {
            info!(id = %created.id, service_id = %created.service_id, "created version");
            Ok((StatusCode::CREATED, Json(created)))
        }
        None => Err(ApiError::conflict("Duplicate version name for this service")),
    }
}

#[utoipa::path(get, path = "/api/versions/{id}", tag = "versions",
    params(("id" = String, Path, description = "Version ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Not Found")
    ))]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<VersionResponse>, ApiError> {
    let id = parse_uuid_v4(&id)?;
    match version_dao::get_version(&state.db, id).await? {
        Some(version) => Ok(Json(version)),
        None => Err(ApiError::not_found(format!("Version with ID {} not found", id))),
    }
}

#[utoipa::path(patch, path = "/api/versions/{id}", tag = "versions",
    params(("id" = String, Path, description = "Version ID")),
    request_body = crate::openapi::UpdateVersionRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    ))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateVersionBody>,
) -> Result<Json<VersionResponse>, ApiError> {
    let id = parse_uuid_v4(&id)?;
    match version_dao::update_version(&state.db, id, body.name.as_deref(), body.description.as_deref())
        .await?
    {
        Some(updated) => {
            info!(id = %updated.id, "updated version");
            Ok(Json(updated))
        }
        None => Err(ApiError::not_found(format!("Version with ID {} not found", id))),
    }
}

#[utoipa::path(delete, path = "/api/versions/{id}", tag = "versions",
    params(("id" = String, Path, description = "Version ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Not Found")
    ))]
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_uuid_v4(&id)?;
    if version_dao::delete_version(&state.db, id).await? {
        info!(%id, "deleted version");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Version with ID {} not found", id)))
    }
}
