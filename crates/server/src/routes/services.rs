use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use catalog::dao::service_dao;
use catalog::dto::{ServiceResponse, ServiceWithVersionCount, ServiceWithVersions};
use catalog::pagination::{Pagination, SortBy, SortOrder};

use crate::errors::ApiError;
use crate::extract::{collect, parse_uuid_v4, ValidateRequest, ValidatedJson, ValidatedQuery};
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListServicesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub name: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl ValidateRequest for ListServicesQuery {
    fn violations(&self) -> Vec<String> {
        let mut v = Vec::new();
        if let Some(page) = self.page {
            if page < 1 {
                v.push("page must be at least 1".into());
            }
        }
        if let Some(limit) = self.limit {
            if limit < 1 {
                v.push("limit must be at least 1".into());
            } else if limit > 100 {
                v.push("limit cannot exceed 100".into());
            }
        }
        if let Some(name) = &self.name {
            let len = name.chars().count();
            if !(3..=255).contains(&len) {
                v.push("name must be between 3 and 255 characters".into());
            }
        }
        if let Some(sort_by) = &self.sort_by {
            if SortBy::parse(sort_by).is_none() {
                v.push("invalid sortBy field".into());
            }
        }
        if let Some(order) = &self.order {
            if SortOrder::parse(order).is_none() {
                v.push("invalid order, must be ASC or DESC".into());
            }
        }
        v
    }
}

impl ListServicesQuery {
    fn pagination(&self) -> Pagination {
        Pagination { page: self.page.unwrap_or(1), limit: self.limit.unwrap_or(10) }
    }

    fn sort_by(&self) -> SortBy {
        self.sort_by.as_deref().and_then(SortBy::parse).unwrap_or_default()
    }

    fn order(&self) -> SortOrder {
        self.order.as_deref().and_then(SortOrder::parse).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateServiceBody {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ValidateRequest for CreateServiceBody {
    fn violations(&self) -> Vec<String> {
        let mut v = Vec::new();
        match &self.name {
            Some(name) => collect(&mut v, models::service::validate_name(name)),
            None => v.push("name should not be empty".into()),
        }
        match &self.description {
            Some(description) => {
                collect(&mut v, models::service::validate_description(description))
            }
            None => v.push("description should not be empty".into()),
        }
        v
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateServiceBody {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ValidateRequest for UpdateServiceBody {
    fn violations(&self) -> Vec<String> {
        let mut v = Vec::new();
        if let Some(name) = &self.name {
            collect(&mut v, models::service::validate_name(name));
        }
        if let Some(description) = &self.description {
            collect(&mut v, models::service::validate_description(description));
        }
        v
    }
}

#[utoipa::path(get, path = "/api/services", tag = "services",
    params(ListServicesQuery),
    responses(
        (status = 200, description = "List OK"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "List Failed")
    ))]
pub async fn list(
    State(state): State<ServerState>,
    ValidatedQuery(query): ValidatedQuery<ListServicesQuery>,
) -> Result<Json<Vec<ServiceWithVersionCount>>, ApiError> {
    let rows = service_dao::list_services_with_version_count(
        &state.db,
        query.pagination(),
        query.name.as_deref(),
        query.sort_by(),
        query.order(),
    )
    .await?;
    info!(count = rows.len(), "list services");
    Ok(Json(rows))
}

#[utoipa::path(get, path = "/api/services/{id}/versions", tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Not Found")
    ))]
pub async fn get_with_versions(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ServiceWithVersions>, ApiError> {
    let id = parse_uuid_v4(&id)?;
    match service_dao::get_service_with_versions(&state.db, id).await? {
        Some(detail) => Ok(Json(detail)),
        None => Err(ApiError::not_found(format!("Service with ID {} not found", id))),
    }
}

#[utoipa::path(post, path = "/api/services", tag = "services",
    request_body = crate::openapi::CreateServiceRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    ))]
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(body): ValidatedJson<CreateServiceBody>,
) -> Result<(StatusCode, Json<ServiceResponse>), ApiError> {
    let created = service_dao::create_service(
        &state.db,
        body.name.as_deref().unwrap_or_default(),
        body.description.as_deref().unwrap_or_default(),
    )
    .await?;
    info!(id = %created.id, name = %created.name, "created service");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(patch, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    request_body = crate::openapi::UpdateServiceRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    ))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateServiceBody>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let id = parse_uuid_v4(&id)?;
    match service_dao::update_service(&state.db, id, body.name.as_deref(), body.description.as_deref())
        .await?
    {
        Some(updated) => {
            info!(id = %updated.id, "updated service");
            Ok(Json(updated))
        }
        None => Err(ApiError::not_found(format!("Service with ID {} not found", id))),
    }
}

#[utoipa::path(delete, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service ID")),
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
    if service_dao::delete_service(&state.db, id).await? {
        info!(%id, "deleted service");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Service with ID {} not found", id)))
    }
}
