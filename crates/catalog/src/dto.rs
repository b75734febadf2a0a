//! Response shapes returned by the DAOs and serialized by the HTTP layer.
//! Field names follow the wire convention (camelCase).

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<models::service::Model> for ServiceResponse {
    fn from(m: models::service::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Listing row: a service annotated with its aggregated version count.
/// Hydrated straight from the left-join query.
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWithVersionCount {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub version_count: i64,
}

/// Version as nested under its service; the owning id is implied by context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<models::version::Model> for VersionSummary {
    fn from(m: models::version::Model) -> Self {
        Self { id: m.id, name: m.name, created_at: m.created_at, updated_at: m.updated_at }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWithVersions {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub versions: Vec<VersionSummary>,
}

impl ServiceWithVersions {
    pub fn new(service: models::service::Model, versions: Vec<models::version::Model>) -> Self {
        Self {
            id: service.id,
            name: service.name,
            description: service.description,
            created_at: service.created_at,
            updated_at: service.updated_at,
            versions: versions.into_iter().map(VersionSummary::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    pub id: Uuid,
    pub service_id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<models::version::Model> for VersionResponse {
    fn from(m: models::version::Model) -> Self {
        Self {
            id: m.id,
            service_id: m.service_id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
