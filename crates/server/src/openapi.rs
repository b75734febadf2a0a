use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: String,
}

#[derive(ToSchema)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateVersionRequest {
    pub service_id: String,
    pub name: String,
    pub description: String,
}

#[derive(ToSchema)]
pub struct UpdateVersionRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::services::list,
        crate::routes::services::get_with_versions,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::remove,
        crate::routes::versions::create,
        crate::routes::versions::get,
        crate::routes::versions::update,
        crate::routes::versions::remove,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::secure::get_resource,
    ),
    components(
        schemas(
            HealthResponse,
            CreateServiceRequest,
            UpdateServiceRequest,
            CreateVersionRequest,
            UpdateVersionRequest,
            RegisterRequest,
            LoginRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "services"),
        (name = "versions"),
        (name = "auth"),
        (name = "secure")
    )
)]
pub struct ApiDoc;
