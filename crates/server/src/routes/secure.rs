use axum::Extension;
use tracing::info;

use crate::routes::auth::AuthenticatedUser;

/// Sample protected resource; reachable only through the JWT gate.
#[utoipa::path(get, path = "/api/secure-resources", tag = "secure",
    responses(
        (status = 200, description = "OK"),
        (status = 401, description = "Unauthorized")
    ))]
pub async fn get_resource(Extension(user): Extension<AuthenticatedUser>) -> &'static str {
    info!(username = %user.username, "secure resource accessed");
    "Protected Resource"
}
