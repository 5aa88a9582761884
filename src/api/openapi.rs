//! OpenAPI document for the user and health endpoints.

use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "entrada",
        description = "Login and signup API",
        license(name = "BSD-3-Clause")
    ),
    paths(
        handlers::users::create_user,
        handlers::users::login,
        handlers::health::health,
    ),
    components(schemas(
        handlers::users::CreateUserRequest,
        handlers::users::CreatedUser,
    )),
    tags(
        (name = "users", description = "User creation and credential checks"),
        (name = "health", description = "Database liveness probe"),
    )
)]
pub struct ApiDoc;

// axum handler for /openapi.json
pub async fn serve() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
