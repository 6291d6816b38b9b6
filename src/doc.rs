//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API. It registers the avatar CRUD paths, the health probe,
//! and the envelope schema wrappers from the inbound layer. The generated
//! specification backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::health::HealthResponse;
use crate::inbound::http::schemas::{
    AvatarEnvelopeSchema, AvatarRecordSchema, EmptyEnvelopeSchema,
};
use crate::inbound::http::avatars::{CreateAvatarRequest, UpdateAvatarRequest};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Avatar backend API",
        description = "CRUD interface for per-user avatar records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::avatars::create_avatar,
        crate::inbound::http::avatars::get_avatar,
        crate::inbound::http::avatars::update_avatar,
        crate::inbound::http::avatars::delete_avatar,
        crate::inbound::http::health::health,
    ),
    components(schemas(
        AvatarRecordSchema,
        AvatarEnvelopeSchema,
        EmptyEnvelopeSchema,
        CreateAvatarRequest,
        UpdateAvatarRequest,
        HealthResponse,
    )),
    tags(
        (name = "avatars", description = "Per-user avatar records"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
