//! Avatar API handlers.
//!
//! ```text
//! POST   /api/avatar              Create the avatar for a user
//! GET    /api/avatar/{adUserId}   Fetch a user's avatar
//! PUT    /api/avatar/{adUserId}   Replace a user's avatar selection
//! DELETE /api/avatar/{adUserId}   Retire a user's avatar (logical delete)
//! ```
//!
//! Each handler validates presence of required inputs, delegates to the
//! store port, and wraps the outcome in the uniform envelope.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AvatarSelection, AvatarType, AvatarUrl, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    missing_field_error, parse_ad_user_id, parse_avatar_type, parse_gender,
};

/// Request payload for creating an avatar.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvatarRequest {
    #[schema(example = "u1")]
    pub ad_user_id: Option<String>,
    /// Preset avatar type, e.g. `male1`.
    #[schema(example = "male1")]
    pub avatar: Option<String>,
    /// Renderable asset URL; derived from the preset when omitted.
    #[schema(example = "http://x/a.glb")]
    pub avatar_url: Option<String>,
    /// Derived from the preset's gender when omitted.
    #[schema(example = "male")]
    pub gender: Option<String>,
}

/// Request payload for replacing an avatar selection.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvatarRequest {
    #[schema(example = "male2")]
    pub avatar: Option<String>,
    #[schema(example = "http://x/b.glb")]
    pub avatar_url: Option<String>,
    #[schema(example = "male")]
    pub gender: Option<String>,
}

/// Assemble the full selection from the optional request fields.
///
/// `gender` defaults to the preset's gender and `avatarUrl` to the preset
/// asset under `asset_base`, so stored records always carry both.
fn parse_selection(
    avatar: Option<String>,
    avatar_url: Option<String>,
    gender: Option<String>,
    asset_base: &str,
) -> Result<AvatarSelection, Error> {
    let avatar = avatar.ok_or_else(|| missing_field_error("avatar"))?;
    let avatar_type = parse_avatar_type(&avatar)?;
    let gender = match gender {
        Some(raw) => parse_gender(&raw)?,
        None => avatar_type.gender(),
    };
    let avatar_url = match avatar_url {
        Some(raw) => AvatarUrl::new(raw).map_err(|_| missing_field_error("avatarUrl"))?,
        None => preset_asset_url(asset_base, avatar_type)?,
    };
    Ok(AvatarSelection {
        avatar_type,
        avatar_url,
        gender,
    })
}

fn preset_asset_url(asset_base: &str, avatar_type: AvatarType) -> Result<AvatarUrl, Error> {
    let url = format!("{}/{}.glb", asset_base.trim_end_matches('/'), avatar_type);
    AvatarUrl::new(url).map_err(|_| Error::internal("asset base URL is not configured"))
}

/// Create a new avatar for a user.
#[utoipa::path(
    post,
    path = "/api/avatar",
    request_body = CreateAvatarRequest,
    responses(
        (status = 201, description = "Avatar created", body = crate::inbound::http::schemas::AvatarEnvelopeSchema),
        (status = 400, description = "Missing fields or avatar already exists", body = crate::inbound::http::schemas::EmptyEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::EmptyEnvelopeSchema)
    ),
    tags = ["avatars"],
    operation_id = "createAvatar"
)]
#[post("/avatar")]
pub async fn create_avatar(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAvatarRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let raw_user_id = payload
        .ad_user_id
        .ok_or_else(|| missing_field_error("adUserId"))?;
    let user_id = parse_ad_user_id(&raw_user_id)?;
    let selection = parse_selection(
        payload.avatar,
        payload.avatar_url,
        payload.gender,
        &state.asset_base_url,
    )?;

    let record = state.avatars.create(user_id, selection).await?;
    Ok(HttpResponse::Created().json(Envelope::ok(record, "Avatar created successfully")))
}

/// Fetch a user's avatar.
///
/// Retired records are returned as-is with `isActive: false`; logical
/// deletion does not hide them.
#[utoipa::path(
    get,
    path = "/api/avatar/{adUserId}",
    params(
        ("adUserId" = String, Path, description = "Active Directory user identifier")
    ),
    responses(
        (status = 200, description = "Stored avatar", body = crate::inbound::http::schemas::AvatarEnvelopeSchema),
        (status = 400, description = "Blank user identifier", body = crate::inbound::http::schemas::EmptyEnvelopeSchema),
        (status = 404, description = "No avatar for this user", body = crate::inbound::http::schemas::EmptyEnvelopeSchema)
    ),
    tags = ["avatars"],
    operation_id = "getAvatar"
)]
#[get("/avatar/{adUserId}")]
pub async fn get_avatar(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_ad_user_id(&path.into_inner())?;
    let Some(record) = state.avatars.get(&user_id).await? else {
        return Err(Error::not_found("Avatar not found").into());
    };
    Ok(HttpResponse::Ok().json(Envelope::ok(record, "Avatar retrieved successfully")))
}

/// Replace a user's avatar selection.
#[utoipa::path(
    put,
    path = "/api/avatar/{adUserId}",
    params(
        ("adUserId" = String, Path, description = "Active Directory user identifier")
    ),
    request_body = UpdateAvatarRequest,
    responses(
        (status = 200, description = "Updated avatar", body = crate::inbound::http::schemas::AvatarEnvelopeSchema),
        (status = 400, description = "Missing fields", body = crate::inbound::http::schemas::EmptyEnvelopeSchema),
        (status = 404, description = "No avatar for this user", body = crate::inbound::http::schemas::EmptyEnvelopeSchema)
    ),
    tags = ["avatars"],
    operation_id = "updateAvatar"
)]
#[put("/avatar/{adUserId}")]
pub async fn update_avatar(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateAvatarRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_ad_user_id(&path.into_inner())?;
    let payload = payload.into_inner();
    let selection = parse_selection(
        payload.avatar,
        payload.avatar_url,
        payload.gender,
        &state.asset_base_url,
    )?;

    let record = state.avatars.update(&user_id, selection).await?;
    Ok(HttpResponse::Ok().json(Envelope::ok(record, "Avatar updated successfully")))
}

/// Retire a user's avatar.
///
/// The record is marked inactive, never removed; subsequent reads keep
/// returning it and recreation stays blocked.
#[utoipa::path(
    delete,
    path = "/api/avatar/{adUserId}",
    params(
        ("adUserId" = String, Path, description = "Active Directory user identifier")
    ),
    responses(
        (status = 200, description = "Avatar retired", body = crate::inbound::http::schemas::EmptyEnvelopeSchema),
        (status = 400, description = "Blank user identifier", body = crate::inbound::http::schemas::EmptyEnvelopeSchema),
        (status = 404, description = "No avatar for this user", body = crate::inbound::http::schemas::EmptyEnvelopeSchema)
    ),
    tags = ["avatars"],
    operation_id = "deleteAvatar"
)]
#[delete("/avatar/{adUserId}")]
pub async fn delete_avatar(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_ad_user_id(&path.into_inner())?;
    if state.avatars.delete(&user_id).await? {
        Ok(HttpResponse::Ok()
            .json(Envelope::<serde_json::Value>::ok_empty("Avatar deleted successfully")))
    } else {
        Err(Error::not_found("Avatar not found").into())
    }
}
