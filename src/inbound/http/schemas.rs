//! OpenAPI schema wrappers.
//!
//! Concrete schema types keep the domain decoupled from utoipa: handlers
//! reference these in their path annotations while responding with the real
//! domain payloads, whose wire shape matches field for field.

use serde::Serialize;
use utoipa::ToSchema;

/// Wire shape of a stored avatar record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvatarRecordSchema {
    #[schema(example = "avatar_5bd20ecbb8a948dc89edc0cbbaa4bde1")]
    pub id: String,
    #[schema(example = "u1")]
    pub user_id: String,
    #[schema(example = "male1")]
    pub avatar_type: String,
    #[schema(example = "http://x/a.glb")]
    pub avatar_url: String,
    #[schema(example = "male")]
    pub gender: String,
    pub is_active: bool,
    #[schema(example = "2026-08-23T10:00:00Z")]
    pub created_at: String,
    #[schema(example = "2026-08-23T10:00:00Z")]
    pub updated_at: String,
}

/// Envelope carrying an avatar record.
#[derive(Debug, Serialize, ToSchema)]
pub struct AvatarEnvelopeSchema {
    pub data: Option<AvatarRecordSchema>,
    pub error: bool,
    #[schema(example = "Avatar created successfully")]
    pub message: String,
}

/// Envelope for failures and payload-free successes; `data` is always null.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmptyEnvelopeSchema {
    pub data: Option<serde_json::Value>,
    pub error: bool,
    #[schema(example = "Avatar not found")]
    pub message: String,
}
