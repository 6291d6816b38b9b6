//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the driving port and remain testable against any store implementation.

use std::sync::Arc;

use crate::domain::ports::AvatarStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Store implementation selected by configuration.
    pub avatars: Arc<dyn AvatarStore>,
    /// Base URL for preset avatar assets, used when a request omits
    /// `avatarUrl`.
    pub asset_base_url: String,
}

impl HttpState {
    /// Construct state from a store and the preset asset base.
    pub fn new(avatars: Arc<dyn AvatarStore>, asset_base_url: impl Into<String>) -> Self {
        Self {
            avatars,
            asset_base_url: asset_base_url.into(),
        }
    }
}
