//! HTTP inbound adapter exposing REST endpoints.

pub mod avatars;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use envelope::Envelope;
pub use error::{ApiError, ApiResult};
