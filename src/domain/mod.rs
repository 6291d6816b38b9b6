//! Domain types and the avatar lifecycle service.
//!
//! Purpose: define the strongly typed avatar record, its value types, the
//! transport-agnostic error payload, and the ports through which inbound and
//! outbound adapters interact with the lifecycle. Document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.

pub mod avatar;
pub mod avatar_service;
pub mod error;
pub mod ports;

pub use self::avatar::{
    AdUserId, AvatarId, AvatarRecord, AvatarSelection, AvatarType, AvatarUrl,
    AvatarValidationError, Gender, ParseAvatarTypeError, ParseGenderError,
};
pub use self::avatar_service::AvatarService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
