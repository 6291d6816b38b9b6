//! Domain ports defining the edges of the hexagon.
//!
//! The driving port ([`AvatarStore`]) describes what inbound adapters may
//! ask of the domain; the driven port ([`AvatarRepository`]) describes how
//! the domain expects storage adapters to behave. Each driven port exposes a
//! strongly typed error so adapters map their failures into predictable
//! variants.

mod avatar_repository;
mod avatar_store;
mod macros;

pub(crate) use macros::define_port_error;

pub use avatar_repository::{AvatarRepository, AvatarRepositoryError, FixtureAvatarRepository};
pub use avatar_store::AvatarStore;

#[cfg(test)]
pub use avatar_repository::MockAvatarRepository;
