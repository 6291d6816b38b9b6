//! Driven adapters: storage backends behind the avatar store ports.

pub mod memory;
pub mod remote;

pub use memory::InMemoryAvatarRepository;
pub use remote::RemoteAvatarStore;
