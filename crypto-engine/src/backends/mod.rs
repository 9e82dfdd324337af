//! Shipped capability providers.
//!
//! Precedence is decided by the slot a provider is configured into, not by
//! the provider itself: the native slot is probed before the software slot
//! for every capability (see [`crate::engine::BackendSet`]).

mod mock;
mod ring;
mod software;

pub use self::mock::MockBackend;
pub use self::ring::RingBackend;
pub use self::software::SoftwareBackend;
