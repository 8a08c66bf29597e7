//! Adapters - implementations of port interfaces.
//!
//! - `store` - collection store implementations (in-memory CAS)
//! - `events` - event bus implementations (in-memory)
//! - `http` - axum HTTP surface per bounded context

pub mod events;
pub mod http;
pub mod store;

pub use events::InMemoryEventBus;
pub use store::InMemoryCollectionStore;
