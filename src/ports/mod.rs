//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the engines and the outside world. Adapters implement these ports.
//!
//! - `CollectionStore<T>` - versioned whole-collection persistence
//! - `EventPublisher` - domain event transport

mod collection_store;
mod event_publisher;

pub use collection_store::{collections, CollectionName, CollectionStore, Revision, Snapshot};
pub use event_publisher::EventPublisher;
