//! SQLite-backed event store.

pub mod repository;
pub mod schema;

pub use repository::EventRepository;
