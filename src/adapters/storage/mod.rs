//! Storage adapters - implementations of the `SessionStore` port.

mod in_memory;
mod postgres;

pub use in_memory::InMemorySessionStore;
pub use postgres::PgSessionStore;
