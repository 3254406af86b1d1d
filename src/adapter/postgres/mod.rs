//! Postgres-backed stores. Queries are plain runtime `sqlx::query` calls and
//! each one is wrapped in [`instrument::instrumented`].

mod following_store;
mod instrument;
mod mint_store;

pub use following_store::PgFollowingStore;
pub use mint_store::PgMintStore;
