//! # Database module: PostgreSQL connection pool management
//!
//! Provides the shared PostgreSQL pool used by the identity server functions. Gated
//! behind `#[cfg(feature = "server")]` so client (WASM) builds never pull in SQLx.
//!
//! The pool is a lazy, process-wide singleton behind a [`tokio::sync::OnceCell`]. The
//! first call to [`get_pool`] loads [`crate::settings::Settings`], connects with the
//! configured URL and connection limit, and caches the pool.

#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pool::get_pool;
