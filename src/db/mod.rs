//! Database layer for the collaboration graph.
//!
//! SQLite via rusqlite, one shared connection guarded by a mutex. This
//! module owns:
//! - connection management (`client`)
//! - the persisted graph schema (`schema`)
//! - the paginated read path used by the build job (`cursor`)
//! - the buffered bulk write path (`batch_writer`)

pub mod batch_writer;
pub mod client;
pub mod cursor;
pub mod schema;

#[cfg(test)]
pub mod tests;
