//! The persisted social graph and the query engine over it.
//!
//! - `model`: the value objects a query returns (nodes, edges, the
//!   response subgraph) plus the id-set helpers
//! - `store`: lookups against the NODES/EDGES tables
//! - `engine`: multi-seed neighborhood expansion with combinable set
//!   semantics

pub mod engine;
pub mod model;
pub mod store;

#[cfg(test)]
pub mod tests;
